// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Axis-aligned bounding boxes

use super::{FaceId, TriangleMesh, Vector3};
use crate::error::MeshError;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// An inverted box (`min > max` on some axis) is empty and intersects
/// nothing; it is a valid value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Vector3::splat(f32::INFINITY),
            max: Vector3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vector3>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    /// Bounds of every vertex position in the mesh
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        Self::from_points(mesh.vertices().iter().map(|v| &v.position))
    }

    /// Bounds of one face's three corners
    pub fn from_face(mesh: &TriangleMesh, face: FaceId) -> Result<Self, MeshError> {
        Ok(Self::from_points(&mesh.face_positions(face)?))
    }

    pub fn expand_to_include(&mut self, point: &Vector3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x() > self.max.x() || self.min.y() > self.max.y() || self.min.z() > self.max.z()
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Squared length of the main diagonal, zero for an empty box
    pub fn diagonal_squared(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.size().length_squared()
        }
    }

    /// Inclusive overlap test; boxes that only touch still intersect
    pub fn intersects_aabb(&self, other: &Aabb) -> bool {
        self.min.x() <= other.max.x()
            && self.max.x() >= other.min.x()
            && self.min.y() <= other.max.y()
            && self.max.y() >= other.min.y()
            && self.min.z() <= other.max.z()
            && self.max.z() >= other.min.z()
    }

    /// Overlap test against the bounds of a mesh face
    pub fn intersects_face(&self, mesh: &TriangleMesh, face: FaceId) -> Result<bool, MeshError> {
        Ok(self.intersects_aabb(&Self::from_face(mesh, face)?))
    }

    /// Split at the center into eight octants, x outer, y middle, z inner.
    ///
    /// Octant `i` lies on the upper side of the x split when `i & 4`, the y
    /// split when `i & 2` and the z split when `i & 1`. Neighbouring octants
    /// share their split planes exactly.
    pub fn subdivide(&self) -> [Aabb; 8] {
        let center = self.center();
        let lo = [self.min, center];
        let hi = [center, self.max];

        std::array::from_fn(|i| {
            let (ix, iy, iz) = ((i >> 2) & 1, (i >> 1) & 1, i & 1);
            Aabb::new(
                Vector3::new(lo[ix].x(), lo[iy].y(), lo[iz].z()),
                Vector3::new(hi[ix].x(), hi[iy].y(), hi[iz].z()),
            )
        })
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(&other.min), self.max.max(&other.max))
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
