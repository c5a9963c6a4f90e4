// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Triangle-triangle intersection predicate
//!
//! Plane separation test followed by an interval overlap test along the line
//! where the two triangle planes meet. Touching (shared edge or vertex)
//! counts as intersecting. Parallel and coplanar pairs have no such line and
//! are reported as [`MeshError::DegenerateGeometry`].

use super::{triangle_normal, FaceId, TriangleMesh, Vector3};
use crate::error::MeshError;

/// Tolerance for on-plane classification and parallel-plane detection.
///
/// On-plane classification scales it by the distance from the plane's
/// anchor corner once that exceeds 1.
pub const EPSILON: f32 = 1e-6;

/// Plane through a triangle, anchored at its first corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3,
    pub point: Vector3,
}

impl Plane {
    /// Plane of `tri`; the normal is zero when the triangle has no area
    pub fn from_triangle(tri: &[Vector3; 3]) -> Self {
        Self {
            normal: triangle_normal(tri[0], tri[1], tri[2]),
            point: tri[0],
        }
    }

    /// Signed distance, snapped to exactly zero within the scaled tolerance.
    ///
    /// Measured from the anchor corner so that large absolute coordinates do
    /// not leak rounding error into points lying on the plane.
    pub fn signed_distance(&self, point: &Vector3) -> f32 {
        let relative = *point - self.point;
        let distance = self.normal.dot(&relative);
        if distance.abs() <= EPSILON * relative.length().max(1.0) {
            0.0
        } else {
            distance
        }
    }

    fn distances(&self, tri: &[Vector3; 3]) -> [f32; 3] {
        tri.map(|p| self.signed_distance(&p))
    }
}

/// Closed parameter range on the planes' intersection line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f32,
    pub end: f32,
}

impl Interval {
    fn from_params(params: impl IntoIterator<Item = f32>) -> Option<Self> {
        params.into_iter().fold(None, |acc, t| match acc {
            None => Some(Self { start: t, end: t }),
            Some(range) => Some(Self {
                start: range.start.min(t),
                end: range.end.max(t),
            }),
        })
    }
}

/// Inclusive overlap of two intervals
pub fn interval_overlap(a: &Interval, b: &Interval) -> bool {
    !(a.end < b.start || b.end < a.start)
}

/// True when every distance is nonzero and shares one sign
fn strictly_one_side(distances: &[f32; 3]) -> bool {
    distances.iter().all(|&d| d > 0.0) || distances.iter().all(|&d| d < 0.0)
}

/// Segment of the line `origin + t * direction` covered by `tri`, given the
/// snapped distances of its corners to the other triangle's plane
fn line_interval(
    tri: &[Vector3; 3],
    distances: &[f32; 3],
    origin: &Vector3,
    direction: &Vector3,
) -> Option<Interval> {
    let project = |p: Vector3| direction.dot(&(p - *origin));
    let mut params = Vec::with_capacity(3);

    for i in 0..3 {
        if distances[i] == 0.0 {
            params.push(project(tri[i]));
        }
    }

    for (i, j) in [(0, 1), (1, 2), (2, 0)] {
        let (di, dj) = (distances[i], distances[j]);
        if di * dj < 0.0 {
            let crossing = tri[i] + (tri[j] - tri[i]) * (di / (di - dj));
            params.push(project(crossing));
        }
    }

    Interval::from_params(params)
}

/// Test two triangles, each given as an ordered corner loop
pub fn triangles_intersect(a: &[Vector3; 3], b: &[Vector3; 3]) -> Result<bool, MeshError> {
    let plane_a = Plane::from_triangle(a);
    let plane_b = Plane::from_triangle(b);

    let a_to_b = plane_b.distances(a);
    let b_to_a = plane_a.distances(b);

    if strictly_one_side(&a_to_b) && strictly_one_side(&b_to_a) {
        return Ok(false);
    }

    let line = plane_a.normal.cross(&plane_b.normal);
    let cross_length_squared = line.length_squared();
    if cross_length_squared < EPSILON {
        return Err(MeshError::DegenerateGeometry {
            cross_length_squared,
        });
    }
    let direction = line.normalize();
    let origin = a[0];

    // A's interval comes from crossings of B's plane and vice versa
    let Some(interval_a) = line_interval(a, &a_to_b, &origin, &direction) else {
        return Ok(false);
    };
    let Some(interval_b) = line_interval(b, &b_to_a, &origin, &direction) else {
        return Ok(false);
    };

    Ok(interval_overlap(&interval_a, &interval_b))
}

/// Test a face of `mesh_a` against a face of `mesh_b`
pub fn faces_intersect(
    mesh_a: &TriangleMesh,
    face_a: FaceId,
    mesh_b: &TriangleMesh,
    face_b: FaceId,
) -> Result<bool, MeshError> {
    triangles_intersect(&mesh_a.face_positions(face_a)?, &mesh_b.face_positions(face_b)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(points: [[f32; 3]; 3]) -> [Vector3; 3] {
        points.map(Vector3::from)
    }

    fn floor() -> [Vector3; 3] {
        tri([[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]])
    }

    #[test]
    fn test_shared_edge_intersects() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(triangles_intersect(&a, &b).unwrap());
        assert!(triangles_intersect(&b, &a).unwrap());
    }

    #[test]
    fn test_shared_vertex_intersects() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = tri([[0.0, 0.0, 0.0], [-1.0, 0.0, 1.0], [0.0, -1.0, 1.0]]);
        assert!(triangles_intersect(&a, &b).unwrap());
    }

    #[test]
    fn test_piercing_triangle() {
        let b = tri([[1.0, 0.2, -1.0], [1.0, 0.8, -1.0], [1.0, 0.5, 1.0]]);
        assert!(triangles_intersect(&floor(), &b).unwrap());
        assert!(triangles_intersect(&b, &floor()).unwrap());
    }

    #[test]
    fn test_gap_along_line() {
        // Crosses the floor plane but well past the floor's hypotenuse
        let b = tri([[1.0, 3.0, -1.0], [1.0, 5.0, -1.0], [1.0, 4.0, 1.0]]);
        assert!(!triangles_intersect(&floor(), &b).unwrap());
        assert!(!triangles_intersect(&b, &floor()).unwrap());
    }

    #[test]
    fn test_plane_crossed_away_from_triangle() {
        let b = tri([[3.0, -1.0, -1.0], [3.0, 1.0, -1.0], [3.0, 0.0, 1.0]]);
        assert!(!triangles_intersect(&floor(), &b).unwrap());
    }

    #[test]
    fn test_parallel_planes_rejected() {
        let b = tri([[0.0, 0.0, 1.0], [2.0, 0.0, 1.0], [0.0, 2.0, 1.0]]);
        assert!(!triangles_intersect(&floor(), &b).unwrap());
    }

    #[test]
    fn test_coplanar_is_degenerate() {
        let b = tri([[5.0, 5.0, 0.0], [6.0, 5.0, 0.0], [5.0, 6.0, 0.0]]);
        let err = triangles_intersect(&floor(), &b).unwrap_err();
        assert!(matches!(err, MeshError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_zero_area_is_degenerate() {
        let sliver = tri([[0.5, 0.5, -1.0], [0.5, 0.5, -1.0], [0.5, 0.5, 1.0]]);
        assert!(triangles_intersect(&floor(), &sliver).is_err());
    }

    #[test]
    fn test_interval_overlap_inclusive() {
        let a = Interval { start: 0.0, end: 1.0 };
        let b = Interval { start: 1.0, end: 2.0 };
        let c = Interval { start: 1.5, end: 2.0 };
        assert!(interval_overlap(&a, &b));
        assert!(!interval_overlap(&a, &c));
        assert!(!interval_overlap(&c, &a));
    }

    #[test]
    fn test_distance_is_measured_from_anchor() {
        let base = Vector3::new(1200.0, 850.0, 400.0);
        let a = [
            base,
            base + Vector3::new(1.0, 0.0, 0.1),
            base + Vector3::new(0.0, 1.0, 0.2),
        ];
        let plane = Plane::from_triangle(&a);

        assert_eq!(plane.point, base);
        for corner in &a {
            assert_eq!(plane.signed_distance(corner), 0.0);
        }
        let above = base + plane.normal * 0.01;
        assert!((plane.signed_distance(&above) - 0.01).abs() < 1e-3);
    }

    #[test]
    fn test_shared_vertex_far_from_origin() {
        let base = Vector3::new(1200.0, 850.0, 400.0);
        let a = [
            base,
            base + Vector3::new(1.0, 0.0, 0.1),
            base + Vector3::new(0.0, 1.0, 0.2),
        ];
        let b = [
            base + Vector3::new(-0.3, -0.2, 0.9),
            base,
            base + Vector3::new(0.2, -0.4, 0.8),
        ];
        assert!(triangles_intersect(&a, &b).unwrap());
        assert!(triangles_intersect(&b, &a).unwrap());
    }

    #[test]
    fn test_signed_distance_snaps() {
        let plane = Plane::from_triangle(&floor());
        assert_eq!(plane.signed_distance(&Vector3::new(0.3, 0.3, 1e-7)), 0.0);
        assert_eq!(plane.signed_distance(&Vector3::new(0.3, 0.3, 0.5)), 0.5);
    }
}
