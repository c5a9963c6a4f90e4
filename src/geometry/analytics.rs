// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Mesh diagnostics and statistics

use super::{Aabb, TriangleMesh};
use crate::error::MeshError;
use serde::{Deserialize, Serialize};

/// Topology and geometry summary of a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub face_count: usize,
    pub half_edge_count: usize,
    /// Half-edges without a twin
    pub boundary_edges: usize,
    /// Holes, as found by the boundary loop walk
    pub boundary_loops: usize,
    pub is_watertight: bool,
    /// `None` for a mesh without vertices
    pub bounds: Option<Aabb>,
    /// Sum of triangle areas
    pub surface_area: f64,
    /// Enclosed volume; only meaningful for watertight, consistently wound meshes
    pub volume: f64,
}

/// Compute [`MeshStats`]; fails on the first corrupt face
pub fn analyze(mesh: &TriangleMesh) -> Result<MeshStats, MeshError> {
    let mut surface_area = 0.0;
    let mut volume = 0.0;

    for face in mesh.face_ids() {
        let [a, b, c] = mesh.face_positions(face)?;
        surface_area += f64::from((b - a).cross(&(c - a)).length()) / 2.0;
        // Signed volume of the tetrahedron spanned with the origin
        volume += f64::from(a.dot(&b.cross(&c))) / 6.0;
    }

    let bounds = Aabb::from_mesh(mesh);

    Ok(MeshStats {
        vertex_count: mesh.vertex_count(),
        face_count: mesh.face_count(),
        half_edge_count: mesh.half_edge_count(),
        boundary_edges: mesh.boundary_edges().count(),
        boundary_loops: mesh.find_boundary_loops().len(),
        is_watertight: mesh.is_watertight(),
        bounds: (!bounds.is_empty()).then_some(bounds),
        surface_area,
        volume: volume.abs(),
    })
}
