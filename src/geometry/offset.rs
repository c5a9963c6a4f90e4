// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Uniform surface offset along averaged vertex normals

use super::{TriangleMesh, Vector3};
use crate::error::MeshError;

/// Per-vertex normals: normalized sum of the cached normals of incident faces.
/// Vertices without faces get a zero normal.
pub fn vertex_normals(mesh: &TriangleMesh) -> Result<Vec<Vector3>, MeshError> {
    let mut normals = vec![Vector3::ZERO; mesh.vertex_count()];
    for face in mesh.face_ids() {
        let normal = mesh.face(face).normal;
        for vertex in mesh.face_vertices(face)? {
            normals[vertex.0] += normal;
        }
    }
    Ok(normals.into_iter().map(|n| n.normalize()).collect())
}

/// Move every vertex by `distance` along its vertex normal, then refresh the
/// position index and the face normals.
///
/// Positive distances grow an outward-wound closed mesh. Nothing prevents
/// large negative offsets from folding the surface through itself.
pub fn offset_mesh(mesh: &mut TriangleMesh, distance: f32) -> Result<(), MeshError> {
    let normals = vertex_normals(mesh)?;
    let positions: Vec<Vector3> = mesh
        .vertices()
        .iter()
        .zip(&normals)
        .map(|(vertex, normal)| vertex.position + *normal * distance)
        .collect();

    mesh.set_positions(&positions);
    mesh.recalculate_normals()?;

    tracing::debug!(vertices = positions.len(), distance, "offset mesh");
    Ok(())
}
