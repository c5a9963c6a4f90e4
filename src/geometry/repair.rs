// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Hole filling
//!
//! Every boundary loop is closed with a fan of triangles around a new vertex
//! at the loop's centroid.

use super::{HalfEdgeId, TriangleMesh, Vector3};
use crate::error::MeshError;

/// Outcome of [`fill_holes`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairReport {
    pub loops_found: usize,
    pub holes_filled: usize,
    pub faces_added: usize,
    /// Loops with fewer than 3 edges, left open
    pub skipped_loops: usize,
    /// Fan edges left without a twin; each is a [`MeshError::MissingTwin`]
    pub missing_twins: Vec<MeshError>,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_loops == 0 && self.missing_twins.is_empty()
    }
}

/// Close every boundary loop of `mesh` in place.
///
/// Unresolved seams do not stop the pass; they are logged and listed in the
/// returned report.
pub fn fill_holes(mesh: &mut TriangleMesh) -> RepairReport {
    let loops = mesh.find_boundary_loops();
    let mut report = RepairReport {
        loops_found: loops.len(),
        ..RepairReport::default()
    };

    for boundary in &loops {
        fill_loop(mesh, boundary, &mut report);
    }

    tracing::debug!(
        loops = report.loops_found,
        filled = report.holes_filled,
        faces_added = report.faces_added,
        missing_twins = report.missing_twins.len(),
        "filled holes"
    );
    report
}

pub(crate) fn fill_loop(mesh: &mut TriangleMesh, boundary: &[HalfEdgeId], report: &mut RepairReport) {
    if boundary.len() < 3 {
        tracing::warn!(edges = boundary.len(), "skipping degenerate boundary loop");
        report.skipped_loops += 1;
        return;
    }

    let corners: Vec<_> = boundary.iter().map(|&edge| mesh.half_edge(edge).start).collect();
    let positions: Vec<Vector3> = corners.iter().map(|&v| mesh.position(v)).collect();
    let Some(centroid) = Vector3::centroid(&positions) else {
        return;
    };

    let first_new_edge = mesh.half_edge_count();
    let center = mesh.insert_vertex(centroid);

    for (i, &start) in corners.iter().enumerate() {
        let end = corners[(i + 1) % corners.len()];
        mesh.add_face(start, center, end);
        report.faces_added += 1;
    }

    // Attach fan edges the builder could not pair to matching open edges
    for index in first_new_edge..mesh.half_edge_count() {
        let edge = HalfEdgeId(index);
        if mesh.half_edge(edge).twin.is_some() {
            continue;
        }

        let start = mesh.half_edge(edge).start;
        let Some(end) = mesh.end_vertex(edge) else {
            continue;
        };

        match mesh.find_half_edge(end, start) {
            Some(twin) if twin != edge && mesh.half_edge(twin).twin.is_none() => {
                mesh.link_twins(edge, twin);
            }
            _ => {
                tracing::warn!(%start, %end, "expected twin not found while filling hole");
                report.missing_twins.push(MeshError::MissingTwin { start, end });
            }
        }
    }

    report.holes_filled += 1;
}
