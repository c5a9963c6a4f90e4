// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! SimpleSTL mesh engine
//!
//! Half-edge triangle meshes with vertex deduplication and twin linking, an
//! octree broad phase, an exact triangle-triangle overlap predicate and
//! centroid hole filling. STL files are read and written through [`io`].

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;

pub use config::EngineConfig;
pub use error::MeshError;
pub use geometry::{
    fill_holes, find_intersecting_faces, triangles_intersect, Aabb, FaceId, HalfEdgeId,
    IntersectionQuery, Octree, Primitive, TriangleMesh, Vector3, VertexId,
};
pub use io::{export_stl, load_stl, StlFormat};

use anyhow::Result;
use std::path::Path;

/// Load an STL file and fill every hole in it
pub fn repair_file(path: impl AsRef<Path>) -> Result<(TriangleMesh, geometry::RepairReport)> {
    let mut mesh = load_stl(path)?;
    let report = fill_holes(&mut mesh);
    Ok((mesh, report))
}
