// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Geometry module - half-edge meshes, spatial index and intersection tests

mod analytics;
mod bbox;
mod halfedge;
mod intersect;
mod octree;
mod offset;
mod primitives;
mod repair;
mod triangle_intersection;
mod vector;

pub use analytics::{analyze, MeshStats};
pub use bbox::Aabb;
pub use halfedge::{
    triangle_normal, Face, FaceId, HalfEdge, HalfEdgeId, TriangleMesh, Vertex, VertexId,
};
pub use intersect::{
    find_intersecting_faces, CoplanarPolicy, DescentStrategy, FacePair, IntersectionQuery,
    IntersectionReport,
};
pub use octree::{Octree, OctreeNode, DEFAULT_MAX_DEPTH};
pub use offset::{offset_mesh, vertex_normals};
pub use primitives::Primitive;
pub use repair::{fill_holes, RepairReport};
pub use triangle_intersection::{
    faces_intersect, interval_overlap, triangles_intersect, Interval, Plane, EPSILON,
};
pub use vector::Vector3;
