// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Half-edge mesh representation
//!
//! All vertices, half-edges and faces live in arenas owned by
//! [`TriangleMesh`]; every cross reference (`next`, `twin`, `start`, `face`)
//! is an index into those arenas. Meshes are grown through
//! [`TriangleMesh::add_triangle`], which coalesces bit-identical positions and
//! links twins as soon as both directions of an edge exist.

use super::Vector3;
use crate::error::MeshError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub usize);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Index of a vertex in its mesh
    VertexId,
    "v"
);
arena_id!(
    /// Index of a half-edge in its mesh
    HalfEdgeId,
    "e"
);
arena_id!(
    /// Index of a face in its mesh
    FaceId,
    "f"
);

/// Mesh vertex
#[derive(Debug, Clone)]
pub struct Vertex {
    pub position: Vector3,
    /// One outgoing half-edge, for traversal only
    pub edge: Option<HalfEdgeId>,
}

impl Vertex {
    pub fn new(position: Vector3) -> Self {
        Self {
            position,
            edge: None,
        }
    }
}

/// Directed edge running from `start` to the start vertex of `next`
#[derive(Debug, Clone)]
pub struct HalfEdge {
    pub start: VertexId,
    /// Following half-edge around the owning face
    pub next: Option<HalfEdgeId>,
    /// Opposing half-edge on the adjacent face, `None` on a hole boundary
    pub twin: Option<HalfEdgeId>,
    pub face: Option<FaceId>,
    boundary: bool,
}

impl HalfEdge {
    fn new(start: VertexId) -> Self {
        Self {
            start,
            next: None,
            twin: None,
            face: None,
            boundary: true,
        }
    }

    /// Boundary flag, kept in sync with `twin` by the builder and refreshed
    /// by [`TriangleMesh::update_boundary_edges`]
    pub fn is_boundary(&self) -> bool {
        self.boundary
    }
}

/// Triangle face
#[derive(Debug, Clone)]
pub struct Face {
    /// First half-edge of the face cycle
    pub edge: HalfEdgeId,
    /// Cached unit normal (right-hand rule on the stored winding)
    pub normal: Vector3,
}

/// Triangle mesh with half-edge connectivity
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    vertices: Vec<Vertex>,
    half_edges: Vec<HalfEdge>,
    faces: Vec<Face>,
    /// Ordered vertex pair -> half-edge connecting them
    edge_map: AHashMap<(VertexId, VertexId), HalfEdgeId>,
    /// Exact position -> vertex
    vertex_map: AHashMap<Vector3, VertexId>,
}

impl TriangleMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from a triangle soup, in order
    pub fn from_triangles<I>(triangles: I) -> Self
    where
        I: IntoIterator<Item = [Vector3; 3]>,
    {
        let mut mesh = Self::new();
        for [a, b, c] in triangles {
            mesh.add_triangle(a, b, c);
        }
        mesh
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    pub fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.0]
    }

    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.0]
    }

    /// Mutable access that bypasses the builder.
    ///
    /// The edge and vertex indices are not updated; after editing links by
    /// hand only [`TriangleMesh::validate`] and
    /// [`TriangleMesh::update_boundary_edges`] give meaningful answers.
    pub fn half_edge_mut(&mut self, id: HalfEdgeId) -> &mut HalfEdge {
        &mut self.half_edges[id.0]
    }

    pub fn face_ids(&self) -> impl ExactSizeIterator<Item = FaceId> {
        (0..self.faces.len()).map(FaceId)
    }

    pub fn half_edge_ids(&self) -> impl ExactSizeIterator<Item = HalfEdgeId> {
        (0..self.half_edges.len()).map(HalfEdgeId)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn position(&self, id: VertexId) -> Vector3 {
        self.vertices[id.0].position
    }

    /// Vertex the half-edge points to (start of its `next`)
    pub fn end_vertex(&self, id: HalfEdgeId) -> Option<VertexId> {
        let next = self.half_edges[id.0].next?;
        Some(self.half_edges[next.0].start)
    }

    /// Look up the half-edge running `start -> end`
    pub fn find_half_edge(&self, start: VertexId, end: VertexId) -> Option<HalfEdgeId> {
        self.edge_map.get(&(start, end)).copied()
    }

    /// Return the vertex at exactly `position`, creating it if needed
    pub fn add_vertex(&mut self, position: Vector3) -> VertexId {
        if let Some(&existing) = self.vertex_map.get(&position) {
            return existing;
        }

        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        self.vertex_map.insert(position, id);
        id
    }

    /// Always create a fresh vertex. A position that is already indexed
    /// keeps resolving to its first vertex.
    pub(crate) fn insert_vertex(&mut self, position: Vector3) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        self.vertex_map.entry(position).or_insert(id);
        id
    }

    /// Add a triangle in the given winding order and return its face.
    ///
    /// Half-edges are reused when the same directed edge was added before;
    /// duplicate or degenerate triangles are not rejected.
    pub fn add_triangle(&mut self, v1: Vector3, v2: Vector3, v3: Vector3) -> FaceId {
        let a = self.add_vertex(v1);
        let b = self.add_vertex(v2);
        let c = self.add_vertex(v3);
        self.add_face(a, b, c)
    }

    /// Add a triangle over existing vertices
    pub(crate) fn add_face(&mut self, a: VertexId, b: VertexId, c: VertexId) -> FaceId {
        let e1 = self.find_or_create_half_edge(a, b);
        let e2 = self.find_or_create_half_edge(b, c);
        let e3 = self.find_or_create_half_edge(c, a);

        let face = FaceId(self.faces.len());
        for (edge, next) in [(e1, e2), (e2, e3), (e3, e1)] {
            let he = &mut self.half_edges[edge.0];
            he.next = Some(next);
            he.face = Some(face);
        }

        let normal = triangle_normal(self.position(a), self.position(b), self.position(c));
        self.faces.push(Face { edge: e1, normal });

        self.set_twin(e1, b, a);
        self.set_twin(e2, c, b);
        self.set_twin(e3, a, c);

        face
    }

    pub(crate) fn find_or_create_half_edge(&mut self, start: VertexId, end: VertexId) -> HalfEdgeId {
        if let Some(&edge) = self.edge_map.get(&(start, end)) {
            return edge;
        }

        let id = HalfEdgeId(self.half_edges.len());
        self.half_edges.push(HalfEdge::new(start));
        self.edge_map.insert((start, end), id);
        self.vertices[start.0].edge.get_or_insert(id);
        id
    }

    /// Pair `edge` with the indexed half-edge running `start -> end`
    fn set_twin(&mut self, edge: HalfEdgeId, start: VertexId, end: VertexId) {
        if let Some(&twin) = self.edge_map.get(&(start, end)) {
            if twin != edge {
                self.link_twins(edge, twin);
            }
        }
    }

    pub(crate) fn link_twins(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        let first = &mut self.half_edges[a.0];
        first.twin = Some(b);
        first.boundary = false;
        let second = &mut self.half_edges[b.0];
        second.twin = Some(a);
        second.boundary = false;
    }

    /// Half-edges of a face, following `next` from the face's first edge.
    ///
    /// Fails with `CorruptTopology` unless the cycle closes after exactly
    /// three steps.
    pub fn face_edges(&self, face: FaceId) -> Result<[HalfEdgeId; 3], MeshError> {
        let first = self.faces[face.0].edge;
        let mut edges = [first; 3];
        let mut current = first;

        for slot in edges.iter_mut().skip(1) {
            current = self.next_in_face(face, current)?;
            if current == first {
                return Err(MeshError::corrupt(face, "face cycle closes after fewer than 3 edges"));
            }
            *slot = current;
        }

        if self.next_in_face(face, current)? != first {
            return Err(MeshError::corrupt(face, "face cycle does not return to its first edge within 3 steps"));
        }
        Ok(edges)
    }

    /// Ordered vertices of a face (`edge`, `edge.next`, `edge.next.next`)
    pub fn face_vertices(&self, face: FaceId) -> Result<[VertexId; 3], MeshError> {
        let edges = self.face_edges(face)?;
        let vertices = edges.map(|e| self.half_edges[e.0].start);

        if vertices[0] == vertices[1] || vertices[1] == vertices[2] || vertices[0] == vertices[2] {
            return Err(MeshError::corrupt(face, "face has fewer than 3 distinct vertices"));
        }
        Ok(vertices)
    }

    /// Ordered corner positions of a face
    pub fn face_positions(&self, face: FaceId) -> Result<[Vector3; 3], MeshError> {
        Ok(self.face_vertices(face)?.map(|v| self.position(v)))
    }

    fn next_in_face(&self, face: FaceId, edge: HalfEdgeId) -> Result<HalfEdgeId, MeshError> {
        self.half_edges
            .get(edge.0)
            .and_then(|he| he.next)
            .filter(|next| next.0 < self.half_edges.len())
            .ok_or_else(|| MeshError::corrupt(face, format!("half-edge {edge} has no next edge")))
    }

    /// Check every face cycle
    pub fn validate(&self) -> Result<(), MeshError> {
        for face in self.face_ids() {
            self.face_vertices(face)?;
        }
        Ok(())
    }

    /// Recompute every face normal from its own winding.
    ///
    /// Orientation is not made consistent across faces.
    pub fn recalculate_normals(&mut self) -> Result<(), MeshError> {
        for face in 0..self.faces.len() {
            let [a, b, c] = self.face_edges(FaceId(face))?;
            let normal = triangle_normal(
                self.position(self.half_edges[a.0].start),
                self.position(self.half_edges[b.0].start),
                self.position(self.half_edges[c.0].start),
            );
            self.faces[face].normal = normal;
        }
        Ok(())
    }

    /// Re-derive the boundary flag of every half-edge and return the number
    /// of boundary edges
    pub fn update_boundary_edges(&mut self) -> usize {
        let mut count = 0;
        for edge in &mut self.half_edges {
            edge.boundary = edge.twin.is_none();
            count += usize::from(edge.boundary);
        }
        count
    }

    /// True when every half-edge has a twin
    pub fn is_watertight(&self) -> bool {
        self.half_edges.iter().all(|edge| edge.twin.is_some())
    }

    /// Half-edges without a twin
    pub fn boundary_edges(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.half_edge_ids().filter(|&id| self.half_edges[id.0].twin.is_none())
    }

    /// Group all un-twinned half-edges into hole contours.
    ///
    /// From each unvisited boundary edge the walk steps to `next` and then
    /// rotates through `twin.next` until it reaches another boundary edge.
    /// Degenerate loops (fewer than 3 edges) are returned as well.
    pub fn find_boundary_loops(&self) -> Vec<Vec<HalfEdgeId>> {
        let mut loops = Vec::new();
        let mut visited: AHashSet<HalfEdgeId> = AHashSet::new();
        let step_limit = self.half_edges.len();

        for start in self.boundary_edges() {
            if visited.contains(&start) {
                continue;
            }

            let mut contour = Vec::new();
            let mut current = start;
            loop {
                contour.push(current);
                visited.insert(current);

                match self.next_boundary_edge(current, &visited, step_limit) {
                    Some(next) if next != start && !visited.contains(&next) => current = next,
                    Some(_) => break,
                    None => {
                        tracing::warn!(
                            edge = %current,
                            "boundary walk did not reach another boundary edge; closing contour early"
                        );
                        break;
                    }
                }
            }
            loops.push(contour);
        }

        loops
    }

    /// Boundary edge that continues the contour after `edge`
    fn next_boundary_edge(
        &self,
        edge: HalfEdgeId,
        visited: &AHashSet<HalfEdgeId>,
        step_limit: usize,
    ) -> Option<HalfEdgeId> {
        let mut current = self.half_edges[edge.0].next?;
        for _ in 0..=step_limit {
            let he = &self.half_edges[current.0];
            match he.twin {
                Some(twin) if !visited.contains(&current) => {
                    current = self.half_edges[twin.0].next?;
                }
                _ => return Some(current),
            }
        }
        None
    }

    /// Rebuild the position index after vertices were moved
    pub(crate) fn set_positions(&mut self, positions: &[Vector3]) {
        for (vertex, &position) in self.vertices.iter_mut().zip(positions) {
            vertex.position = position;
        }

        self.vertex_map.clear();
        for (index, vertex) in self.vertices.iter().enumerate() {
            self.vertex_map.entry(vertex.position).or_insert(VertexId(index));
        }
    }
}

/// Unit normal of `a, b, c` from the edge vectors `b - a` and `c - b`
pub fn triangle_normal(a: Vector3, b: Vector3, c: Vector3) -> Vector3 {
    (b - a).cross(&(c - b)).normalize()
}
