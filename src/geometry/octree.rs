// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Octree over the faces of a mesh
//! Used as the broad phase of face-pair intersection queries

use super::{Aabb, FaceId, TriangleMesh};
use crate::error::MeshError;

/// Default subdivision limit
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Octree node
#[derive(Debug, Clone)]
pub struct OctreeNode {
    /// Bounds of this octant
    pub bounds: Aabb,
    /// Faces whose bounds overlap this octant
    pub faces: Vec<FaceId>,
    /// Octants in [`Aabb::subdivide`] order; `None` for octants with no faces
    pub children: [Option<Box<OctreeNode>>; 8],
}

impl OctreeNode {
    fn leaf(bounds: Aabb, faces: Vec<FaceId>) -> Self {
        Self {
            bounds,
            faces,
            children: Default::default(),
        }
    }

    /// A node is a leaf iff it has no children
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub fn children(&self) -> impl Iterator<Item = &OctreeNode> {
        self.children.iter().filter_map(|child| child.as_deref())
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a OctreeNode>) {
        if self.is_leaf() {
            out.push(self);
        } else {
            for child in self.children() {
                child.collect_leaves(out);
            }
        }
    }

    fn count(&self) -> usize {
        1 + self.children().map(OctreeNode::count).sum::<usize>()
    }

    fn height(&self) -> usize {
        self.children().map(|c| c.height() + 1).max().unwrap_or(0)
    }
}

/// Octree borrowing the mesh it indexes
#[derive(Debug, Clone)]
pub struct Octree<'m> {
    mesh: &'m TriangleMesh,
    root: OctreeNode,
}

impl<'m> Octree<'m> {
    /// Build an octree over every face of `mesh`.
    ///
    /// The root is at depth 0 and holds all faces. A node is split while its
    /// depth is below `max_depth` and it holds more than one face; a face is
    /// assigned to every child octant its bounds overlap, and children that
    /// receive no face are not created.
    pub fn build(mesh: &'m TriangleMesh, max_depth: usize) -> Result<Self, MeshError> {
        let face_bounds = mesh
            .face_ids()
            .map(|face| Aabb::from_face(mesh, face))
            .collect::<Result<Vec<_>, _>>()?;

        let faces: Vec<FaceId> = mesh.face_ids().collect();
        let root = Self::build_recursive(Aabb::from_mesh(mesh), faces, &face_bounds, 0, max_depth);

        let octree = Self { mesh, root };
        tracing::debug!(
            faces = mesh.face_count(),
            nodes = octree.node_count(),
            depth = octree.depth(),
            max_depth,
            "built octree"
        );
        Ok(octree)
    }

    fn build_recursive(
        bounds: Aabb,
        faces: Vec<FaceId>,
        face_bounds: &[Aabb],
        depth: usize,
        max_depth: usize,
    ) -> OctreeNode {
        if depth >= max_depth || faces.len() <= 1 {
            return OctreeNode::leaf(bounds, faces);
        }

        let mut node = OctreeNode::leaf(bounds, Vec::new());
        for (slot, octant) in node.children.iter_mut().zip(bounds.subdivide()) {
            let inside: Vec<FaceId> = faces
                .iter()
                .copied()
                .filter(|face| face_bounds[face.0].intersects_aabb(&octant))
                .collect();

            if !inside.is_empty() {
                *slot = Some(Box::new(Self::build_recursive(
                    octant,
                    inside,
                    face_bounds,
                    depth + 1,
                    max_depth,
                )));
            }
        }

        // Internal nodes keep their face list for callers that inspect it
        node.faces = faces;
        node
    }

    pub fn mesh(&self) -> &'m TriangleMesh {
        self.mesh
    }

    pub fn root(&self) -> &OctreeNode {
        &self.root
    }

    pub fn leaves(&self) -> Vec<&OctreeNode> {
        let mut leaves = Vec::new();
        self.root.collect_leaves(&mut leaves);
        leaves
    }

    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Depth of the deepest node, the root being depth 0
    pub fn depth(&self) -> usize {
        self.root.height()
    }
}
