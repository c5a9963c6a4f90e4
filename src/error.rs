// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Error types for the mesh core

use crate::geometry::{FaceId, VertexId};
use thiserror::Error;

/// Errors raised by mesh construction, traversal and the intersection predicate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// The two triangle planes are parallel or coplanar, so no intersection
    /// line exists.
    #[error("degenerate geometry: triangle planes are parallel (|n1 x n2|^2 = {cross_length_squared:e})")]
    DegenerateGeometry { cross_length_squared: f32 },

    /// A face cycle is inconsistent (does not close after 3 steps, is not
    /// linked, or visits fewer than 3 distinct vertices).
    #[error("corrupt topology at face {face}: {detail}")]
    CorruptTopology { face: FaceId, detail: String },

    /// Hole filling could not find the reverse half-edge for a new fan edge.
    #[error("missing twin for half-edge {start} -> {end}")]
    MissingTwin { start: VertexId, end: VertexId },
}

impl MeshError {
    pub(crate) fn corrupt(face: FaceId, detail: impl Into<String>) -> Self {
        Self::CorruptTopology {
            face,
            detail: detail.into(),
        }
    }

    /// Whether the error aborts the operation that raised it
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MissingTwin { .. })
    }
}
