// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Shared fixtures for integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simplestl::geometry::{FacePair, TriangleMesh, Vector3};
use simplestl::{triangles_intersect, MeshError};

/// Corners of the unit cube centered at the origin
pub const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

/// Outward-wound cube triangles; the last one is on the top face
pub const CUBE_TRIANGLES: [[usize; 3]; 12] = [
    [0, 3, 2],
    [0, 2, 1],
    [0, 1, 5],
    [0, 5, 4],
    [2, 3, 7],
    [2, 7, 6],
    [0, 4, 7],
    [0, 7, 3],
    [1, 2, 6],
    [1, 6, 5],
    [4, 5, 6],
    [4, 6, 7],
];

pub fn cube_triangles() -> impl Iterator<Item = [Vector3; 3]> {
    CUBE_TRIANGLES
        .iter()
        .map(|t| t.map(|i| Vector3::from(CUBE_CORNERS[i])))
}

/// Unit cube assembled from 12 triangles
pub fn unit_cube() -> TriangleMesh {
    TriangleMesh::from_triangles(cube_triangles())
}

/// Unit cube with its last triangle left out
pub fn open_cube() -> TriangleMesh {
    TriangleMesh::from_triangles(cube_triangles().take(11))
}

/// Independent random triangles inside a `extent`-sized cube
pub fn random_soup(seed: u64, count: usize, extent: f32, size: f32) -> TriangleMesh {
    let mut rng = StdRng::seed_from_u64(seed);
    let point = |rng: &mut StdRng, around: Vector3| {
        around
            + Vector3::new(
                rng.gen_range(-size..size),
                rng.gen_range(-size..size),
                rng.gen_range(-size..size),
            )
    };

    TriangleMesh::from_triangles((0..count).map(|_| {
        let anchor = Vector3::new(
            rng.gen_range(0.0..extent),
            rng.gen_range(0.0..extent),
            rng.gen_range(0.0..extent),
        );
        [point(&mut rng, anchor), point(&mut rng, anchor), point(&mut rng, anchor)]
    }))
}

/// All-pairs reference for intersection queries; parallel pairs are skipped.
/// With `same_mesh` only pairs `(i, j)` with `i < j` are considered.
pub fn brute_force_pairs(a: &TriangleMesh, b: &TriangleMesh, same_mesh: bool) -> Vec<FacePair> {
    let mut pairs = Vec::new();
    for fa in a.face_ids() {
        for fb in b.face_ids() {
            if same_mesh && fb <= fa {
                continue;
            }
            let ta = a.face_positions(fa).expect("valid face");
            let tb = b.face_positions(fb).expect("valid face");
            match triangles_intersect(&ta, &tb) {
                Ok(true) => pairs.push((fa, fb)),
                Ok(false) | Err(MeshError::DegenerateGeometry { .. }) => {}
                Err(err) => panic!("unexpected error: {err}"),
            }
        }
    }
    pairs
}
