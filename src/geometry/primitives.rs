// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Closed primitive meshes

use super::{TriangleMesh, Vector3};
use std::f32::consts::PI;

/// Closed, outward-wound primitives built through the half-edge builder
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Axis-aligned cube with edge length `size`
    Cube { size: f32, center: Vector3 },
    /// UV sphere, y-up, with `segments` stacks and slices
    Sphere {
        radius: f32,
        segments: u32,
        center: Vector3,
    },
}

impl Primitive {
    pub fn cube(size: f32, center: Vector3) -> Self {
        Self::Cube { size, center }
    }

    /// Sphere at the origin; fewer than 3 segments are raised to 3
    pub fn sphere(radius: f32, segments: u32) -> Self {
        Self::Sphere {
            radius,
            segments: segments.max(3),
            center: Vector3::ZERO,
        }
    }

    /// The same primitive moved by `offset`
    pub fn translated(self, offset: Vector3) -> Self {
        match self {
            Self::Cube { size, center } => Self::Cube {
                size,
                center: center + offset,
            },
            Self::Sphere {
                radius,
                segments,
                center,
            } => Self::Sphere {
                radius,
                segments,
                center: center + offset,
            },
        }
    }

    pub fn to_mesh(&self) -> TriangleMesh {
        match *self {
            Self::Cube { size, center } => generate_cube_mesh(size, center),
            Self::Sphere {
                radius,
                segments,
                center,
            } => generate_sphere_mesh(radius, segments, center),
        }
    }
}

fn generate_cube_mesh(size: f32, center: Vector3) -> TriangleMesh {
    let h = size / 2.0;
    let corners = [
        Vector3::new(-h, -h, -h),
        Vector3::new(h, -h, -h),
        Vector3::new(h, h, -h),
        Vector3::new(-h, h, -h),
        Vector3::new(-h, -h, h),
        Vector3::new(h, -h, h),
        Vector3::new(h, h, h),
        Vector3::new(-h, h, h),
    ]
    .map(|corner| corner + center);

    const TRIANGLES: [[usize; 3]; 12] = [
        // Bottom (z-)
        [0, 3, 2],
        [0, 2, 1],
        // Front (y-)
        [0, 1, 5],
        [0, 5, 4],
        // Back (y+)
        [2, 3, 7],
        [2, 7, 6],
        // Left (x-)
        [0, 4, 7],
        [0, 7, 3],
        // Right (x+)
        [1, 2, 6],
        [1, 6, 5],
        // Top (z+)
        [4, 5, 6],
        [4, 6, 7],
    ];

    TriangleMesh::from_triangles(TRIANGLES.iter().map(|t| t.map(|i| corners[i])))
}

fn generate_sphere_mesh(radius: f32, segments: u32, center: Vector3) -> TriangleMesh {
    let stacks = segments;
    let slices = segments;

    let north = center + Vector3::new(0.0, radius, 0.0);
    let south = center + Vector3::new(0.0, -radius, 0.0);

    // Ring vertex `j` of stack `i`; the seam wraps to the identical position
    let ring = |i: u32, j: u32| {
        let phi = PI * i as f32 / stacks as f32;
        let theta = 2.0 * PI * (j % slices) as f32 / slices as f32;
        let r = radius * phi.sin();
        center + Vector3::new(r * theta.cos(), radius * phi.cos(), r * theta.sin())
    };

    let mut mesh = TriangleMesh::new();
    for j in 0..slices {
        mesh.add_triangle(north, ring(1, j + 1), ring(1, j));

        for i in 1..stacks - 1 {
            let a = ring(i, j);
            let c = ring(i, j + 1);
            let b = ring(i + 1, j);
            let d = ring(i + 1, j + 1);
            mesh.add_triangle(a, c, b);
            mesh.add_triangle(c, d, b);
        }

        mesh.add_triangle(ring(stacks - 1, j), ring(stacks - 1, j + 1), south);
    }
    mesh
}
