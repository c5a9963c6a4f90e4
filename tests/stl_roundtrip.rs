// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! STL file round trips and repair through files

mod common;

use anyhow::Result;
use common::open_cube;
use simplestl::geometry::{analyze, Primitive};
use simplestl::{export_stl, load_stl, repair_file, StlFormat, TriangleMesh};
use tempfile::tempdir;

fn assert_same_mesh(original: &TriangleMesh, loaded: &TriangleMesh) {
    assert_eq!(loaded.vertex_count(), original.vertex_count());
    assert_eq!(loaded.face_count(), original.face_count());
    assert_eq!(loaded.half_edge_count(), original.half_edge_count());
    assert_eq!(loaded.is_watertight(), original.is_watertight());

    for face in original.face_ids() {
        assert_eq!(
            loaded.face_positions(face).unwrap(),
            original.face_positions(face).unwrap()
        );
    }
}

#[test]
fn test_binary_roundtrip() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("sphere.stl");
    let sphere = Primitive::sphere(1.5, 16).to_mesh();

    export_stl(&sphere, &path, StlFormat::Binary)?;
    let loaded = load_stl(&path)?;

    assert_same_mesh(&sphere, &loaded);
    assert!(loaded.is_watertight());
    Ok(())
}

#[test]
fn test_ascii_roundtrip() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("sphere_ascii.stl");
    let sphere = Primitive::sphere(1.5, 16).to_mesh();

    export_stl(&sphere, &path, StlFormat::Ascii)?;
    assert!(std::fs::read_to_string(&path)?.starts_with("solid mesh"));

    let loaded = load_stl(&path)?;
    assert_same_mesh(&sphere, &loaded);
    Ok(())
}

#[test]
fn test_open_mesh_keeps_its_hole() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("open.stl");
    let open = open_cube();

    export_stl(&open, &path, StlFormat::Binary)?;
    let loaded = load_stl(&path)?;

    assert_same_mesh(&open, &loaded);
    let stats = analyze(&loaded)?;
    assert_eq!(stats.boundary_edges, 3);
    assert_eq!(stats.boundary_loops, 1);
    Ok(())
}

#[test]
fn test_repair_through_files() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("open.stl");
    let output = dir.path().join("repaired.stl");

    export_stl(&open_cube(), &input, StlFormat::Ascii)?;
    let (repaired, report) = repair_file(&input)?;
    assert_eq!(report.holes_filled, 1);
    assert!(report.is_clean());
    assert!(repaired.is_watertight());

    export_stl(&repaired, &output, StlFormat::Binary)?;
    let reloaded = load_stl(&output)?;
    assert!(reloaded.is_watertight());
    assert_eq!(reloaded.face_count(), 14);

    let stats = analyze(&reloaded)?;
    assert!((stats.volume - 1.0).abs() < 1e-4);
    Ok(())
}

#[test]
fn test_load_rejects_garbage() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("garbage.stl");
    std::fs::write(&path, b"not an stl file at all")?;

    assert!(load_stl(&path).is_err());
    assert!(load_stl(dir.path().join("missing.stl")).is_err());
    Ok(())
}
