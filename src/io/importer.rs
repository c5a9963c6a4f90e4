// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! STL importer

use crate::geometry::{TriangleMesh, Vector3};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Parse a binary or ASCII STL stream into a half-edge mesh.
///
/// Facets are added in file order; facet normals stored in the file are
/// ignored and recomputed from the winding.
pub fn read_stl<R: Read + Seek>(reader: &mut R) -> Result<TriangleMesh> {
    let stl = stl_io::read_stl(reader).context("Failed to read STL data")?;

    let position = |index: usize| -> Result<Vector3> {
        let vertex = stl
            .vertices
            .get(index)
            .with_context(|| format!("STL facet references missing vertex {index}"))?;
        Ok(Vector3::new(vertex[0], vertex[1], vertex[2]))
    };

    let mut mesh = TriangleMesh::new();
    for face in &stl.faces {
        mesh.add_triangle(
            position(face.vertices[0])?,
            position(face.vertices[1])?,
            position(face.vertices[2])?,
        );
    }

    tracing::debug!(
        facets = stl.faces.len(),
        vertices = mesh.vertex_count(),
        "read STL"
    );
    Ok(mesh)
}

/// Load an STL file from disk
pub fn load_stl(path: impl AsRef<Path>) -> Result<TriangleMesh> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open STL file: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    read_stl(&mut reader).with_context(|| format!("Failed to load STL file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const ASCII_TRIANGLES: &str = "solid two
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 1 0 0
      vertex 1 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid two
";

    #[test]
    fn test_read_ascii() -> Result<()> {
        let mut cursor = Cursor::new(ASCII_TRIANGLES.as_bytes());
        let mesh = read_stl(&mut cursor)?;

        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.boundary_edges().count(), 4);
        Ok(())
    }

    #[test]
    fn test_load_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(ASCII_TRIANGLES.as_bytes())?;

        let mesh = load_stl(file.path())?;
        assert_eq!(mesh.face_count(), 2);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = load_stl("/nonexistent/mesh.stl").unwrap_err();
        assert!(err.to_string().contains("Failed to open STL file"));
    }
}
