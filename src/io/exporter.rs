// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! STL exporter

use crate::geometry::TriangleMesh;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// STL encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

impl fmt::Display for StlFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Binary => "binary",
            Self::Ascii => "ascii",
        })
    }
}

impl FromStr for StlFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "bin" => Ok(Self::Binary),
            "ascii" | "text" => Ok(Self::Ascii),
            other => Err(format!("unknown STL format '{other}' (expected 'binary' or 'ascii')")),
        }
    }
}

/// Export mesh to an STL file
pub fn export_stl(mesh: &TriangleMesh, path: impl AsRef<Path>, format: StlFormat) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("Failed to create STL file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write_stl(mesh, &mut writer, format)?;
    writer.flush().context("Failed to flush STL file")?;
    Ok(())
}

/// Write every face in order. A corrupt face aborts the export.
pub fn write_stl<W: Write>(mesh: &TriangleMesh, writer: &mut W, format: StlFormat) -> Result<()> {
    match format {
        StlFormat::Binary => write_binary(mesh, writer),
        StlFormat::Ascii => write_ascii(mesh, writer),
    }
}

fn write_binary<W: Write>(mesh: &TriangleMesh, writer: &mut W) -> Result<()> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    let triangles = mesh
        .face_ids()
        .map(|face| -> Result<StlTriangle> {
            let positions = mesh.face_positions(face)?;
            Ok(StlTriangle {
                normal: Normal::new(mesh.face(face).normal.to_array()),
                vertices: positions.map(|p| StlVertex::new(p.to_array())),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    stl_io::write_stl(writer, triangles.iter()).context("Failed to write STL data")?;
    Ok(())
}

fn write_ascii<W: Write>(mesh: &TriangleMesh, writer: &mut W) -> Result<()> {
    writeln!(writer, "solid mesh")?;

    for face in mesh.face_ids() {
        let positions = mesh.face_positions(face)?;
        let normal = mesh.face(face).normal;

        writeln!(
            writer,
            "  facet normal {} {} {}",
            normal.x(),
            normal.y(),
            normal.z()
        )?;
        writeln!(writer, "    outer loop")?;
        for p in positions {
            writeln!(writer, "      vertex {} {} {}", p.x(), p.y(), p.z())?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid mesh")?;
    Ok(())
}
