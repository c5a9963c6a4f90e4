// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! SimpleSTL CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplestl::cli::Reporter;
use simplestl::geometry::{
    analyze, fill_holes, offset_mesh, CoplanarPolicy, DescentStrategy, Octree,
};
use simplestl::io::{export_stl, load_stl, StlFormat};
use simplestl::{EngineConfig, MeshError};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;

#[derive(Parser)]
#[command(name = "simplestl")]
#[command(about = "SimpleSTL - half-edge mesh diagnostics, repair and intersection detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./simplestl.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print topology and geometry statistics of an STL file
    Info {
        /// Input STL file
        file: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Fill every hole of an STL mesh
    Repair {
        /// Input STL file
        file: PathBuf,

        /// Output STL file
        #[arg(short, long)]
        output: PathBuf,

        /// Output encoding (binary, ascii)
        #[arg(short, long)]
        format: Option<StlFormat>,
    },

    /// Report intersecting face pairs between two meshes, or within one
    Intersect {
        /// First STL file
        a: PathBuf,

        /// Second STL file; omit to check the first mesh against itself
        b: Option<PathBuf>,

        /// Octree subdivision limit
        #[arg(long)]
        max_depth: Option<usize>,

        /// Descent strategy (larger-first, exhaustive)
        #[arg(long)]
        strategy: Option<DescentStrategy>,

        /// Handling of coplanar face pairs (abort, skip, collect)
        #[arg(long)]
        coplanar: Option<CoplanarPolicy>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Move every vertex along its averaged normal
    Offset {
        /// Input STL file
        file: PathBuf,

        /// Offset distance, negative to shrink
        #[arg(short, long, allow_hyphen_values = true)]
        distance: f32,

        /// Output STL file
        #[arg(short, long)]
        output: PathBuf,

        /// Output encoding (binary, ascii)
        #[arg(short, long)]
        format: Option<StlFormat>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let mut config = EngineConfig::from_file(path)?;
            config.apply_env()?;
            config
        }
        None => EngineConfig::load()?,
    };

    match cli.command {
        Commands::Info { file, json } => info_command(&file, json),
        Commands::Repair {
            file,
            output,
            format,
        } => repair_command(&file, &output, format.unwrap_or(config.output.format)),
        Commands::Intersect {
            a,
            b,
            max_depth,
            strategy,
            coplanar,
            json,
        } => {
            let mut config = config;
            if let Some(depth) = max_depth {
                config.octree.max_depth = depth;
            }
            if let Some(strategy) = strategy {
                config.intersection.strategy = strategy;
            }
            if let Some(coplanar) = coplanar {
                config.intersection.coplanar = coplanar;
            }
            intersect_command(&a, b.as_deref(), &config, json)
        }
        Commands::Offset {
            file,
            distance,
            output,
            format,
        } => offset_command(&file, distance, &output, format.unwrap_or(config.output.format)),
        Commands::Version => {
            println!("SimpleSTL v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load(path: &Path) -> Result<simplestl::TriangleMesh> {
    if !path.exists() {
        Reporter::report_error(&format!("Input file not found: {}", path.display()));
        std::process::exit(1);
    }
    load_stl(path)
}

fn info_command(file: &Path, json: bool) -> Result<()> {
    let mesh = load(file)?;
    let stats = analyze(&mesh)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        Reporter::report_stats(&file.display().to_string(), &stats);
    }
    Ok(())
}

fn repair_command(file: &Path, output: &Path, format: StlFormat) -> Result<()> {
    let mut mesh = load(file)?;

    let start = Instant::now();
    let report = fill_holes(&mut mesh);
    let duration = start.elapsed();

    Reporter::report_repair(&file.display().to_string(), &report, mesh.is_watertight(), duration);

    export_stl(&mesh, output, format)
        .with_context(|| format!("Failed to write repaired mesh: {}", output.display()))?;
    Reporter::success(&format!("Wrote {} ({format})", output.display()));
    Ok(())
}

fn intersect_command(a: &Path, b: Option<&Path>, config: &EngineConfig, json: bool) -> Result<()> {
    let max_depth = config.octree.max_depth;
    let query = config.query();

    let mesh_a = load(a)?;
    let mesh_b = b.map(load).transpose()?;

    let start = Instant::now();
    let result = match &mesh_b {
        Some(mesh_b) => {
            let (octree_a, octree_b) = rayon::join(
                || Octree::build(&mesh_a, max_depth),
                || Octree::build(mesh_b, max_depth),
            );
            query.run(&octree_a?, &octree_b?)
        }
        None => {
            let octree = Octree::build(&mesh_a, max_depth)?;
            query.run(&octree, &octree)
        }
    };
    let duration = start.elapsed();

    let report = match result {
        Ok(report) => report,
        Err(err @ MeshError::DegenerateGeometry { .. }) => {
            Reporter::report_error(&err.to_string());
            Reporter::report_info("Coplanar face pairs cannot be classified; rerun with --coplanar skip or --coplanar collect");
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let label = match b {
            Some(b) => format!("{} x {}", a.display(), b.display()),
            None => format!("{} (self)", a.display()),
        };
        Reporter::report_intersections(&label, &report, duration);
    }
    Ok(())
}

fn offset_command(file: &Path, distance: f32, output: &Path, format: StlFormat) -> Result<()> {
    let mut mesh = load(file)?;
    offset_mesh(&mut mesh, distance)?;

    export_stl(&mesh, output, format)
        .with_context(|| format!("Failed to write offset mesh: {}", output.display()))?;
    Reporter::success(&format!(
        "Offset {} by {distance} -> {} ({format})",
        file.display(),
        output.display()
    ));
    Ok(())
}
