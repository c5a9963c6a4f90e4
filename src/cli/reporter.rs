// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! CLI output reporter with colored formatting

use crate::geometry::{IntersectionReport, MeshStats, RepairReport};
use colored::*;
use std::time::Duration;

/// Number of face pairs listed before the output is truncated
const MAX_LISTED_PAIRS: usize = 20;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report mesh diagnostics
    pub fn report_stats(file: &str, stats: &MeshStats) {
        Self::header("Mesh:", file);

        Self::print_field("Vertices", stats.vertex_count.to_string().cyan());
        Self::print_field("Faces", stats.face_count.to_string().cyan());
        Self::print_field("Half-edges", stats.half_edge_count.to_string().cyan());
        Self::print_field("Surface area", format!("{:.4}", stats.surface_area).cyan());
        Self::print_field("Volume", format!("{:.4}", stats.volume).cyan());

        if let Some(bounds) = stats.bounds {
            let size = bounds.size();
            Self::print_field(
                "Bounds",
                format!(
                    "({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
                    bounds.min.x(),
                    bounds.min.y(),
                    bounds.min.z(),
                    bounds.max.x(),
                    bounds.max.y(),
                    bounds.max.z()
                )
                .normal(),
            );
            Self::print_field(
                "Size",
                format!("{:.3} x {:.3} x {:.3}", size.x(), size.y(), size.z()).normal(),
            );
        }

        if stats.is_watertight {
            Self::print_field("Watertight", "yes".green().bold());
        } else {
            Self::print_field("Watertight", "no".red().bold());
            Self::print_field("Boundary edges", stats.boundary_edges.to_string().yellow());
            Self::print_field("Holes", stats.boundary_loops.to_string().yellow());
        }

        Self::rule();
    }

    /// Report a hole-filling pass
    pub fn report_repair(file: &str, report: &RepairReport, watertight: bool, duration: Duration) {
        Self::header("Repaired:", file);

        Self::print_field("Holes found", report.loops_found.to_string().cyan());
        Self::print_field("Holes filled", report.holes_filled.to_string().cyan());
        Self::print_field("Faces added", report.faces_added.to_string().cyan());
        if report.skipped_loops > 0 {
            Self::print_field("Skipped loops", report.skipped_loops.to_string().yellow());
        }
        for missing in &report.missing_twins {
            Self::report_warning(&missing.to_string());
        }

        let status = if watertight {
            "yes".green().bold()
        } else {
            "no".red().bold()
        };
        Self::print_field("Watertight", status);
        Self::print_field("Time", Self::format_duration(duration).yellow());

        Self::rule();
    }

    /// Report the face pairs of an intersection query
    pub fn report_intersections(label: &str, report: &IntersectionReport, duration: Duration) {
        Self::header("Intersections:", label);

        if report.pairs.is_empty() {
            println!("{} {}", "✅".green(), "No intersecting faces".green().bold());
        } else {
            println!(
                "{} {}",
                "⚠️".yellow(),
                format!("{} intersecting face pairs", report.pairs.len())
                    .yellow()
                    .bold()
            );
            for (a, b) in report.pairs.iter().take(MAX_LISTED_PAIRS) {
                println!("  {} {} {}", a.to_string().cyan(), "x".bright_black(), b.to_string().cyan());
            }
            if report.pairs.len() > MAX_LISTED_PAIRS {
                println!(
                    "  {}",
                    format!("... and {} more", report.pairs.len() - MAX_LISTED_PAIRS).bright_black()
                );
            }
        }

        if !report.coplanar_pairs.is_empty() {
            Self::print_field("Coplanar pairs", report.coplanar_pairs.len().to_string().yellow());
        }

        println!("\n{}", "Performance:".bold());
        Self::print_field("Node pairs", report.node_pairs_visited.to_string().cyan());
        Self::print_field("Triangle tests", report.triangle_tests.to_string().cyan());
        Self::print_field("Time", Self::format_duration(duration).yellow());

        Self::rule();
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn header(title: &str, subject: &str) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", title.bold(), subject.cyan());
        println!("{}", "━".repeat(80).bright_black());
    }

    fn rule() {
        println!("{}", "━".repeat(80).bright_black());
    }

    fn print_field(name: &str, value: ColoredString) {
        println!("  {} {}", format!("{}:", name).bright_black(), value);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
