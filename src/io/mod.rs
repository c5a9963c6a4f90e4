// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! I/O module - STL importing and exporting

mod exporter;
mod importer;

pub use exporter::{export_stl, write_stl, StlFormat};
pub use importer::{load_stl, read_stl};
