// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! CLI subsystem for SimpleSTL

pub mod reporter;

pub use reporter::Reporter;
