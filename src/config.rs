// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! Engine configuration

use crate::geometry::{CoplanarPolicy, DescentStrategy, IntersectionQuery, DEFAULT_MAX_DEPTH};
use crate::io::StlFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`EngineConfig::load`]
pub const CONFIG_FILE: &str = "simplestl.toml";

/// Octree settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    pub max_depth: usize,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Intersection query settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectionConfig {
    pub strategy: DescentStrategy,
    pub coplanar: CoplanarPolicy,
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: StlFormat,
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub octree: OctreeConfig,
    pub intersection: IntersectionConfig,
    pub output: OutputConfig,
}

impl EngineConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: EngineConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `simplestl.toml` from the working directory if present, then
    /// apply environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `SIMPLESTL_*` environment variable overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(depth) = var("SIMPLESTL_MAX_DEPTH") {
            self.octree.max_depth = depth
                .trim()
                .parse()
                .with_context(|| format!("Invalid SIMPLESTL_MAX_DEPTH: {depth}"))?;
        }

        if let Some(strategy) = var("SIMPLESTL_STRATEGY") {
            self.intersection.strategy = strategy.parse().map_err(anyhow::Error::msg)?;
        }

        if let Some(coplanar) = var("SIMPLESTL_COPLANAR") {
            self.intersection.coplanar = coplanar.parse().map_err(anyhow::Error::msg)?;
        }

        if let Some(format) = var("SIMPLESTL_STL_FORMAT") {
            self.output.format = format.parse().map_err(anyhow::Error::msg)?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn query(&self) -> IntersectionQuery {
        IntersectionQuery::new(self.intersection.strategy, self.intersection.coplanar)
    }
}
