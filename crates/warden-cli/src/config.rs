//! Optional CLI configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Settings read from the TOML file passed via `--config`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// Default log filter directive, used when `RUST_LOG` is unset and no
    /// `-v` flags are given (e.g. `"warden=debug"`).
    #[serde(default)]
    pub log: Option<String>,

    /// Default bit position to mark in permission tables.
    #[serde(default)]
    pub mark: Option<usize>,
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
