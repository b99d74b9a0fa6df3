//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `--config PATH` (must exist)
//! 2. `$REMATCH_CONFIG` environment variable
//! 3. `~/.config/rematch/config.toml`
//! 4. Built-in defaults (everything is optional)

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use rematch::Limits;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub limits: LimitsConfig,
    pub output: OutputConfig,
}

/// Resource ceilings applied to every line. Unset means unlimited.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_depth: Option<usize>,
    pub max_steps: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix each printed line with its 1-based line number.
    pub line_number: bool,
}

impl LimitsConfig {
    pub fn to_limits(&self) -> Limits {
        Limits {
            max_depth: self.max_depth,
            max_steps: self.max_steps,
        }
    }
}

/// Load config from disk. Returns defaults if no config file exists, unless
/// the path was given explicitly.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        if !p.exists() {
            bail!("config file {} does not exist", p.display());
        }
        return read_config(p);
    }

    match config_path() {
        Some(p) if p.exists() => read_config(&p),
        _ => Ok(Config::default()),
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("REMATCH_CONFIG") {
        return Some(PathBuf::from(p));
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("rematch").join("config.toml"))
}
