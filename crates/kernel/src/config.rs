//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};

use crate::route::DEFAULT_SEED_LENGTH;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the stage file listing built-in routes (default: ./stage.json).
    pub stage_file: PathBuf,

    /// Path to plugins directory (default: ./plugins).
    pub plugins_dir: PathBuf,

    /// Plugin names to skip during discovery (from DISABLED_PLUGINS env var).
    pub disabled_plugins: Vec<String>,

    /// Length of random seeds for routes without a name (default: 6).
    pub name_seed_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stage_file: PathBuf::from("./stage.json"),
            plugins_dir: PathBuf::from("./plugins"),
            disabled_plugins: Vec::new(),
            name_seed_length: DEFAULT_SEED_LENGTH,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let stage_file = env::var("STAGE_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.stage_file);

        let plugins_dir = env::var("PLUGINS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.plugins_dir);

        let disabled_plugins = env::var("DISABLED_PLUGINS")
            .map(|v| parse_list(&v))
            .unwrap_or_default();

        let name_seed_length = match env::var("NAME_SEED_LENGTH") {
            Ok(v) => v
                .parse()
                .context("NAME_SEED_LENGTH must be a valid usize")?,
            Err(_) => defaults.name_seed_length,
        };
        ensure!(name_seed_length > 0, "NAME_SEED_LENGTH must be at least 1");

        Ok(Self {
            stage_file,
            plugins_dir,
            disabled_plugins,
            name_seed_length,
        })
    }
}

/// Split a comma-separated list, dropping empty items.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
