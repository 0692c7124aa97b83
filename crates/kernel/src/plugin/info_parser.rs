//! Parser for plugin `.info.toml` manifest files.
//!
//! Each plugin has a `{name}.info.toml` file that declares metadata:
//! - name, version, description
//! - weight (lower = earlier among plugin routes)
//! - the JSON file holding the plugin's route fragment

use std::path::Path;

use serde::Deserialize;

use super::error::PluginError;

/// Route file used when the manifest does not name one.
pub const DEFAULT_ROUTES_FILE: &str = "routes.json";

/// Plugin metadata parsed from `.info.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginInfo {
    /// Plugin machine name (must match the manifest file name).
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Semantic version (e.g., "1.0.0").
    pub version: String,

    /// Weight for ordering plugin routes (lower = earlier, default 0).
    #[serde(default)]
    pub weight: i32,

    /// Whether the plugin contributes routes unless explicitly disabled.
    #[serde(default = "default_true")]
    pub default_enabled: bool,

    /// Route file, relative to the plugin directory.
    #[serde(default = "default_routes_file")]
    pub routes: String,
}

fn default_true() -> bool {
    true
}

fn default_routes_file() -> String {
    DEFAULT_ROUTES_FILE.to_string()
}

impl PluginInfo {
    /// A manifest for a plugin built in code rather than read from disk.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: version.into(),
            weight: 0,
            default_enabled: true,
            routes: default_routes_file(),
        }
    }

    /// Parse manifest content.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse a `{name}.info.toml` file.
    ///
    /// The `name` inside the manifest must match the file name.
    pub fn from_file(path: &Path) -> Result<Self, PluginError> {
        let file_stem = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(".info.toml"))
            .unwrap_or("unknown")
            .to_string();

        let content = std::fs::read_to_string(path)
            .map_err(|e| PluginError::invalid_manifest(&file_stem, e))?;
        let info = Self::parse(&content).map_err(|e| PluginError::invalid_manifest(&file_stem, e))?;

        if info.name != file_stem {
            return Err(PluginError::invalid_manifest(
                &file_stem,
                format!("manifest name '{}' does not match file name", info.name),
            ));
        }

        Ok(info)
    }
}
