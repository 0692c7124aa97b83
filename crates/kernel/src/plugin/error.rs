//! Plugin discovery error types with clear, actionable messages.
//!
//! All errors include the plugin name or directory to help integrators
//! quickly find the broken plugin.

use thiserror::Error;

/// Errors that can occur while loading a plugin's routes.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Plugin directory is missing the .info.toml manifest file.
    #[error("plugin '{plugin}': no .info.toml manifest found in {path}")]
    MissingManifest { plugin: String, path: String },

    /// Multiple .info.toml files found in plugin directory.
    #[error("plugin directory '{path}': multiple .info.toml files found, expected exactly one")]
    MultipleManifests { path: String },

    /// The .info.toml file could not be read or parsed.
    #[error("plugin '{plugin}': failed to parse manifest: {details}")]
    InvalidManifest { plugin: String, details: String },

    /// The route file named by the manifest does not exist.
    #[error("plugin '{plugin}': route file not found at {expected_path}")]
    MissingRoutes {
        plugin: String,
        expected_path: String,
    },

    /// The route file could not be read as route definitions.
    #[error("plugin '{plugin}': invalid route file: {details}")]
    InvalidRoutes { plugin: String, details: String },
}

impl PluginError {
    /// Create a missing manifest error.
    pub fn missing_manifest(path: impl Into<String>) -> Self {
        let path = path.into();
        let plugin = std::path::Path::new(&path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self::MissingManifest { plugin, path }
    }

    /// Create an invalid manifest error.
    pub fn invalid_manifest(plugin: impl Into<String>, details: impl ToString) -> Self {
        Self::InvalidManifest {
            plugin: plugin.into(),
            details: details.to_string(),
        }
    }

    /// Create a missing route file error.
    pub fn missing_routes(plugin: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MissingRoutes {
            plugin: plugin.into(),
            expected_path: path.into(),
        }
    }

    /// Create an invalid route file error.
    pub fn invalid_routes(plugin: impl Into<String>, details: impl ToString) -> Self {
        Self::InvalidRoutes {
            plugin: plugin.into(),
            details: details.to_string(),
        }
    }
}
