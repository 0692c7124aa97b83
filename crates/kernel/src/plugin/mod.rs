//! Plugin route fragments.
//!
//! Plugins extend the stage with their own routes. Each plugin directory
//! carries a `.info.toml` manifest and a JSON route file; the registry loads
//! them once at startup.

mod error;
mod info_parser;
mod registry;

pub use error::PluginError;
pub use info_parser::{DEFAULT_ROUTES_FILE, PluginInfo};
pub use registry::{Plugin, PluginRegistry};
