//! Plugin registry - discovers plugins and holds their route fragments.
//!
//! Each plugin lives in its own directory under the plugins directory:
//!
//! ```text
//! plugins/
//!   notice/
//!     notice.info.toml
//!     routes.json
//! ```
//!
//! Plugins are ordered by weight (lower = earlier), then by name.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::route::{RouteEntry, RouteParser, RouteRef};

use super::error::PluginError;
use super::info_parser::PluginInfo;

/// A loaded plugin and the routes it contributes.
#[derive(Debug, Clone)]
pub struct Plugin {
    pub info: PluginInfo,
    routes: Vec<RouteRef>,
}

impl Plugin {
    pub fn new(info: PluginInfo, routes: Vec<RouteRef>) -> Self {
        Self { info, routes }
    }

    /// Load a plugin from its directory.
    pub fn load(plugin_dir: &Path) -> Result<Self, PluginError> {
        let manifest = find_manifest(plugin_dir)?;
        let info = PluginInfo::from_file(&manifest)?;

        let routes_path = plugin_dir.join(&info.routes);
        if !routes_path.is_file() {
            return Err(PluginError::missing_routes(
                &info.name,
                routes_path.display().to_string(),
            ));
        }

        let content = std::fs::read_to_string(&routes_path)
            .map_err(|e| PluginError::invalid_routes(&info.name, e))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| PluginError::invalid_routes(&info.name, e))?;
        let entries = RouteParser::new()
            .parse_fragment(value, &info.routes)
            .map_err(|e| PluginError::invalid_routes(&info.name, e))?;

        let mut routes = Vec::with_capacity(entries.len());
        collect_routes(entries, &mut routes);

        Ok(Self { info, routes })
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Top-level routes of this plugin, in file order.
    pub fn routes(&self) -> &[RouteRef] {
        &self.routes
    }
}

/// Sub-lists in a route file are flattened; placeholders contribute nothing.
fn collect_routes(entries: Vec<RouteEntry>, out: &mut Vec<RouteRef>) {
    for entry in entries {
        match entry {
            RouteEntry::Node(node) => out.push(node),
            RouteEntry::List(entries) => collect_routes(entries, out),
            RouteEntry::Placeholder(value) => {
                debug!(%value, "ignoring placeholder in plugin route file");
            }
        }
    }
}

fn find_manifest(plugin_dir: &Path) -> Result<PathBuf, PluginError> {
    let entries = std::fs::read_dir(plugin_dir)
        .map_err(|_| PluginError::missing_manifest(plugin_dir.display().to_string()))?;

    let mut manifests: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".info.toml"))
        })
        .collect();

    match manifests.len() {
        0 => Err(PluginError::missing_manifest(
            plugin_dir.display().to_string(),
        )),
        1 => Ok(manifests.remove(0)),
        _ => Err(PluginError::MultipleManifests {
            path: plugin_dir.display().to_string(),
        }),
    }
}

/// All enabled plugins, in route order.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: Vec<Plugin>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover plugins in `plugins_dir`.
    ///
    /// Plugins named in `disabled` or whose manifest sets
    /// `default_enabled = false` are skipped. A plugin that fails to load is
    /// logged and skipped; it never prevents the others from loading.
    pub fn discover(plugins_dir: &Path, disabled: &[String]) -> Self {
        let mut registry = Self::new();

        if !plugins_dir.exists() {
            info!(
                ?plugins_dir,
                "plugins directory does not exist, nothing to discover"
            );
            return registry;
        }

        let entries = match std::fs::read_dir(plugins_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "failed to read plugins directory");
                return registry;
            }
        };

        let mut dirs: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .collect();

        dirs.sort_by_key(|e| e.file_name());

        for entry in dirs {
            let plugin_dir = entry.path();
            let plugin = match Plugin::load(&plugin_dir) {
                Ok(plugin) => plugin,
                Err(e) => {
                    warn!(dir = %plugin_dir.display(), error = %e, "skipping plugin");
                    continue;
                }
            };

            if disabled.iter().any(|name| name == plugin.name()) {
                info!(plugin = %plugin.name(), "plugin disabled by configuration");
                continue;
            }
            if !plugin.info.default_enabled {
                info!(plugin = %plugin.name(), "plugin not enabled by default");
                continue;
            }

            debug!(
                plugin = %plugin.name(),
                version = %plugin.info.version,
                routes = plugin.routes().len(),
                "discovered plugin"
            );
            registry.register(plugin);
        }

        info!(plugins = registry.len(), "plugin discovery complete");
        registry
    }

    /// Register a plugin, replacing any plugin with the same name.
    pub fn register(&mut self, plugin: Plugin) {
        if let Some(index) = self.plugins.iter().position(|p| p.name() == plugin.name()) {
            warn!(plugin = %plugin.name(), "replacing already registered plugin");
            self.plugins.remove(index);
        }
        self.plugins.push(plugin);
        self.plugins
            .sort_by(|a, b| (a.info.weight, a.name()).cmp(&(b.info.weight, b.name())));
    }

    /// Get a plugin by name.
    pub fn get(&self, name: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.name() == name)
    }

    /// All plugins, in route order.
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// Every plugin's routes, in route order.
    ///
    /// The handles are shared with the registry, so routes the stage file
    /// inlines via `{"plugin": ...}` are recognised by identity.
    pub fn routes(&self) -> Vec<RouteRef> {
        self.plugins
            .iter()
            .flat_map(|p| p.routes().iter().cloned())
            .collect()
    }

    /// Get plugin count.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
