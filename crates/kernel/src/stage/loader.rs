//! Loading the stage file: the hand-authored list of built-in routes.

use std::path::Path;

use tracing::info;

use crate::error::{StageError, StageResult};
use crate::plugin::PluginRegistry;
use crate::route::{RandomSeed, RouteEntry, RouteParser};

use super::assembler::StageAssembler;
use super::tree::StageTree;

/// Reads stage files, resolving plugin references against a registry.
#[derive(Debug, Clone, Copy)]
pub struct StageLoader<'a> {
    registry: &'a PluginRegistry,
}

impl<'a> StageLoader<'a> {
    pub fn new(registry: &'a PluginRegistry) -> Self {
        Self { registry }
    }

    /// Read the base entries from a JSON stage file.
    pub fn load_file(&self, path: &Path) -> StageResult<Vec<RouteEntry>> {
        let content = std::fs::read_to_string(path).map_err(|source| StageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value = serde_json::from_str(&content).map_err(|source| StageError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;
        RouteParser::with_registry(self.registry).parse_list(value, &path.display().to_string())
    }

    /// Read the base entries from JSON text.
    pub fn load_str(&self, json: &str) -> StageResult<Vec<RouteEntry>> {
        let value = serde_json::from_str(json).map_err(|source| StageError::InvalidJson {
            path: "<inline>".into(),
            source,
        })?;
        RouteParser::with_registry(self.registry).parse_list(value, "$")
    }
}

/// Load the stage file and assemble it with every registered plugin route.
///
/// This is the startup entry point: call it once and share the returned
/// tree read-only.
pub fn load_stage(
    stage_file: &Path,
    registry: &PluginRegistry,
    seed_length: usize,
) -> StageResult<StageTree> {
    let base = StageLoader::new(registry).load_file(stage_file)?;
    info!(
        stage_file = %stage_file.display(),
        entries = base.len(),
        plugins = registry.len(),
        "assembling stage"
    );
    Ok(StageAssembler::with_seeds(RandomSeed::new(seed_length)).assemble(base, registry.routes()))
}
