//! Conversion of JSON route lists into route definitions.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{StageError, StageResult};
use crate::plugin::PluginRegistry;

use super::node::{RouteEntry, RouteNode};

/// Reads JSON route lists.
///
/// With a registry, an object of the form `{"plugin": "<name>"}` is replaced
/// by that plugin's routes, sharing the registry's handles so the assembler
/// recognises them as already present.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteParser<'a> {
    registry: Option<&'a PluginRegistry>,
}

impl<'a> RouteParser<'a> {
    /// A parser that does not resolve plugin references.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: &'a PluginRegistry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// Parse a JSON array of entries. `at` is the location used in errors.
    pub fn parse_list(&self, value: Value, at: &str) -> StageResult<Vec<RouteEntry>> {
        let Value::Array(items) = value else {
            return Err(StageError::NotAList {
                at: at.to_string(),
                found: kind_of(&value),
            });
        };

        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            self.parse_into(item, &format!("{at}[{index}]"), &mut entries)?;
        }
        Ok(entries)
    }

    /// Parse a JSON value that is either one route object or a list of entries.
    pub fn parse_fragment(&self, value: Value, at: &str) -> StageResult<Vec<RouteEntry>> {
        match value {
            Value::Array(_) => self.parse_list(value, at),
            value => {
                let mut entries = Vec::with_capacity(1);
                self.parse_into(value, at, &mut entries)?;
                Ok(entries)
            }
        }
    }

    fn parse_into(&self, value: Value, at: &str, out: &mut Vec<RouteEntry>) -> StageResult<()> {
        match value {
            Value::Object(map) => {
                if let Some(plugin) = plugin_reference(&map) {
                    out.extend(self.resolve_plugin(plugin, at, &map));
                } else {
                    out.push(RouteEntry::Node(self.parse_node(map, at)?.into_ref()));
                }
            }
            Value::Array(_) => out.push(RouteEntry::List(self.parse_list(value, at)?)),
            value => out.push(RouteEntry::Placeholder(value)),
        }
        Ok(())
    }

    fn parse_node(&self, mut map: Map<String, Value>, at: &str) -> StageResult<RouteNode> {
        let children = map.remove("children");
        let mut node: RouteNode = serde_json::from_value(Value::Object(map))
            .map_err(|e| StageError::invalid_route(at, e))?;

        node.children = match children {
            None | Some(Value::Null) => None,
            Some(children @ Value::Array(_)) => {
                Some(self.parse_list(children, &format!("{at}.children"))?)
            }
            Some(other) => {
                return Err(StageError::invalid_route(
                    at,
                    format!("children must be a list, found {}", kind_of(&other)),
                ));
            }
        };

        Ok(node)
    }

    fn resolve_plugin(
        &self,
        plugin: &str,
        at: &str,
        reference: &Map<String, Value>,
    ) -> Vec<RouteEntry> {
        match self.registry.and_then(|registry| registry.get(plugin)) {
            Some(found) => found.routes().iter().cloned().map(RouteEntry::Node).collect(),
            None => {
                warn!(%plugin, %at, "route list references unknown plugin, keeping placeholder");
                vec![RouteEntry::Placeholder(Value::Object(reference.clone()))]
            }
        }
    }
}

fn plugin_reference(map: &Map<String, Value>) -> Option<&str> {
    if map.len() != 1 {
        return None;
    }
    map.get("plugin").and_then(Value::as_str)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
