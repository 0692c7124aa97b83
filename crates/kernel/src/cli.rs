//! Output for the `routestage` subcommands.

use std::fmt::Write;

use crate::plugin::PluginRegistry;
use crate::stage::StageTree;

/// Render the assembled stage as JSON, pretty-printed unless `compact`.
pub fn stage_json(stage: &StageTree, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(stage)
    } else {
        serde_json::to_string_pretty(stage)
    }
}

/// Render discovered plugins as a table, one row per plugin in route order.
pub fn plugin_table(registry: &PluginRegistry) -> String {
    if registry.is_empty() {
        return "No plugins found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<12} {:<8} {:<8} {}",
        "PLUGIN", "VERSION", "WEIGHT", "ROUTES", "DESCRIPTION"
    );
    let _ = writeln!(out, "{}", "-".repeat(72));

    for plugin in registry.plugins() {
        let _ = writeln!(
            out,
            "{:<20} {:<12} {:<8} {:<8} {}",
            plugin.name(),
            plugin.info.version,
            plugin.info.weight,
            plugin.routes().len(),
            plugin.info.description
        );
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::plugin::{Plugin, PluginInfo};
    use crate::route::{RouteEntry, RouteNode};
    use crate::stage::assemble_stage;

    #[test]
    fn empty_registry_table() {
        assert_eq!(plugin_table(&PluginRegistry::new()), "No plugins found.\n");
    }

    #[test]
    fn table_lists_plugins_in_route_order_with_description() {
        let mut mock = PluginInfo::new("mock", "0.3.1");
        mock.weight = 5;
        mock.description = "Mock server management".to_string();
        let mut notice = PluginInfo::new("notice", "1.0.0");
        notice.description = "Announcements".to_string();

        let mut registry = PluginRegistry::new();
        registry.register(Plugin::new(
            mock,
            vec![
                RouteNode::folder("Mock").into_ref(),
                RouteNode::folder("Doc").into_ref(),
            ],
        ));
        registry.register(Plugin::new(notice, vec![RouteNode::folder("Notice").into_ref()]));

        let table = plugin_table(&registry);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("PLUGIN"));
        assert!(lines[0].ends_with("DESCRIPTION"));
        assert!(lines[2].starts_with("notice"));
        assert!(lines[2].ends_with("Announcements"));
        assert!(lines[3].starts_with("mock"));
        assert!(lines[3].contains("0.3.1"));
        assert!(lines[3].ends_with("Mock server management"));
    }

    #[test]
    fn stage_json_renders_builder_fields_and_sub_lists() {
        let tools = RouteNode::folder("Tools")
            .route("/tools")
            .in_nav(false)
            .keep_alive(true)
            .children(vec![RouteEntry::from(vec![
                RouteNode::view("Postman", "/tools/postman", "views/postman/Postman.vue").into(),
                RouteEntry::placeholder(),
            ])]);
        let stage = assemble_stage(vec![tools.into()], Vec::new());

        let compact = stage_json(&stage, true).unwrap();
        assert!(!compact.contains('\n'));

        let pretty = stage_json(&stage, false).unwrap();
        assert!(pretty.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        let tools = &value[0];
        assert_eq!(tools["route"], "/tools");
        assert_eq!(tools["inNav"], false);
        assert_eq!(tools["keepAlive"], true);
        assert_eq!(tools["children"][0][0]["title"], "Postman");
        assert!(tools["children"][0][1].is_null());
        assert_eq!(serde_json::from_str::<serde_json::Value>(&compact).unwrap(), value);
    }
}
