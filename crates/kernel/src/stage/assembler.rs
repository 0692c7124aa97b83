//! Stage assembly: merge built-in routes with plugin routes, drop plugin
//! routes the stage already inlines, order the top level and give every node
//! a unique name.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::route::{
    NameSeed, RandomSeed, RouteEntry, RouteName, RouteNode, RouteRef, SeedGenerator,
};

use super::order::sort_by_order;
use super::tree::{StageEntry, StageRoute, StageTree};

/// Assemble a stage with random seeds for unnamed routes.
pub fn assemble_stage(base: Vec<RouteEntry>, plugins: Vec<RouteRef>) -> StageTree {
    StageAssembler::new().assemble(base, plugins)
}

/// Builds a [`StageTree`] from the stage's base entries and plugin routes.
#[derive(Debug, Clone, Default)]
pub struct StageAssembler<G = RandomSeed> {
    seeds: G,
}

impl StageAssembler<RandomSeed> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: SeedGenerator> StageAssembler<G> {
    /// Use `seeds` for routes that carry no name.
    pub fn with_seeds(seeds: G) -> Self {
        Self { seeds }
    }

    pub fn assemble(&mut self, base: Vec<RouteEntry>, mut plugins: Vec<RouteRef>) -> StageTree {
        let registered = plugins.len();
        filter_plugins(&base, &mut plugins);
        debug!(
            registered,
            inlined = registered - plugins.len(),
            appended = plugins.len(),
            "filtered plugin routes"
        );

        let mut entries = merge_plugins(base, plugins);
        sort_by_order(&mut entries);

        let mut named = HashMap::new();
        let entries = self.name_entries(&entries, &mut named);
        debug!(routes = named.len(), "named stage routes");

        StageTree::new(entries)
    }

    /// Convert entries to stage entries, naming every route.
    ///
    /// `named` maps a definition's address to the name it received so that a
    /// definition reached twice stays one node with one name.
    fn name_entries(
        &mut self,
        entries: &[RouteEntry],
        named: &mut HashMap<*const RouteNode, RouteName>,
    ) -> Vec<StageEntry> {
        entries
            .iter()
            .map(|entry| match entry {
                RouteEntry::Node(node) => StageEntry::Route(self.name_route(node, named)),
                RouteEntry::List(entries) => StageEntry::List(self.name_entries(entries, named)),
                RouteEntry::Placeholder(value) => StageEntry::Placeholder(value.clone()),
            })
            .collect()
    }

    fn name_route(
        &mut self,
        node: &RouteRef,
        named: &mut HashMap<*const RouteNode, RouteName>,
    ) -> StageRoute {
        let name = match named.get(&Arc::as_ptr(node)) {
            Some(name) => name.clone(),
            None => {
                let name = match &node.name {
                    Some(NameSeed::Token(name)) => name.clone(),
                    Some(NameSeed::Label(label)) => RouteName::new(label.as_str()),
                    None => RouteName::new(self.seeds.seed()),
                };
                named.insert(Arc::as_ptr(node), name.clone());
                name
            }
        };

        let children = node
            .children
            .as_deref()
            .map(|children| self.name_entries(children, named));

        StageRoute::new(name, Arc::clone(node), children)
    }
}

/// Remove from `plugins` every route the stage already contains.
///
/// Containment is by identity: a plugin route counts as present only if the
/// very same handle sits somewhere in `entries`, at any depth. Each match
/// removes one occurrence from `plugins`.
pub fn filter_plugins(entries: &[RouteEntry], plugins: &mut Vec<RouteRef>) {
    if plugins.is_empty() {
        return;
    }
    for entry in entries {
        match entry {
            RouteEntry::Node(node) => {
                if let Some(index) = plugins.iter().position(|p| Arc::ptr_eq(p, node)) {
                    plugins.remove(index);
                }
                if let Some(children) = &node.children {
                    filter_plugins(children, plugins);
                }
            }
            RouteEntry::List(entries) => filter_plugins(entries, plugins),
            RouteEntry::Placeholder(_) => {}
        }
        if plugins.is_empty() {
            return;
        }
    }
}

/// Append the remaining plugin routes after the stage's own entries.
pub fn merge_plugins(mut base: Vec<RouteEntry>, plugins: Vec<RouteRef>) -> Vec<RouteEntry> {
    base.extend(plugins.into_iter().map(RouteEntry::Node));
    base
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::route::RouteNode;

    /// Hands out the same seed every time.
    struct FixedSeed(&'static str);

    impl SeedGenerator for FixedSeed {
        fn seed(&mut self) -> String {
            self.0.to_string()
        }
    }

    fn titles(tree: &StageTree) -> Vec<&str> {
        tree.top_level().map(StageRoute::title).collect()
    }

    #[test]
    fn orders_top_level_and_names_every_route() {
        let base = vec![
            RouteNode::folder("A").order(5).into(),
            RouteNode::folder("B").order(1).into(),
        ];
        let tree = assemble_stage(base, Vec::new());

        assert_eq!(titles(&tree), ["B", "A"]);
        let routes: Vec<_> = tree.top_level().collect();
        assert_ne!(routes[0].name(), routes[1].name());
    }

    #[test]
    fn nested_inlined_plugin_is_not_appended_again() {
        let x = RouteNode::view("X", "/x", "plugins/x/X.vue").into_ref();
        let y = RouteNode::view("Y", "/y", "plugins/y/Y.vue").into_ref();
        let base = vec![
            RouteNode::folder("group")
                .children(vec![RouteEntry::Node(Arc::clone(&x))])
                .into(),
        ];

        let mut plugins = vec![Arc::clone(&x), Arc::clone(&y)];
        filter_plugins(&base, &mut plugins);
        assert_eq!(plugins.len(), 1);
        assert!(Arc::ptr_eq(&plugins[0], &y));

        let tree = assemble_stage(base, vec![Arc::clone(&x), Arc::clone(&y)]);
        let xs = tree
            .routes()
            .filter(|r| Arc::ptr_eq(r.definition(), &x))
            .count();
        assert_eq!(xs, 1);
        assert_eq!(titles(&tree), ["group", "Y"]);
    }

    #[test]
    fn structurally_equal_plugin_is_still_appended() {
        let inlined = RouteNode::view("X", "/x", "X.vue").into_ref();
        let lookalike = RouteNode::view("X", "/x", "X.vue").into_ref();

        let tree = assemble_stage(vec![RouteEntry::Node(inlined)], vec![lookalike]);
        assert_eq!(tree.top_level().count(), 2);
    }

    #[test]
    fn plugins_inside_sub_lists_are_found() {
        let x = RouteNode::folder("X").into_ref();
        let base = vec![RouteEntry::List(vec![
            RouteEntry::placeholder(),
            RouteEntry::Node(Arc::clone(&x)),
        ])];

        let mut plugins = vec![x];
        filter_plugins(&base, &mut plugins);
        assert!(plugins.is_empty());
    }

    #[test]
    fn plugins_keep_relative_order_when_appended() {
        let p1 = RouteNode::folder("p1").into_ref();
        let p2 = RouteNode::folder("p2").into_ref();
        let p3 = RouteNode::folder("p3").into_ref();
        let base = vec![RouteEntry::Node(Arc::clone(&p2))];

        let merged = {
            let mut plugins = vec![Arc::clone(&p1), p2, Arc::clone(&p3)];
            filter_plugins(&base, &mut plugins);
            merge_plugins(base, plugins)
        };
        let order: Vec<_> = merged
            .iter()
            .map(|e| e.as_node().unwrap().title.as_str())
            .collect();
        assert_eq!(order, ["p2", "p1", "p3"]);
    }

    #[test]
    fn placeholder_children_are_left_in_place() {
        let base = vec![
            RouteNode::folder("parent")
                .children(vec![RouteEntry::placeholder(), RouteNode::folder("C").into()])
                .into(),
        ];
        let tree = assemble_stage(base, Vec::new());

        let parent = tree.top_level().next().unwrap();
        assert!(matches!(
            parent.children()[0],
            StageEntry::Placeholder(serde_json::Value::Null)
        ));
        let c = parent.children()[1].as_route().unwrap();
        assert_eq!(c.title(), "C");
        assert_ne!(c.name(), parent.name());
    }

    #[test]
    fn pre_minted_names_are_preserved() {
        let about = RouteName::new("about");
        let base = vec![RouteNode::view("测试总览", "/about", "views/about/About.vue")
            .name(about.clone())
            .into()];
        let tree = assemble_stage(base, Vec::new());

        let route = tree.top_level().next().unwrap();
        assert_eq!(route.name(), &about);
        assert_eq!(route.name().id(), about.id());
    }

    #[test]
    fn labels_seed_the_token() {
        let base = vec![RouteNode::folder("Admin").name("admin").into()];
        let tree = assemble_stage(base, Vec::new());
        assert_eq!(tree.top_level().next().unwrap().name().label(), "admin");
    }

    #[test]
    fn identical_seeds_never_collide() {
        let base = vec![
            RouteNode::folder("one").into(),
            RouteNode::folder("two").name("same").into(),
            RouteNode::folder("three").children(vec![RouteNode::folder("four").into()]).into(),
        ];
        let tree = StageAssembler::with_seeds(FixedSeed("same")).assemble(base, Vec::new());

        let names: HashSet<_> = tree.routes().map(|r| r.name().clone()).collect();
        assert_eq!(names.len(), 4);
        assert!(tree.routes().all(|r| r.name().label() == "same"));
    }

    #[test]
    fn shared_definition_keeps_one_name() {
        let shared = RouteNode::folder("shared").into_ref();
        let base = vec![
            RouteEntry::Node(Arc::clone(&shared)),
            RouteNode::folder("holder")
                .children(vec![RouteEntry::Node(Arc::clone(&shared))])
                .into(),
        ];
        let tree = assemble_stage(base, Vec::new());

        let names: Vec<_> = tree
            .routes()
            .filter(|r| Arc::ptr_eq(r.definition(), &shared))
            .map(|r| r.name().clone())
            .collect();
        assert_eq!(names.len(), 2);
        assert_eq!(names[0], names[1]);
    }

    #[test]
    fn empty_inputs_give_empty_tree() {
        let tree = assemble_stage(Vec::new(), Vec::new());
        assert!(tree.is_empty());
        assert_eq!(tree.routes().count(), 0);
    }

    #[test]
    fn empty_plugin_list_leaves_large_tree_untouched() {
        let leaves = |prefix: &str| -> Vec<RouteEntry> {
            (0..200)
                .map(|i| RouteNode::folder(format!("{prefix}{i}")).into())
                .collect()
        };
        let base: Vec<RouteEntry> = (0..50)
            .map(|i| {
                RouteNode::folder(format!("group{i}"))
                    .children(vec![RouteEntry::List(leaves("leaf")), RouteEntry::placeholder()])
                    .into()
            })
            .collect();

        let mut plugins = Vec::new();
        filter_plugins(&base, &mut plugins);
        assert!(plugins.is_empty());

        let merged = merge_plugins(base, plugins);
        assert_eq!(merged.len(), 50);

        let tree = assemble_stage(merged, Vec::new());
        assert_eq!(tree.routes().count(), 50 + 50 * 200);
    }
}
