//! Route stage test utilities.
//!
//! Helpers for integration testing: route fixtures, on-disk plugin
//! directories, and assertions over assembled stages.

use std::collections::HashSet;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use routestage_kernel::route::{RouteEntry, RouteName, RouteNode};
use routestage_kernel::stage::StageTree;

/// A page route with a file path derived from its title.
pub fn test_view(title: &str, route: &str) -> RouteNode {
    RouteNode::view(title, route, format!("views/{title}.vue"))
}

/// A folder holding `children`.
pub fn test_folder(title: &str, children: Vec<RouteEntry>) -> RouteNode {
    RouteNode::folder(title).children(children)
}

/// Every name in the stage, depth-first.
pub fn all_names(tree: &StageTree) -> Vec<RouteName> {
    tree.routes().map(|route| route.name().clone()).collect()
}

/// Panics unless every route in `tree` that comes from a distinct definition
/// carries a distinct name.
pub fn assert_unique_names(tree: &StageTree) {
    let mut seen = HashSet::new();
    let mut definitions = HashSet::new();
    for route in tree.routes() {
        let definition = std::sync::Arc::as_ptr(route.definition());
        if definitions.insert(definition) {
            assert!(
                seen.insert(route.name().clone()),
                "duplicate route name {} on '{}'",
                route.name(),
                route.title()
            );
        }
    }
}

/// Top-level `order` values, `None` for routes without one.
pub fn top_level_orders(tree: &StageTree) -> Vec<Option<i32>> {
    tree.top_level().map(|route| route.order()).collect()
}

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// RAII guard for test directories. Automatically removes the directory
/// on drop, guaranteeing cleanup even if the test panics.
pub struct TestDir(PathBuf);

impl TestDir {
    #[allow(clippy::expect_used)]
    pub fn new(name: &str) -> Self {
        let n = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir()
            .join(format!("routestage_test_{name}_{n}_{}", std::process::id()));
        // Remove leftovers from a previous run, if any
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).expect("failed to create test directory");
        Self(path)
    }

    /// Write `content` to `relative`, creating parent directories.
    #[allow(clippy::expect_used)]
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.0.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent directory");
        }
        std::fs::write(&path, content).expect("failed to write test file");
        path
    }

    /// Write a plugin directory under `plugins/` with a minimal manifest,
    /// extra manifest lines, and a `routes.json`.
    pub fn write_plugin(&self, name: &str, manifest_extra: &str, routes_json: &str) -> PathBuf {
        self.write(
            &format!("plugins/{name}/{name}.info.toml"),
            &format!("name = \"{name}\"\nversion = \"1.0.0\"\n{manifest_extra}\n"),
        );
        self.write(&format!("plugins/{name}/routes.json"), routes_json);
        self.0.join("plugins")
    }
}

impl Deref for TestDir {
    type Target = Path;
    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for TestDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
