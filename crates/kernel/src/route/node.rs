//! Route definitions as authored by the stage file and by plugins.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::name::NameSeed;

/// Shared handle to a route definition.
///
/// Handles are compared by identity when plugin routes are deduplicated, so a
/// plugin route inlined into the stage file is the same allocation the plugin
/// registry hands out.
pub type RouteRef = Arc<RouteNode>;

/// What a route node renders as.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RouteKind {
    /// A page backed by a view file.
    #[default]
    View,
    /// A structural container in the sidebar.
    Folder,
    /// A container whose children render as tabs.
    Tab,
    /// Any kind the admin frontend defines beyond the above.
    Other(String),
}

impl From<String> for RouteKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "view" => Self::View,
            "folder" => Self::Folder,
            "tab" => Self::Tab,
            _ => Self::Other(kind),
        }
    }
}

impl From<RouteKind> for String {
    fn from(kind: RouteKind) -> Self {
        match kind {
            RouteKind::View => "view".to_string(),
            RouteKind::Folder => "folder".to_string(),
            RouteKind::Tab => "tab".to_string(),
            RouteKind::Other(kind) => kind,
        }
    }
}

/// A single navigable entity: a page or a grouping container.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    /// Human-readable label.
    #[serde(default)]
    pub title: String,

    #[serde(rename = "type", default)]
    pub kind: RouteKind,

    /// Starting name; absent names get a random seed during assembly.
    #[serde(default)]
    pub name: Option<NameSeed>,

    /// Navigation path (absent for pure containers).
    #[serde(default)]
    pub route: Option<String>,

    /// View implementation this route renders.
    #[serde(default)]
    pub file_path: Option<String>,

    #[serde(default)]
    pub in_nav: bool,

    #[serde(default)]
    pub keep_alive: bool,

    #[serde(default)]
    pub icon: Option<String>,

    /// Sort key; lower sorts first, absent sorts last.
    #[serde(default)]
    pub order: Option<i32>,

    /// Permission labels required to see the route.
    #[serde(default)]
    pub permission: Option<Vec<String>>,

    /// Child entries, filled in by the loader.
    #[serde(skip)]
    pub children: Option<Vec<RouteEntry>>,

    /// Keys the assembler does not interpret, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RouteNode {
    /// A page route.
    pub fn view(
        title: impl Into<String>,
        route: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            kind: RouteKind::View,
            route: Some(route.into()),
            file_path: Some(file_path.into()),
            in_nav: true,
            ..Self::default()
        }
    }

    /// A structural container.
    pub fn folder(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: RouteKind::Folder,
            in_nav: true,
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<NameSeed>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn in_nav(mut self, in_nav: bool) -> Self {
        self.in_nav = in_nav;
        self
    }

    pub fn keep_alive(mut self, keep_alive: bool) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    pub fn permission<I, S>(mut self, permission: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permission = Some(permission.into_iter().map(Into::into).collect());
        self
    }

    pub fn children(mut self, children: Vec<RouteEntry>) -> Self {
        self.children = Some(children);
        self
    }

    /// Wrap into a shared handle.
    pub fn into_ref(self) -> RouteRef {
        Arc::new(self)
    }
}

/// One slot of a route list.
///
/// Route lists are authored loosely: besides nodes they may hold nested
/// sub-lists contributed as a unit, and placeholder values (`null` and the
/// like) that are carried through without interpretation.
#[derive(Debug, Clone)]
pub enum RouteEntry {
    Node(RouteRef),
    List(Vec<RouteEntry>),
    Placeholder(Value),
}

impl RouteEntry {
    /// A `null` slot.
    pub fn placeholder() -> Self {
        Self::Placeholder(Value::Null)
    }

    pub fn as_node(&self) -> Option<&RouteRef> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// True if this slot holds exactly `node` (by identity, not by value).
    pub fn is_same_node(&self, node: &RouteRef) -> bool {
        self.as_node().is_some_and(|own| Arc::ptr_eq(own, node))
    }
}

impl From<RouteRef> for RouteEntry {
    fn from(node: RouteRef) -> Self {
        Self::Node(node)
    }
}

impl From<RouteNode> for RouteEntry {
    fn from(node: RouteNode) -> Self {
        Self::Node(node.into_ref())
    }
}

impl From<Vec<RouteEntry>> for RouteEntry {
    fn from(entries: Vec<RouteEntry>) -> Self {
        Self::List(entries)
    }
}
