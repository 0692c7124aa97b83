//! The assembled stage: an immutable, uniquely named route tree.

use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::route::{RouteKind, RouteName, RouteRef};

/// A route after assembly.
#[derive(Debug, Clone)]
pub struct StageRoute {
    name: RouteName,
    node: RouteRef,
    children: Option<Vec<StageEntry>>,
}

impl StageRoute {
    pub(crate) fn new(name: RouteName, node: RouteRef, children: Option<Vec<StageEntry>>) -> Self {
        Self {
            name,
            node,
            children,
        }
    }

    pub fn name(&self) -> &RouteName {
        &self.name
    }

    /// The definition this route was assembled from.
    pub fn definition(&self) -> &RouteRef {
        &self.node
    }

    pub fn title(&self) -> &str {
        &self.node.title
    }

    pub fn kind(&self) -> &RouteKind {
        &self.node.kind
    }

    pub fn route(&self) -> Option<&str> {
        self.node.route.as_deref()
    }

    pub fn file_path(&self) -> Option<&str> {
        self.node.file_path.as_deref()
    }

    pub fn in_nav(&self) -> bool {
        self.node.in_nav
    }

    pub fn keep_alive(&self) -> bool {
        self.node.keep_alive
    }

    pub fn icon(&self) -> Option<&str> {
        self.node.icon.as_deref()
    }

    pub fn order(&self) -> Option<i32> {
        self.node.order
    }

    pub fn permission(&self) -> Option<&[String]> {
        self.node.permission.as_deref()
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.node.extra
    }

    /// Child entries; empty for leaf routes.
    pub fn children(&self) -> &[StageEntry] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// One slot of the assembled tree.
#[derive(Debug, Clone)]
pub enum StageEntry {
    Route(StageRoute),
    List(Vec<StageEntry>),
    /// A non-route slot carried over from the definitions as is.
    Placeholder(Value),
}

impl StageEntry {
    pub fn as_route(&self) -> Option<&StageRoute> {
        match self {
            Self::Route(route) => Some(route),
            _ => None,
        }
    }
}

/// The assembled route tree handed to navigation and routing consumers.
#[derive(Debug, Clone, Default)]
pub struct StageTree {
    entries: Vec<StageEntry>,
}

impl StageTree {
    pub(crate) fn new(entries: Vec<StageEntry>) -> Self {
        Self { entries }
    }

    /// Top-level entries in stage order.
    pub fn entries(&self) -> &[StageEntry] {
        &self.entries
    }

    /// Top-level routes, skipping sub-lists and placeholders.
    pub fn top_level(&self) -> impl Iterator<Item = &StageRoute> {
        self.entries.iter().filter_map(StageEntry::as_route)
    }

    /// Every route at every depth, depth-first in array order.
    pub fn routes(&self) -> Routes<'_> {
        Routes {
            stack: self.entries.iter().rev().collect(),
        }
    }

    pub fn find(&self, name: &RouteName) -> Option<&StageRoute> {
        self.routes().find(|route| route.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Depth-first iterator over all routes of a [`StageTree`].
pub struct Routes<'a> {
    stack: Vec<&'a StageEntry>,
}

impl<'a> Iterator for Routes<'a> {
    type Item = &'a StageRoute;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(entry) = self.stack.pop() {
            match entry {
                StageEntry::Route(route) => {
                    self.stack.extend(route.children().iter().rev());
                    return Some(route);
                }
                StageEntry::List(entries) => self.stack.extend(entries.iter().rev()),
                StageEntry::Placeholder(_) => {}
            }
        }
        None
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct StageRouteRepr<'a> {
    title: &'a str,
    #[serde(rename = "type")]
    kind: &'a RouteKind,
    name: &'a RouteName,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<&'a str>,
    in_nav: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    keep_alive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    permission: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<&'a [StageEntry]>,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

impl Serialize for StageRoute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StageRouteRepr {
            title: self.title(),
            kind: self.kind(),
            name: &self.name,
            route: self.route(),
            file_path: self.file_path(),
            in_nav: self.in_nav(),
            keep_alive: self.keep_alive(),
            icon: self.icon(),
            order: self.order(),
            permission: self.permission(),
            children: self.children.as_deref(),
            extra: self.extra(),
        }
        .serialize(serializer)
    }
}

impl Serialize for StageEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Route(route) => route.serialize(serializer),
            Self::List(entries) => entries.serialize(serializer),
            Self::Placeholder(value) => value.serialize(serializer),
        }
    }
}

impl Serialize for StageTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
