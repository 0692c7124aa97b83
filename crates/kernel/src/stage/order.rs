//! Ordering of top-level stage entries.
//!
//! Entries with an `order` come first, ascending. Entries without one (route
//! nodes that omit it, sub-lists, placeholders) follow in their original
//! relative position. The sort is stable, so equal orders keep authoring
//! order too.

use crate::route::RouteEntry;

use super::tree::StageEntry;

/// Anything that can carry an `order` sort key.
pub trait Ordered {
    fn order(&self) -> Option<i32>;
}

impl Ordered for RouteEntry {
    fn order(&self) -> Option<i32> {
        self.as_node().and_then(|node| node.order)
    }
}

impl Ordered for StageEntry {
    fn order(&self) -> Option<i32> {
        self.as_route().and_then(|route| route.order())
    }
}

/// Stable sort by `order`, missing values last.
pub fn sort_by_order<T: Ordered>(entries: &mut [T]) {
    entries.sort_by_key(|entry| match entry.order() {
        Some(order) => (false, order),
        None => (true, 0),
    });
}
