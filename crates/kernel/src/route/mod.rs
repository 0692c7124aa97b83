//! Route definitions and unique route names.
//!
//! Definitions come from two places:
//! - the stage file, the hand-authored list of built-in views
//! - plugins, which contribute their own route fragments

mod name;
mod node;
mod parse;

pub use name::{DEFAULT_SEED_LENGTH, NameSeed, RandomSeed, RouteName, SeedGenerator};
pub use node::{RouteEntry, RouteKind, RouteNode, RouteRef};
pub use parse::RouteParser;
