//! Stage assembly.
//!
//! The stage is the admin panel's navigation tree. It is assembled once at
//! startup from the stage file and the plugin registry, and is read-only
//! afterwards.

mod assembler;
mod loader;
pub mod order;
mod tree;

pub use assembler::{StageAssembler, assemble_stage, filter_plugins, merge_plugins};
pub use loader::{StageLoader, load_stage};
pub use tree::{Routes, StageEntry, StageRoute, StageTree};
