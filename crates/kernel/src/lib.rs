//! Route Stage Kernel Library
//!
//! Assembles the admin panel's navigation tree from the stage file and the
//! routes plugins contribute. The `routestage` binary wraps it for the
//! command line.

pub mod cli;
pub mod config;
pub mod error;
pub mod plugin;
pub mod route;
pub mod stage;

pub use config::Config;
pub use error::{StageError, StageResult};
