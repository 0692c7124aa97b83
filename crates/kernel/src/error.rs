//! Stage loading error types.
//!
//! Assembly itself cannot fail; these cover reading the stage file and
//! turning JSON into route definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the stage.
#[derive(Debug, Error)]
pub enum StageError {
    /// The stage file could not be read.
    #[error("failed to read stage file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stage file is not valid JSON.
    #[error("stage file {} is not valid JSON: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A route list was expected but something else was found.
    #[error("{at}: expected a list of routes, found {found}")]
    NotAList { at: String, found: &'static str },

    /// A route object could not be read as a route definition.
    #[error("{at}: invalid route: {details}")]
    InvalidRoute { at: String, details: String },
}

impl StageError {
    pub(crate) fn invalid_route(at: &str, details: impl ToString) -> Self {
        Self::InvalidRoute {
            at: at.to_string(),
            details: details.to_string(),
        }
    }
}

/// Result type alias using StageError.
pub type StageResult<T> = Result<T, StageError>;
