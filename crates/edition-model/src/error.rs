use std::path::PathBuf;

use thiserror::Error;

use crate::DateKey;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Text is not a `DD-MM-YYYY` calendar date.
    #[error("invalid edition date '{input}': {reason}")]
    InvalidDateKey { input: String, reason: &'static str },

    #[error("edition {date} must have at least one page")]
    EmptyEdition { date: DateKey },

    #[error("edition {date} appears more than once in the catalog")]
    DuplicateEdition { date: DateKey },

    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog data")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
