//! Viewer error types.

use edition_model::DateKey;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// The requested edition is not in the catalog.
    #[error("no edition published for {0}")]
    EditionNotFound(DateKey),

    /// A clip was requested before the current page image finished loading.
    #[error("the current page image is not loaded")]
    PageNotReady,
}

pub type Result<T> = std::result::Result<T, ViewerError>;
