//! Data model for the Tom City Edition viewer: edition dates, the edition
//! catalog and the static `papers/` layout the viewer reads from.

pub mod catalog;
pub mod crop;
pub mod date;
pub mod edition;
pub mod error;
pub mod layout;

pub use catalog::EditionCatalog;
pub use crop::CropRegion;
pub use date::DateKey;
pub use edition::{DEFAULT_DOCUMENT_NAME, Edition, EditionRecord};
pub use error::{ModelError, Result};
pub use layout::{PAPERS_DIR, PREVIEW_FILE_NAME, PaperLayout, pdf_download_name};
