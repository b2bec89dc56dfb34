//! Static file layout of published editions.
//!
//! ```text
//! papers/
//!   07-03-2025/
//!     1.png
//!     2.png
//!     ...
//!     full.pdf
//!     preview.jpg
//! ```
//!
//! Page images are 1-indexed. The layout is produced by the publishing
//! step; this module only names paths inside it and can rebuild a catalog
//! from what is on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::edition::DEFAULT_DOCUMENT_NAME;
use crate::error::{ModelError, Result};
use crate::{DateKey, Edition, EditionCatalog};

/// Default root directory of the layout.
pub const PAPERS_DIR: &str = "papers";

/// Extension of page images.
pub const PAGE_IMAGE_EXTENSION: &str = "png";

/// Link-preview cover stored next to the pages.
pub const PREVIEW_FILE_NAME: &str = "preview.jpg";

const PDF_DOWNLOAD_PREFIX: &str = "Tom-City-Edition-";

/// Name offered when the full edition document is downloaded.
pub fn pdf_download_name(date: DateKey) -> String {
    format!("{PDF_DOWNLOAD_PREFIX}{date}.pdf")
}

/// Paths inside a `papers/` tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperLayout {
    root: PathBuf,
}

impl Default for PaperLayout {
    fn default() -> Self {
        Self::new(PAPERS_DIR)
    }
}

impl PaperLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn edition_dir(&self, date: DateKey) -> PathBuf {
        self.root.join(date.to_string())
    }

    /// `papers/{D}/{P}.png`
    pub fn page_image(&self, date: DateKey, page: u32) -> PathBuf {
        self.edition_dir(date)
            .join(format!("{page}.{PAGE_IMAGE_EXTENSION}"))
    }

    /// `papers/{D}/{documentName}`
    pub fn document(&self, edition: &Edition) -> PathBuf {
        self.edition_dir(edition.date())
            .join(edition.document_name())
    }

    pub fn preview_image(&self, date: DateKey) -> PathBuf {
        self.edition_dir(date).join(PREVIEW_FILE_NAME)
    }

    /// Rebuild a catalog from the directories under the root.
    ///
    /// Directories whose name is not a date key, or which have no `1.png`,
    /// are skipped. A missing root yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Io`] if the root or an edition directory cannot
    /// be listed.
    pub fn scan(&self) -> Result<EditionCatalog> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(root = %self.root.display(), "papers directory missing, no editions yet");
                return Ok(EditionCatalog::empty());
            }
            Err(source) => {
                return Err(ModelError::Io {
                    operation: "list",
                    path: self.root.clone(),
                    source,
                });
            }
        };

        let mut editions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ModelError::Io {
                operation: "list",
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(date) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| DateKey::parse(name).ok())
            else {
                debug!(path = %path.display(), "skipping non-edition directory");
                continue;
            };

            let page_count = self.count_pages(date);
            if page_count == 0 {
                warn!(%date, "edition directory has no page images, skipping");
                continue;
            }
            let document_name = find_document(&path)?;
            editions.push(Edition::new(date, page_count, document_name)?);
        }

        let catalog = EditionCatalog::from_editions(editions)?;
        info!(
            root = %self.root.display(),
            editions = catalog.len(),
            "scanned papers directory"
        );
        Ok(catalog)
    }

    fn count_pages(&self, date: DateKey) -> u32 {
        let mut count = 0;
        while self.page_image(date, count + 1).is_file() {
            count += 1;
        }
        count
    }
}

fn find_document(dir: &Path) -> Result<String> {
    if dir.join(DEFAULT_DOCUMENT_NAME).is_file() {
        return Ok(DEFAULT_DOCUMENT_NAME.to_string());
    }
    let entries = fs::read_dir(dir).map_err(|source| ModelError::Io {
        operation: "list",
        path: dir.to_path_buf(),
        source,
    })?;
    let mut pdfs: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.to_ascii_lowercase().ends_with(".pdf"))
        .collect();
    pdfs.sort();
    match pdfs.into_iter().next() {
        Some(name) => Ok(name),
        None => {
            warn!(dir = %dir.display(), "no source document found, assuming {DEFAULT_DOCUMENT_NAME}");
            Ok(DEFAULT_DOCUMENT_NAME.to_string())
        }
    }
}
