use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::DateKey;
use crate::error::{ModelError, Result};

/// File name the publishing step gives every edition's source document.
pub const DEFAULT_DOCUMENT_NAME: &str = "full.pdf";

/// One published issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edition {
    date: DateKey,
    page_count: NonZeroU32,
    document_name: String,
}

impl Edition {
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyEdition`] when `page_count` is zero.
    pub fn new(date: DateKey, page_count: u32, document_name: impl Into<String>) -> Result<Self> {
        let page_count = NonZeroU32::new(page_count).ok_or(ModelError::EmptyEdition { date })?;
        Ok(Self {
            date,
            page_count,
            document_name: document_name.into(),
        })
    }

    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn page_count(&self) -> u32 {
        self.page_count.get()
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    pub(crate) fn to_record(&self) -> EditionRecord {
        EditionRecord {
            page_count: self.page_count(),
            document_name: self.document_name.clone(),
        }
    }
}

/// Per-date entry of the catalog data contract.
///
/// The legacy `{ pages, pdf }` spelling written by older publishing runs is
/// accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionRecord {
    #[serde(alias = "pages")]
    pub page_count: u32,
    #[serde(alias = "pdf", default = "default_document_name")]
    pub document_name: String,
}

fn default_document_name() -> String {
    DEFAULT_DOCUMENT_NAME.to_string()
}
