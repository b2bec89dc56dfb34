//! The read-only set of known editions.
//!
//! The catalog is supplied once by whatever publishes the editions (a JSON
//! document or a scan of the `papers/` tree) and is never mutated while a
//! viewer session is running. Keys are kept in a `BTreeMap` so the calendar
//! ordering of [`DateKey`] gives newest-first iteration for free.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

use crate::edition::EditionRecord;
use crate::error::{ModelError, Result};
use crate::{DateKey, Edition};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditionCatalog {
    editions: BTreeMap<DateKey, Edition>,
}

impl EditionCatalog {
    /// A catalog with no editions yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from editions in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateEdition`] if two editions share a date.
    pub fn from_editions(editions: impl IntoIterator<Item = Edition>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for edition in editions {
            let date = edition.date();
            if map.insert(date, edition).is_some() {
                return Err(ModelError::DuplicateEdition { date });
            }
        }
        Ok(Self { editions: map })
    }

    /// Build a catalog from the `"DD-MM-YYYY" -> { pageCount, documentName }`
    /// data contract.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, malformed or repeated date keys and zero page
    /// counts.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let RecordEntries(records) = serde_json::from_str(json)?;
        let editions = records
            .into_iter()
            .map(|(key, record)| {
                let date = DateKey::parse(&key)?;
                Edition::new(date, record.page_count, record.document_name)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_editions(editions)
    }

    /// Render the catalog back into the data contract.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut out = serde_json::Map::new();
        for edition in self.editions_descending() {
            out.insert(
                edition.date().to_string(),
                serde_json::to_value(edition.to_record())?,
            );
        }
        Ok(serde_json::to_string_pretty(&out)?)
    }

    /// Write the data contract to `path`, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Io`] if the directory or file cannot be written.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ModelError::Io {
                operation: "create",
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json + "\n").map_err(|source| ModelError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source,
        })
    }

    /// All dates, newest first.
    pub fn all_dates_descending(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.editions.keys().rev().copied()
    }

    pub fn editions_descending(&self) -> impl Iterator<Item = &Edition> + '_ {
        self.editions.values().rev()
    }

    pub fn newest(&self) -> Option<&Edition> {
        self.editions.values().next_back()
    }

    pub fn get(&self, date: DateKey) -> Option<&Edition> {
        self.editions.get(&date)
    }

    pub fn contains(&self, date: DateKey) -> bool {
        self.editions.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.editions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editions.is_empty()
    }
}

/// Contract entries in document order, repeated keys included.
struct RecordEntries(Vec<(String, EditionRecord)>);

impl<'de> Deserialize<'de> for RecordEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RecordEntries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of edition dates to edition records")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, EditionRecord>()? {
                    entries.push(entry);
                }
                Ok(RecordEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
