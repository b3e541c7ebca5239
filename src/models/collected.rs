use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{CleanValue, FailureKind, MetadataEntry, SourceFailure, SourceKind};

/// Everything one `collect` call found out about a file.
///
/// Data entries and source failures are kept apart; only
/// [`CollectedMetadata::display_map`] folds failures back into the key space
/// under each source's reserved error key.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CollectedMetadata {
    pub path: PathBuf,
    pub entries: BTreeMap<String, MetadataEntry>,
    pub failures: Vec<SourceFailure>,
}

impl CollectedMetadata {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            entries: BTreeMap::new(),
            failures: Vec::new(),
        }
    }

    pub fn insert(&mut self, entry: MetadataEntry) -> Option<MetadataEntry> {
        self.entries.insert(entry.key.clone(), entry)
    }

    pub fn record_failure(&mut self, failure: SourceFailure) {
        self.failures.push(failure);
    }

    pub fn get(&self, key: &str) -> Option<&CleanValue> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(CleanValue::as_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.entries.values()
    }

    pub fn entries_from(&self, source: SourceKind) -> impl Iterator<Item = &MetadataEntry> {
        self.entries.values().filter(move |entry| entry.source == source)
    }

    pub fn failure_for(&self, source: SourceKind) -> Option<&SourceFailure> {
        self.failures.iter().find(|failure| failure.source == source)
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn source_failures(&self) -> impl Iterator<Item = &SourceFailure> {
        self.failures
            .iter()
            .filter(|failure| failure.kind() == FailureKind::Source)
    }

    pub fn gps_coordinates(&self) -> Option<&str> {
        self.get_text(crate::core::gps::GPS_COORDINATES_KEY)
    }

    /// Flat key/value view: nested mappings become `parent.child` keys and
    /// every failure is listed under its source's error key.
    pub fn display_map(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();

        for entry in self.entries.values() {
            entry.value.flatten_into(&entry.key, &mut out);
        }

        for failure in &self.failures {
            out.insert(failure.source.error_key().to_string(), failure.reason.clone());
        }

        out
    }
}
