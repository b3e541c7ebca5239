use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::core::collector::MetadataCollector;
use crate::models::{display_filename, CollectedMetadata, TagCategory};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ViewMode {
    #[default]
    Sorted,
    Grouped,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no image is open")]
    NothingOpen,
    #[error("failed to serialize metadata: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One displayed key/value line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    pub key: String,
    pub value: String,
}

impl Row {
    fn matches(&self, query: &str) -> bool {
        query.is_empty()
            || self.key.to_ascii_lowercase().contains(query)
            || self.value.to_ascii_lowercase().contains(query)
    }
}

/// The currently open image and how its metadata is being viewed.
#[derive(Clone, Debug, Default)]
pub struct InspectorState {
    pub current: Option<CollectedMetadata>,
    pub view_mode: ViewMode,
    pub search_query: String,
}

impl InspectorState {
    /// Collects `path` and makes it the current image. The previous image,
    /// if any, is dropped.
    pub fn open(&mut self, path: impl AsRef<Path>) -> &CollectedMetadata {
        let path = path.as_ref();
        let collected = MetadataCollector::collect(path);
        info!(
            file = %display_filename(path),
            entries = collected.len(),
            failures = collected.failures.len(),
            "opened image"
        );
        self.current.insert(collected)
    }

    /// Collects the current path again, picking up changes on disk.
    pub fn reload(&mut self) -> Result<&CollectedMetadata, AppError> {
        let path = self.current_path().ok_or(AppError::NothingOpen)?.to_path_buf();
        Ok(self.open(path))
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn has_data(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|collected| collected.path.as_path())
    }

    pub fn current_filename(&self) -> Option<String> {
        self.current_path().map(display_filename)
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Display rows in key order, filtered by the search query.
    pub fn rows(&self) -> Vec<Row> {
        let Some(collected) = &self.current else {
            return Vec::new();
        };

        let query = self.search_query.trim().to_ascii_lowercase();

        collected
            .display_map()
            .into_iter()
            .map(|(key, value)| Row { key, value })
            .filter(|row| row.matches(&query))
            .collect()
    }

    /// Filtered rows bucketed by category, in [`TagCategory::ALL`] order.
    /// Empty categories are left out.
    pub fn grouped_rows(&self) -> Vec<(TagCategory, Vec<Row>)> {
        let mut groups: BTreeMap<TagCategory, Vec<Row>> = BTreeMap::new();
        for row in self.rows() {
            groups.entry(TagCategory::infer(&row.key)).or_default().push(row);
        }

        TagCategory::ALL
            .into_iter()
            .filter_map(|category| groups.remove(&category).map(|rows| (category, rows)))
            .collect()
    }

    /// Plain `key: value` lines, honoring the view mode and search query.
    pub fn as_text(&self) -> Result<String, AppError> {
        if !self.has_data() {
            return Err(AppError::NothingOpen);
        }

        let mut lines = Vec::new();
        match self.view_mode {
            ViewMode::Sorted => {
                lines.extend(self.rows().into_iter().map(render_row));
            }
            ViewMode::Grouped => {
                for (category, rows) in self.grouped_rows() {
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push(format!("[{}]", category.as_str()));
                    lines.extend(rows.into_iter().map(render_row));
                }
            }
        }

        Ok(lines.join("\n"))
    }

    /// The filtered flat map as pretty JSON.
    pub fn to_json(&self) -> Result<String, AppError> {
        if !self.has_data() {
            return Err(AppError::NothingOpen);
        }

        let map: BTreeMap<String, String> = self
            .rows()
            .into_iter()
            .map(|row| (row.key, row.value))
            .collect();
        Ok(serde_json::to_string_pretty(&map)?)
    }
}

fn render_row(row: Row) -> String {
    format!("{}: {}", row.key, row.value)
}
