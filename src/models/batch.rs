use std::path::Path;

use crate::models::CollectedMetadata;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    WebP,
    Unknown,
}

impl ImageFormat {
    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProgressEvent {
    pub current: usize,
    pub total: usize,
    pub filename: String,
    pub failed_sources: usize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub collected: usize,
    pub with_failures: usize,
    pub cancelled: usize,
}

impl BatchSummary {
    pub fn from_results(expected_total: usize, results: &[CollectedMetadata]) -> Self {
        let with_failures = results
            .iter()
            .filter(|result| result.source_failures().next().is_some())
            .count();
        let cancelled = expected_total.saturating_sub(results.len());

        Self {
            total: expected_total,
            collected: results.len(),
            with_failures,
            cancelled,
        }
    }
}

pub fn display_filename(path: &Path) -> String {
    path.file_name()
        .map(|value| value.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
