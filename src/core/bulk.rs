use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    mpsc::Sender,
};

use rayon::prelude::*;
use tracing::info;

use crate::core::collector::MetadataCollector;
use crate::models::{display_filename, BatchSummary, CollectedMetadata, ProgressEvent};

/// Collects many files on the rayon pool. Each file gets its own
/// independent [`MetadataCollector::collect`] call.
pub struct BatchCollector;

impl BatchCollector {
    pub fn collect(paths: &[PathBuf], progress_tx: Sender<ProgressEvent>) -> Vec<CollectedMetadata> {
        Self::collect_with_cancel(paths, progress_tx, None)
    }

    /// Results come back in input order. Files not yet started when the
    /// cancel flag is raised are skipped and missing from the output.
    pub fn collect_with_cancel(
        paths: &[PathBuf],
        progress_tx: Sender<ProgressEvent>,
        cancel_flag: Option<&AtomicBool>,
    ) -> Vec<CollectedMetadata> {
        let total = paths.len();
        let progress_counter = AtomicUsize::new(0);

        info!(total, "collecting metadata");

        let mut indexed: Vec<(usize, CollectedMetadata)> = paths
            .par_iter()
            .enumerate()
            .filter_map(|(index, path)| {
                if let Some(flag) = cancel_flag {
                    if flag.load(Ordering::Relaxed) {
                        return None;
                    }
                }

                let collected = MetadataCollector::collect(path);

                let current = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
                let _ = progress_tx.send(ProgressEvent {
                    current,
                    total,
                    filename: display_filename(path),
                    failed_sources: collected.source_failures().count(),
                });

                Some((index, collected))
            })
            .collect();

        indexed.sort_by_key(|(index, _)| *index);
        let results: Vec<CollectedMetadata> =
            indexed.into_iter().map(|(_, collected)| collected).collect();

        let summary = BatchSummary::from_results(total, &results);
        info!(
            collected = summary.collected,
            with_failures = summary.with_failures,
            cancelled = summary.cancelled,
            "batch finished"
        );

        results
    }
}
