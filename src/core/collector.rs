use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use tracing::{debug, warn};

use crate::core::error::Result;
use crate::core::file_info;
use crate::core::gps::{derive_gps, GpsDerivation, GPS_COORDINATES_KEY};
use crate::core::image_info;
use crate::core::normalize::clean_value;
use crate::core::raw_tags::RawTagExtractor;
use crate::core::structured::StructuredTagExtractor;
use crate::models::{
    CollectedMetadata, MetadataEntry, RawEntry, RawValue, SourceFailure, SourceKind,
};

/// Runs every metadata source against one file and merges the results.
pub struct MetadataCollector;

impl MetadataCollector {
    /// Never fails: a source that cannot read the file is recorded as a
    /// failure on the result and the remaining sources still run.
    pub fn collect(path: impl AsRef<Path>) -> CollectedMetadata {
        let path = path.as_ref();
        let mut merge = Merge::new(path);

        let structured = StructuredTagExtractor::extract(path);
        let structured_keys: HashSet<String> = match &structured {
            Ok(entries) => entries.iter().map(|(key, _)| key.clone()).collect(),
            Err(_) => HashSet::new(),
        };
        merge.absorb(SourceKind::StructuredTags, structured);

        merge.absorb(
            SourceKind::RawTags,
            RawTagExtractor::extract(path, &structured_keys),
        );

        merge.absorb(SourceKind::ImageProperties, image_info::extract(path));

        merge.absorb(SourceKind::FileProperties, Ok(file_info::probe(path)));
        merge.absorb(SourceKind::FileProperties, file_info::stat(path));

        let gps = derive_gps(&merge.values);
        merge.absorb_gps(gps);

        merge.finish()
    }
}

struct Merge<'a> {
    path: &'a Path,
    values: BTreeMap<String, RawValue>,
    sources: HashMap<String, SourceKind>,
    failures: Vec<SourceFailure>,
}

impl<'a> Merge<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            values: BTreeMap::new(),
            sources: HashMap::new(),
            failures: Vec::new(),
        }
    }

    fn absorb(&mut self, source: SourceKind, result: Result<Vec<RawEntry>>) {
        match result {
            Ok(entries) => {
                debug!(
                    path = %self.path.display(),
                    %source,
                    count = entries.len(),
                    "metadata source collected"
                );
                for (key, value) in entries {
                    self.insert(source, key, value);
                }
            }
            Err(err) => {
                warn!(path = %self.path.display(), %source, "metadata source failed: {err}");
                self.failures.push(SourceFailure::new(source, err.to_string()));
            }
        }
    }

    fn absorb_gps(&mut self, gps: GpsDerivation) {
        match &gps {
            GpsDerivation::Absent => {}
            GpsDerivation::Derived { .. } => {
                if let Some(coordinates) = gps.display_value() {
                    self.insert(
                        SourceKind::GpsDerivation,
                        GPS_COORDINATES_KEY.to_string(),
                        RawValue::text(coordinates),
                    );
                }
            }
            GpsDerivation::Failed(err) => {
                warn!(path = %self.path.display(), "gps conversion failed: {err}");
                self.failures
                    .push(SourceFailure::new(SourceKind::GpsDerivation, err.to_string()));
            }
        }
    }

    fn insert(&mut self, source: SourceKind, key: String, value: RawValue) {
        if let Some(previous) = self.sources.insert(key.clone(), source) {
            if previous != source {
                debug!(
                    path = %self.path.display(),
                    %key,
                    overwritten = %previous,
                    by = %source,
                    "metadata key replaced by later source"
                );
            }
        }
        self.values.insert(key, value);
    }

    fn finish(self) -> CollectedMetadata {
        let mut collected = CollectedMetadata::new(self.path);

        for (key, value) in &self.values {
            let source = self
                .sources
                .get(key)
                .copied()
                .unwrap_or(SourceKind::StructuredTags);
            collected.insert(MetadataEntry::new(key.clone(), clean_value(value), source));
        }

        for failure in self.failures {
            collected.record_failure(failure);
        }

        collected
    }
}
