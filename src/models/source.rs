use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum SourceKind {
    StructuredTags,
    RawTags,
    ImageProperties,
    FileProperties,
    GpsDerivation,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::StructuredTags => "structured tags",
            Self::RawTags => "raw tags",
            Self::ImageProperties => "image properties",
            Self::FileProperties => "file properties",
            Self::GpsDerivation => "gps derivation",
        }
    }

    /// Reserved key under which a failure of this source is shown in a flat
    /// display map.
    pub fn error_key(self) -> &'static str {
        match self {
            Self::StructuredTags => "EXIF_ERROR",
            Self::RawTags => "RAW_EXIF_ERROR",
            Self::ImageProperties => "Image Error",
            Self::FileProperties => "File Info Error",
            Self::GpsDerivation => "GPS Conversion Error",
        }
    }

    pub fn failure_kind(self) -> FailureKind {
        match self {
            Self::GpsDerivation => FailureKind::Derivation,
            _ => FailureKind::Source,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FailureKind {
    /// An extraction source produced nothing usable.
    Source,
    /// Inputs were present but a derived attribute could not be computed.
    Derivation,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub source: SourceKind,
    pub reason: String,
}

impl SourceFailure {
    pub fn new(source: SourceKind, reason: impl Into<String>) -> Self {
        Self {
            source,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.source.failure_kind()
    }
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.source, self.reason)
    }
}
