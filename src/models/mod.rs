mod batch;
mod collected;
mod entry;
mod source;
mod value;

pub use batch::{display_filename, BatchSummary, ImageFormat, ProgressEvent};
pub use collected::CollectedMetadata;
pub use entry::{MetadataEntry, RawEntry, TagCategory};
pub use source::{FailureKind, SourceFailure, SourceKind};
pub use value::{CleanValue, RawValue, Rational, Scalar, SignedRational};
