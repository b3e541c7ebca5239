pub mod bulk;
pub mod collector;
pub mod error;
pub mod file_info;
pub mod formats;
pub mod gps;
pub mod image_info;
pub mod normalize;
pub mod raw_tags;
pub mod structured;

pub use bulk::BatchCollector;
pub use collector::MetadataCollector;
pub use error::{ExtractError, Result};
