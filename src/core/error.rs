use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("exif error: {0}")]
    Exif(#[from] exif::Error),
    #[error("unreadable metadata: {0}")]
    Unreadable(String),
    #[error("metadata parser panicked: {0}")]
    ParserPanic(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
