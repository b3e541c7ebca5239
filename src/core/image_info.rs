use std::path::Path;

use image::ImageReader;

use crate::core::error::Result;
use crate::models::{RawEntry, RawValue};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ImageProperties {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl ImageProperties {
    /// Decodes the image; the format is sniffed from content, not extension.
    pub fn read(path: &Path) -> Result<Self> {
        let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;

        Ok(Self {
            width: image.width(),
            height: image.height(),
            channels: image.color().channel_count(),
        })
    }

    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    pub fn into_entries(self) -> Vec<RawEntry> {
        vec![
            (String::from("Dimensions"), RawValue::text(self.dimensions())),
            (String::from("Width"), RawValue::unsigned(self.width)),
            (String::from("Height"), RawValue::unsigned(self.height)),
            (String::from("Color Depth"), RawValue::unsigned(self.channels)),
        ]
    }
}

pub fn extract(path: &Path) -> Result<Vec<RawEntry>> {
    ImageProperties::read(path).map(ImageProperties::into_entries)
}
