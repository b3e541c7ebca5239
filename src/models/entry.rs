use serde::{Deserialize, Serialize};

use crate::models::{CleanValue, RawValue, SourceKind};

/// A key/value pair as produced by an extractor.
pub type RawEntry = (String, RawValue);

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: CleanValue,
    pub source: SourceKind,
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, value: CleanValue, source: SourceKind) -> Self {
        Self {
            key: key.into(),
            value,
            source,
        }
    }

    pub fn category(&self) -> TagCategory {
        TagCategory::infer(&self.key)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum TagCategory {
    File,
    Image,
    Camera,
    Capture,
    DateTime,
    Location,
    Description,
    Software,
    Other,
}

impl TagCategory {
    pub const ALL: [TagCategory; 9] = [
        Self::File,
        Self::Image,
        Self::Camera,
        Self::Capture,
        Self::DateTime,
        Self::Location,
        Self::Description,
        Self::Software,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Image => "Image",
            Self::Camera => "Camera",
            Self::Capture => "Capture",
            Self::DateTime => "Date/Time",
            Self::Location => "Location",
            Self::Description => "Description",
            Self::Software => "Software",
            Self::Other => "Other",
        }
    }

    pub fn infer(tag_key: &str) -> TagCategory {
        let key = tag_key.to_ascii_lowercase();

        if matches!(
            key.as_str(),
            "filename" | "file type" | "created" | "modified" | "attributes" | "accessible"
                | "exists"
        ) || key.starts_with("file info")
        {
            TagCategory::File
        } else if key.contains("gps") || key.contains("latitude") || key.contains("longitude") {
            TagCategory::Location
        } else if key.contains("datetime") || key.contains("timestamp") || key.contains("digitized")
        {
            TagCategory::DateTime
        } else if key.contains("make")
            || key.contains("model")
            || key.contains("lens")
            || key.contains("serial")
        {
            TagCategory::Camera
        } else if key.contains("iso")
            || key.contains("aperture")
            || key.contains("shutter")
            || key.contains("exposure")
            || key.contains("flash")
            || key.contains("fnumber")
            || key.contains("focal")
        {
            TagCategory::Capture
        } else if key.contains("pixel")
            || key.contains("resolution")
            || key.contains("orientation")
            || key.contains("colorspace")
            || key.contains("width")
            || key.contains("height")
            || key.contains("dimensions")
            || key.contains("color depth")
            || key == "image error"
        {
            TagCategory::Image
        } else if key.contains("title")
            || key.contains("description")
            || key.contains("caption")
            || key.contains("keyword")
            || key.contains("copyright")
            || key.contains("artist")
        {
            TagCategory::Description
        } else if key.contains("software") || key.contains("editor") || key.contains("processing") {
            TagCategory::Software
        } else {
            TagCategory::Other
        }
    }
}
