use std::fs::{self, File, Metadata};
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::core::error::Result;
use crate::models::{RawEntry, RawValue};

const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Facts answerable from the path alone. These never fail, so they are
/// reported even for a path that does not exist.
pub fn probe(path: &Path) -> Vec<RawEntry> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let accessible = path.is_file() && File::open(path).is_ok();

    vec![
        (String::from("Filename"), RawValue::text(filename)),
        (String::from("File Type"), RawValue::text(extension)),
        (String::from("Accessible"), RawValue::text(yes_no(accessible))),
        (String::from("Exists"), RawValue::text(yes_no(path.exists()))),
    ]
}

/// Facts that need a successful stat.
pub fn stat(path: &Path) -> Result<Vec<RawEntry>> {
    let metadata = fs::metadata(path)?;

    Ok(vec![
        (
            String::from("Created"),
            RawValue::text(format_time(metadata.created().ok())),
        ),
        (
            String::from("Modified"),
            RawValue::text(format_time(metadata.modified().ok())),
        ),
        (String::from("Attributes"), RawValue::text(attributes(&metadata))),
    ])
}

pub fn format_time(time: Option<SystemTime>) -> String {
    match time {
        Some(time) => DateTime::<Local>::from(time).format(CTIME_FORMAT).to_string(),
        None => String::from("Unavailable"),
    }
}

#[cfg(unix)]
fn attributes(metadata: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("0o{:o}", metadata.permissions().mode())
}

#[cfg(not(unix))]
fn attributes(metadata: &Metadata) -> String {
    if metadata.permissions().readonly() {
        String::from("readonly")
    } else {
        String::from("readwrite")
    }
}
