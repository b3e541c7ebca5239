mod common;

use std::fs;

use exif_inspector::core::collector::MetadataCollector;
use exif_inspector::core::gps::GPS_COORDINATES_KEY;
use exif_inspector::models::{FailureKind, SourceKind};
use tempfile::TempDir;

const FILESYSTEM_KEYS: [&str; 7] = [
    "Filename",
    "File Type",
    "Created",
    "Modified",
    "Attributes",
    "Accessible",
    "Exists",
];

#[test]
fn readable_image_reports_every_filesystem_key() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = common::write_png(dir.path(), "sample.png", 4, 3);

    let collected = MetadataCollector::collect(&path);

    for key in FILESYSTEM_KEYS {
        assert!(collected.contains_key(key), "missing {key}");
    }
    assert_eq!(collected.get_text("Filename"), Some("sample.png"));
    assert_eq!(collected.get_text("File Type"), Some(".png"));
    assert_eq!(collected.get_text("Exists"), Some("Yes"));
    assert_eq!(collected.get_text("Accessible"), Some("Yes"));
    assert!(collected.failure_for(SourceKind::FileProperties).is_none());
}

#[test]
fn image_properties_come_from_the_decoded_pixels() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = common::write_png(dir.path(), "pixels.png", 4, 3);

    let collected = MetadataCollector::collect(&path);

    assert_eq!(collected.get_text("Dimensions"), Some("4x3"));
    assert_eq!(collected.get_text("Width"), Some("4"));
    assert_eq!(collected.get_text("Height"), Some("3"));
    assert_eq!(collected.get_text("Color Depth"), Some("3"));
    assert!(collected.failure_for(SourceKind::ImageProperties).is_none());
    assert_eq!(
        collected.entries_from(SourceKind::ImageProperties).count(),
        4
    );
}

#[test]
fn exif_jpeg_yields_tags_and_signed_gps() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = common::write_jpeg_with_exif(dir.path(), "gps.jpg");

    let collected = MetadataCollector::collect(&path);

    assert_eq!(collected.get_text("Make"), Some("TestCam"));
    assert_eq!(collected.gps_coordinates(), Some("-10.0, -20.0"));
    assert_eq!(
        collected.display_map().get(GPS_COORDINATES_KEY).map(String::as_str),
        Some("-10.0, -20.0")
    );
    assert_eq!(collected.get_text("Dimensions"), Some("8x6"));
    assert!(collected.failure_for(SourceKind::GpsDerivation).is_none());
}

#[test]
fn missing_file_still_runs_the_whole_pipeline() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("nope.jpg");

    let collected = MetadataCollector::collect(&path);

    assert_eq!(collected.get_text("Exists"), Some("No"));
    assert_eq!(collected.get_text("Accessible"), Some("No"));
    assert_eq!(collected.get_text("Filename"), Some("nope.jpg"));
    assert_eq!(collected.get_text("File Type"), Some(".jpg"));
    assert!(!collected.contains_key(GPS_COORDINATES_KEY));

    for source in [
        SourceKind::StructuredTags,
        SourceKind::RawTags,
        SourceKind::ImageProperties,
        SourceKind::FileProperties,
    ] {
        assert!(collected.failure_for(source).is_some(), "{source} should fail");
    }

    let display = collected.display_map();
    for key in ["EXIF_ERROR", "RAW_EXIF_ERROR", "Image Error", "File Info Error"] {
        assert!(display.contains_key(key), "missing {key}");
    }
    assert!(!display.contains_key("GPS Conversion Error"));
}

#[test]
fn non_image_bytes_fail_image_source_only() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("notes.txt");
    fs::write(&path, b"just some text").expect("should write file");

    let collected = MetadataCollector::collect(&path);

    assert!(collected.failure_for(SourceKind::ImageProperties).is_some());
    assert!(collected.failure_for(SourceKind::FileProperties).is_none());
    assert_eq!(collected.get_text("Exists"), Some("Yes"));
    assert!(collected
        .failures
        .iter()
        .all(|failure| failure.kind() == FailureKind::Source));
}

#[test]
fn failures_are_kept_apart_from_entries() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("missing.png");

    let collected = MetadataCollector::collect(&path);

    assert!(collected.has_failures());
    assert!(!collected.contains_key("EXIF_ERROR"));
    assert!(!collected.contains_key("Image Error"));
}

#[test]
fn image_without_exif_is_not_a_failure() {
    let dir = TempDir::new().expect("should create temp dir");
    let jpeg = common::write_jpeg(dir.path(), "plain.jpg", 4, 4);
    let png = common::write_png(dir.path(), "plain.png", 4, 4);

    for path in [jpeg, png] {
        let collected = MetadataCollector::collect(&path);
        let display = collected.display_map();

        assert!(
            !display.contains_key("EXIF_ERROR"),
            "{}: {:?}",
            path.display(),
            display.get("EXIF_ERROR")
        );
        assert!(!display.contains_key("RAW_EXIF_ERROR"));
        assert!(!collected.has_failures());
        assert_eq!(collected.get_text("Dimensions"), Some("4x4"));
    }
}

#[test]
fn raw_source_fills_in_keys_the_structured_reader_names_differently() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = common::write_jpeg_with_exif(dir.path(), "names.jpg");

    let collected = MetadataCollector::collect(&path);
    let date_time = "2024:05:01 12:00:00";

    // Tag 0x0132 is `ModifyDate` to little_exif and `DateTime` to kamadak.
    let structured = collected
        .entries
        .get("ModifyDate")
        .expect("structured reader should name 0x0132");
    assert_eq!(structured.source, SourceKind::StructuredTags);
    assert_eq!(structured.value.as_text(), Some(date_time));

    let raw = collected
        .entries
        .get("DateTime")
        .expect("raw reader should add its own name for 0x0132");
    assert_eq!(raw.source, SourceKind::RawTags);
    assert_eq!(raw.value.as_text(), Some(date_time));

    let make = collected.entries.get("Make").expect("make");
    assert_eq!(make.source, SourceKind::StructuredTags);
    assert!(collected.failure_for(SourceKind::RawTags).is_none());
}
