use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata as ExifMetadata;
use tracing::debug;

use crate::core::error::{ExtractError, Result};
use crate::models::{RawEntry, RawValue};

/// Reads the IFD-structured tag set through `little_exif`.
pub struct StructuredTagExtractor;

impl StructuredTagExtractor {
    pub fn extract(path: &Path) -> Result<Vec<RawEntry>> {
        if !path.exists() {
            return Err(ExtractError::FileNotFound(path.to_path_buf()));
        }

        // little_exif can panic on malformed containers; a panic here must
        // only fail this source.
        match panic::catch_unwind(AssertUnwindSafe(|| Self::read(path))) {
            Ok(result) => result,
            Err(payload) => Err(ExtractError::ParserPanic(panic_message(payload.as_ref()))),
        }
    }

    fn read(path: &Path) -> Result<Vec<RawEntry>> {
        let exif = match ExifMetadata::new_from_path(path) {
            Ok(exif) => exif,
            Err(err) if is_missing_metadata(&err) => {
                debug!(path = %path.display(), "no structured EXIF block");
                return Ok(Vec::new());
            }
            Err(err) => return Err(ExtractError::Unreadable(err.to_string())),
        };

        let entries = (&exif)
            .into_iter()
            .filter(|tag| !is_internal_tag(tag))
            .map(|tag| (tag_name(tag), tag_value(tag)))
            .collect();

        Ok(entries)
    }
}

// little_exif reports an absent block as a plain `Other` error; only the
// message tells it apart from a corrupt one.
const MISSING_METADATA_MESSAGES: &[&str] = &[
    "No EXIF data found",
    "No metadata found",
    "No EXIF chunk",
    "No EXIF item found",
    "No meta box found",
    "No metadata!",
];

fn is_missing_metadata(err: &io::Error) -> bool {
    if err.kind() != io::ErrorKind::Other {
        return false;
    }
    let message = err.to_string();
    MISSING_METADATA_MESSAGES
        .iter()
        .any(|marker| message.contains(marker))
}

// ---------------------------------------------------------------------------
// Tag naming
// ---------------------------------------------------------------------------

/// The tag's name, or its numeric id when the library has no name for it.
pub fn tag_name(tag: &ExifTag) -> String {
    if is_unknown_tag(tag) {
        return tag.as_u16().to_string();
    }

    let debug = format!("{tag:?}");
    match debug.split_once('(') {
        Some((name, _)) if !name.is_empty() => name.to_string(),
        _ => tag.as_u16().to_string(),
    }
}

fn is_unknown_tag(tag: &ExifTag) -> bool {
    matches!(
        tag,
        ExifTag::UnknownSTRING(..)
            | ExifTag::UnknownINT16U(..)
            | ExifTag::UnknownINT32U(..)
            | ExifTag::UnknownRATIONAL64U(..)
            | ExifTag::UnknownRATIONAL64S(..)
            | ExifTag::UnknownUNDEF(..)
            | ExifTag::UnknownINT8U(..)
            | ExifTag::UnknownINT8S(..)
            | ExifTag::UnknownINT16S(..)
            | ExifTag::UnknownINT32S(..)
            | ExifTag::UnknownFLOAT(..)
            | ExifTag::UnknownDOUBLE(..)
    )
}

// IFD offset pointers and thumbnail layout carry no user-facing meaning.
fn is_internal_tag(tag: &ExifTag) -> bool {
    matches!(
        tag,
        ExifTag::ExifOffset(_)
            | ExifTag::GPSInfo(_)
            | ExifTag::InteropOffset(_)
            | ExifTag::ThumbnailOffset(..)
            | ExifTag::ThumbnailLength(_)
            | ExifTag::StripOffsets(..)
            | ExifTag::StripByteCounts(_)
    )
}

// ---------------------------------------------------------------------------
// Tag values
// ---------------------------------------------------------------------------

pub fn tag_value(tag: &ExifTag) -> RawValue {
    match tag {
        ExifTag::Make(s)
        | ExifTag::Model(s)
        | ExifTag::Software(s)
        | ExifTag::Artist(s)
        | ExifTag::Copyright(s)
        | ExifTag::ImageDescription(s)
        | ExifTag::LensMake(s)
        | ExifTag::LensModel(s)
        | ExifTag::LensSerialNumber(s)
        | ExifTag::OwnerName(s)
        | ExifTag::SerialNumber(s)
        | ExifTag::DateTimeOriginal(s)
        | ExifTag::CreateDate(s)
        | ExifTag::ModifyDate(s)
        | ExifTag::OffsetTime(s)
        | ExifTag::OffsetTimeOriginal(s)
        | ExifTag::OffsetTimeDigitized(s)
        | ExifTag::SubSecTime(s)
        | ExifTag::SubSecTimeOriginal(s)
        | ExifTag::SubSecTimeDigitized(s)
        | ExifTag::GPSLatitudeRef(s)
        | ExifTag::GPSLongitudeRef(s)
        | ExifTag::UnknownSTRING(s, _, _) => RawValue::text(clean_string(s)),

        ExifTag::Orientation(v)
        | ExifTag::ISO(v)
        | ExifTag::ExposureProgram(v)
        | ExifTag::MeteringMode(v)
        | ExifTag::Flash(v)
        | ExifTag::ColorSpace(v)
        | ExifTag::ExposureMode(v)
        | ExifTag::WhiteBalance(v)
        | ExifTag::SceneCaptureType(v)
        | ExifTag::Contrast(v)
        | ExifTag::Saturation(v)
        | ExifTag::Sharpness(v)
        | ExifTag::LightSource(v)
        | ExifTag::FocalLengthIn35mmFormat(v)
        | ExifTag::Compression(v)
        | ExifTag::ResolutionUnit(v)
        | ExifTag::SensingMethod(v)
        | ExifTag::CustomRendered(v)
        | ExifTag::GainControl(v)
        | ExifTag::SubjectDistanceRange(v)
        | ExifTag::UnknownINT16U(v, _, _) => {
            RawValue::from_items(v.iter().map(|n| RawValue::unsigned(*n)).collect())
        }

        ExifTag::ImageWidth(v) | ExifTag::ImageHeight(v) | ExifTag::UnknownINT32U(v, _, _) => {
            RawValue::from_items(v.iter().map(|n| RawValue::unsigned(*n)).collect())
        }

        // GPS triples stay a sequence of rationals all the way to derivation.
        ExifTag::GPSLatitude(v) | ExifTag::GPSLongitude(v) => RawValue::Sequence(
            v.iter()
                .map(|r| RawValue::rational(r.nominator, r.denominator))
                .collect(),
        ),

        ExifTag::ExposureTime(v)
        | ExifTag::FNumber(v)
        | ExifTag::FocalLength(v)
        | ExifTag::ApertureValue(v)
        | ExifTag::MaxApertureValue(v)
        | ExifTag::XResolution(v)
        | ExifTag::YResolution(v)
        | ExifTag::SubjectDistance(v)
        | ExifTag::DigitalZoomRatio(v)
        | ExifTag::CompressedBitsPerPixel(v)
        | ExifTag::LensInfo(v)
        | ExifTag::GPSAltitude(v)
        | ExifTag::UnknownRATIONAL64U(v, _, _) => RawValue::from_items(
            v.iter()
                .map(|r| RawValue::rational(r.nominator, r.denominator))
                .collect(),
        ),

        ExifTag::ShutterSpeedValue(v)
        | ExifTag::BrightnessValue(v)
        | ExifTag::ExposureCompensation(v)
        | ExifTag::UnknownRATIONAL64S(v, _, _) => RawValue::from_items(
            v.iter()
                .map(|r| RawValue::signed_rational(r.nominator, r.denominator))
                .collect(),
        ),

        ExifTag::MakerNote(v)
        | ExifTag::ExifVersion(v)
        | ExifTag::FlashpixVersion(v)
        | ExifTag::ComponentsConfiguration(v)
        | ExifTag::UnknownUNDEF(v, _, _) => RawValue::Bytes(v.clone()),

        ExifTag::GPSAltitudeRef(v) | ExifTag::UnknownINT8U(v, _, _) => {
            RawValue::from_items(v.iter().map(|n| RawValue::unsigned(*n)).collect())
        }

        // Remaining variants: show the library's rendering of the payload.
        other => RawValue::text(debug_payload(other)),
    }
}

fn debug_payload(tag: &ExifTag) -> String {
    let debug = format!("{tag:?}");
    match debug.split_once('(') {
        Some((_, rest)) => rest.strip_suffix(')').unwrap_or(rest).to_string(),
        None => debug,
    }
}

fn clean_string(s: &str) -> String {
    s.trim_end_matches('\0').trim().to_string()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("unknown panic")
    }
}
