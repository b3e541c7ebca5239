use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{Context, Field, In, Reader, Value};
use tracing::debug;

use crate::core::error::Result;
use crate::models::{RawEntry, RawValue};

/// Re-reads the raw EXIF field stream with `kamadak-exif` to pick up tags
/// the structured reader did not name.
pub struct RawTagExtractor;

impl RawTagExtractor {
    /// Short-keyed fields whose key is not in `existing_keys`.
    pub fn extract(path: &Path, existing_keys: &HashSet<String>) -> Result<Vec<RawEntry>> {
        let fields = Self::read_fields(path)?;
        Ok(supplement(fields, existing_keys))
    }

    /// Every field under its full `"<group> <TagName>"` name.
    pub fn read_fields(path: &Path) -> Result<Vec<RawEntry>> {
        let file = File::open(path)?;
        let mut buffer = BufReader::new(file);

        let mut reader = Reader::new();
        reader.continue_on_error(true);

        let exif = match reader.read_from_container(&mut buffer) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => {
                debug!(path = %path.display(), "no raw EXIF block");
                return Ok(Vec::new());
            }
            Err(exif::Error::PartialResult(partial)) => {
                let (exif, errors) = partial.into_inner();
                debug!(
                    path = %path.display(),
                    skipped = errors.len(),
                    "raw EXIF block partially parsed"
                );
                exif
            }
            Err(err) => return Err(err.into()),
        };

        Ok(exif
            .fields()
            .map(|field| (full_tag_name(field), field_value(&field.value)))
            .collect())
    }
}

/// Last whitespace-delimited token of a full tag name.
pub fn short_key(full_name: &str) -> &str {
    full_name.split_whitespace().last().unwrap_or(full_name)
}

/// Reduces full-named fields to short keys, dropping any key already
/// produced elsewhere. The first field with a given short key wins.
pub fn supplement(fields: Vec<RawEntry>, existing_keys: &HashSet<String>) -> Vec<RawEntry> {
    let mut seen = HashSet::new();

    fields
        .into_iter()
        .filter_map(|(full_name, value)| {
            let key = short_key(&full_name).to_string();
            if existing_keys.contains(&key) || !seen.insert(key.clone()) {
                return None;
            }
            Some((key, value))
        })
        .collect()
}

fn full_tag_name(field: &Field) -> String {
    let group = group_name(field);
    if field.tag.description().is_some() {
        format!("{group} {}", field.tag)
    } else {
        format!("{group} Tag 0x{:04X}", field.tag.number())
    }
}

#[allow(unreachable_patterns)]
fn group_name(field: &Field) -> &'static str {
    match field.tag.context() {
        Context::Tiff if field.ifd_num == In::THUMBNAIL => "Thumbnail",
        Context::Tiff => "Image",
        Context::Exif => "EXIF",
        Context::Gps => "GPS",
        Context::Interop => "Interoperability",
        _ => "Unknown",
    }
}

#[allow(unreachable_patterns)]
fn field_value(value: &Value) -> RawValue {
    match value {
        Value::Byte(v) => RawValue::from_items(v.iter().map(|n| RawValue::unsigned(*n)).collect()),
        Value::Ascii(strings) => RawValue::from_items(
            strings
                .iter()
                .map(|s| RawValue::Bytes(trim_nul(s).to_vec()))
                .collect(),
        ),
        Value::Short(v) => RawValue::from_items(v.iter().map(|n| RawValue::unsigned(*n)).collect()),
        Value::Long(v) => RawValue::from_items(v.iter().map(|n| RawValue::unsigned(*n)).collect()),
        Value::Rational(v) => RawValue::from_items(
            v.iter()
                .map(|r| RawValue::rational(r.num, r.denom))
                .collect(),
        ),
        Value::SByte(v) => RawValue::from_items(v.iter().map(|n| RawValue::signed(*n)).collect()),
        Value::Undefined(bytes, _) => RawValue::Bytes(bytes.clone()),
        Value::SShort(v) => RawValue::from_items(v.iter().map(|n| RawValue::signed(*n)).collect()),
        Value::SLong(v) => RawValue::from_items(v.iter().map(|n| RawValue::signed(*n)).collect()),
        Value::SRational(v) => RawValue::from_items(
            v.iter()
                .map(|r| RawValue::signed_rational(r.num, r.denom))
                .collect(),
        ),
        Value::Float(v) => RawValue::from_items(v.iter().map(|n| RawValue::float(*n)).collect()),
        Value::Double(v) => RawValue::from_items(v.iter().map(|n| RawValue::float(*n)).collect()),
        Value::Unknown(kind, count, _) => {
            RawValue::text(format!("unknown value type {kind} ({count} items)"))
        }
        _ => RawValue::text(String::from("unsupported value")),
    }
}

fn trim_nul(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|byte| *byte != 0)
        .map_or(0, |index| index + 1);
    &bytes[..end]
}
