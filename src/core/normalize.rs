use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::models::{CleanValue, RawValue};

const REPLACEMENT: char = '\u{FFFD}';

/// Turns any extracted value into something displayable. Total: every
/// variant has a rendering and nothing here can fail.
pub fn clean_value(value: &RawValue) -> CleanValue {
    match value {
        RawValue::Mapping(children) => CleanValue::Mapping(
            children
                .iter()
                .map(|(key, child)| (key.clone(), clean_value(child)))
                .collect::<BTreeMap<_, _>>(),
        ),
        other => CleanValue::Text(render(other)),
    }
}

pub fn clean_text(value: &RawValue) -> String {
    clean_value(value).to_string()
}

/// Valid UTF-8 comes back verbatim. Anything else is decoded lossily, unless
/// it is mostly undecodable, in which case it is shown as base64.
pub fn decode_bytes(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let lossy = String::from_utf8_lossy(bytes);
    let total = lossy.chars().count();
    let replaced = lossy.chars().filter(|ch| *ch == REPLACEMENT).count();

    if replaced * 2 > total {
        STANDARD.encode(bytes)
    } else {
        lossy.into_owned()
    }
}

fn render(value: &RawValue) -> String {
    match value {
        RawValue::Bytes(bytes) => decode_bytes(bytes),
        RawValue::Scalar(scalar) => scalar.to_string(),
        RawValue::Sequence(items) => items
            .iter()
            .map(render_element)
            .collect::<Vec<_>>()
            .join(", "),
        RawValue::Mapping(_) => clean_value(value).to_string(),
    }
}

fn render_element(value: &RawValue) -> String {
    match value {
        RawValue::Sequence(_) => format!("({})", render(value)),
        other => render(other),
    }
}
