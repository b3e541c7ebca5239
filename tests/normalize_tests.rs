use std::collections::BTreeMap;

use exif_inspector::core::normalize::{clean_text, clean_value, decode_bytes};
use exif_inspector::models::{CleanValue, RawValue};

#[test]
fn text_passes_through_unchanged() {
    assert_eq!(
        clean_value(&RawValue::text("Canon EOS R5")),
        CleanValue::Text(String::from("Canon EOS R5"))
    );
}

#[test]
fn normalizing_twice_is_a_no_op() {
    let samples = [
        RawValue::text("plain"),
        RawValue::Bytes(b"bytes".to_vec()),
        RawValue::dms((40, 1), (30, 1), (0, 1)),
        RawValue::float(2.5f64),
        RawValue::signed(-3i32),
        RawValue::Bytes(vec![0xFF; 8]),
    ];

    for sample in samples {
        let once = clean_text(&sample);
        let twice = clean_text(&RawValue::text(once.clone()));
        assert_eq!(once, twice, "sample: {sample:?}");
    }
}

#[test]
fn valid_utf8_bytes_round_trip() {
    assert_eq!(decode_bytes("Zürich".as_bytes()), "Zürich");
    assert_eq!(clean_text(&RawValue::Bytes(b"0230".to_vec())), "0230");
}

#[test]
fn mostly_valid_bytes_keep_replacement_characters() {
    let decoded = decode_bytes(b"ab\xFFcd");
    assert_eq!(decoded, "ab\u{FFFD}cd");
}

#[test]
fn mostly_invalid_bytes_become_base64() {
    assert_eq!(decode_bytes(&[0xFF; 8]), "//////////8=");
    assert_eq!(decode_bytes(&[0x00, 0x9F, 0x92, 0x96]), "AJ+Slg==");
}

#[test]
fn sequences_are_joined_and_nested_ones_wrapped() {
    assert_eq!(
        clean_text(&RawValue::dms((10, 1), (0, 1), (0, 1))),
        "10/1, 0/1, 0/1"
    );

    let nested = RawValue::Sequence(vec![
        RawValue::unsigned(1u32),
        RawValue::Sequence(vec![RawValue::unsigned(2u32), RawValue::unsigned(3u32)]),
    ]);
    assert_eq!(clean_text(&nested), "1, (2, 3)");
}

#[test]
fn floats_keep_their_fraction() {
    assert_eq!(clean_text(&RawValue::float(3.0f64)), "3.0");
}

#[test]
fn single_item_lists_collapse() {
    assert_eq!(
        RawValue::from_items(vec![RawValue::unsigned(6u32)]),
        RawValue::unsigned(6u32)
    );
}

#[test]
fn mappings_stay_nested_and_flatten_with_dotted_keys() {
    let mut inner = BTreeMap::new();
    inner.insert(String::from("Version"), RawValue::Bytes(b"0100".to_vec()));
    inner.insert(String::from("Index"), RawValue::unsigned(1u32));

    let cleaned = clean_value(&RawValue::Mapping(inner));
    let CleanValue::Mapping(children) = &cleaned else {
        panic!("expected a mapping, got {cleaned:?}");
    };
    assert_eq!(children.len(), 2);
    assert_eq!(cleaned.to_string(), "{Index: 1, Version: 0100}");

    let mut flat = BTreeMap::new();
    cleaned.flatten_into("Interop", &mut flat);
    assert_eq!(flat.get("Interop.Version").map(String::as_str), Some("0100"));
    assert_eq!(flat.get("Interop.Index").map(String::as_str), Some("1"));
}
