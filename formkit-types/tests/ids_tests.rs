use formkit_types::{FieldId, FieldStamp};
use std::collections::HashSet;
use std::str::FromStr;

// ── FieldId ──────────────────────────────────────────────────────

#[test]
fn field_id_from_stamp_matches_field_name() {
    let stamp = FieldStamp::new(1_700_000_000_123);
    let id = FieldId::from_stamp(stamp);
    assert_eq!(id.as_str(), "field-1700000000123");
    assert_eq!(id.as_str(), stamp.field_name());
}

#[test]
fn field_id_display_is_raw_string() {
    let id = FieldId::new("field-42");
    assert_eq!(id.to_string(), "field-42");
    assert_eq!(format!("{id}"), "field-42");
}

#[test]
fn field_id_from_str_and_from_ref() {
    let parsed = FieldId::from_str("field-7").unwrap();
    let converted: FieldId = "field-7".into();
    assert_eq!(parsed, converted);
    assert_eq!(parsed.as_ref(), "field-7");
}

#[test]
fn field_id_hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(FieldId::new("a"));
    set.insert(FieldId::new("a"));
    set.insert(FieldId::new("b"));
    assert_eq!(set.len(), 2);
}

#[test]
fn field_id_serializes_transparently() {
    let id = FieldId::new("field-9");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"field-9\"");
    let parsed: FieldId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn field_id_ordering_is_lexicographic() {
    assert!(FieldId::new("field-1") < FieldId::new("field-2"));
    assert!(FieldId::new("field-10") < FieldId::new("field-2"));
}
