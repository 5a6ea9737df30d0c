//! Property-based tests for document invariants.
//!
//! Random edit sequences starting from an empty document must leave every
//! structural invariant intact after each step, whether or not the step was
//! accepted.

use formkit_model::{FieldId, FieldKind, FieldStamp, FormDocument, OptionColumn};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Edit {
    Create(FieldKind),
    Remove(usize),
    Rename(usize, String),
    Reorder(usize, Option<usize>),
    Required(usize, bool),
    Title(usize, String),
    AddOption(usize),
    RemoveOption(usize, usize),
    MoveOption(usize, usize, usize),
    UpdateOption(usize, usize, OptionColumn, String),
}

fn kind_strategy() -> impl Strategy<Value = FieldKind> {
    prop::sample::select(FieldKind::ALL.to_vec())
}

fn column_strategy() -> impl Strategy<Value = OptionColumn> {
    prop::sample::select(vec![
        OptionColumn::Enum,
        OptionColumn::Descriptions,
        OptionColumn::Titles,
    ])
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-c]{1,2}|field-[1-3]").unwrap()
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => kind_strategy().prop_map(Edit::Create),
        1 => (0usize..8).prop_map(Edit::Remove),
        2 => (0usize..8, name_strategy()).prop_map(|(i, n)| Edit::Rename(i, n)),
        2 => (0usize..8, prop::option::of(0usize..8)).prop_map(|(s, d)| Edit::Reorder(s, d)),
        2 => (0usize..8, any::<bool>()).prop_map(|(i, r)| Edit::Required(i, r)),
        1 => (0usize..8, "[a-z ]{0,8}").prop_map(|(i, t)| Edit::Title(i, t)),
        2 => (0usize..8).prop_map(Edit::AddOption),
        1 => (0usize..8, 0usize..4).prop_map(|(i, o)| Edit::RemoveOption(i, o)),
        1 => (0usize..8, 0usize..4, 0usize..4).prop_map(|(i, s, d)| Edit::MoveOption(i, s, d)),
        1 => (0usize..8, 0usize..4, column_strategy(), "[a-z]{0,4}")
            .prop_map(|(i, o, c, v)| Edit::UpdateOption(i, o, c, v)),
    ]
}

/// Picks an existing field name by position, or a name that never exists.
fn pick(doc: &FormDocument, index: usize) -> String {
    let names = doc.names();
    if names.is_empty() || index >= names.len() + 1 {
        "missing".to_string()
    } else {
        names[index % names.len()].to_string()
    }
}

fn apply(doc: &FormDocument, edit: &Edit, stamp: FieldStamp) -> formkit_model::Result<FormDocument> {
    match edit {
        Edit::Create(kind) => doc.create_field_of_kind(*kind, stamp),
        Edit::Remove(i) => doc.remove_field(&pick(doc, *i)),
        Edit::Rename(i, to) => doc.rename_field(&pick(doc, *i), to),
        Edit::Reorder(s, d) => doc.reorder_fields(*s, *d),
        Edit::Required(i, r) => doc.set_required(&pick(doc, *i), *r),
        Edit::Title(i, t) => doc.update_field_attribute(&pick(doc, *i), "title", json!(t)),
        Edit::AddOption(i) => doc.add_option(&pick(doc, *i)),
        Edit::RemoveOption(i, o) => doc.remove_option(&pick(doc, *i), *o),
        Edit::MoveOption(i, s, d) => doc.move_option(&pick(doc, *i), *s, *d),
        Edit::UpdateOption(i, o, c, v) => doc.update_option(&pick(doc, *i), *o, *c, v.clone()),
    }
}

fn ids(doc: &FormDocument) -> BTreeSet<FieldId> {
    doc.fields().map(|f| f.id.clone()).collect()
}

/// Checks the invariants on the published JSON, independent of the
/// in-memory representation.
fn check_wire(doc: &FormDocument) -> Result<(), TestCaseError> {
    let value = doc.to_value().unwrap();
    let order: Vec<&str> = value["displayOrder"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    let properties = value["properties"].as_object().unwrap();

    let unique: BTreeSet<&str> = order.iter().copied().collect();
    prop_assert_eq!(unique.len(), order.len());
    let keys: BTreeSet<&str> = properties.keys().map(String::as_str).collect();
    prop_assert_eq!(&unique, &keys);

    for required in value["required"].as_array().unwrap() {
        prop_assert!(unique.contains(required.as_str().unwrap()));
    }

    let mut seen_ids = BTreeSet::new();
    for schema in properties.values() {
        prop_assert!(seen_ids.insert(schema["_id"].as_str().unwrap().to_string()));
        if let Some(values) = schema.get("enum").and_then(Value::as_array) {
            for key in ["descriptions", "titles"] {
                if let Some(column) = schema.get(key) {
                    prop_assert_eq!(column.as_array().unwrap().len(), values.len());
                }
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_after_every_edit(edits in prop::collection::vec(edit_strategy(), 1..40)) {
        let mut doc = FormDocument::new();
        for (step, edit) in edits.iter().enumerate() {
            let stamp = FieldStamp::new(step as u64 + 1);
            let before = doc.clone();
            match apply(&doc, edit, stamp) {
                Ok(next) => {
                    let (old_ids, new_ids) = (ids(&before), ids(&next));
                    match edit {
                        Edit::Create(_) => prop_assert_eq!(new_ids.len(), old_ids.len() + 1),
                        Edit::Remove(_) => prop_assert_eq!(new_ids.len() + 1, old_ids.len()),
                        _ => prop_assert_eq!(&new_ids, &old_ids),
                    }
                    doc = next;
                }
                Err(_) => prop_assert_eq!(&doc, &before),
            }
            prop_assert!(doc.validate().is_ok());
            check_wire(&doc)?;
        }
    }

    #[test]
    fn json_round_trip_after_random_edits(edits in prop::collection::vec(edit_strategy(), 1..25)) {
        let mut doc = FormDocument::new();
        for (step, edit) in edits.iter().enumerate() {
            if let Ok(next) = apply(&doc, edit, FieldStamp::new(step as u64 + 1)) {
                doc = next;
            }
        }
        let reparsed = FormDocument::from_json(&doc.to_json().unwrap()).unwrap();
        prop_assert_eq!(reparsed, doc);
    }

    #[test]
    fn set_required_is_idempotent(count in 1usize..5, target in 0usize..5, flag in any::<bool>()) {
        let mut doc = FormDocument::new();
        for i in 0..count {
            doc = doc.create_field_of_kind(FieldKind::Text, FieldStamp::new(i as u64 + 1)).unwrap();
        }
        let name = pick(&doc, target % count);
        let once = doc.set_required(&name, flag).unwrap();
        let twice = once.set_required(&name, flag).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn rename_round_trip_restores_document(count in 1usize..5, target in 0usize..5) {
        let mut doc = FormDocument::new();
        for i in 0..count {
            doc = doc.create_field_of_kind(FieldKind::Email, FieldStamp::new(i as u64 + 1)).unwrap();
        }
        let name = pick(&doc, target % count);
        let back = doc
            .rename_field(&name, "renamed")
            .and_then(|d| d.rename_field("renamed", &name))
            .unwrap();
        prop_assert_eq!(back, doc);
    }
}
