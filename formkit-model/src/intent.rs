//! Edits requested by the presentation layer.
//!
//! Each intent corresponds to one user gesture (add a field of some kind,
//! confirm a deletion, drop a dragged field, edit a text box...). Intents
//! are plain data so they can cross a process or FFI boundary as JSON.

use crate::document::FormDocument;
use crate::kind::FieldKind;
use crate::options::OptionColumn;
use formkit_types::{FieldStamp, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single user intent, tagged by `intent` on the wire:
/// `{"intent": "set_required", "name": "field-1", "required": true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum EditorIntent {
    CreateField {
        kind: FieldKind,
    },
    /// Sent only after the user confirmed the deletion.
    RemoveField {
        name: String,
    },
    RenameField {
        from: String,
        to: String,
    },
    /// `destination` is absent when the drag ended outside a drop target.
    ReorderFields {
        source: usize,
        #[serde(default)]
        destination: Option<usize>,
    },
    SetRequired {
        name: String,
        required: bool,
    },
    UpdateAttribute {
        name: String,
        key: String,
        value: Value,
    },
    AddOption {
        name: String,
    },
    RemoveOption {
        name: String,
        index: usize,
    },
    MoveOption {
        name: String,
        source: usize,
        destination: usize,
    },
    UpdateOption {
        name: String,
        index: usize,
        column: OptionColumn,
        value: String,
    },
}

impl EditorIntent {
    /// Whether applying this intent adds a field (and so consumes a stamp).
    #[must_use]
    pub fn creates_field(&self) -> bool {
        matches!(self, Self::CreateField { .. })
    }

    /// Applies the intent to `document`. `stamp` names the field when the
    /// intent creates one and is ignored otherwise.
    pub fn apply(&self, document: &FormDocument, stamp: FieldStamp) -> Result<FormDocument> {
        match self {
            Self::CreateField { kind } => document.create_field_of_kind(*kind, stamp),
            Self::RemoveField { name } => document.remove_field(name),
            Self::RenameField { from, to } => document.rename_field(from, to),
            Self::ReorderFields {
                source,
                destination,
            } => document.reorder_fields(*source, *destination),
            Self::SetRequired { name, required } => document.set_required(name, *required),
            Self::UpdateAttribute { name, key, value } => {
                document.update_field_attribute(name, key, value.clone())
            }
            Self::AddOption { name } => document.add_option(name),
            Self::RemoveOption { name, index } => document.remove_option(name, *index),
            Self::MoveOption {
                name,
                source,
                destination,
            } => document.move_option(name, *source, *destination),
            Self::UpdateOption {
                name,
                index,
                column,
                value,
            } => document.update_option(name, *index, *column, value.clone()),
        }
    }
}

/// Threads `document` through `intents` in order, stopping at the first
/// rejected one.
///
/// `clock` is advanced before every field creation so each new field gets a
/// distinct name; on return it holds the last stamp used.
pub fn apply_all(
    document: &FormDocument,
    intents: &[EditorIntent],
    clock: &mut FieldStamp,
) -> Result<FormDocument> {
    let mut current = document.clone();
    for intent in intents {
        if intent.creates_field() {
            *clock = clock.tick();
        }
        current = intent.apply(&current, *clock)?;
    }
    Ok(current)
}
