//! Form schema document engine.
//!
//! A [`FormDocument`] is an ordered set of named fields, each with a
//! [`FieldSchema`] (type, title, optional rich-text description and, for
//! choice fields, an [`OptionList`]). The engine exposes pure
//! transformations over it:
//!
//! - fields: create, remove, rename, reorder, mark required, edit attributes
//! - options: add, remove, move, edit a cell
//!
//! Each returns a new document and keeps these invariants intact:
//! `displayOrder` matches the field set without duplicates, `required` only
//! names existing fields, option columns stay co-indexed, and every field
//! keeps the `_id` it was created with.
//!
//! [`EditorIntent`] is the serializable form of those calls for drivers.

mod document;
mod field;
mod intent;
mod kind;
mod ops;
mod options;

pub use document::{DOCUMENT_TYPE, FormDocument};
pub use field::{Field, FieldSchema, PrimitiveType};
pub use intent::{EditorIntent, apply_all};
pub use kind::FieldKind;
pub use options::{OptionColumn, OptionEntry, OptionList};

pub use formkit_types::{Error, FieldId, FieldStamp, Result};
