//! Core type definitions for formkit.
//!
//! This crate defines the small vocabulary shared by the schema engine and
//! its drivers:
//! - [`FieldId`]: the immutable `_id` a field keeps across renames
//! - [`FieldStamp`]: monotonic millisecond stamps used to name new fields
//! - [`Error`]: every way a document transformation can be rejected
//!
//! The document model itself lives in `formkit-model`.

mod ids;
mod stamp;

pub use ids::FieldId;
pub use stamp::{FIELD_NAME_PREFIX, FieldStamp};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by document transformations.
///
/// A transformation that returns an error has not touched its input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("index {index} out of range for length {len}")]
    InvalidIndex { index: usize, len: usize },

    #[error("a field named {0:?} already exists")]
    NameCollision(String),

    #[error("field {0} has no option list")]
    NotAChoiceField(String),

    #[error("field {field} has no {column} column")]
    MissingColumn { field: String, column: String },

    #[error("attribute {0:?} cannot be set directly")]
    ImmutableAttribute(String),

    #[error("invalid value for attribute {key:?}: {reason}")]
    InvalidAttribute { key: String, reason: String },

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
