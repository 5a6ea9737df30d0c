//! Catalog of field kinds offered by the editor.

use crate::field::{FieldSchema, PrimitiveType};
use crate::options::OptionList;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A kind of field the user can add. Each kind maps to a starting schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Url,
    /// Rich-text block shown to the user, not an input.
    Descriptive,
    /// Single choice rendered as radio buttons; options carry descriptions.
    Radio,
    /// Single choice rendered as a select; options carry titles.
    Dropdown,
    Boolean,
}

impl FieldKind {
    /// Every kind, in the order the editor lists them.
    pub const ALL: [FieldKind; 8] = [
        Self::Text,
        Self::Email,
        Self::Number,
        Self::Url,
        Self::Descriptive,
        Self::Radio,
        Self::Dropdown,
        Self::Boolean,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Email => "Email",
            Self::Number => "Number",
            Self::Url => "URL",
            Self::Descriptive => "Descriptive text",
            Self::Radio => "Radio buttons",
            Self::Dropdown => "Dropdown",
            Self::Boolean => "Checkbox",
        }
    }

    /// The schema a freshly added field of this kind starts with.
    #[must_use]
    pub fn template(&self) -> FieldSchema {
        match self {
            Self::Text => FieldSchema::of_type(PrimitiveType::String)
                .titled("")
                .with_extra("displayAs", "text"),
            Self::Email => FieldSchema::of_type(PrimitiveType::String)
                .titled("")
                .with_extra("format", "email"),
            Self::Number => FieldSchema::of_type(PrimitiveType::Number).titled(""),
            Self::Url => FieldSchema::of_type(PrimitiveType::String)
                .titled("")
                .with_extra("format", "uri"),
            Self::Descriptive => {
                let mut schema = FieldSchema::of_type(PrimitiveType::Text).titled("");
                schema.description = Some(String::new());
                schema.with_extra("displayAs", "descriptive")
            }
            Self::Radio => FieldSchema::of_type(PrimitiveType::String)
                .titled("")
                .with_options(OptionList::with_descriptions())
                .with_extra("displayAs", "radio"),
            Self::Dropdown => FieldSchema::of_type(PrimitiveType::String)
                .titled("")
                .with_options(OptionList::with_titles())
                .with_extra("displayAs", "select"),
            Self::Boolean => FieldSchema::of_type(PrimitiveType::Boolean).titled(""),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
