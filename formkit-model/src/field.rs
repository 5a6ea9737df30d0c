use crate::options::{OptionColumn, OptionList};
use formkit_types::{Error, FieldId, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Primitive kind of a field's value, serialized as its `type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    #[default]
    String,
    Number,
    Boolean,
    /// Descriptive, non-input content.
    Text,
}

/// The schema a field carries under its name in `properties`.
///
/// `_id` is not part of the schema; it belongs to the owning [`Field`].
/// Attributes the engine does not interpret (`displayAs`, `format`, ...)
/// are kept verbatim in `extra`; `extra` never carries a key the schema
/// owns (see [`FieldSchema::check_extra`]).
///
/// A schema read without a `type` gets [`PrimitiveType::String`], so it is
/// written back with an explicit `"type": "string"`. A `type` outside
/// `string`, `number`, `boolean` and `text` is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireSchema", into = "WireSchema")]
pub struct FieldSchema {
    pub primitive: PrimitiveType,
    pub title: Option<String>,
    /// Opaque rich-markup string.
    pub description: Option<String>,
    pub options: Option<OptionList>,
    pub extra: Map<String, Value>,
}

/// Keys that only change through dedicated operations.
const RESERVED_KEYS: [&str; 4] = ["_id", "enum", "descriptions", "titles"];

/// Keys stored in typed fields of [`FieldSchema`] or on the owning [`Field`].
const OWNED_KEYS: [&str; 7] = [
    "_id",
    "type",
    "title",
    "description",
    "enum",
    "descriptions",
    "titles",
];

impl FieldSchema {
    /// A bare schema of the given primitive type.
    #[must_use]
    pub fn of_type(primitive: PrimitiveType) -> Self {
        Self {
            primitive,
            ..Self::default()
        }
    }

    /// Sets a title (builder style).
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attaches an option list (builder style).
    #[must_use]
    pub fn with_options(mut self, options: OptionList) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets an opaque attribute (builder style). Keys the schema owns
    /// (`_id`, `type`, `title`, `description` and the option columns) are
    /// ignored; use the typed fields for those.
    #[must_use]
    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        if !OWNED_KEYS.contains(&key) {
            self.extra.insert(key.to_string(), value.into());
        }
        self
    }

    /// Fails with [`Error::Malformed`] if `extra` holds a key the schema or
    /// its field owns, which would be written twice.
    pub fn check_extra(&self) -> Result<()> {
        match OWNED_KEYS.iter().find(|key| self.extra.contains_key(**key)) {
            Some(key) => Err(Error::Malformed(format!(
                "opaque attributes contain reserved key {key:?}"
            ))),
            None => Ok(()),
        }
    }

    /// Whether this is a choice field.
    #[must_use]
    pub fn is_choice(&self) -> bool {
        self.options.is_some()
    }

    /// Reads a scalar attribute by its JSON key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            "type" => serde_json::to_value(self.primitive).ok(),
            "title" => self.title.clone().map(Value::String),
            "description" => self.description.clone().map(Value::String),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Replaces a single scalar attribute, leaving every other one alone.
    ///
    /// `null` clears `title`, `description` and opaque attributes. `_id` and
    /// the option columns are rejected with [`Error::ImmutableAttribute`].
    pub fn set_attribute(&mut self, key: &str, value: Value) -> Result<()> {
        if RESERVED_KEYS.contains(&key) {
            return Err(Error::ImmutableAttribute(key.to_string()));
        }
        match key {
            "type" => {
                self.primitive =
                    serde_json::from_value(value).map_err(|e| Error::InvalidAttribute {
                        key: key.to_string(),
                        reason: e.to_string(),
                    })?;
            }
            "title" => self.title = optional_string(key, value)?,
            "description" => self.description = optional_string(key, value)?,
            _ => {
                if value.is_null() {
                    self.extra.remove(key);
                } else {
                    self.extra.insert(key.to_string(), value);
                }
            }
        }
        Ok(())
    }
}

fn optional_string(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(Error::InvalidAttribute {
            key: key.to_string(),
            reason: format!("expected a string or null, got {other}"),
        }),
    }
}

/// A field of the document: immutable identity, mutable name, schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: FieldId,
    /// The key the field is published under in `properties`.
    pub name: String,
    pub schema: FieldSchema,
}

#[derive(Clone, Serialize, Deserialize)]
struct WireSchema {
    #[serde(rename = "type", default)]
    primitive: PrimitiveType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    descriptions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    titles: Option<Vec<String>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<WireSchema> for FieldSchema {
    type Error = Error;

    fn try_from(wire: WireSchema) -> Result<Self> {
        if wire.extra.contains_key("_id") {
            return Err(Error::Malformed(
                "_id belongs to the field, not its schema".to_string(),
            ));
        }
        let options = match wire.values {
            Some(values) => Some(OptionList::from_columns(
                values,
                wire.descriptions,
                wire.titles,
            )?),
            None if wire.descriptions.is_some() || wire.titles.is_some() => {
                return Err(Error::Malformed(
                    "option columns present without enum".to_string(),
                ));
            }
            None => None,
        };
        Ok(Self {
            primitive: wire.primitive,
            title: wire.title,
            description: wire.description,
            options,
            extra: wire.extra,
        })
    }
}

impl From<FieldSchema> for WireSchema {
    fn from(schema: FieldSchema) -> Self {
        let (values, descriptions, titles) = match &schema.options {
            Some(options) => (
                options.column(OptionColumn::Enum),
                options.column(OptionColumn::Descriptions),
                options.column(OptionColumn::Titles),
            ),
            None => (None, None, None),
        };
        Self {
            primitive: schema.primitive,
            title: schema.title,
            description: schema.description,
            values,
            descriptions,
            titles,
            extra: schema
                .extra
                .into_iter()
                .filter(|(key, _)| !OWNED_KEYS.contains(&key.as_str()))
                .collect(),
        }
    }
}
