//! The form document and its JSON wire form.
//!
//! Fields are held by their immutable [`FieldId`]; `displayOrder` and
//! `required` are lists of IDs. The published JSON is keyed by field name:
//!
//! ```json
//! {
//!   "type": "object",
//!   "displayOrder": ["field-1"],
//!   "required": [],
//!   "properties": { "field-1": { "_id": "field-1", "type": "string", "title": "" } }
//! }
//! ```

use crate::field::{Field, FieldSchema};
use formkit_types::{Error, FieldId, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Discriminator carried in the root `type` for downstream consumers.
pub const DOCUMENT_TYPE: &str = "object";

/// An ordered set of named fields.
///
/// Values are never mutated in place by the transformation methods; each
/// returns a new document and leaves `self` valid and unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireDocument")]
pub struct FormDocument {
    pub(crate) schema_type: String,
    pub(crate) display_order: Vec<FieldId>,
    pub(crate) required: Vec<FieldId>,
    pub(crate) fields: HashMap<FieldId, Field>,
}

impl Default for FormDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl FormDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema_type: DOCUMENT_TYPE.to_string(),
            display_order: Vec::new(),
            required: Vec::new(),
            fields: HashMap::new(),
        }
    }

    /// The root `type` discriminator.
    #[must_use]
    pub fn schema_type(&self) -> &str {
        &self.schema_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.display_order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.display_order.is_empty()
    }

    /// Looks a field up by its current name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.values().find(|f| f.name == name)
    }

    /// Looks a field up by its `_id`.
    #[must_use]
    pub fn field_by_id(&self, id: &FieldId) -> Option<&Field> {
        self.fields.get(id)
    }

    /// Fields in display order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.display_order.iter().filter_map(|id| self.fields.get(id))
    }

    /// Field names in display order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.fields().map(|f| f.name.as_str()).collect()
    }

    /// Names of the required fields, in the order they were marked.
    #[must_use]
    pub fn required_names(&self) -> Vec<&str> {
        self.required
            .iter()
            .filter_map(|id| self.fields.get(id))
            .map(|f| f.name.as_str())
            .collect()
    }

    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.field(name)
            .is_some_and(|f| self.required.contains(&f.id))
    }

    /// Checks every structural invariant:
    ///
    /// 1. `displayOrder` has no duplicates and matches the field set exactly.
    /// 2. Every required entry is in `displayOrder`, once.
    /// 3. Option columns are co-indexed (guaranteed by [`crate::OptionList`]).
    /// 4. Each field is stored under its own `_id`.
    /// 5. Field names are unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for id in &self.display_order {
            if !seen.insert(id) {
                return Err(Error::Malformed(format!("{id} appears twice in displayOrder")));
            }
            if !self.fields.contains_key(id) {
                return Err(Error::Malformed(format!("{id} in displayOrder has no schema")));
            }
        }
        if seen.len() != self.fields.len() {
            return Err(Error::Malformed(
                "properties contains fields missing from displayOrder".to_string(),
            ));
        }

        let mut required = HashSet::new();
        for id in &self.required {
            if !seen.contains(id) {
                return Err(Error::Malformed(format!("required {id} is not a field")));
            }
            if !required.insert(id) {
                return Err(Error::Malformed(format!("{id} is required twice")));
            }
        }

        let mut names = HashSet::new();
        for (id, field) in &self.fields {
            if &field.id != id {
                return Err(Error::Malformed(format!(
                    "field {} stored under id {id}",
                    field.id
                )));
            }
            if !names.insert(field.name.as_str()) {
                return Err(Error::Malformed(format!("duplicate field name {}", field.name)));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document, rejecting one that breaks an invariant with
    /// [`Error::Malformed`].
    ///
    /// A schema `type` other than `string`, `number`, `boolean` or `text`
    /// is also `Malformed`. A schema without `type` loads as `string` and is
    /// written back with it.
    pub fn from_json(json: &str) -> Result<Self> {
        let wire: WireDocument = serde_json::from_str(json)?;
        Self::try_from(wire)
    }

    /// Like [`from_json`](Self::from_json), from an already parsed value.
    pub fn from_value(value: Value) -> Result<Self> {
        let wire: WireDocument = serde_json::from_value(value)?;
        Self::try_from(wire)
    }

    /// Converts to a JSON value.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

// ── Wire form ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDocument {
    #[serde(rename = "type", default = "default_schema_type")]
    schema_type: String,
    #[serde(default)]
    display_order: Vec<String>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    properties: Map<String, Value>,
}

fn default_schema_type() -> String {
    DOCUMENT_TYPE.to_string()
}

impl TryFrom<WireDocument> for FormDocument {
    type Error = Error;

    fn try_from(mut wire: WireDocument) -> Result<Self> {
        let mut ids_by_name: HashMap<String, FieldId> = HashMap::new();
        let mut display_order = Vec::with_capacity(wire.display_order.len());
        let mut fields = HashMap::with_capacity(wire.properties.len());

        for name in wire.display_order {
            if ids_by_name.contains_key(&name) {
                return Err(Error::Malformed(format!("{name} appears twice in displayOrder")));
            }
            let Some(value) = wire.properties.remove(&name) else {
                return Err(Error::Malformed(format!("{name} in displayOrder has no schema")));
            };
            let Value::Object(mut object) = value else {
                return Err(Error::Malformed(format!("schema of {name} is not an object")));
            };

            let id = match object.remove("_id") {
                Some(Value::String(id)) => FieldId::new(id),
                Some(other) => {
                    return Err(Error::Malformed(format!("_id of {name} is {other}")));
                }
                None => FieldId::new(name.clone()),
            };
            let schema: FieldSchema = serde_json::from_value(Value::Object(object))
                .map_err(|e| Error::Malformed(format!("schema of {name}: {e}")))?;

            if fields.contains_key(&id) {
                return Err(Error::Malformed(format!("_id {id} is not unique")));
            }
            fields.insert(
                id.clone(),
                Field {
                    id: id.clone(),
                    name: name.clone(),
                    schema,
                },
            );
            ids_by_name.insert(name, id.clone());
            display_order.push(id);
        }

        if let Some(orphan) = wire.properties.keys().next() {
            return Err(Error::Malformed(format!("{orphan} is missing from displayOrder")));
        }

        let mut required: Vec<FieldId> = Vec::with_capacity(wire.required.len());
        for name in wire.required {
            let Some(id) = ids_by_name.get(&name) else {
                return Err(Error::Malformed(format!("required {name} is not a field")));
            };
            if required.contains(id) {
                debug!(field = %name, "dropping duplicate required entry");
                continue;
            }
            required.push(id.clone());
        }

        Ok(Self {
            schema_type: wire.schema_type,
            display_order,
            required,
            fields,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireDocumentRef<'a> {
    #[serde(rename = "type")]
    schema_type: &'a str,
    display_order: Vec<&'a str>,
    required: Vec<&'a str>,
    properties: PropertiesRef<'a>,
}

struct PropertiesRef<'a>(&'a FormDocument);

#[derive(Serialize)]
struct PropertyRef<'a> {
    #[serde(rename = "_id")]
    id: &'a FieldId,
    #[serde(flatten)]
    schema: &'a FieldSchema,
}

impl Serialize for PropertiesRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.display_order.len()))?;
        for field in self.0.fields() {
            map.serialize_entry(
                &field.name,
                &PropertyRef {
                    id: &field.id,
                    schema: &field.schema,
                },
            )?;
        }
        map.end()
    }
}

impl Serialize for FormDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        WireDocumentRef {
            schema_type: &self.schema_type,
            display_order: self.names(),
            required: self.required_names(),
            properties: PropertiesRef(self),
        }
        .serialize(serializer)
    }
}
