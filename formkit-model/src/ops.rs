//! Document transformations.
//!
//! Every operation borrows the current document and returns a new one.
//! On error the input is untouched and nothing is returned, so a caller
//! holding the current value can simply keep it.

use crate::document::FormDocument;
use crate::field::{Field, FieldSchema};
use crate::kind::FieldKind;
use crate::options::{OptionColumn, OptionList};
use formkit_types::{Error, FieldId, FieldStamp, Result};
use serde_json::Value;
use tracing::debug;

impl FormDocument {
    fn id_of(&self, name: &str) -> Result<FieldId> {
        self.field(name)
            .map(|f| f.id.clone())
            .ok_or_else(|| Error::UnknownField(name.to_string()))
    }

    /// Clones the document and applies `edit` to the named field.
    fn edit_field<F>(&self, name: &str, edit: F) -> Result<Self>
    where
        F: FnOnce(&mut Field) -> Result<()>,
    {
        let id = self.id_of(name)?;
        let mut next = self.clone();
        let field = next
            .fields
            .get_mut(&id)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;
        edit(field)?;
        Ok(next)
    }

    /// Clones the document and applies `edit` to the named field's options.
    fn edit_options<F>(&self, name: &str, edit: F) -> Result<Self>
    where
        F: FnOnce(&mut OptionList) -> Result<()>,
    {
        self.edit_field(name, |field| {
            let options = field
                .schema
                .options
                .as_mut()
                .ok_or_else(|| Error::NotAChoiceField(name.to_string()))?;
            edit(options)
        })
    }

    // ── Fields ───────────────────────────────────────────────────

    /// Appends a field built from `schema`, named and identified by `stamp`
    /// (`field-<millis>`).
    ///
    /// Fails with [`Error::NameCollision`] if that name or `_id` is taken,
    /// and with [`Error::Malformed`] if the template's opaque attributes
    /// hold a reserved key such as `_id`.
    pub fn create_field(&self, schema: FieldSchema, stamp: FieldStamp) -> Result<Self> {
        schema.check_extra()?;
        let name = stamp.field_name();
        let id = FieldId::from_stamp(stamp);
        if self.field(&name).is_some() || self.fields.contains_key(&id) {
            return Err(Error::NameCollision(name));
        }

        let mut next = self.clone();
        next.display_order.push(id.clone());
        next.fields.insert(id.clone(), Field { id, name, schema });
        debug!(field = %stamp.field_name(), "created field");
        Ok(next)
    }

    /// [`create_field`](Self::create_field) from a catalog template.
    pub fn create_field_of_kind(&self, kind: FieldKind, stamp: FieldStamp) -> Result<Self> {
        self.create_field(kind.template(), stamp)
    }

    /// Deletes a field from the schema set, the display order and the
    /// required list in one step.
    pub fn remove_field(&self, name: &str) -> Result<Self> {
        let id = self.id_of(name)?;
        let mut next = self.clone();
        next.fields.remove(&id);
        next.display_order.retain(|other| other != &id);
        next.required.retain(|other| other != &id);
        debug!(field = %name, id = %id, "removed field");
        Ok(next)
    }

    /// Publishes the field under `new_name`. Its `_id`, position and
    /// required flag are unchanged.
    pub fn rename_field(&self, old_name: &str, new_name: &str) -> Result<Self> {
        if old_name == new_name {
            self.id_of(old_name)?;
            return Ok(self.clone());
        }
        if self.field(new_name).is_some() {
            return Err(Error::NameCollision(new_name.to_string()));
        }
        let next = self.edit_field(old_name, |field| {
            field.name = new_name.to_string();
            Ok(())
        })?;
        debug!(from = %old_name, to = %new_name, "renamed field");
        Ok(next)
    }

    /// Moves the field at `source` to `destination`, shifting the fields in
    /// between by one slot.
    ///
    /// A `None` destination is a cancelled drag and returns the document
    /// unchanged, as does `source == destination`.
    pub fn reorder_fields(&self, source: usize, destination: Option<usize>) -> Result<Self> {
        let Some(destination) = destination else {
            return Ok(self.clone());
        };
        let len = self.display_order.len();
        for index in [source, destination] {
            if index >= len {
                return Err(Error::InvalidIndex { index, len });
            }
        }
        if source == destination {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        let id = next.display_order.remove(source);
        next.display_order.insert(destination, id);
        debug!(source, destination, "reordered fields");
        Ok(next)
    }

    /// Marks or unmarks a field as required. Setting the current state again
    /// is a no-op.
    pub fn set_required(&self, name: &str, required: bool) -> Result<Self> {
        let id = self.id_of(name)?;
        let mut next = self.clone();
        let position = next.required.iter().position(|other| other == &id);
        match (required, position) {
            (true, None) => next.required.push(id),
            (false, Some(index)) => {
                next.required.remove(index);
            }
            _ => return Ok(next),
        }
        debug!(field = %name, required, "set required");
        Ok(next)
    }

    /// Replaces one scalar attribute (`title`, `description`, `type`, or an
    /// opaque one such as `format`) on the named field.
    pub fn update_field_attribute(&self, name: &str, key: &str, value: Value) -> Result<Self> {
        self.edit_field(name, |field| field.schema.set_attribute(key, value))
    }

    // ── Options ──────────────────────────────────────────────────

    /// Appends an option whose value and every present column are `""`.
    pub fn add_option(&self, name: &str) -> Result<Self> {
        self.edit_options(name, |options| {
            options.push_blank();
            Ok(())
        })
    }

    /// Deletes the option at `index` from every column.
    pub fn remove_option(&self, name: &str, index: usize) -> Result<Self> {
        self.edit_options(name, |options| options.remove(index).map(|_| ()))
    }

    /// Moves an option across every column with the same list-move semantics
    /// as [`reorder_fields`](Self::reorder_fields).
    pub fn move_option(&self, name: &str, source: usize, destination: usize) -> Result<Self> {
        self.edit_options(name, |options| options.move_entry(source, destination))
    }

    /// Replaces the cell at `index` in one column.
    ///
    /// Fails with [`Error::MissingColumn`] when the field does not carry
    /// `column`.
    pub fn update_option(
        &self,
        name: &str,
        index: usize,
        column: OptionColumn,
        value: impl Into<String>,
    ) -> Result<Self> {
        let value = value.into();
        self.edit_options(name, |options| {
            if !options.has_column(column) {
                return Err(Error::MissingColumn {
                    field: name.to_string(),
                    column: column.to_string(),
                });
            }
            options.set(index, column, value)
        })
    }
}
