//! Option lists for choice fields.
//!
//! On the wire a choice field carries `enum` plus `descriptions` and/or
//! `titles`, co-indexed arrays of equal length. In memory they are one list
//! of [`OptionEntry`] rows, so adding, removing or moving an option always
//! moves every column together.

use formkit_types::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the parallel arrays of a choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionColumn {
    /// Option values (`enum`).
    Enum,
    /// Rich-markup description per option.
    Descriptions,
    /// Plain display title per option.
    Titles,
}

impl OptionColumn {
    /// The JSON key of this column.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::Descriptions => "descriptions",
            Self::Titles => "titles",
        }
    }
}

impl fmt::Display for OptionColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single selectable option.
///
/// `description` and `title` are only meaningful when the owning list
/// carries that column; otherwise they stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionEntry {
    pub value: String,
    pub description: String,
    pub title: String,
}

impl OptionEntry {
    fn get(&self, column: OptionColumn) -> &str {
        match column {
            OptionColumn::Enum => &self.value,
            OptionColumn::Descriptions => &self.description,
            OptionColumn::Titles => &self.title,
        }
    }

    fn get_mut(&mut self, column: OptionColumn) -> &mut String {
        match column {
            OptionColumn::Enum => &mut self.value,
            OptionColumn::Descriptions => &mut self.description,
            OptionColumn::Titles => &mut self.title,
        }
    }
}

/// Ordered options of a choice field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    entries: Vec<OptionEntry>,
    descriptions: bool,
    titles: bool,
}

impl OptionList {
    /// An empty list carrying only `enum`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty list carrying `enum` and `descriptions` (radio style).
    #[must_use]
    pub fn with_descriptions() -> Self {
        Self {
            descriptions: true,
            ..Self::default()
        }
    }

    /// An empty list carrying `enum` and `titles` (dropdown style).
    #[must_use]
    pub fn with_titles() -> Self {
        Self {
            titles: true,
            ..Self::default()
        }
    }

    /// Builds a list from its parallel-array form.
    ///
    /// Fails with [`Error::Malformed`] when a present column's length differs
    /// from `values`.
    pub fn from_columns(
        values: Vec<String>,
        descriptions: Option<Vec<String>>,
        titles: Option<Vec<String>>,
    ) -> Result<Self> {
        for (column, present) in [
            (OptionColumn::Descriptions, &descriptions),
            (OptionColumn::Titles, &titles),
        ] {
            if let Some(items) = present {
                if items.len() != values.len() {
                    return Err(Error::Malformed(format!(
                        "{} has {} entries but enum has {}",
                        column,
                        items.len(),
                        values.len()
                    )));
                }
            }
        }

        let has_descriptions = descriptions.is_some();
        let has_titles = titles.is_some();
        let mut descriptions = descriptions.unwrap_or_default().into_iter();
        let mut titles = titles.unwrap_or_default().into_iter();
        let entries = values
            .into_iter()
            .map(|value| OptionEntry {
                value,
                description: descriptions.next().unwrap_or_default(),
                title: titles.next().unwrap_or_default(),
            })
            .collect();

        Ok(Self {
            entries,
            descriptions: has_descriptions,
            titles: has_titles,
        })
    }

    /// Whether this list carries `column`. `enum` is always present.
    #[must_use]
    pub fn has_column(&self, column: OptionColumn) -> bool {
        match column {
            OptionColumn::Enum => true,
            OptionColumn::Descriptions => self.descriptions,
            OptionColumn::Titles => self.titles,
        }
    }

    /// Returns the parallel array for `column`, or `None` if it is absent.
    #[must_use]
    pub fn column(&self, column: OptionColumn) -> Option<Vec<String>> {
        self.has_column(column).then(|| {
            self.entries
                .iter()
                .map(|e| e.get(column).to_string())
                .collect()
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[OptionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&OptionEntry> {
        self.entries.get(index)
    }

    /// Appends an option whose every column is `""`.
    pub fn push_blank(&mut self) {
        self.entries.push(OptionEntry::default());
    }

    /// Removes and returns the option at `index`.
    pub fn remove(&mut self, index: usize) -> Result<OptionEntry> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    /// Moves the option at `source` so that it ends up at `destination`,
    /// shifting the options in between by one.
    pub fn move_entry(&mut self, source: usize, destination: usize) -> Result<()> {
        self.check_index(source)?;
        self.check_index(destination)?;
        if source != destination {
            let entry = self.entries.remove(source);
            self.entries.insert(destination, entry);
        }
        Ok(())
    }

    /// Replaces one cell. The caller checks that `column` is present.
    pub fn set(&mut self, index: usize, column: OptionColumn, value: String) -> Result<()> {
        self.check_index(index)?;
        *self.entries[index].get_mut(column) = value;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(Error::InvalidIndex {
                index,
                len: self.entries.len(),
            })
        }
    }
}
