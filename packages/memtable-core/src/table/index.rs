//! Secondary equality index over a subset of table fields.
//!
//! An index never stores row values. Each entry maps a derived index key to
//! the primary keys of the rows that currently produce it; the owning table
//! re-links those identifiers on every mutation.

use std::collections::HashMap;

use indexmap::IndexSet;

use super::field::Field;
use super::key::{self, FieldLookup};
use crate::error::TableError;

/// Secondary index mapping index keys to primary keys.
#[derive(Debug, Clone)]
pub struct Index {
    /// Index name, unique within a table
    name: String,
    /// Key fields in declaration order
    fields: Vec<Field>,
    /// Index key -> primary keys of matching rows, in link order
    entries: HashMap<String, IndexSet<String>>,
}

impl Index {
    /// Creates an empty index without fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            entries: HashMap::new(),
        }
    }

    /// Appends a key field.
    ///
    /// # Returns
    /// `Err(TableError::ComputedFieldNotAllowedAsKey)` for compute fields,
    /// `Err(TableError::DuplicateFieldName)` if the name is already present.
    pub fn add_field(&mut self, field: Field) -> Result<(), TableError> {
        if field.is_compute() {
            return Err(TableError::ComputedFieldNotAllowedAsKey {
                field: field.name().to_string(),
            });
        }
        if self.fields.iter().any(|f| f.name() == field.name()) {
            return Err(TableError::DuplicateFieldName {
                owner: self.name.clone(),
                field: field.name().to_string(),
            });
        }
        self.fields.push(field);
        Ok(())
    }

    /// Builder form of [`Index::add_field`].
    pub fn with_field(mut self, field: Field) -> Result<Self, TableError> {
        self.add_field(field)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of distinct index keys currently linked.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Derives the index key for a row or filter.
    pub(crate) fn derive_key<L: FieldLookup + ?Sized>(&self, source: &L) -> Result<String, TableError> {
        key::derive_key(&self.fields, source).ok_or_else(|| TableError::NoKeyFieldsDefined {
            owner: self.name.clone(),
        })
    }

    /// Replaces the key field definitions, keeping names and order.
    pub(crate) fn rebind_fields(&mut self, fields: Vec<Field>) {
        self.fields = fields;
    }

    /// Links a primary key under an index key.
    pub(crate) fn link(&mut self, index_key: String, primary_key: &str) {
        self.entries
            .entry(index_key)
            .or_default()
            .insert(primary_key.to_string());
    }

    /// Removes a primary key from an index key, dropping the entry once empty.
    pub(crate) fn unlink(&mut self, index_key: &str, primary_key: &str) {
        if let Some(linked) = self.entries.get_mut(index_key) {
            linked.shift_remove(primary_key);
            if linked.is_empty() {
                self.entries.remove(index_key);
            }
        }
    }

    /// Number of primary keys linked under an index key.
    pub fn count(&self, index_key: &str) -> usize {
        self.entries.get(index_key).map_or(0, IndexSet::len)
    }

    /// Primary keys linked under an index key, in link order.
    pub fn primary_keys(&self, index_key: &str) -> impl Iterator<Item = &str> {
        self.entries
            .get(index_key)
            .into_iter()
            .flat_map(|linked| linked.iter().map(String::as_str))
    }
}
