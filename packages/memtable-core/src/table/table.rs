//! Table schema and row storage.
//!
//! Each table has:
//! - Ordered field definitions fixing the stored tuple layout
//! - An ordered primary key over non-compute fields
//! - A row store keyed by derived primary key
//! - Secondary indexes holding primary keys only
//!
//! Every mutation derives all keys it needs before touching state, then
//! updates the row store and every index together.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::config::TableConfig;
use crate::error::TableError;
use crate::types::{Record, Value};

use super::field::Field;
use super::index::Index;
use super::key::{self, FieldLookup, SlotLookup};
use super::options::{DeleteOptions, InsertOptions, ReplaceOptions, UpdateOptions};
use super::validation;

/// In-memory table with hash-keyed rows and secondary indexes.
#[derive(Debug, Clone)]
pub struct Table {
    /// Table name
    pub(super) name: String,
    /// Field definitions in declaration order
    pub(super) fields: Vec<Field>,
    /// Field name -> slot position
    pub(super) positions: HashMap<String, usize>,
    /// Primary key fields in key derivation order
    pub(super) primary_key: Vec<Field>,
    /// Primary key -> stored tuple, in insertion order
    pub(super) rows: IndexMap<String, Vec<Value>>,
    /// Index name -> index, in registration order
    pub(super) indexes: IndexMap<String, Index>,
    /// Number of stored rows
    pub(super) row_count: usize,
}

impl Table {
    /// Creates an empty table with default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, &TableConfig::default())
    }

    /// Creates an empty table.
    ///
    /// # Arguments
    /// * `name` - Table name
    /// * `config` - Table configuration (row store preallocation)
    pub fn with_config(name: impl Into<String>, config: &TableConfig) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            positions: HashMap::new(),
            primary_key: Vec::new(),
            rows: IndexMap::with_capacity(config.initial_capacity),
            indexes: IndexMap::new(),
            row_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field definitions in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.positions
            .get(name)
            .and_then(|&position| self.fields.get(position))
    }

    /// Primary key fields in key derivation order.
    pub fn primary_key(&self) -> &[Field] {
        &self.primary_key
    }

    /// Registered indexes in registration order.
    pub fn indexes(&self) -> impl Iterator<Item = &Index> {
        self.indexes.values()
    }

    /// Looks up a registered index by name.
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.get(name)
    }

    /// Declares a new field at the end of the row layout.
    ///
    /// Rows already stored get a null slot for the new field.
    ///
    /// # Returns
    /// `Err(TableError::DuplicateFieldName)` if the name is already declared.
    pub fn add_field(&mut self, field: Field) -> Result<(), TableError> {
        if self.positions.contains_key(field.name()) {
            return Err(TableError::DuplicateFieldName {
                owner: self.name.clone(),
                field: field.name().to_string(),
            });
        }

        if !self.rows.is_empty() {
            tracing::debug!(
                "Padding {} stored rows of table {} for new field {}",
                self.rows.len(),
                self.name,
                field.name()
            );
            for slots in self.rows.values_mut() {
                slots.push(Value::Null);
            }
        }

        self.positions
            .insert(field.name().to_string(), self.fields.len());
        self.fields.push(field);
        Ok(())
    }

    /// Appends a field to the primary key, declaring it first if needed.
    ///
    /// A name already declared keeps its declared definition; a name already
    /// in the primary key is left where it is.
    ///
    /// # Returns
    /// `Err(TableError::ComputedFieldNotAllowedAsKey)` for compute fields.
    pub fn add_to_primary_key(&mut self, field: Field) -> Result<(), TableError> {
        validation::validate_key_field(&field)?;

        let declared = match self.field(field.name()) {
            Some(declared) => {
                validation::validate_key_field(declared)?;
                declared.clone()
            }
            None => {
                self.add_field(field.clone())?;
                field
            }
        };

        if self.primary_key.iter().any(|f| f.name() == declared.name()) {
            return Ok(());
        }

        if !self.rows.is_empty() {
            tracing::warn!(
                "Primary key of table {} extended with {} while {} rows are stored; existing keys are not rebuilt",
                self.name,
                declared.name(),
                self.rows.len()
            );
        }
        self.primary_key.push(declared);
        Ok(())
    }

    /// Registers a secondary index.
    ///
    /// Index fields are rebound to the table's own field definitions. Rows
    /// stored before registration are not added to the index.
    ///
    /// # Returns
    /// `Err(TableError::IndexAlreadyRegistered)`, `Err(TableError::IndexHasNoFields)`
    /// or `Err(TableError::IndexFieldNotInTable)` on invalid registrations.
    pub fn add_index(&mut self, mut index: Index) -> Result<(), TableError> {
        if self.indexes.contains_key(index.name()) {
            return Err(TableError::IndexAlreadyRegistered {
                table: self.name.clone(),
                index: index.name().to_string(),
            });
        }

        let fields =
            validation::resolve_index_fields(&self.name, &self.fields, &self.positions, &index)?;
        index.rebind_fields(fields);

        if !self.rows.is_empty() {
            tracing::warn!(
                "Index {} registered on table {} after {} rows were stored; those rows are not indexed",
                index.name(),
                self.name,
                self.rows.len()
            );
        }

        tracing::debug!(
            "Registered index {} on table {} over {} field(s)",
            index.name(),
            self.name,
            index.fields().len()
        );
        self.indexes.insert(index.name().to_string(), index);
        Ok(())
    }

    /// Inserts a row, failing if its primary key is already stored.
    pub fn insert(&mut self, row: &Record) -> Result<bool, TableError> {
        self.insert_with(row, InsertOptions::default())
    }

    /// Inserts a row.
    ///
    /// # Returns
    /// `Ok(true)` when stored, `Ok(false)` when an existing row was kept
    /// because of `ignore_if_exists`.
    pub fn insert_with(&mut self, row: &Record, options: InsertOptions) -> Result<bool, TableError> {
        let primary_key = self.primary_key_hash(row)?;

        if self.rows.contains_key(&primary_key) {
            if options.ignore_if_exists {
                return Ok(false);
            }
            return Err(TableError::PrimaryKeyAlreadyExists {
                table: self.name.clone(),
                key: primary_key,
            });
        }

        let slots = self.prepare_row(row, options.ignore_compute);
        let index_keys = self.index_keys(row)?;

        self.rows.insert(primary_key.clone(), slots);
        self.row_count += 1;
        self.link_all(&primary_key, index_keys);
        self.debug_check();
        Ok(true)
    }

    /// Updates the row matching `key`; a missing row is a no-op.
    pub fn update(&mut self, key: &Record, patch: &Record) -> Result<bool, TableError> {
        self.update_with(key, patch, UpdateOptions::default())
    }

    /// Updates the row matching `key` with the non-null values of `patch`.
    ///
    /// Compute fields named in the patch are recomputed from the patch value
    /// alone. If the patch changes the primary key the row moves to the new
    /// key (and to the end of iteration order).
    ///
    /// # Returns
    /// `Ok(true)` when a row matched, `Ok(false)` when a missing row was
    /// ignored. `Err(TableError::PrimaryKeyAlreadyExists)` if the new primary
    /// key belongs to another row; the table is left unchanged.
    pub fn update_with(
        &mut self,
        key: &Record,
        patch: &Record,
        options: UpdateOptions,
    ) -> Result<bool, TableError> {
        let primary_key = self.primary_key_hash(key)?;

        let Some(current) = self.rows.get(&primary_key) else {
            if options.ignore_if_not_exists {
                return Ok(false);
            }
            return Err(TableError::NoMatchingRecord {
                table: self.name.clone(),
                key: primary_key,
            });
        };

        let mut updated = current.clone();
        for (position, field) in self.fields.iter().enumerate() {
            if let Some(value) = patch.get(field.name()).filter(|value| !value.is_null()) {
                updated[position] = field.patch(value, options.ignore_compute);
            }
        }

        let before = SlotLookup {
            positions: &self.positions,
            slots: current,
        };
        let after = SlotLookup {
            positions: &self.positions,
            slots: &updated,
        };

        let new_primary_key = self.primary_key_hash(&after)?;
        if new_primary_key != primary_key && self.rows.contains_key(&new_primary_key) {
            return Err(TableError::PrimaryKeyAlreadyExists {
                table: self.name.clone(),
                key: new_primary_key,
            });
        }

        let old_index_keys = self.index_keys(&before)?;
        let new_index_keys = self.index_keys(&after)?;

        self.unlink_all(&primary_key, &old_index_keys);
        if new_primary_key == primary_key {
            if let Some(slots) = self.rows.get_mut(&primary_key) {
                *slots = updated;
            }
        } else {
            tracing::trace!(
                "Re-keying row in table {} from {} to {}",
                self.name,
                primary_key,
                new_primary_key
            );
            self.rows.shift_remove(&primary_key);
            self.rows.insert(new_primary_key.clone(), updated);
        }
        self.link_all(&new_primary_key, new_index_keys);
        self.debug_check();
        Ok(true)
    }

    /// Inserts or fully overwrites the row with `row`'s primary key.
    pub fn replace(&mut self, row: &Record) -> Result<bool, TableError> {
        self.replace_with(row, ReplaceOptions::default())
    }

    /// Inserts or fully overwrites the row with `row`'s primary key.
    ///
    /// Every field is recomputed from `row`. An overwritten row keeps its
    /// position in iteration order.
    ///
    /// # Returns
    /// `Ok(true)` when an existing row was overwritten.
    pub fn replace_with(&mut self, row: &Record, options: ReplaceOptions) -> Result<bool, TableError> {
        let primary_key = self.primary_key_hash(row)?;
        let slots = self.prepare_row(row, options.ignore_compute);
        let new_index_keys = self.index_keys(row)?;

        let old_index_keys = match self.rows.get(&primary_key) {
            Some(current) => Some(self.index_keys(&SlotLookup {
                positions: &self.positions,
                slots: current,
            })?),
            None => None,
        };

        let existed = old_index_keys.is_some();
        match old_index_keys {
            Some(old_index_keys) => self.unlink_all(&primary_key, &old_index_keys),
            None => self.row_count += 1,
        }
        self.rows.insert(primary_key.clone(), slots);
        self.link_all(&primary_key, new_index_keys);
        self.debug_check();
        Ok(existed)
    }

    /// Deletes the row matching `key`; a missing row is a no-op.
    pub fn delete(&mut self, key: &Record) -> Result<bool, TableError> {
        self.delete_with(key, DeleteOptions::default())
    }

    /// Deletes the row matching `key`.
    ///
    /// # Returns
    /// `Ok(true)` when a row was removed, `Ok(false)` when a missing row was
    /// ignored.
    pub fn delete_with(&mut self, key: &Record, options: DeleteOptions) -> Result<bool, TableError> {
        let primary_key = self.primary_key_hash(key)?;

        let Some(current) = self.rows.get(&primary_key) else {
            if options.ignore_if_not_exists {
                return Ok(false);
            }
            return Err(TableError::NoMatchingRecord {
                table: self.name.clone(),
                key: primary_key,
            });
        };

        let index_keys = self.index_keys(&SlotLookup {
            positions: &self.positions,
            slots: current,
        })?;

        self.unlink_all(&primary_key, &index_keys);
        self.rows.shift_remove(&primary_key);
        self.row_count -= 1;
        self.debug_check();
        Ok(true)
    }

    /// Derives the primary key for a row or key filter.
    pub(super) fn primary_key_hash<L: FieldLookup + ?Sized>(
        &self,
        source: &L,
    ) -> Result<String, TableError> {
        key::derive_key(&self.primary_key, source).ok_or_else(|| TableError::NoKeyFieldsDefined {
            owner: self.name.clone(),
        })
    }

    /// Builds the stored tuple for a raw row, one slot per declared field.
    fn prepare_row(&self, row: &Record, ignore_compute: bool) -> Vec<Value> {
        self.fields
            .iter()
            .map(|field| field.prepare(row, ignore_compute))
            .collect()
    }

    /// Derives every index's key for a row, in registration order.
    fn index_keys<L: FieldLookup + ?Sized>(&self, source: &L) -> Result<Vec<String>, TableError> {
        self.indexes
            .values()
            .map(|index| index.derive_key(source))
            .collect()
    }

    fn link_all(&mut self, primary_key: &str, index_keys: Vec<String>) {
        for (index, index_key) in self.indexes.values_mut().zip(index_keys) {
            index.link(index_key, primary_key);
        }
    }

    fn unlink_all(&mut self, primary_key: &str, index_keys: &[String]) {
        for (index, index_key) in self.indexes.values_mut().zip(index_keys) {
            index.unlink(index_key, primary_key);
        }
    }

    /// Reconstructs the field-name keyed view of a stored tuple.
    pub(super) fn view(&self, slots: &[Value]) -> Record {
        let mut record = Record::with_capacity(self.fields.len());
        for (field, value) in self.fields.iter().zip(slots) {
            record.insert(field.name(), value.clone());
        }
        record
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.row_count, self.rows.len());
    }
}
