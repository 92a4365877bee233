//! Read operations: primary key lookup, index lookup, and iteration.

use super::Table;
use crate::error::TableError;
use crate::table::Index;
use crate::types::Record;

impl Table {
    /// Finds a row by primary key.
    ///
    /// # Arguments
    /// * `key` - Record supplying the primary key field values
    ///
    /// # Returns
    /// `Ok(None)` when no row is stored under the derived key.
    pub fn find(&self, key: &Record) -> Result<Option<Record>, TableError> {
        let primary_key = self.primary_key_hash(key)?;
        Ok(self.rows.get(&primary_key).map(|slots| self.view(slots)))
    }

    /// Returns `true` if a row is stored under `key`'s primary key.
    pub fn contains(&self, key: &Record) -> Result<bool, TableError> {
        let primary_key = self.primary_key_hash(key)?;
        Ok(self.rows.contains_key(&primary_key))
    }

    /// Returns every row linked under `filter`'s key in the named index.
    ///
    /// # Arguments
    /// * `index_name` - Registered index name
    /// * `filter` - Record supplying the index field values
    ///
    /// # Returns
    /// Rows in link order, `Err(TableError::NoSuchIndex)` for unknown indexes.
    pub fn get_by_index(&self, index_name: &str, filter: &Record) -> Result<Vec<Record>, TableError> {
        let index = self.lookup_index(index_name)?;
        let index_key = index.derive_key(filter)?;
        Ok(index
            .primary_keys(&index_key)
            .filter_map(|primary_key| self.rows.get(primary_key))
            .map(|slots| self.view(slots))
            .collect())
    }

    /// Counts rows linked under `filter`'s key in the named index.
    ///
    /// # Returns
    /// `Err(TableError::NoSuchIndex)` for unknown indexes.
    pub fn count_by_index(&self, index_name: &str, filter: &Record) -> Result<usize, TableError> {
        let index = self.lookup_index(index_name)?;
        let index_key = index.derive_key(filter)?;
        Ok(index.count(&index_key))
    }

    /// Returns the number of stored rows.
    pub fn count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Returns every stored row in storage order.
    pub fn all(&self) -> Vec<Record> {
        self.iter().collect()
    }

    /// Lazily yields every stored row in storage order.
    ///
    /// Each call starts a fresh pass. The iterator borrows the table, so
    /// mutation during traversal is rejected at compile time.
    pub fn iter(&self) -> impl Iterator<Item = Record> + '_ {
        self.rows.values().map(|slots| self.view(slots))
    }

    fn lookup_index(&self, index_name: &str) -> Result<&Index, TableError> {
        self.indexes
            .get(index_name)
            .ok_or_else(|| TableError::NoSuchIndex {
                table: self.name.clone(),
                index: index_name.to_string(),
            })
    }
}
