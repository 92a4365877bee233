//! Database container managing named tables.

use std::collections::HashMap;

use parking_lot::{MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::TableError;
use crate::table::Table;

/// Read-only reference to a table within the database.
///
/// Holds the catalog read lock for as long as it lives.
pub type TableRef<'a> = MappedRwLockReadGuard<'a, Table>;

/// Mutable reference to a table within the database.
///
/// Holds the catalog write lock for as long as it lives.
pub type TableRefMut<'a> = MappedRwLockWriteGuard<'a, Table>;

/// Catalog of tables shared between threads.
///
/// Tables themselves are single-threaded; the catalog lock serializes
/// writers against readers.
#[derive(Debug, Default)]
pub struct Database {
    /// Map of table name to table instance
    tables: RwLock<HashMap<String, Table>>,
}

impl Database {
    /// Creates a new empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table under its own name.
    ///
    /// # Returns
    /// `Err(TableError::TableAlreadyExists)` if the name is taken.
    pub fn create_table(&self, table: Table) -> Result<(), TableError> {
        let mut tables = self.tables.write();
        if tables.contains_key(table.name()) {
            return Err(TableError::TableAlreadyExists(table.name().to_string()));
        }
        tracing::debug!("Created table {} with {} rows", table.name(), table.count());
        tables.insert(table.name().to_string(), table);
        Ok(())
    }

    /// Removes a table and returns it.
    ///
    /// # Returns
    /// `Err(TableError::TableNotFound)` for unknown names.
    pub fn drop_table(&self, name: &str) -> Result<Table, TableError> {
        let mut tables = self.tables.write();
        let table = tables.remove(name).ok_or_else(|| TableError::TableNotFound {
            table: name.to_string(),
        })?;
        tracing::debug!("Dropped table {}", name);
        Ok(table)
    }

    /// Gets a reference to a table by name.
    pub fn get_table(&self, name: &str) -> Result<TableRef<'_>, TableError> {
        RwLockReadGuard::try_map(self.tables.read(), |tables| tables.get(name)).map_err(|_| {
            TableError::TableNotFound {
                table: name.to_string(),
            }
        })
    }

    /// Gets a mutable reference to a table by name.
    pub fn get_table_mut(&self, name: &str) -> Result<TableRefMut<'_>, TableError> {
        RwLockWriteGuard::try_map(self.tables.write(), |tables| tables.get_mut(name)).map_err(|_| {
            TableError::TableNotFound {
                table: name.to_string(),
            }
        })
    }

    /// Returns all table names, sorted.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of tables in the database.
    pub fn table_count(&self) -> usize {
        self.tables.read().len()
    }
}
