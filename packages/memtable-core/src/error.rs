//! Table engine error types.

use thiserror::Error;

/// Table engine errors.
///
/// Every variant is a recoverable, caller-visible condition. Schema errors
/// are raised at registration time, row errors at mutation or lookup time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Field name registered twice on the same table or index
    #[error("Field '{field}' already declared in '{owner}'")]
    DuplicateFieldName { owner: String, field: String },

    /// Compute field used in a primary key or index
    #[error("Compute field '{field}' cannot be used as a key")]
    ComputedFieldNotAllowedAsKey { field: String },

    /// Index name already registered on the table
    #[error("Index '{index}' already registered on table '{table}'")]
    IndexAlreadyRegistered { table: String, index: String },

    /// Index registered without fields
    #[error("Index '{index}' on table '{table}' has no fields")]
    IndexHasNoFields { table: String, index: String },

    /// Index references a field the table never declared
    #[error("Index '{index}' references field '{field}' not declared in table '{table}'")]
    IndexFieldNotInTable {
        table: String,
        index: String,
        field: String,
    },

    /// Field referenced by name is not declared in the table
    #[error("Field '{field}' not declared in table '{table}'")]
    UnknownField { table: String, field: String },

    /// Key derivation attempted without key fields
    #[error("No key fields defined for '{owner}'")]
    NoKeyFieldsDefined { owner: String },

    /// Insert collided with an existing primary key
    #[error("Primary key '{key}' already exists in table '{table}'")]
    PrimaryKeyAlreadyExists { table: String, key: String },

    /// Update or delete target absent
    #[error("No record matches key '{key}' in table '{table}'")]
    NoMatchingRecord { table: String, key: String },

    /// Lookup by an unregistered index
    #[error("Index '{index}' not registered on table '{table}'")]
    NoSuchIndex { table: String, index: String },

    /// Table not found in the database
    #[error("Table '{table}' not found")]
    TableNotFound { table: String },

    /// Table already exists in the database
    #[error("Table '{0}' already exists")]
    TableAlreadyExists(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error while streaming rows
    #[error("I/O error: {0}")]
    Io(String),

    /// Row source failure while feeding a table
    #[error("Feed error: {0}")]
    Feed(String),
}

impl From<serde_json::Error> for TableError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            TableError::Io(error.to_string())
        } else {
            TableError::Serialization(error.to_string())
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(error: std::io::Error) -> Self {
        TableError::Io(error.to_string())
    }
}
