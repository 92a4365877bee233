//! Serde description of a table schema.
//!
//! Compute handlers are code, so a schema file only names compute fields;
//! the handlers are supplied by the caller when the table is built.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::table::{Field, Index, Table};
use crate::types::{ComputeFn, FieldKind, FieldType, Value};

/// Table schema file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Field definitions in declaration order
    pub fields: Vec<FieldSchema>,
    /// Primary key field names in key derivation order
    #[serde(default)]
    pub primary_key: Vec<String>,
    /// Secondary index definitions in registration order
    #[serde(default)]
    pub indexes: Vec<IndexSchema>,
}

/// Field schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name
    pub name: String,
    /// Type identifier
    pub r#type: FieldKind,
}

/// Index schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSchema {
    /// Index name
    pub name: String,
    /// Indexed field names in key derivation order
    pub fields: Vec<String>,
}

impl TableSchema {
    /// Builds an empty table from this schema.
    ///
    /// # Arguments
    /// * `handlers` - Compute handlers keyed by field name
    ///
    /// # Returns
    /// `Err(TableError::UnknownField)` if the primary key names an undeclared
    /// field; registration errors from the table otherwise.
    pub fn build(&self, handlers: &HashMap<String, Arc<ComputeFn>>) -> Result<Table, TableError> {
        let mut table = Table::new(self.name.clone());

        for field in &self.fields {
            let field_type = match field.r#type {
                FieldKind::Integer => FieldType::Integer,
                FieldKind::Float => FieldType::Float,
                FieldKind::String => FieldType::String,
                FieldKind::Compute => match handlers.get(&field.name) {
                    Some(handler) => FieldType::Compute(Arc::clone(handler)),
                    None => {
                        tracing::warn!(
                            "No compute handler for field {} of table {}; it will compute null",
                            field.name,
                            self.name
                        );
                        FieldType::compute(|_| Value::Null)
                    }
                },
            };
            table.add_field(Field::new(field.name.clone(), field_type))?;
        }

        for name in &self.primary_key {
            let declared = table
                .field(name)
                .cloned()
                .ok_or_else(|| TableError::UnknownField {
                    table: self.name.clone(),
                    field: name.clone(),
                })?;
            table.add_to_primary_key(declared)?;
        }

        for index_schema in &self.indexes {
            let mut index = Index::new(index_schema.name.clone());
            for name in &index_schema.fields {
                let declared = table.field(name).cloned().ok_or_else(|| {
                    TableError::IndexFieldNotInTable {
                        table: self.name.clone(),
                        index: index_schema.name.clone(),
                        field: name.clone(),
                    }
                })?;
                index.add_field(declared)?;
            }
            table.add_index(index)?;
        }

        tracing::debug!(
            "Built table {} with {} fields and {} indexes",
            self.name,
            self.fields.len(),
            self.indexes.len()
        );
        Ok(table)
    }

    /// Describes an existing table's schema.
    pub fn from_table(table: &Table) -> Self {
        Self {
            name: table.name().to_string(),
            fields: table
                .fields()
                .iter()
                .map(|field| FieldSchema {
                    name: field.name().to_string(),
                    r#type: field.field_type().kind(),
                })
                .collect(),
            primary_key: table
                .primary_key()
                .iter()
                .map(|field| field.name().to_string())
                .collect(),
            indexes: table
                .indexes()
                .map(|index| IndexSchema {
                    name: index.name().to_string(),
                    fields: index
                        .fields()
                        .iter()
                        .map(|field| field.name().to_string())
                        .collect(),
                })
                .collect(),
        }
    }
}
