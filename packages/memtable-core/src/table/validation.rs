//! Validation methods for table schema registration.

use std::collections::HashMap;

use super::field::Field;
use super::index::Index;
use crate::error::TableError;

/// Rejects compute fields used as key fields.
pub(crate) fn validate_key_field(field: &Field) -> Result<(), TableError> {
    if field.is_compute() {
        return Err(TableError::ComputedFieldNotAllowedAsKey {
            field: field.name().to_string(),
        });
    }
    Ok(())
}

/// Validates an index against the owning table's schema.
///
/// # Arguments
/// * `table` - Owning table name (for error context)
/// * `fields` - Table fields in declaration order
/// * `positions` - Field name to slot position
/// * `index` - Index to validate
///
/// # Returns
/// The table's own definitions of the index fields, in index order.
pub(crate) fn resolve_index_fields(
    table: &str,
    fields: &[Field],
    positions: &HashMap<String, usize>,
    index: &Index,
) -> Result<Vec<Field>, TableError> {
    if index.fields().is_empty() {
        return Err(TableError::IndexHasNoFields {
            table: table.to_string(),
            index: index.name().to_string(),
        });
    }

    index
        .fields()
        .iter()
        .map(|index_field| {
            let declared = positions
                .get(index_field.name())
                .and_then(|&position| fields.get(position))
                .ok_or_else(|| TableError::IndexFieldNotInTable {
                    table: table.to_string(),
                    index: index.name().to_string(),
                    field: index_field.name().to_string(),
                })?;
            validate_key_field(declared)?;
            Ok(declared.clone())
        })
        .collect()
}
