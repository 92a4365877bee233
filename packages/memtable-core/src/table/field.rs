//! Field definition within a table or index.

use crate::types::{FieldType, Record, Value};

/// Named, typed column definition.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name
    name: String,
    /// Coercion policy
    field_type: FieldType,
}

impl Field {
    /// Creates a new field.
    ///
    /// # Arguments
    /// * `name` - Field name
    /// * `field_type` - Coercion policy for values stored in this field
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_compute(&self) -> bool {
        self.field_type.is_compute()
    }

    /// Coerces a single value through this field's type.
    pub fn coerce(&self, value: &Value) -> Value {
        self.field_type.coerce(&self.name, value)
    }

    /// Builds the stored slot for this field from a whole raw row.
    ///
    /// With `ignore_compute`, compute fields take the raw value verbatim
    /// (null when absent). Otherwise a compute field whose raw value is empty
    /// runs its handler over the whole row; every other case coerces the raw
    /// slot value.
    pub(crate) fn prepare(&self, raw: &Record, ignore_compute: bool) -> Value {
        let slot = raw.get(&self.name);
        if self.field_type.is_compute() {
            if ignore_compute {
                return slot.cloned().unwrap_or_default();
            }
            if slot.is_none_or(Value::is_empty) {
                if let Some(value) = self.field_type.evaluate(raw) {
                    return value;
                }
            }
        }
        self.coerce(slot.unwrap_or(&Value::Null))
    }

    /// Builds the stored slot for this field from an update patch value.
    pub(crate) fn patch(&self, value: &Value, ignore_compute: bool) -> Value {
        if ignore_compute && self.field_type.is_compute() {
            value.clone()
        } else {
            self.coerce(value)
        }
    }
}
