//! Field types and their coercion policies.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::record::Record;
use super::value::Value;

/// Type alias for compute handler signature.
///
/// A handler receives a whole candidate row and derives one value from it.
pub type ComputeFn = dyn Fn(&Record) -> Value + Send + Sync;

/// Coercion policy for a field's values.
#[derive(Clone)]
pub enum FieldType {
    /// Coerces input to a 64-bit integer.
    Integer,
    /// Coerces input to a 64-bit float.
    Float,
    /// Coerces input to a string.
    String,
    /// Derives the value from the whole input row.
    Compute(Arc<ComputeFn>),
}

/// Discriminant of a [`FieldType`], without the compute handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Float,
    String,
    Compute,
}

impl FieldType {
    /// Creates a compute type from a handler closure.
    pub fn compute<F>(handler: F) -> Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        Self::Compute(Arc::new(handler))
    }

    /// Returns the type discriminant.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Integer => FieldKind::Integer,
            Self::Float => FieldKind::Float,
            Self::String => FieldKind::String,
            Self::Compute(_) => FieldKind::Compute,
        }
    }

    pub fn is_compute(&self) -> bool {
        matches!(self, Self::Compute(_))
    }

    /// Coerces a single value.
    ///
    /// Compute types receive `value` as a one-field record keyed by
    /// `field_name`, since there is no surrounding row to hand them.
    pub fn coerce(&self, field_name: &str, value: &Value) -> Value {
        match self {
            Self::Integer => Value::Integer(value.to_integer()),
            Self::Float => Value::Float(value.to_float()),
            Self::String => Value::String(value.to_text()),
            Self::Compute(handler) => {
                let single = Record::from_iter([(field_name, value.clone())]);
                handler(&single)
            }
        }
    }

    /// Runs the compute handler over a whole row.
    ///
    /// # Returns
    /// `None` for non-compute types.
    pub fn evaluate(&self, row: &Record) -> Option<Value> {
        match self {
            Self::Compute(handler) => Some(handler(row)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => f.write_str("Integer"),
            Self::Float => f.write_str("Float"),
            Self::String => f.write_str("String"),
            Self::Compute(_) => f.write_str("Compute(<handler>)"),
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Compute => "compute",
        };
        f.write_str(name)
    }
}
