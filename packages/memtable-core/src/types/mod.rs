//! Value model, records, and field type coercion.

mod coerce;
mod field_type;
mod record;
mod value;

pub use field_type::{ComputeFn, FieldKind, FieldType};
pub use record::Record;
pub use value::Value;
