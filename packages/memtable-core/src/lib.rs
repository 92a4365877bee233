//! Embeddable in-memory table engine.
//!
//! Provides typed field coercion, hash-keyed row storage with composite
//! primary keys, secondary indexes, JSON import/export, schema files and
//! bulk loading from paged row sources.

pub mod config;
pub mod database;
pub mod error;
pub mod feeder;
pub mod json;
pub mod schema;
pub mod table;
pub mod types;

pub use config::{FeederConfig, TableConfig};
pub use database::Database;
pub use error::TableError;
pub use table::{Field, Index, Table};
pub use types::{FieldType, Record, Value};
