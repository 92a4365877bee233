//! Table schema, key derivation, secondary indexes and row operations.

mod field;
mod index;
pub mod key;
mod options;
mod query;
#[allow(clippy::module_inception)]
mod table;
pub(crate) mod validation;

pub use field::Field;
pub use index::Index;
pub use options::{DeleteOptions, InsertOptions, ReplaceOptions, UpdateOptions};
pub use table::Table;
