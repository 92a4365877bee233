//! Shared fixtures for integration tests.

use memtable_core::table::{Field, Index, Table};
use memtable_core::types::{FieldType, Record, Value};

/// Fixed clock for the `age` compute field.
pub const NOW: i64 = 1_700_000_000;
pub const YEAR: i64 = 60 * 60 * 24 * 365;

/// Builds the person table used across scenarios.
///
/// `id` is the primary key, `first_name_index` and `last_name_index` are
/// registered, and `age` is computed from `birth_date`.
pub fn person_table() -> Table {
    let mut table = Table::new("person_table");
    table
        .add_to_primary_key(Field::new("id", FieldType::Integer))
        .unwrap();
    for (name, field_type) in [
        ("first_name", FieldType::String),
        ("last_name", FieldType::String),
        ("birth_date", FieldType::Integer),
        ("weight", FieldType::Float),
        ("address", FieldType::String),
    ] {
        table.add_field(Field::new(name, field_type)).unwrap();
    }
    table
        .add_field(Field::new("age", FieldType::compute(age)))
        .unwrap();

    for name in ["first_name", "last_name"] {
        let index = Index::new(format!("{name}_index"))
            .with_field(table.field(name).unwrap().clone())
            .unwrap();
        table.add_index(index).unwrap();
    }
    table
}

/// Whole years between `birth_date` and [`NOW`].
pub fn age(row: &Record) -> Value {
    let birth_date = row["birth_date"].to_integer();
    Value::Integer((NOW - birth_date) / YEAR)
}

pub fn person(id: i64, first_name: &str, last_name: &str) -> Record {
    Record::new()
        .with("id", id)
        .with("first_name", first_name)
        .with("last_name", last_name)
        .with("birth_date", NOW - 25 * YEAR)
        .with("weight", 70.5)
        .with("address", "Amman")
}

pub fn key(id: i64) -> Record {
    Record::new().with("id", id)
}

pub fn first_name(value: &str) -> Record {
    Record::new().with("first_name", value)
}

pub fn last_name(value: &str) -> Record {
    Record::new().with("last_name", value)
}
