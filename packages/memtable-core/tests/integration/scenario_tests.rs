//! Person table scenarios exercising the public table API end to end.

use memtable_core::error::TableError;
use memtable_core::table::{Field, InsertOptions, Table};
use memtable_core::types::{FieldType, Record, Value};
use ntest::timeout;

use super::helpers::{first_name, key, last_name, person, person_table, NOW, YEAR};

#[timeout(1000)]
#[test]
fn test_first_name_index_counts_follow_updates() -> anyhow::Result<()> {
    let mut table = person_table();
    table.insert(&Record::new().with("id", 1).with("first_name", "Ahmad"))?;
    table.insert(&Record::new().with("id", 2).with("first_name", "Ahmad"))?;
    assert_eq!(table.count_by_index("first_name_index", &first_name("Ahmad"))?, 2);

    table.update(&key(2), &first_name("Osama"))?;
    assert_eq!(table.count_by_index("first_name_index", &first_name("Ahmad"))?, 1);
    assert_eq!(table.count_by_index("first_name_index", &first_name("Osama"))?, 1);

    let found = table.find(&key(2))?.expect("row 2 is stored");
    assert_eq!(found["first_name"], Value::from("Osama"));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_full_lifecycle() -> anyhow::Result<()> {
    let mut table = person_table();
    for id in 1..=50 {
        let last = if id % 2 == 0 { "Saleh" } else { "Haddad" };
        table.insert(&person(id, "Ahmad", last))?;
    }
    assert_eq!(table.count(), 50);
    assert_eq!(table.count_by_index("last_name_index", &last_name("Saleh"))?, 25);

    let stored = table.find(&key(10))?.expect("row 10 is stored");
    assert_eq!(stored["age"], Value::Integer(25));
    assert_eq!(stored["weight"], Value::Float(70.5));

    for id in (1..=50).filter(|id| id % 5 == 0) {
        assert!(table.delete(&key(id))?);
    }
    assert_eq!(table.count(), 40);
    assert_eq!(table.count_by_index("last_name_index", &last_name("Saleh"))?, 20);

    assert!(table.replace(&person(1, "Lina", "Saleh"))?);
    assert!(!table.replace(&person(5, "Lina", "Saleh"))?);
    assert_eq!(table.count(), 41);
    assert_eq!(table.count_by_index("first_name_index", &first_name("Lina"))?, 2);
    assert_eq!(table.count_by_index("last_name_index", &last_name("Saleh"))?, 22);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_rekeyed_row_only_reachable_under_new_key() -> anyhow::Result<()> {
    let mut table = person_table();
    table.insert(&person(1, "Ahmad", "Saleh"))?;
    table.update(&key(1), &Record::new().with("id", 100).with("last_name", "Haddad"))?;

    assert!(table.find(&key(1))?.is_none());
    let moved = table.find(&key(100))?.expect("row moved to 100");
    assert_eq!(moved["first_name"], Value::from("Ahmad"));

    let by_name = table.get_by_index("first_name_index", &first_name("Ahmad"))?;
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0]["id"], Value::Integer(100));
    assert_eq!(table.count_by_index("last_name_index", &last_name("Saleh"))?, 0);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_uniqueness_and_suppressed_duplicates() -> anyhow::Result<()> {
    let mut table = person_table();
    table.insert(&person(1, "Ahmad", "Saleh"))?;
    let before = table.all();

    let err = table.insert(&person(1, "Osama", "Haddad")).unwrap_err();
    assert!(matches!(err, TableError::PrimaryKeyAlreadyExists { .. }));

    let stored = table.insert_with(
        &person(1, "Osama", "Haddad"),
        InsertOptions {
            ignore_if_exists: true,
            ..Default::default()
        },
    )?;
    assert!(!stored);
    assert_eq!(table.all(), before);
    assert_eq!(table.count_by_index("first_name_index", &first_name("Osama"))?, 0);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_no_primary_key_never_inserts() {
    let mut table = Table::new("keyless");
    table
        .add_field(Field::new("first_name", FieldType::String))
        .unwrap();
    for id in 0..5 {
        let result = table.insert(&Record::new().with("first_name", format!("n{id}")));
        assert!(matches!(result, Err(TableError::NoKeyFieldsDefined { .. })));
    }
    assert!(table.is_empty());
}

#[timeout(1000)]
#[test]
fn test_unregistered_index_lookups_fail() {
    let table = person_table();
    for filter in [Record::new(), first_name("Ahmad"), key(1)] {
        assert!(matches!(
            table.get_by_index("age_index", &filter),
            Err(TableError::NoSuchIndex { .. })
        ));
    }
}

#[timeout(1000)]
#[test]
fn test_key_length_policy() -> anyhow::Result<()> {
    let mut table = Table::new("notes");
    table.add_to_primary_key(Field::new("code", FieldType::String))?;
    table.add_field(Field::new("body", FieldType::String))?;

    let long = "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrs";
    table.insert(&Record::new().with("code", "5").with("body", "short"))?;
    table.insert(&Record::new().with("code", long).with("body", "long"))?;

    let short_row = table.find(&Record::new().with("code", "5"))?.expect("short key stored");
    assert_eq!(short_row["body"], Value::from("short"));
    let long_row = table.find(&Record::new().with("code", long))?.expect("long key stored");
    assert_eq!(long_row["body"], Value::from("long"));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_update_recomputes_from_patch_only() -> anyhow::Result<()> {
    let mut table = person_table();
    table.insert(&person(1, "Ahmad", "Saleh"))?;

    // The handler sees only {"age": ...}, so birth_date reads as zero
    table.update(&key(1), &Record::new().with("age", 0))?;
    let row = table.find(&key(1))?.expect("row 1 is stored");
    assert_eq!(row["age"], Value::Integer(NOW / YEAR));
    Ok(())
}
