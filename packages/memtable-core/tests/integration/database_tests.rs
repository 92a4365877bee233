//! Shared catalog access across threads.

use std::thread;

use memtable_core::database::Database;
use memtable_core::error::TableError;
use memtable_core::schema::TableSchema;
use ntest::timeout;

use super::helpers::{first_name, person, person_table};

#[timeout(5000)]
#[test]
fn test_concurrent_writers_and_readers() -> anyhow::Result<()> {
    let db = Database::new();
    db.create_table(person_table())?;

    thread::scope(|scope| {
        for worker in 0..4i64 {
            let db = &db;
            scope.spawn(move || {
                for i in 0..250 {
                    let mut table = db.get_table_mut("person_table").unwrap();
                    table
                        .insert(&person(worker * 1000 + i, "Ahmad", "Saleh"))
                        .unwrap();
                }
            });
        }
        for _ in 0..2 {
            let db = &db;
            scope.spawn(move || {
                for _ in 0..100 {
                    let table = db.get_table("person_table").unwrap();
                    let indexed = table
                        .count_by_index("first_name_index", &first_name("Ahmad"))
                        .unwrap();
                    assert_eq!(indexed, table.count());
                }
            });
        }
    });

    let table = db.get_table("person_table")?;
    assert_eq!(table.count(), 1000);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_catalog_lifecycle_with_schema() -> anyhow::Result<()> {
    let db = Database::new();
    let schema = TableSchema::from_table(&person_table());
    let mut rebuilt = schema.build(&Default::default())?;
    rebuilt.insert(&person(1, "Lina", "Haddad"))?;
    db.create_table(rebuilt)?;

    assert_eq!(db.table_names(), vec!["person_table".to_string()]);
    assert!(matches!(
        db.create_table(person_table()),
        Err(TableError::TableAlreadyExists(_))
    ));

    let dropped = db.drop_table("person_table")?;
    assert_eq!(dropped.count(), 1);
    assert!(db.get_table("person_table").is_err());
    Ok(())
}
