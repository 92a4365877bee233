//! Randomized mutation sequences cross-checked against full scans.

use memtable_core::error::TableError;
use memtable_core::table::Table;
use memtable_core::types::{Record, Value};
use ntest::timeout;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::helpers::{key, person, person_table};

const FIRST_NAMES: [&str; 4] = ["Ahmad", "Osama", "Lina", "Sara"];
const LAST_NAMES: [&str; 3] = ["Saleh", "Haddad", "Nasser"];

fn scan_count(table: &Table, field: &str, value: &str) -> usize {
    table
        .iter()
        .filter(|row| row[field] == Value::from(value))
        .count()
}

fn assert_consistent(table: &Table) {
    for name in FIRST_NAMES {
        let filter = Record::new().with("first_name", name);
        assert_eq!(
            table.count_by_index("first_name_index", &filter).unwrap(),
            scan_count(table, "first_name", name),
            "first_name_index disagrees for {name}"
        );
        assert_eq!(
            table.get_by_index("first_name_index", &filter).unwrap().len(),
            scan_count(table, "first_name", name)
        );
    }
    for name in LAST_NAMES {
        let filter = Record::new().with("last_name", name);
        assert_eq!(
            table.count_by_index("last_name_index", &filter).unwrap(),
            scan_count(table, "last_name", name),
            "last_name_index disagrees for {name}"
        );
    }
    assert_eq!(table.iter().count(), table.count());
}

/// Accepts success or a primary key collision; any other error fails.
fn assert_only_key_collision(result: Result<bool, TableError>) {
    match result {
        Ok(_) | Err(TableError::PrimaryKeyAlreadyExists { .. }) => {}
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[timeout(10000)]
#[test]
fn test_random_mutations_keep_indexes_consistent() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut table = person_table();

    for _ in 0..2000 {
        let id = rng.gen_range(0..64i64);
        let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];

        match rng.gen_range(0..5) {
            0 => {
                assert_only_key_collision(table.insert(&person(id, first, last)));
            }
            1 => {
                table
                    .update(&key(id), &Record::new().with("first_name", first))
                    .unwrap();
            }
            2 => {
                // Re-key; collisions are rejected without changes
                let new_id = rng.gen_range(0..64i64);
                assert_only_key_collision(table.update(
                    &key(id),
                    &Record::new().with("id", new_id).with("last_name", last),
                ));
            }
            3 => {
                table.replace(&person(id, first, last)).unwrap();
            }
            _ => {
                table.delete(&key(id)).unwrap();
            }
        }
        assert_consistent(&table);
    }
}
