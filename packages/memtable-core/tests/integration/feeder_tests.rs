//! Bulk feeding from paged sources.

use memtable_core::config::FeederConfig;
use memtable_core::error::TableError;
use memtable_core::feeder::{DataFeeder, MemorySource, RowSource};
use memtable_core::types::{Record, Value};
use ntest::timeout;

use super::helpers::{first_name, key, person, person_table};

/// Source that serves a fixed number of pages, then fails.
struct FlakySource {
    inner: MemorySource,
    remaining_pages: usize,
}

impl RowSource for FlakySource {
    fn fetch(&mut self, offset: usize, limit: Option<usize>) -> Result<Vec<Record>, TableError> {
        if self.remaining_pages == 0 {
            return Err(TableError::Feed(format!("source dropped at offset {offset}")));
        }
        self.remaining_pages -= 1;
        self.inner.fetch(offset, limit)
    }
}

fn people(count: i64) -> MemorySource {
    (1..=count)
        .map(|id| person(id, if id % 2 == 0 { "Ahmad" } else { "Osama" }, "Saleh"))
        .collect()
}

#[timeout(5000)]
#[test]
fn test_feed_computes_and_indexes_rows() -> anyhow::Result<()> {
    let mut table = person_table();
    let feeder = DataFeeder::new(FeederConfig {
        batch_size: 16,
        ignore_if_exists: false,
    });

    let stats = feeder.fill(&mut table, &mut people(100))?;
    assert_eq!(stats.batches, 7);
    assert_eq!(stats.inserted, 100);
    assert_eq!(table.count(), 100);
    assert_eq!(table.count_by_index("first_name_index", &first_name("Ahmad"))?, 50);
    assert_eq!(
        table.find(&key(42))?.expect("row 42 fed")["age"],
        Value::Integer(25)
    );
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_feed_stops_on_source_failure() {
    let mut table = person_table();
    let mut source = FlakySource {
        inner: people(100),
        remaining_pages: 2,
    };
    let feeder = DataFeeder::new(FeederConfig {
        batch_size: 10,
        ..Default::default()
    });

    let err = feeder.fill(&mut table, &mut source).unwrap_err();
    assert_eq!(err, TableError::Feed("source dropped at offset 20".to_string()));
    assert_eq!(table.count(), 20);
}
