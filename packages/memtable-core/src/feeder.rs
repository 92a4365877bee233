//! Bulk loading of tables from paged row sources.

use crate::config::FeederConfig;
use crate::error::TableError;
use crate::table::{InsertOptions, Table};
use crate::types::Record;

/// A paged supplier of raw rows, such as a database query or a file.
pub trait RowSource {
    /// Fetches up to `limit` rows starting at `offset`.
    ///
    /// `limit` is `None` for a single unbounded fetch. An empty page marks
    /// the end of the source. Failures surface as `TableError::Feed`.
    fn fetch(&mut self, offset: usize, limit: Option<usize>) -> Result<Vec<Record>, TableError>;
}

/// Counters for one [`DataFeeder::fill`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Non-empty pages fetched
    pub batches: usize,
    /// Rows received from the source
    pub fetched: usize,
    /// Rows stored in the table
    pub inserted: usize,
    /// Rows skipped because their primary key was already stored
    pub skipped: usize,
}

/// Feeds rows from a [`RowSource`] into a table.
#[derive(Debug, Clone, Default)]
pub struct DataFeeder {
    config: FeederConfig,
}

impl DataFeeder {
    pub fn new(config: FeederConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeederConfig {
        &self.config
    }

    /// Drains `source` into `table`, one insert per row.
    ///
    /// With a zero batch size the source is fetched once without a limit.
    /// Otherwise pages of `batch_size` rows are fetched until one comes back
    /// empty.
    ///
    /// # Returns
    /// Counters for the run. The first insert or fetch error aborts the run;
    /// rows already inserted stay in the table.
    pub fn fill<S: RowSource + ?Sized>(
        &self,
        table: &mut Table,
        source: &mut S,
    ) -> Result<FeedStats, TableError> {
        let options = InsertOptions {
            ignore_if_exists: self.config.ignore_if_exists,
            ignore_compute: false,
        };
        let limit = (self.config.batch_size > 0).then_some(self.config.batch_size);

        let mut stats = FeedStats::default();
        let mut offset = 0;
        loop {
            let rows = source.fetch(offset, limit)?;
            if rows.is_empty() {
                break;
            }

            stats.batches += 1;
            stats.fetched += rows.len();
            offset += rows.len();
            for row in &rows {
                if table.insert_with(row, options)? {
                    stats.inserted += 1;
                } else {
                    stats.skipped += 1;
                }
            }

            tracing::debug!(
                "Fed batch {} of {} rows into table {} (offset {})",
                stats.batches,
                rows.len(),
                table.name(),
                offset
            );

            if limit.is_none() {
                break;
            }
        }

        tracing::debug!(
            "Feeding table {} finished: {} fetched, {} inserted, {} skipped",
            table.name(),
            stats.fetched,
            stats.inserted,
            stats.skipped
        );
        Ok(stats)
    }
}

/// Row source over rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<Record>,
    fetches: usize,
}

impl MemorySource {
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows, fetches: 0 }
    }

    /// Number of `fetch` calls served so far.
    pub fn fetches(&self) -> usize {
        self.fetches
    }
}

impl RowSource for MemorySource {
    fn fetch(&mut self, offset: usize, limit: Option<usize>) -> Result<Vec<Record>, TableError> {
        self.fetches += 1;
        let start = offset.min(self.rows.len());
        let end = match limit {
            Some(limit) => start.saturating_add(limit).min(self.rows.len()),
            None => self.rows.len(),
        };
        Ok(self.rows[start..end].to_vec())
    }
}

impl FromIterator<Record> for MemorySource {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
