//! JSON export and import of table contents.
//!
//! Tables serialize as a JSON array of row objects in storage order, each
//! object carrying every declared field (compute fields included) in
//! declaration order. Import reinserts rows with compute fields taken
//! verbatim, so an export/import pair reproduces stored values.

use std::io::{Read, Write};

use crate::error::TableError;
use crate::table::{InsertOptions, Table};
use crate::types::Record;

impl Table {
    /// Serializes every stored row into a JSON array string.
    pub fn to_json(&self) -> Result<String, TableError> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| TableError::Serialization(e.to_string()))
    }

    /// Streams every stored row as a JSON array without materializing it.
    ///
    /// # Arguments
    /// * `writer` - Destination; written row by row
    ///
    /// # Returns
    /// Number of rows written.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<usize, TableError> {
        writer.write_all(b"[")?;
        let mut written = 0;
        for row in self.iter() {
            if written > 0 {
                writer.write_all(b",")?;
            }
            serde_json::to_writer(&mut writer, &row)?;
            written += 1;
        }
        writer.write_all(b"]")?;
        writer.flush()?;

        tracing::debug!("Exported {} rows from table {}", written, self.name());
        Ok(written)
    }

    /// Loads rows from a JSON array of objects.
    ///
    /// Compute fields are taken verbatim from the input.
    ///
    /// # Arguments
    /// * `json` - JSON array text
    /// * `ignore_if_exists` - Skip rows whose primary key is already stored
    ///
    /// # Returns
    /// Number of rows stored.
    pub fn from_json(&mut self, json: &str, ignore_if_exists: bool) -> Result<usize, TableError> {
        let parsed: serde_json::Value = serde_json::from_str(json)?;
        self.load_rows(parsed, ignore_if_exists)
    }

    /// Reader counterpart of [`Table::from_json`].
    ///
    /// The whole document is parsed before any row is inserted, so a
    /// malformed document leaves the table unchanged.
    pub fn read_json<R: Read>(&mut self, reader: R, ignore_if_exists: bool) -> Result<usize, TableError> {
        let parsed: serde_json::Value = serde_json::from_reader(reader)?;
        self.load_rows(parsed, ignore_if_exists)
    }

    fn load_rows(&mut self, parsed: serde_json::Value, ignore_if_exists: bool) -> Result<usize, TableError> {
        let serde_json::Value::Array(rows) = parsed else {
            return Err(TableError::Serialization(
                "expected a JSON array of rows".to_string(),
            ));
        };

        let options = InsertOptions {
            ignore_if_exists,
            ignore_compute: true,
        };

        let total = rows.len();
        let mut stored = 0;
        for row in rows {
            let record = Record::from_json(row)?;
            if self.insert_with(&record, options)? {
                stored += 1;
            }
        }

        tracing::debug!(
            "Imported {} of {} rows into table {}",
            stored,
            total,
            self.name()
        );
        Ok(stored)
    }
}
