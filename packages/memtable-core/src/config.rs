//! Table and feeder configuration.

/// Table configuration.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Initial row store capacity in rows
    pub initial_capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
        }
    }
}

/// Data feeder configuration.
#[derive(Debug, Clone, Default)]
pub struct FeederConfig {
    /// Rows fetched per page (0 = single unbounded fetch)
    pub batch_size: usize,
    /// Skip rows whose primary key is already stored instead of failing
    pub ignore_if_exists: bool,
}
