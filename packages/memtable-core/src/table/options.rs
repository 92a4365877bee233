//! Flags controlling row mutations.

/// Options for [`super::Table::insert_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertOptions {
    /// Leave an existing row untouched instead of failing
    pub ignore_if_exists: bool,
    /// Take compute field values verbatim from the input row
    pub ignore_compute: bool,
}

/// Options for [`super::Table::update_with`].
#[derive(Debug, Clone, Copy)]
pub struct UpdateOptions {
    /// Treat a missing target row as a no-op instead of failing
    pub ignore_if_not_exists: bool,
    /// Take compute field values verbatim from the patch
    pub ignore_compute: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            ignore_if_not_exists: true,
            ignore_compute: false,
        }
    }
}

/// Options for [`super::Table::replace_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceOptions {
    /// Take compute field values verbatim from the input row
    pub ignore_compute: bool,
}

/// Options for [`super::Table::delete_with`].
#[derive(Debug, Clone, Copy)]
pub struct DeleteOptions {
    /// Treat a missing target row as a no-op instead of failing
    pub ignore_if_not_exists: bool,
}

impl Default for DeleteOptions {
    fn default() -> Self {
        Self {
            ignore_if_not_exists: true,
        }
    }
}
