mod aggregate;
mod load;
mod save;

pub(crate) use load::LoadExecutor;
pub(crate) use save::SaveExecutor;

use thiserror::Error as ThisError;

///
/// SaveMode
/// Declared write intent; decides how an existing row under the same key
/// is treated.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaveMode {
    Insert,
    Update,
}

///
/// ExecutorError
///

#[derive(Debug, ThisError)]
pub enum ExecutorError {
    #[error("key {key} already exists (entity {path})")]
    KeyExists { path: &'static str, key: u64 },

    #[error("key {key} not found (entity {path})")]
    KeyNotFound { path: &'static str, key: u64 },
}

/// Convert a boolean to a concise yes/no label for debug summaries.
pub(super) const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
