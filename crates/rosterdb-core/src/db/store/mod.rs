mod data;
mod row;

pub use data::*;
pub use row::*;

use thiserror::Error as ThisError;

///
/// StoreError
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("corrupt row (entity {path}, key {key}): {source}")]
    Corrupt {
        path: &'static str,
        key: u64,
        source: RowDecodeError,
    },

    #[error(transparent)]
    Row(#[from] RawRowError),
}
