use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from the SQLite layer. None of these are retried.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt row {id}: {reason}")]
    InvalidRow { id: i64, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for bookmarks_core::Error {
    fn from(e: StoreError) -> Self {
        bookmarks_core::Error::StorageError(e.to_string())
    }
}
