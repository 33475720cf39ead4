use thiserror::Error;

/// All the ways things can go wrong while managing bookmarks
///
/// Stale selections (editing or deleting a bookmark that no longer exists)
/// are not errors - those are silent no-ops.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Please enter a URL")]
    EmptyUrl,

    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Storage operation failed: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
