// SQLite-backed bookmark storage
// One table, single-row statements, no explicit transactions

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::BookmarkStore;
