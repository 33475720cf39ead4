// Core business logic - classification rules, the Store contract and the
// view-refresh protocol the front-end follows
pub mod classifier;
pub mod config;
pub mod error;
pub mod manager;
pub mod models;
pub mod repository;
pub mod view;

pub use classifier::{classify, Classifier};
pub use config::Config;
pub use error::Error;
pub use manager::{BookmarkManager, Command, Outcome};
pub use models::{derive_title, Bookmark, BookmarkId, Category, NewBookmark};
pub use repository::BookmarkRepository;
pub use view::TabCache;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
