use crate::models::{Bookmark, BookmarkId, Category, NewBookmark};
use crate::Result;

/// Persistence seam between the view layer and whatever stores bookmarks.
///
/// Every mutation is keyed by [`BookmarkId`], so two bookmarks sharing a URL
/// never get edited or deleted together. A missing id is a stale selection:
/// mutations report `false` and leave the store alone.
#[cfg_attr(test, mockall::automock)]
pub trait BookmarkRepository {
    /// Insert and return the new id
    fn add_bookmark(&self, bookmark: &NewBookmark) -> Result<BookmarkId>;

    /// All bookmarks in `category`, oldest first
    fn list_by_category(&self, category: Category) -> Result<Vec<Bookmark>>;

    fn get_bookmark(&self, id: BookmarkId) -> Result<Option<Bookmark>>;

    /// Overwrite url and category. Title and added_date stay as they were.
    fn update_bookmark(&self, id: BookmarkId, url: &str, category: Category) -> Result<bool>;

    fn delete_bookmark(&self, id: BookmarkId) -> Result<bool>;
}
