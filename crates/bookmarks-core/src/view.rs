// Per-tab cached rendering. The store is the source of truth; this only
// mirrors what each tab last showed.
use crate::models::{Bookmark, BookmarkId, Category};
use crate::repository::BookmarkRepository;
use crate::Result;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TabCache {
    tabs: BTreeMap<Category, Vec<Bookmark>>,
}

impl Default for TabCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TabCache {
    /// One empty tab per category
    pub fn new() -> Self {
        Self {
            tabs: Category::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
        }
    }

    /// Rows currently shown under `category`
    pub fn tab(&self, category: Category) -> &[Bookmark] {
        self.tabs.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tabs in display order
    pub fn tabs(&self) -> impl Iterator<Item = (Category, &[Bookmark])> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.tab(c)))
    }

    pub fn find(&self, id: BookmarkId) -> Option<&Bookmark> {
        self.tabs.values().flatten().find(|b| b.id == id)
    }

    /// Throw away what `category` shows and re-read it from the store
    pub fn refresh<R>(&mut self, repo: &R, category: Category) -> Result<()>
    where
        R: BookmarkRepository + ?Sized,
    {
        let rows = repo.list_by_category(category)?;
        debug!("Refreshed {} tab: {} bookmarks", category, rows.len());
        self.tabs.insert(category, rows);
        Ok(())
    }

    pub fn refresh_all<R>(&mut self, repo: &R) -> Result<()>
    where
        R: BookmarkRepository + ?Sized,
    {
        for category in Category::ALL {
            self.refresh(repo, category)?;
        }
        Ok(())
    }

    /// Drop the single row for `id` without asking the store.
    ///
    /// Returns the category it was shown under, if it was shown at all.
    pub fn remove_row(&mut self, id: BookmarkId) -> Option<Category> {
        for (category, rows) in self.tabs.iter_mut() {
            if let Some(pos) = rows.iter().position(|b| b.id == id) {
                rows.remove(pos);
                return Some(*category);
            }
        }
        None
    }
}
