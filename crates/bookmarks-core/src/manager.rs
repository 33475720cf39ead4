// Bookmark commands and the view-refresh protocol that follows each one
use crate::classifier::Classifier;
use crate::models::{Bookmark, BookmarkId, Category, NewBookmark};
use crate::repository::BookmarkRepository;
use crate::view::TabCache;
use crate::{Error, Result};
use tracing::{debug, info};

/// Something the user asked for. Edits and deletes name the bookmark by id,
/// never by whatever row happens to be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        url: String,
    },
    /// `None` keeps the current value
    Edit {
        id: BookmarkId,
        url: Option<String>,
        category: Option<Category>,
    },
    Delete {
        id: BookmarkId,
    },
}

/// What a command did, so the front-end knows which tabs to redraw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added {
        bookmark: Bookmark,
        refreshed: Vec<Category>,
    },
    Edited {
        bookmark: Bookmark,
        refreshed: Vec<Category>,
    },
    Deleted {
        id: BookmarkId,
        /// Tab the row was dropped from, if it was on screen
        removed_from: Option<Category>,
    },
    /// The bookmark was already gone
    Stale {
        id: BookmarkId,
    },
}

/// Ties the store, the classifier and the tab cache together.
///
/// The store handle is injected; the manager never opens connections itself.
pub struct BookmarkManager<R> {
    repo: R,
    classifier: Classifier,
    tabs: TabCache,
}

impl<R: BookmarkRepository> BookmarkManager<R> {
    pub fn new(repo: R) -> Self {
        Self::with_classifier(repo, Classifier::default())
    }

    pub fn with_classifier(repo: R, classifier: Classifier) -> Self {
        Self {
            repo,
            classifier,
            tabs: TabCache::new(),
        }
    }

    pub fn tabs(&self) -> &TabCache {
        &self.tabs
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Fill every tab from the store (startup)
    pub fn load_all(&mut self) -> Result<()> {
        self.tabs.refresh_all(&self.repo)
    }

    /// Re-read one tab from the store
    pub fn refresh(&mut self, category: Category) -> Result<()> {
        self.tabs.refresh(&self.repo, category)
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Add { url } => self.add(&url),
            Command::Edit { id, url, category } => self.edit(id, url, category),
            Command::Delete { id } => self.delete(id),
        }
    }

    /// Classify, store, and refresh just the tab it landed in
    fn add(&mut self, url: &str) -> Result<Outcome> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::EmptyUrl);
        }

        let category = self.classifier.classify(url);
        let new = NewBookmark::new(url, category);
        let id = self.repo.add_bookmark(&new)?;
        info!("Added {} as {} (id {})", url, category, id);

        self.tabs.refresh(&self.repo, category)?;

        let bookmark = Bookmark {
            id,
            url: new.url,
            title: new.title,
            category,
            added_date: new.added_date,
        };
        Ok(Outcome::Added {
            bookmark,
            refreshed: vec![category],
        })
    }

    /// Refresh the new tab, and the old one too when the category moved so
    /// the row disappears from where it used to be
    fn edit(
        &mut self,
        id: BookmarkId,
        url: Option<String>,
        category: Option<Category>,
    ) -> Result<Outcome> {
        let Some(current) = self.lookup(id)? else {
            debug!("Edit of bookmark {} ignored, it no longer exists", id);
            return Ok(Outcome::Stale { id });
        };

        let new_url = match url {
            Some(u) if !u.trim().is_empty() => u.trim().to_string(),
            Some(_) => return Err(Error::EmptyUrl),
            None => current.url.clone(),
        };
        let new_category = category.unwrap_or(current.category);

        if !self.repo.update_bookmark(id, &new_url, new_category)? {
            debug!("Bookmark {} vanished before it could be edited", id);
            return Ok(Outcome::Stale { id });
        }
        info!(
            "Edited bookmark {}: {} -> {} ({} -> {})",
            id, current.url, new_url, current.category, new_category
        );

        let mut refreshed = vec![new_category];
        self.tabs.refresh(&self.repo, new_category)?;
        if new_category != current.category {
            self.tabs.refresh(&self.repo, current.category)?;
            refreshed.push(current.category);
        }

        Ok(Outcome::Edited {
            bookmark: Bookmark {
                url: new_url,
                category: new_category,
                ..current
            },
            refreshed,
        })
    }

    /// Remove from the store, then drop the one row; no re-query
    fn delete(&mut self, id: BookmarkId) -> Result<Outcome> {
        if !self.repo.delete_bookmark(id)? {
            debug!("Delete of bookmark {} ignored, it no longer exists", id);
            self.tabs.remove_row(id);
            return Ok(Outcome::Stale { id });
        }
        info!("Deleted bookmark {}", id);

        let removed_from = self.tabs.remove_row(id);
        Ok(Outcome::Deleted { id, removed_from })
    }

    /// Cached row first; fall back to the store for ids that were never shown
    fn lookup(&self, id: BookmarkId) -> Result<Option<Bookmark>> {
        match self.tabs.find(id) {
            Some(b) => Ok(Some(b.clone())),
            None => self.repo.get_bookmark(id),
        }
    }
}
