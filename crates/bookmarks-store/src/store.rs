use crate::{Result, StoreError};
use bookmarks_core::models::DATE_FORMAT;
use bookmarks_core::{Bookmark, BookmarkId, BookmarkRepository, Category, NewBookmark};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

const SELECT_COLUMNS: &str = "SELECT id, url, title, category, added_date FROM bookmarks";

/// Bookmark store on top of a single SQLite connection.
///
/// The connection is opened once and closed when the store is dropped.
/// Pass the store (or a reference) to whatever needs persistence; there is
/// no global handle.
pub struct BookmarkStore {
    conn: Connection,
}

/// Raw column values, before category/date parsing
type RawRow = (i64, String, String, String, String);

impl BookmarkStore {
    /// Open (or create) the database file, creating parent directories too
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!("Opening bookmark database at {}", db_path.display());
        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Throwaway database, handy for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        // Same layout older databases already have, so they open as-is
        conn.execute(
            "CREATE TABLE IF NOT EXISTS bookmarks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT,
                title TEXT,
                category TEXT,
                added_date DATETIME
            )",
            [],
        )?;

        Ok(())
    }

    pub fn add_bookmark(&self, bookmark: &NewBookmark) -> Result<BookmarkId> {
        self.conn.execute(
            "INSERT INTO bookmarks (url, title, category, added_date) VALUES (?1, ?2, ?3, ?4)",
            params![
                bookmark.url,
                bookmark.title,
                bookmark.category.as_str(),
                bookmark.added_date.format(DATE_FORMAT).to_string(),
            ],
        )?;

        let id = BookmarkId(self.conn.last_insert_rowid());
        info!("Stored {} under {} (id {})", bookmark.url, bookmark.category, id);
        Ok(id)
    }

    /// Bookmarks in `category`, in insertion order. Each call runs a fresh query.
    pub fn list_by_category(&self, category: Category) -> Result<Vec<Bookmark>> {
        // NOCASE so rows written as "Social media" by older builds still show up
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE category = ?1 COLLATE NOCASE ORDER BY id",
            SELECT_COLUMNS
        ))?;

        let rows = stmt
            .query_map(params![category.as_str()], Self::raw_row)?
            .collect::<rusqlite::Result<Vec<RawRow>>>()?;

        debug!("{} bookmarks under {}", rows.len(), category);
        rows.into_iter().map(Self::to_bookmark).collect()
    }

    pub fn get_bookmark(&self, id: BookmarkId) -> Result<Option<Bookmark>> {
        let raw = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id.0],
                Self::raw_row,
            )
            .optional()?;

        raw.map(Self::to_bookmark).transpose()
    }

    /// Overwrite url and category of one bookmark. `false` if the id is gone.
    pub fn update_bookmark(&self, id: BookmarkId, url: &str, category: Category) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE bookmarks SET url = ?1, category = ?2 WHERE id = ?3",
            params![url, category.as_str(), id.0],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_bookmark(&self, id: BookmarkId) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id.0])?;
        Ok(changed > 0)
    }

    /// URL-keyed edit: every row whose url equals `old_url` is rewritten.
    ///
    /// Duplicated URLs all change together; prefer [`Self::update_bookmark`].
    pub fn update_by_url(&self, old_url: &str, new_url: &str, category: Category) -> Result<usize> {
        let changed = self.conn.execute(
            "UPDATE bookmarks SET url = ?1, category = ?2 WHERE url = ?3",
            params![new_url, category.as_str(), old_url],
        )?;
        info!("Updated {} row(s) matching {}", changed, old_url);
        Ok(changed)
    }

    /// Remove every row whose url equals `url`
    pub fn delete_by_url(&self, url: &str) -> Result<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM bookmarks WHERE url = ?1", params![url])?;
        info!("Deleted {} row(s) matching {}", changed, url);
        Ok(changed)
    }

    fn raw_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
    }

    fn to_bookmark((id, url, title, category, added_date): RawRow) -> Result<Bookmark> {
        let category = category.parse::<Category>().map_err(|e| StoreError::InvalidRow {
            id,
            reason: e.to_string(),
        })?;
        let added_date = NaiveDateTime::parse_from_str(&added_date, DATE_FORMAT).map_err(|e| {
            StoreError::InvalidRow {
                id,
                reason: format!("bad added_date {:?}: {}", added_date, e),
            }
        })?;

        Ok(Bookmark {
            id: BookmarkId(id),
            url,
            title,
            category,
            added_date,
        })
    }
}

impl BookmarkRepository for BookmarkStore {
    fn add_bookmark(&self, bookmark: &NewBookmark) -> bookmarks_core::Result<BookmarkId> {
        Ok(BookmarkStore::add_bookmark(self, bookmark)?)
    }

    fn list_by_category(&self, category: Category) -> bookmarks_core::Result<Vec<Bookmark>> {
        Ok(BookmarkStore::list_by_category(self, category)?)
    }

    fn get_bookmark(&self, id: BookmarkId) -> bookmarks_core::Result<Option<Bookmark>> {
        Ok(BookmarkStore::get_bookmark(self, id)?)
    }

    fn update_bookmark(
        &self,
        id: BookmarkId,
        url: &str,
        category: Category,
    ) -> bookmarks_core::Result<bool> {
        Ok(BookmarkStore::update_bookmark(self, id, url, category)?)
    }

    fn delete_bookmark(&self, id: BookmarkId) -> bookmarks_core::Result<bool> {
        Ok(BookmarkStore::delete_bookmark(self, id)?)
    }
}
