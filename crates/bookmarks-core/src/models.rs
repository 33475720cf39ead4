use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How `added_date` is written to disk and shown in listings
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Store-assigned identifier. Never changes once a bookmark exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkId(pub i64);

impl std::fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// The fixed set of tabs a bookmark can live under
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    News,
    Sports,
    Education,
    /// No keyword rule produces this one; it only fills up through edits
    Entertainment,
    Technology,
    Shopping,
    #[serde(rename = "Social Media")]
    SocialMedia,
    #[default]
    Other,
}

impl Category {
    /// Every category, in tab order
    pub const ALL: [Category; 8] = [
        Category::News,
        Category::Sports,
        Category::Education,
        Category::Entertainment,
        Category::Technology,
        Category::Shopping,
        Category::SocialMedia,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::News => "News",
            Category::Sports => "Sports",
            Category::Education => "Education",
            Category::Entertainment => "Entertainment",
            Category::Technology => "Technology",
            Category::Shopping => "Shopping",
            Category::SocialMedia => "Social Media",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::Error;

    /// Case-insensitive, and `-`/`_` count as spaces. Older databases hold
    /// "Social media" rather than "Social Media", so be lenient here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == normalized)
            .ok_or_else(|| crate::Error::InvalidCategory(s.to_string()))
    }
}

/// A stored bookmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub url: String,
    pub title: String,
    pub category: Category,
    pub added_date: NaiveDateTime,
}

impl Bookmark {
    /// `added_date` the way it's persisted, e.g. `2024-03-01 09:15`
    pub fn added_date_display(&self) -> String {
        self.added_date.format(DATE_FORMAT).to_string()
    }
}

/// Everything needed to insert a bookmark - the store hands out the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub url: String,
    pub title: String,
    pub category: Category,
    pub added_date: NaiveDateTime,
}

impl NewBookmark {
    /// Build a bookmark for `url` with a derived title, stamped with the
    /// current local time
    pub fn new(url: impl Into<String>, category: Category) -> Self {
        let url = url.into();
        Self {
            title: derive_title(&url).to_string(),
            url,
            category,
            added_date: truncate_to_minute(Local::now().naive_local()),
        }
    }
}

/// Cheap title extraction: host part of the URL.
///
/// `https://technews.com/a/b` -> `technews.com`. Strings without a scheme
/// are taken as-is up to the first slash.
pub fn derive_title(url: &str) -> &str {
    let after_scheme = url.rsplit("//").next().unwrap_or(url);
    after_scheme.split('/').next().unwrap_or(after_scheme)
}

/// Drop seconds and below; the on-disk format only keeps minutes
pub fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}
