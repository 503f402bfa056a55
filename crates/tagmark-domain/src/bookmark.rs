//! Bookmark module - the persisted record and its transient companions

use crate::tags::TagSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a bookmark, assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkId(i64);

impl BookmarkId {
    /// Wrap a raw row id
    pub fn from_value(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw row id
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BookmarkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid bookmark id '{}': {}", s, e))
    }
}

/// A stored bookmark
///
/// The URL is the natural key: no two bookmarks share one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Store-assigned identifier
    pub id: BookmarkId,

    /// Free-text title
    pub title: String,

    /// Unique URL
    pub url: String,

    /// Deduplicated tag set
    pub tags: TagSet,

    /// Unix seconds after which the bookmark is considered expired
    pub expiration_date: Option<u64>,
}

impl Bookmark {
    /// Whether the bookmark is expired at `now` (Unix seconds)
    ///
    /// Expiry is inclusive: a bookmark expiring exactly at `now` is expired.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expiration_date.is_some_and(|at| at <= now)
    }

    /// Whether the bookmark is expired right now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(unix_now())
    }
}

/// Fields for creating or fully replacing a bookmark
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewBookmark {
    /// Free-text title
    pub title: String,

    /// URL (must be unique across the store)
    pub url: String,

    /// Tags to store
    #[serde(default)]
    pub tags: TagSet,

    /// Optional expiry in Unix seconds
    #[serde(default)]
    pub expiration_date: Option<u64>,
}

impl NewBookmark {
    /// Create a bookmark without tags or expiry
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            tags: TagSet::new(),
            expiration_date: None,
        }
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    /// Set the expiry
    pub fn with_expiration(mut self, expiration_date: u64) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }
}

/// A bookmark submitted for classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkInput {
    /// Title shown to the classifier
    pub title: String,

    /// URL shown to the classifier
    pub url: String,
}

impl BookmarkInput {
    /// Create a classification input
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// One record returned by the external classifier
///
/// Transient: never stored directly, only reconciled into a [`Bookmark`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedItem {
    /// Title as echoed by the classifier
    pub title: String,

    /// URL as echoed by the classifier; used to find an existing bookmark
    pub url: String,

    /// Assigned tags, usually a single one
    pub tags: TagSet,
}

/// Current time in Unix seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
