//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Bookmark, BookmarkId, NewBookmark, TagSet};

/// Default page size for [`BookmarkQuery`]
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Trait for storing and retrieving bookmarks
///
/// Implemented by the infrastructure layer (tagmark-store). Every method is a
/// single atomic operation; callers that read and then write get no
/// isolation between the two calls.
pub trait BookmarkStore {
    /// Error type for store operations
    type Error;

    /// Insert a new bookmark and return it with its assigned id
    fn create(&mut self, bookmark: NewBookmark) -> Result<Bookmark, Self::Error>;

    /// Get a bookmark by id
    fn get(&self, id: BookmarkId) -> Result<Option<Bookmark>, Self::Error>;

    /// Find a bookmark by exact URL match
    fn find_by_url(&self, url: &str) -> Result<Option<Bookmark>, Self::Error>;

    /// List bookmarks matching the query, ordered by id
    fn list(&self, query: &BookmarkQuery) -> Result<Vec<Bookmark>, Self::Error>;

    /// Replace every field of an existing bookmark
    ///
    /// Returns `None` when no bookmark has this id.
    fn update(
        &mut self,
        id: BookmarkId,
        bookmark: NewBookmark,
    ) -> Result<Option<Bookmark>, Self::Error>;

    /// Replace only the tags of an existing bookmark
    fn update_tags(&mut self, id: BookmarkId, tags: &TagSet) -> Result<Bookmark, Self::Error>;

    /// Delete a bookmark, returning the removed record
    fn delete(&mut self, id: BookmarkId) -> Result<Option<Bookmark>, Self::Error>;
}

/// Query criteria for listing bookmarks
#[derive(Debug, Clone)]
pub struct BookmarkQuery {
    /// Number of bookmarks to skip
    pub skip: usize,

    /// Maximum results to return
    pub limit: usize,

    /// Only bookmarks whose expiration date is at or before this time
    pub expired_at: Option<u64>,
}

impl Default for BookmarkQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
            expired_at: None,
        }
    }
}

impl BookmarkQuery {
    /// Query for bookmarks expired at `now`
    pub fn expired(now: u64) -> Self {
        Self {
            expired_at: Some(now),
            ..Self::default()
        }
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (tagmark-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error: ProviderError;

    /// Send a single user prompt and return the reply text
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Classification of provider failures
///
/// Lets callers tell "the service could not be reached" apart from "the
/// service answered with something unusable" without knowing the concrete
/// provider.
pub trait ProviderError: std::fmt::Display {
    /// True when the service replied but the reply envelope was malformed
    fn is_malformed_reply(&self) -> bool;
}
