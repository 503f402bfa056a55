//! Tagmark Storage Layer
//!
//! Implements the `BookmarkStore` trait on top of SQLite.
//!
//! # Architecture
//!
//! - One `bookmarks` table, URL carries a UNIQUE constraint
//! - Tags are stored as the `", "`-joined encoding of a `TagSet`
//! - Expiration dates are stored as Unix seconds
//!
//! # Examples
//!
//! ```no_run
//! use tagmark_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for bookmark operations
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tagmark_domain::traits::{BookmarkQuery, BookmarkStore};
use tagmark_domain::{Bookmark, BookmarkId, NewBookmark, TagSet};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Bookmark not found
    #[error("Bookmark not found: {0}")]
    NotFound(BookmarkId),

    /// Another bookmark already uses this URL
    #[error("URL already exists: {0}")]
    DuplicateUrl(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const SELECT_COLUMNS: &str = "SELECT id, title, url, tags, expiration_date FROM bookmarks";

/// SQLite-based implementation of BookmarkStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tagmark_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("bookmarks.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Number of stored bookmarks
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn expiration_to_sql(expiration_date: Option<u64>) -> Result<Option<i64>, StoreError> {
        expiration_date
            .map(|t| {
                i64::try_from(t).map_err(|_| {
                    StoreError::InvalidData(format!("Expiration date out of range: {}", t))
                })
            })
            .transpose()
    }

    /// Map a row selected with `SELECT_COLUMNS` into a Bookmark
    fn row_to_bookmark(row: &Row<'_>) -> rusqlite::Result<Bookmark> {
        let tags: String = row.get(3)?;
        let expiration_date: Option<i64> = row.get(4)?;

        Ok(Bookmark {
            id: BookmarkId::from_value(row.get(0)?),
            title: row.get(1)?,
            url: row.get(2)?,
            tags: TagSet::parse(&tags),
            expiration_date: expiration_date.map(|t| t.max(0) as u64),
        })
    }

    /// Fail with DuplicateUrl if `url` belongs to a bookmark other than `except`
    fn ensure_url_free(&self, url: &str, except: Option<BookmarkId>) -> Result<(), StoreError> {
        match self.find_by_url(url)? {
            Some(existing) if Some(existing.id) != except => {
                Err(StoreError::DuplicateUrl(url.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn require(&self, id: BookmarkId) -> Result<Bookmark, StoreError> {
        self.get(id)?.ok_or(StoreError::NotFound(id))
    }
}

impl BookmarkStore for SqliteStore {
    type Error = StoreError;

    fn create(&mut self, bookmark: NewBookmark) -> Result<Bookmark, Self::Error> {
        self.ensure_url_free(&bookmark.url, None)?;

        self.conn.execute(
            "INSERT INTO bookmarks (title, url, tags, expiration_date) VALUES (?1, ?2, ?3, ?4)",
            params![
                &bookmark.title,
                &bookmark.url,
                bookmark.tags.encode(),
                Self::expiration_to_sql(bookmark.expiration_date)?,
            ],
        )?;

        let id = BookmarkId::from_value(self.conn.last_insert_rowid());
        self.require(id)
    }

    fn get(&self, id: BookmarkId) -> Result<Option<Bookmark>, Self::Error> {
        let bookmark = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id.value()],
                Self::row_to_bookmark,
            )
            .optional()?;

        Ok(bookmark)
    }

    fn find_by_url(&self, url: &str) -> Result<Option<Bookmark>, Self::Error> {
        let bookmark = self
            .conn
            .query_row(
                &format!("{} WHERE url = ?1", SELECT_COLUMNS),
                params![url],
                Self::row_to_bookmark,
            )
            .optional()?;

        Ok(bookmark)
    }

    fn list(&self, query: &BookmarkQuery) -> Result<Vec<Bookmark>, Self::Error> {
        let mut sql = format!("{} WHERE 1=1", SELECT_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(expired_at) = query.expired_at {
            sql.push_str(" AND expiration_date IS NOT NULL AND expiration_date <= ?");
            params.push(Box::new(Self::expiration_to_sql(Some(expired_at))?));
        }

        sql.push_str(" ORDER BY id LIMIT ? OFFSET ?");
        params.push(Box::new(query.limit as i64));
        params.push(Box::new(query.skip as i64));

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let bookmarks = stmt
            .query_map(&param_refs[..], Self::row_to_bookmark)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(bookmarks)
    }

    fn update(
        &mut self,
        id: BookmarkId,
        bookmark: NewBookmark,
    ) -> Result<Option<Bookmark>, Self::Error> {
        if self.get(id)?.is_none() {
            return Ok(None);
        }
        self.ensure_url_free(&bookmark.url, Some(id))?;

        self.conn.execute(
            "UPDATE bookmarks SET title = ?1, url = ?2, tags = ?3, expiration_date = ?4 WHERE id = ?5",
            params![
                &bookmark.title,
                &bookmark.url,
                bookmark.tags.encode(),
                Self::expiration_to_sql(bookmark.expiration_date)?,
                id.value(),
            ],
        )?;

        self.get(id)
    }

    fn update_tags(&mut self, id: BookmarkId, tags: &TagSet) -> Result<Bookmark, Self::Error> {
        let changed = self.conn.execute(
            "UPDATE bookmarks SET tags = ?1 WHERE id = ?2",
            params![tags.encode(), id.value()],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        self.require(id)
    }

    fn delete(&mut self, id: BookmarkId) -> Result<Option<Bookmark>, Self::Error> {
        let Some(existing) = self.get(id)? else {
            return Ok(None);
        };

        self.conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id.value()])?;

        Ok(Some(existing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiration_out_of_range() {
        let result = SqliteStore::expiration_to_sql(Some(u64::MAX));
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_count_empty() {
        let store = SqliteStore::new(":memory:").unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_tags_stored_encoded() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let created = store
            .create(NewBookmark::new("A", "https://a.example").with_tags(TagSet::parse("z, a")))
            .unwrap();

        let raw: String = store
            .conn
            .query_row(
                "SELECT tags FROM bookmarks WHERE id = ?1",
                params![created.id.value()],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(raw, "a, z");
    }
}
