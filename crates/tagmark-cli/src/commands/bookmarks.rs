//! Bookmark CRUD commands.

use crate::cli::{AddArgs, IdArgs, ListArgs, UpdateArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use tagmark_domain::traits::{BookmarkQuery, BookmarkStore};
use tagmark_domain::{unix_now, BookmarkId, NewBookmark, TagSet};
use tagmark_store::SqliteStore;

/// Execute the add command.
pub fn execute_add(args: AddArgs, store: &mut SqliteStore, formatter: &Formatter) -> Result<String> {
    let bookmark = store.create(new_bookmark(args.title, args.url, args.tags, args.expires_at)?)?;
    formatter.bookmark_created(&bookmark)
}

/// Execute the list command.
pub fn execute_list(args: ListArgs, store: &SqliteStore, formatter: &Formatter) -> Result<String> {
    let query = BookmarkQuery {
        skip: args.skip,
        limit: args.limit,
        expired_at: None,
    };
    formatter.format_bookmarks(&store.list(&query)?)
}

/// Execute the get command.
pub fn execute_get(args: IdArgs, store: &SqliteStore, formatter: &Formatter) -> Result<String> {
    let id = BookmarkId::from_value(args.id);
    let bookmark = store.get(id)?.ok_or(CliError::NotFound(id))?;
    formatter.format_bookmark(&bookmark)
}

/// Execute the update command.
///
/// Every field is replaced; omitted tags or expiry are cleared.
pub fn execute_update(
    args: UpdateArgs,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<String> {
    let id = BookmarkId::from_value(args.id);
    let replacement = new_bookmark(args.title, args.url, args.tags, args.expires_at)?;
    let bookmark = store.update(id, replacement)?.ok_or(CliError::NotFound(id))?;
    formatter.bookmark_updated(&bookmark)
}

/// Execute the delete command.
pub fn execute_delete(args: IdArgs, store: &mut SqliteStore, formatter: &Formatter) -> Result<String> {
    let id = BookmarkId::from_value(args.id);
    store.delete(id)?.ok_or(CliError::NotFound(id))?;
    Ok(formatter.bookmark_deleted(id))
}

/// Execute the expired command.
pub fn execute_expired(args: ListArgs, store: &SqliteStore, formatter: &Formatter) -> Result<String> {
    let query = BookmarkQuery {
        skip: args.skip,
        limit: args.limit,
        ..BookmarkQuery::expired(unix_now())
    };
    formatter.format_bookmarks(&store.list(&query)?)
}

fn new_bookmark(
    title: String,
    url: String,
    tags: Option<String>,
    expires_at: Option<u64>,
) -> Result<NewBookmark> {
    if url.trim().is_empty() {
        return Err(CliError::InvalidInput("URL must not be empty".to_string()));
    }

    let mut bookmark = NewBookmark::new(title, url.trim());
    if let Some(tags) = tags {
        bookmark = bookmark.with_tags(TagSet::parse(&tags));
    }
    if let Some(expires_at) = expires_at {
        bookmark = bookmark.with_expiration(expires_at);
    }
    Ok(bookmark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn quiet() -> Formatter {
        Formatter::new(OutputFormat::Quiet, false)
    }

    fn add_args(title: &str, url: &str, tags: Option<&str>, expires_at: Option<u64>) -> AddArgs {
        AddArgs {
            title: title.to_string(),
            url: url.to_string(),
            tags: tags.map(str::to_string),
            expires_at,
        }
    }

    #[test]
    fn test_add_parses_tags() {
        let mut store = SqliteStore::new(":memory:").unwrap();

        let output = execute_add(
            add_args("Go Docs", "https://go.dev", Some("go,  programming, go"), None),
            &mut store,
            &quiet(),
        )
        .unwrap();

        let stored = store.find_by_url("https://go.dev").unwrap().unwrap();
        assert_eq!(output, stored.id.to_string());
        assert_eq!(stored.tags.encode(), "go, programming");
    }

    #[test]
    fn test_add_rejects_empty_url() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let result = execute_add(add_args("Empty", "  ", None, None), &mut store, &quiet());
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_get_unknown_id() {
        let store = SqliteStore::new(":memory:").unwrap();
        let result = execute_get(IdArgs { id: 99 }, &store, &quiet());
        assert!(matches!(result, Err(CliError::NotFound(_))));
    }

    #[test]
    fn test_update_clears_omitted_fields() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        execute_add(
            add_args("Old", "https://old.example", Some("a"), Some(10)),
            &mut store,
            &quiet(),
        )
        .unwrap();
        let id = store.find_by_url("https://old.example").unwrap().unwrap().id;

        let args = UpdateArgs {
            id: id.value(),
            title: "New".to_string(),
            url: "https://new.example".to_string(),
            tags: None,
            expires_at: None,
        };
        execute_update(args, &mut store, &quiet()).unwrap();

        let updated = store.get(id).unwrap().unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.url, "https://new.example");
        assert!(updated.tags.is_empty());
        assert_eq!(updated.expiration_date, None);
    }

    #[test]
    fn test_delete_then_missing() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        execute_add(add_args("A", "https://a.example", None, None), &mut store, &quiet()).unwrap();
        let id = store.find_by_url("https://a.example").unwrap().unwrap().id;

        let output = execute_delete(IdArgs { id: id.value() }, &mut store, &quiet()).unwrap();
        assert_eq!(output, id.to_string());

        let again = execute_delete(IdArgs { id: id.value() }, &mut store, &quiet());
        assert!(matches!(again, Err(CliError::NotFound(_))));
    }

    #[test]
    fn test_expired_lists_only_past_dates() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let formatter = quiet();
        execute_add(add_args("Past", "https://past.example", None, Some(1)), &mut store, &formatter)
            .unwrap();
        execute_add(
            add_args("Future", "https://future.example", None, Some(u32::MAX as u64 * 4)),
            &mut store,
            &formatter,
        )
        .unwrap();
        execute_add(add_args("Never", "https://never.example", None, None), &mut store, &formatter)
            .unwrap();

        let output = execute_expired(ListArgs { skip: 0, limit: 100 }, &store, &formatter).unwrap();
        let past = store.find_by_url("https://past.example").unwrap().unwrap();
        assert_eq!(output, past.id.to_string());
    }
}
