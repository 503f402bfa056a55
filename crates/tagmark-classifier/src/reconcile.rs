//! Reconcile classified items into the bookmark store
//!
//! Each item is looked up by exact URL. A hit gets its tags merged; a miss
//! becomes a new bookmark. Items are processed in order and the first store
//! error stops the loop. Writes made before that error are kept.

use crate::error::ClassifierError;
use std::fmt::Display;
use tagmark_domain::traits::BookmarkStore;
use tagmark_domain::{Bookmark, ClassifiedItem, NewBookmark};
use tracing::{debug, info};

/// What reconciliation did with one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// An existing bookmark had its tags merged
    Updated,
    /// A new bookmark was created
    Created,
}

/// Outcome for one classified item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// The bookmark as stored after this item
    pub bookmark: Bookmark,
    /// Whether it was updated or created
    pub action: ReconcileAction,
}

/// Reconcile a single item: one lookup, then one update or insert
pub fn reconcile_item<S>(store: &mut S, item: &ClassifiedItem) -> Result<Reconciled, ClassifierError>
where
    S: BookmarkStore,
    S::Error: Display,
{
    let existing = store.find_by_url(&item.url).map_err(store_error)?;

    match existing {
        Some(existing) => {
            let merged = existing.tags.union(&item.tags);
            debug!(
                "Merging tags for {} ('{}' + '{}' -> '{}')",
                item.url, existing.tags, item.tags, merged
            );
            let bookmark = store
                .update_tags(existing.id, &merged)
                .map_err(store_error)?;
            Ok(Reconciled {
                bookmark,
                action: ReconcileAction::Updated,
            })
        }
        None => {
            debug!("Creating bookmark for {}", item.url);
            let bookmark = store
                .create(NewBookmark::new(&item.title, &item.url).with_tags(item.tags.clone()))
                .map_err(store_error)?;
            Ok(Reconciled {
                bookmark,
                action: ReconcileAction::Created,
            })
        }
    }
}

/// Reconcile every item in order, returning stored bookmarks in item order
pub fn reconcile<S>(store: &mut S, items: &[ClassifiedItem]) -> Result<Vec<Bookmark>, ClassifierError>
where
    S: BookmarkStore,
    S::Error: Display,
{
    let mut bookmarks = Vec::with_capacity(items.len());
    let mut created = 0;

    for item in items {
        let reconciled = reconcile_item(store, item)?;
        if reconciled.action == ReconcileAction::Created {
            created += 1;
        }
        bookmarks.push(reconciled.bookmark);
    }

    info!(
        "Reconciliation complete: {} created, {} updated",
        created,
        bookmarks.len() - created
    );

    Ok(bookmarks)
}

fn store_error<E: Display>(e: E) -> ClassifierError {
    ClassifierError::Store(e.to_string())
}
