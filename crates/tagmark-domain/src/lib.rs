//! Tagmark Domain Layer
//!
//! This crate contains the core domain model for Tagmark. It defines the
//! bookmark record, the tag set with its merge rules, and the trait
//! interfaces that the storage and LLM layers implement.
//!
//! ## Key Concepts
//!
//! - **Bookmark**: a stored URL with title, tag set and optional expiry
//! - **TagSet**: a deduplicated set of tags, persisted as a `", "`-joined string
//! - **ClassifiedItem**: a transient record returned by the external classifier
//!
//! ## Architecture
//!
//! - No infrastructure dependencies (serde only, for the JSON boundary)
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bookmark;
pub mod tags;
pub mod traits;

// Re-exports for convenience
pub use bookmark::{unix_now, Bookmark, BookmarkId, BookmarkInput, ClassifiedItem, NewBookmark};
pub use tags::TagSet;
