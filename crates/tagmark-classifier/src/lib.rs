//! Tagmark Classifier
//!
//! Tags bookmarks through an external LLM and reconciles the result into the
//! bookmark store.
//!
//! # Architecture
//!
//! ```text
//! Bookmarks → Classifier → LLM → Parser → Reconciliation → BookmarkStore
//! ```
//!
//! # Key Features
//!
//! - **Batch Classification**: one request per batch, large inputs split by `max_batch_size`
//! - **Tolerant Parsing**: the JSON payload is located inside surrounding prose
//! - **Tag Merging**: existing bookmarks gain tags, never lose them
//! - **All-or-nothing Parsing**: a bad reply fails the call before any store write
//!
//! # Example Usage
//!
//! ```no_run
//! use tagmark_classifier::{Classifier, ClassifierConfig};
//! use tagmark_domain::BookmarkInput;
//! use tagmark_llm::MockProvider;
//! use tagmark_store::SqliteStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(
//!     r#"[{"title":"Go Docs","url":"https://go.dev","tags":"programming"}]"#,
//! );
//! let store = SqliteStore::new(":memory:")?;
//! let mut classifier = Classifier::new(llm, store, ClassifierConfig::default())?;
//!
//! let bookmarks = classifier
//!     .classify_and_reconcile(&[BookmarkInput::new("Go Docs", "https://go.dev")])?;
//!
//! println!("Stored {} bookmarks", bookmarks.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod parser;
mod prompt;
mod reconcile;


pub use classifier::Classifier;
pub use config::{ClassifierConfig, SchemaMode};
pub use error::ClassifierError;
pub use parser::parse_classification_response;
pub use reconcile::{reconcile, reconcile_item, ReconcileAction, Reconciled};
