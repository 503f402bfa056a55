//! Core Classifier implementation

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::parser::parse_classification_response;
use crate::prompt::PromptBuilder;
use crate::reconcile::reconcile;
use std::fmt::Display;
use tagmark_domain::traits::{BookmarkStore, LlmProvider, ProviderError};
use tagmark_domain::{Bookmark, BookmarkInput, ClassifiedItem};
use tracing::{debug, info, warn};

/// The Classifier tags bookmarks through an external LLM and folds the
/// result into the store
pub struct Classifier<L, S>
where
    L: LlmProvider,
    S: BookmarkStore,
{
    llm_provider: L,
    store: S,
    config: ClassifierConfig,
}

impl<L, S> Classifier<L, S>
where
    L: LlmProvider,
    S: BookmarkStore,
    S::Error: Display,
{
    /// Create a new Classifier
    ///
    /// Fails with [`ClassifierError::Config`] if `config` does not validate.
    pub fn new(llm_provider: L, store: S, config: ClassifierConfig) -> Result<Self, ClassifierError> {
        config.validate().map_err(ClassifierError::Config)?;

        Ok(Self {
            llm_provider,
            store,
            config,
        })
    }

    /// Shared access to the store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store, for plain CRUD operations
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give the store back
    pub fn into_store(self) -> S {
        self.store
    }

    /// Classify bookmarks without touching the store
    ///
    /// Input larger than `max_batch_size` is split into chunks, so one call
    /// may send more than one request, one per chunk, in order. Every
    /// request must succeed and parse before anything is returned.
    /// The result may be shorter, longer or differently ordered than the
    /// input: it is whatever the service sent back.
    pub fn classify(
        &self,
        bookmarks: &[BookmarkInput],
    ) -> Result<Vec<ClassifiedItem>, ClassifierError> {
        if bookmarks.is_empty() {
            debug!("Empty batch, skipping classification call");
            return Ok(Vec::new());
        }

        let batch_size = self.config.max_batch_size;
        let batches = bookmarks.len().div_ceil(batch_size);

        info!(
            "Classifying {} bookmarks in {} request(s)",
            bookmarks.len(),
            batches
        );

        let mut classified = Vec::with_capacity(bookmarks.len());
        for (idx, batch) in bookmarks.chunks(batch_size).enumerate() {
            debug!("Classifying batch {}/{}", idx + 1, batches);
            classified.extend(self.classify_batch(batch)?);
        }

        if classified.len() != bookmarks.len() {
            warn!(
                "Classifier returned {} items for {} bookmarks",
                classified.len(),
                bookmarks.len()
            );
        }

        Ok(classified)
    }

    /// Classify bookmarks and reconcile the result into the store
    ///
    /// Returns the stored bookmark for every classified item, in the order
    /// the service returned them. Nothing is written if classification or
    /// parsing fails.
    pub fn classify_and_reconcile(
        &mut self,
        bookmarks: &[BookmarkInput],
    ) -> Result<Vec<Bookmark>, ClassifierError> {
        let classified = self.classify(bookmarks)?;
        reconcile(&mut self.store, &classified)
    }

    /// One request, one reply, one parse
    fn classify_batch(
        &self,
        batch: &[BookmarkInput],
    ) -> Result<Vec<ClassifiedItem>, ClassifierError> {
        let prompt = PromptBuilder::new(batch).build();

        debug!("Prompt length: {} chars", prompt.len());

        let response = self.llm_provider.generate(&prompt).map_err(|e| {
            if e.is_malformed_reply() {
                ClassifierError::ResponseParseFailure(e.to_string())
            } else {
                ClassifierError::ServiceUnavailable(e.to_string())
            }
        })?;

        debug!("LLM response length: {} chars", response.len());

        let items = parse_classification_response(&response, self.config.schema_mode)?;

        debug!("Parsed {} classified items", items.len());

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagmark_llm::{MockProvider, MockReply};
    use tagmark_store::SqliteStore;

    fn create_test_classifier(llm: MockProvider) -> Classifier<MockProvider, SqliteStore> {
        let store = SqliteStore::new(":memory:").unwrap();
        Classifier::new(llm, store, ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let store = SqliteStore::new(":memory:").unwrap();
        let config = ClassifierConfig {
            max_batch_size: 0,
            ..ClassifierConfig::default()
        };

        let result = Classifier::new(MockProvider::default(), store, config);
        assert!(matches!(result, Err(ClassifierError::Config(_))));
    }

    #[test]
    fn test_empty_batch_skips_service() {
        let llm = MockProvider::unavailable();
        let classifier = create_test_classifier(llm.clone());

        let result = classifier.classify(&[]).unwrap();
        assert!(result.is_empty());
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_service_failure_maps_to_unavailable() {
        let classifier = create_test_classifier(MockProvider::unavailable());

        let result = classifier.classify(&[BookmarkInput::new("A", "https://a.example")]);
        assert!(matches!(result, Err(ClassifierError::ServiceUnavailable(_))));
    }

    #[test]
    fn test_malformed_envelope_maps_to_parse_failure() {
        let llm = MockProvider::default();
        llm.push_reply(MockReply::Malformed);
        let classifier = create_test_classifier(llm);

        let result = classifier.classify(&[BookmarkInput::new("A", "https://a.example")]);
        assert!(matches!(result, Err(ClassifierError::ResponseParseFailure(_))));
    }

    #[test]
    fn test_prompt_includes_batch() {
        let llm = MockProvider::default();
        let classifier = create_test_classifier(llm.clone());

        classifier
            .classify(&[BookmarkInput::new("Go Docs", "https://go.dev")])
            .unwrap();

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(r#"{"title":"Go Docs","url":"https://go.dev"}"#));
    }
}
