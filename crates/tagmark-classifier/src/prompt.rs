//! LLM prompt for bookmark classification

use serde_json::{json, Value};
use tagmark_domain::BookmarkInput;

/// Builds the classification prompt for one batch
pub struct PromptBuilder<'a> {
    bookmarks: &'a [BookmarkInput],
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder for a batch
    pub fn new(bookmarks: &'a [BookmarkInput]) -> Self {
        Self { bookmarks }
    }

    /// The batch as a JSON array of `{title, url}` objects
    fn batch_json(&self) -> String {
        let items: Vec<Value> = self
            .bookmarks
            .iter()
            .map(|b| json!({ "title": b.title, "url": b.url }))
            .collect();
        Value::Array(items).to_string()
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(CLASSIFICATION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("Input: ");
        prompt.push_str(&self.batch_json());
        prompt.push_str("\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const CLASSIFICATION_INSTRUCTIONS: &str = "\
Classify these bookmarks into JSON format with title, url and tags. \
Return only 1 most relevant tag per item.";

const OUTPUT_FORMAT_REMINDER: &str = "\
Respond with a JSON array of objects, one per bookmark, each with the string \
fields \"title\", \"url\" and \"tags\". Copy \"title\" and \"url\" exactly as given.";
