//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use tagmark_classifier::Classifier;
use tagmark_domain::traits::LlmProvider;
use tagmark_domain::BookmarkInput;
use tagmark_llm::ChatProvider;
use tagmark_store::SqliteStore;
use tracing::debug;

/// Gather the bookmarks to classify: `--item` pairs first, then the file.
pub fn collect_inputs(args: &ClassifyArgs) -> Result<Vec<BookmarkInput>> {
    if args.items.len() % 2 != 0 {
        return Err(CliError::InvalidInput(
            "Each --item needs a TITLE and a URL".to_string(),
        ));
    }

    let mut inputs: Vec<BookmarkInput> = args
        .items
        .chunks(2)
        .map(|pair| BookmarkInput::new(pair[0].as_str(), pair[1].as_str()))
        .collect();

    if let Some(path) = &args.file {
        let contents = fs::read_to_string(path)?;
        let from_file: Vec<BookmarkInput> = serde_json::from_str(&contents)?;
        debug!("Read {} bookmarks from {}", from_file.len(), path.display());
        inputs.extend(from_file);
    }

    Ok(inputs)
}

/// Build a classifier backed by the chat-completions service.
///
/// An explicit `api_key` wins over the one in the config file.
pub fn chat_classifier(
    config: &Config,
    api_key: Option<String>,
    store: SqliteStore,
) -> Result<Classifier<ChatProvider, SqliteStore>> {
    let mut llm_config = config.llm.clone();
    if let Some(api_key) = api_key {
        llm_config = llm_config.with_api_key(api_key);
    }

    let provider = ChatProvider::new(&llm_config)?;
    debug!("Using model {} at {}", provider.model(), provider.endpoint());

    Ok(Classifier::new(provider, store, config.classifier.clone())?)
}

/// Execute the classify command.
pub fn execute_classify<L: LlmProvider>(
    inputs: &[BookmarkInput],
    classifier: &mut Classifier<L, SqliteStore>,
    formatter: &Formatter,
) -> Result<String> {
    let bookmarks = classifier.classify_and_reconcile(inputs)?;
    formatter.classified(&bookmarks)
}
