//! Error types for the CLI application.

use tagmark_classifier::ClassifierError;
use tagmark_domain::BookmarkId;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] tagmark_store::StoreError),

    /// Classification error
    #[error("{0}")]
    Classifier(#[from] ClassifierError),

    /// LLM provider setup error
    #[error("LLM error: {0}")]
    Llm(#[from] tagmark_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No bookmark with this id
    #[error("Bookmark not found: {0}")]
    NotFound(BookmarkId),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Service outages and unparseable replies get their own codes so
    /// scripts can decide whether to retry.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Classifier(ClassifierError::ServiceUnavailable(_)) => 3,
            CliError::Classifier(ClassifierError::ResponseParseFailure(_)) => 4,
            CliError::NotFound(_) => 2,
            _ => 1,
        }
    }
}
