//! Error types for the Classifier

use thiserror::Error;

/// Errors that can occur during classification and reconciliation
///
/// Service and parse failures happen before any store write, so a batch that
/// fails with either of them leaves the store untouched.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The classification service could not be reached or returned a failure status
    #[error("Classification service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The service replied, but the reply could not be decoded
    #[error("Classification response parsing failed: {0}")]
    ResponseParseFailure(String),

    /// Bookmark store error, propagated unchanged
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ClassifierError {
    fn from(e: serde_json::Error) -> Self {
        ClassifierError::ResponseParseFailure(format!("JSON parse error: {}", e))
    }
}
