//! Tagmark LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `tagmark-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `ChatProvider`: OpenAI-compatible chat-completions API (DeepSeek by default)
//!
//! # Examples
//!
//! ```
//! use tagmark_llm::MockProvider;
//! use tagmark_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod chat;
pub mod config;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use tagmark_domain::traits::{LlmProvider as LlmProviderTrait, ProviderError};
use thiserror::Error;

pub use chat::ChatProvider;
pub use config::LlmConfig;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport error, including timeouts
    #[error("Communication error: {0}")]
    Communication(String),

    /// Service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// Reply could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider misconfigured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProviderError for LlmError {
    fn is_malformed_reply(&self) -> bool {
        matches!(self, LlmError::InvalidResponse(_))
    }
}

/// A canned reply for [`MockProvider`]
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text
    Text(String),
    /// Fail as if the service were unreachable
    Unavailable,
    /// Fail as if the reply envelope were garbage
    Malformed,
}

impl MockReply {
    fn into_result(self) -> Result<String, LlmError> {
        match self {
            MockReply::Text(text) => Ok(text),
            MockReply::Unavailable => Err(LlmError::Communication("Mock unavailable".to_string())),
            MockReply::Malformed => Err(LlmError::InvalidResponse("Mock malformed".to_string())),
        }
    }
}

/// Mock LLM provider for deterministic testing
///
/// Replies are chosen in this order: queued replies (first in, first out),
/// then a reply registered for the exact prompt, then the default reply.
/// Clones share state, so a test can keep a handle while the provider is
/// owned elsewhere.
///
/// # Examples
///
/// ```
/// use tagmark_llm::{MockProvider, MockReply};
/// use tagmark_domain::traits::LlmProvider;
///
/// let provider = MockProvider::new("Fixed response");
/// provider.push_reply(MockReply::Text("first".into()));
///
/// assert_eq!(provider.generate("a").unwrap(), "first");
/// assert_eq!(provider.generate("b").unwrap(), "Fixed response");
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    queued: VecDeque<MockReply>,
    responses: HashMap<String, MockReply>,
    prompts: Vec<String>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// Create a MockProvider whose default reply is a transport failure
    pub fn unavailable() -> Self {
        Self::with_default(MockReply::Unavailable)
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a reply for the next call, regardless of prompt
    pub fn push_reply(&self, reply: MockReply) {
        self.state().queued.push_back(reply);
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        self.state()
            .responses
            .insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&self, prompt: impl Into<String>) {
        self.state()
            .responses
            .insert(prompt.into(), MockReply::Unavailable);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.state().prompts.len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("[]")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.prompts.push(prompt.to_string());

        let reply = match state.queued.pop_front() {
            Some(reply) => reply,
            None => state
                .responses
                .get(prompt)
                .cloned()
                .unwrap_or_else(|| self.default_reply.clone()),
        };

        reply.into_result()
    }
}
