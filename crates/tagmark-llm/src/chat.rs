//! Chat-completions Provider Implementation
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint (DeepSeek by
//! default). One prompt becomes one user message; the reply text is read
//! from `choices[0].message.content`.
//!
//! # Features
//!
//! - Bearer-token authentication
//! - Configurable base address, model and timeout
//! - No retries: failures surface to the caller, who owns retry policy
//!
//! # Examples
//!
//! ```no_run
//! use tagmark_llm::{ChatProvider, LlmConfig};
//!
//! let config = LlmConfig::default().with_api_key("sk-...");
//! let provider = ChatProvider::new(&config).unwrap();
//! ```

use crate::config::LlmConfig;
use crate::LlmError;
use serde::{Deserialize, Serialize};
use tagmark_domain::traits::LlmProvider as LlmProviderTrait;
use tokio::runtime::Runtime;
use tracing::{debug, error};

/// Chat-completions API provider
///
/// Owns a single-threaded tokio runtime so that the synchronous
/// [`LlmProvider`](tagmark_domain::traits::LlmProvider) interface can drive
/// the async HTTP client. Calling `generate` from inside another tokio
/// runtime panics; async callers should use [`ChatProvider::complete`].
pub struct ChatProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    runtime: Runtime,
}

/// Request body for the chat-completions API
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model name
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Always false; the reply is read in one piece
    pub stream: bool,
}

/// A single chat message
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role (`user`, `assistant`, ...)
    pub role: String,
    /// Message text
    pub content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

impl ChatProvider {
    /// Create a provider from configuration
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Config` if the configuration is invalid or no
    /// credential is set.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Config)?;

        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                LlmError::Config(format!(
                    "No API key configured (set {})",
                    crate::config::API_KEY_ENV
                ))
            })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            endpoint: config.completions_url(),
            model: config.model.clone(),
            api_key,
            client,
            runtime,
        })
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Model requests are sent with
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request body for a prompt
    pub fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
        }
    }

    /// Send a prompt and return the reply text
    ///
    /// # Errors
    ///
    /// - `LlmError::Communication` if the request cannot be sent or times out
    /// - `LlmError::Status` if the service answers with a non-success status
    /// - `LlmError::InvalidResponse` if the reply has no message content
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = self.build_request(prompt);

        debug!("Sending {} char prompt to {}", prompt.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completion request failed: {}", e);
                LlmError::Communication(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Chat completion returned HTTP {}", status);
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        debug!("Received {} byte response", body.len());

        extract_content(&body)
    }
}

/// Pull `choices[0].message.content` out of a chat-completions reply
pub fn extract_content(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("Response has no choices".to_string()))?
        .message
        .content
        .ok_or_else(|| LlmError::InvalidResponse("Response message has no content".to_string()))
}

impl LlmProviderTrait for ChatProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.runtime.block_on(self.complete(prompt))
    }
}
