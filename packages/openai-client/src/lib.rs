//! Minimal OpenAI REST API client
//!
//! A clean client for the two OpenAI endpoints a moderation pipeline needs:
//! text moderation and chat completions (including vision input via data
//! URLs and JSON-object response mode). No domain-specific logic lives here.
//!
//! Every call enforces a bounded per-request timeout and maps failures into
//! a three-way taxonomy: [`ClientError::Transport`] for connection/timeout
//! failures, [`ClientError::Status`] for non-2xx responses (carrying the
//! status code), and [`ClientError::Parse`] for bodies that are not valid
//! JSON or lack the expected shape.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, ChatRequest, Message};
//!
//! let client = OpenAIClient::from_env()?;
//!
//! let result = client
//!     .moderation("omni-moderation-latest", "some listing text")
//!     .await?;
//!
//! let content = client
//!     .chat_completion(
//!         ChatRequest::new("gpt-4o-mini").message(Message::user("Hello!")),
//!     )
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{ClientError, Result};
pub use types::{
    ChatRequest, ContentPart, ImageUrl, Message, MessageContent, ModerationResult, ResponseFormat,
};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for moderation calls.
const DEFAULT_MODERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for chat/vision calls (the longer bound).
const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(15);

/// Minimal OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    moderation_timeout: Duration,
    chat_timeout: Duration,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            moderation_timeout: DEFAULT_MODERATION_TIMEOUT,
            chat_timeout: DEFAULT_CHAT_TIMEOUT,
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ClientError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the timeout for moderation calls (default: 10s).
    pub fn with_moderation_timeout(mut self, timeout: Duration) -> Self {
        self.moderation_timeout = timeout;
        self
    }

    /// Set the timeout for chat completion calls (default: 15s).
    pub fn with_chat_timeout(mut self, timeout: Duration) -> Self {
        self.chat_timeout = timeout;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classify text via the moderation endpoint.
    ///
    /// Returns the first result from the response. An empty `results`
    /// array is treated as a malformed response.
    pub async fn moderation(&self, model: &str, input: &str) -> Result<ModerationResult> {
        let request = types::ModerationRequest {
            model: model.to_string(),
            input: input.to_string(),
        };

        let response: types::ModerationResponseRaw = self
            .post_json("/moderations", &request, self.moderation_timeout)
            .await?;

        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::Parse("moderation response has no results".into()))
    }

    /// Chat completion. Returns the first choice's message content.
    ///
    /// An empty `choices` array is treated as a malformed response.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<String> {
        let start = std::time::Instant::now();
        let model = request.model.clone();

        let response: types::ChatResponseRaw = self
            .post_json("/chat/completions", &request, self.chat_timeout)
            .await?;

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            "OpenAI chat completion"
        );

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClientError::Parse("chat response has no choices".into()))
    }

    /// POST a JSON payload and decode a JSON response, with a bounded wait.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, path))
            .timeout(timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, path, "OpenAI request failed");
                ClientError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, path, "OpenAI API error");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}
