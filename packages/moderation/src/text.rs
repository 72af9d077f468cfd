//! Text safety classification via the hosted moderation endpoint.

use async_trait::async_trait;
use openai_client::error::Result;
use openai_client::OpenAIClient;
use tracing::debug;

use crate::classifier::{TextClassifier, TextVerdict};

/// Text classifier backed by the OpenAI moderation endpoint.
///
/// A text is flagged when the provider flags it, or when the maximum
/// category score meets the configured threshold, whichever comes first.
#[derive(Clone)]
pub struct OpenAiTextClassifier {
    client: OpenAIClient,
    model: String,
    threshold: f64,
}

impl OpenAiTextClassifier {
    /// Create a classifier with the given model and flag threshold.
    pub fn new(client: OpenAIClient, model: impl Into<String>, threshold: f64) -> Self {
        Self {
            client,
            model: model.into(),
            threshold,
        }
    }
}

#[async_trait]
impl TextClassifier for OpenAiTextClassifier {
    async fn classify(&self, text: &str) -> Result<TextVerdict> {
        let result = self.client.moderation(&self.model, text).await?;

        let score = result.max_score();
        let flagged = result.flagged || score >= self.threshold;

        debug!(flagged, score, provider_flagged = result.flagged, "text moderation verdict");

        Ok(TextVerdict {
            flagged,
            score,
            categories: result.categories,
        })
    }
}
