//! Image safety classification via a vision-capable chat model.
//!
//! The image travels as a base64 data URL alongside a fixed safety prompt.
//! The verdict is lexical: a lower-cased response containing "unsafe"
//! flags the image.

use async_trait::async_trait;
use openai_client::error::Result;
use openai_client::{ChatRequest, ContentPart, Message, OpenAIClient};
use tracing::debug;

use crate::classifier::{ImageClassifier, ImageVerdict};

const SYSTEM_PROMPT: &str =
    "You are a strict content safety checker. Reply with 'SAFE' or 'UNSAFE' and a short reason.";

const USER_PROMPT: &str =
    "Is this image unsafe? Check for nudity, violence, self-harm, illegal, personal data.";

/// Image classifier backed by a vision-capable chat completion model.
#[derive(Clone)]
pub struct OpenAiImageClassifier {
    client: OpenAIClient,
    model: String,
}

impl OpenAiImageClassifier {
    /// Create a classifier with the given vision model.
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ImageClassifier for OpenAiImageClassifier {
    async fn classify(&self, image: &[u8]) -> Result<ImageVerdict> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(SYSTEM_PROMPT))
            .message(Message::user_parts(vec![
                ContentPart::text(USER_PROMPT),
                ContentPart::image_jpeg_base64(image),
            ]))
            .temperature(0.0);

        let content = self.client.chat_completion(request).await?;

        let reason = content.to_lowercase();
        let flagged = reason.contains("unsafe");

        debug!(flagged, "image moderation verdict");

        Ok(ImageVerdict::new(flagged, reason))
    }
}
