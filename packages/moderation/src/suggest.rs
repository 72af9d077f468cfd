//! Advisory AI content suggestions for listing metadata.
//!
//! One multimodal completion proposes an improved title, description,
//! tags, hashtags, style, category, and summary. Suggestions only ever
//! enrich the UI: this module never blocks publication and never fails
//! visibly. Any failure anywhere becomes an empty suggestion set.

use openai_client::{ChatRequest, ContentPart, Message, OpenAIClient};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::SuggestionConfig;

/// Input for one suggestion request.
#[derive(Debug, Clone, Default)]
pub struct SuggestionRequest {
    /// Listing title (possibly empty).
    pub title: String,

    /// Listing description (possibly empty).
    pub description: String,

    /// Image bytes; only the first `max_images` are forwarded.
    pub images: Vec<Vec<u8>>,

    /// Target language code. Falls back to the configured default.
    pub language: Option<String>,
}

impl SuggestionRequest {
    /// Create a request for a title and description with no images.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Attach image bytes.
    pub fn with_images(mut self, images: Vec<Vec<u8>>) -> Self {
        self.images = images;
        self
    }

    /// Set the target language code.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Suggested listing metadata.
///
/// The recognized key set is fixed; absent fields mean "no suggestion".
/// Unknown keys in the model's response are dropped silently. An empty
/// value is a valid, successful result.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Suggestions {
    /// Suggested improved title.
    pub title: Option<String>,

    /// Concise improved description.
    pub description: Option<String>,

    /// 3-7 short tags.
    pub tags: Option<Vec<String>>,

    /// 3-6 hashtags, without the leading '#'.
    pub hashtags: Option<Vec<String>>,

    /// Short style/medium string.
    pub style: Option<String>,

    /// One-word or short-phrase category.
    pub category: Option<String>,

    /// 1-2 sentence plain summary.
    pub summary: Option<String>,
}

impl Suggestions {
    /// True when no field carries a suggestion.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.hashtags.is_none()
            && self.style.is_none()
            && self.category.is_none()
            && self.summary.is_none()
    }

    /// Parse a model response into suggestions.
    ///
    /// Strips markdown code fences first; models sometimes wrap JSON in
    /// them even under JSON-object response mode.
    pub fn parse(content: &str) -> Option<Self> {
        let json = content
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();
        serde_json::from_str(json).ok()
    }
}

/// Produces advisory metadata suggestions for a listing.
pub struct SuggestionEngine {
    config: SuggestionConfig,
    client: Option<OpenAIClient>,
}

impl SuggestionEngine {
    /// Build an engine; without credentials it answers empty, zero calls.
    pub fn new(config: SuggestionConfig) -> Self {
        let client = config.credentials.as_ref().map(|c| c.client());
        Self { config, client }
    }

    /// Ask for suggestions. Never fails: transport, HTTP, parse, and
    /// shape failures all collapse into an empty result.
    pub async fn suggest(&self, request: &SuggestionRequest) -> Suggestions {
        let Some(client) = &self.client else {
            return Suggestions::default();
        };

        let language = request
            .language
            .as_deref()
            .unwrap_or(&self.config.default_language);

        let content = match client.chat_completion(self.build_request(request, language)).await {
            Ok(content) => content,
            Err(error) => {
                warn!(%error, "content suggestion call failed");
                return Suggestions::default();
            }
        };

        match Suggestions::parse(&content) {
            Some(suggestions) => {
                debug!(empty = suggestions.is_empty(), "content suggestions parsed");
                suggestions
            }
            None => {
                warn!("content suggestion response was not valid JSON");
                Suggestions::default()
            }
        }
    }

    fn build_request(&self, request: &SuggestionRequest, language: &str) -> ChatRequest {
        let system = format!(
            "You are a concise content analyzer for an art marketplace. \
             Answer in language code '{language}'. \
             Given a title/description and optional images, respond in JSON with keys: \
             title (suggested improved title), description (concise improved description), \
             tags (array of 3-7 short tags), style (short style/medium string), \
             category (one-word or short phrase), hashtags (array of 3-6 hashtags without #), \
             summary (1-2 sentence plain summary). Do not add extra keys."
        );

        let non_empty = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
        let mut parts = vec![ContentPart::text(format!(
            "Title: {}\nDescription: {}",
            non_empty(&request.title),
            non_empty(&request.description),
        ))];
        parts.extend(
            request
                .images
                .iter()
                .take(self.config.max_images)
                .map(|bytes| ContentPart::image_jpeg_base64(bytes)),
        );

        ChatRequest::new(&self.config.model)
            .message(Message::system(system))
            .message(Message::user_parts(parts))
            .temperature(self.config.temperature)
            .json_response()
    }
}
