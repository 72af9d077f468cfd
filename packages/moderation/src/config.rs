//! Configuration for the moderation pipeline and suggestion engine.
//!
//! Configuration is constructed once and passed in at construction time.
//! Nothing here is re-read from the environment mid-evaluation.

use crate::credentials::Credentials;

/// Default flag threshold for the text classifier.
pub const DEFAULT_TEXT_THRESHOLD: f64 = 0.2;

/// Default similarity threshold for the duplicate check.
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.9;

/// Configuration for the moderation pipeline.
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// API credentials. `None` disables moderation entirely:
    /// every evaluation approves with zero external calls.
    pub credentials: Option<Credentials>,

    /// Text is flagged when any category score meets this value,
    /// even if the provider did not flag it. In [0, 1]. Default: 0.2.
    pub text_threshold: f64,

    /// A title is a duplicate when its similarity to any existing
    /// title meets this value. In [0, 1]. Default: 0.9.
    pub duplicate_threshold: f64,

    /// Moderation model for the text check.
    pub text_model: String,

    /// Vision-capable model for the image check.
    pub image_model: String,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            text_threshold: DEFAULT_TEXT_THRESHOLD,
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
            text_model: "omni-moderation-latest".to_string(),
            image_model: "gpt-4o-mini".to_string(),
        }
    }
}

impl ModerationConfig {
    /// Create a disabled config with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the environment, once.
    ///
    /// `OPENAI_API_KEY` enables moderation when present and non-empty.
    /// `MODERATION_THRESHOLD` and `MODERATION_DUP_THRESHOLD` override the
    /// default thresholds when they parse as floats.
    pub fn from_env() -> Self {
        let credentials = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(Credentials::new);

        let text_threshold = std::env::var("MODERATION_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TEXT_THRESHOLD);

        let duplicate_threshold = std::env::var("MODERATION_DUP_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DUPLICATE_THRESHOLD);

        Self {
            credentials,
            text_threshold,
            duplicate_threshold,
            ..Default::default()
        }
    }

    /// Set credentials, enabling the pipeline.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the text flag threshold.
    pub fn with_text_threshold(mut self, threshold: f64) -> Self {
        self.text_threshold = threshold;
        self
    }

    /// Set the duplicate similarity threshold.
    pub fn with_duplicate_threshold(mut self, threshold: f64) -> Self {
        self.duplicate_threshold = threshold;
        self
    }

    /// Set the moderation model.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Set the vision model.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Whether moderation is enabled (credentials are configured).
    pub fn enabled(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Configuration for the suggestion engine.
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    /// API credentials. `None` makes every suggestion empty, zero calls.
    pub credentials: Option<Credentials>,

    /// Chat model used for suggestions.
    pub model: String,

    /// Language code used when a request does not name one.
    pub default_language: String,

    /// Upper bound on images forwarded with one request.
    pub max_images: usize,

    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            model: "gpt-4o-mini".to_string(),
            default_language: "en".to_string(),
            // Cover image plus two gallery images.
            max_images: 3,
            temperature: 0.3,
        }
    }
}

impl SuggestionConfig {
    /// Create a disabled config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `OPENAI_API_KEY` from the environment, once.
    pub fn from_env() -> Self {
        let credentials = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(Credentials::new);

        Self {
            credentials,
            ..Default::default()
        }
    }

    /// Set credentials, enabling suggestions.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the fallback language code.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Set the image cap.
    pub fn with_max_images(mut self, max: usize) -> Self {
        self.max_images = max;
        self
    }
}
