//! The moderation pipeline: text check, duplicate check, image checks.
//!
//! Strictly sequential, fail-open at every external-call boundary.
//! Availability wins over strictness: a flaky or unreachable classifier
//! must never block all publishing, so only a successful, positive
//! detection rejects a listing. Classifier failures are logged and the
//! evaluation continues to the next step.

use tracing::warn;

use crate::classifier::{ImageClassifier, TextClassifier};
use crate::config::ModerationConfig;
use crate::duplicates::check_duplicates;
use crate::image::OpenAiImageClassifier;
use crate::text::OpenAiTextClassifier;

/// One listing submission to evaluate.
#[derive(Debug, Clone, Default)]
pub struct ModerationRequest {
    /// Listing title.
    pub title: String,

    /// Listing description.
    pub description: String,

    /// Image bytes, in presentation order.
    pub images: Vec<Vec<u8>>,

    /// Titles of existing listings to compare against. When evaluating an
    /// edit, the caller excludes the listing being edited.
    pub existing_titles: Vec<String>,
}

impl ModerationRequest {
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

    /// Attach the corpus of existing titles.
    pub fn with_existing_titles(
        mut self,
        titles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.existing_titles = titles.into_iter().map(|t| t.into()).collect();
        self
    }
}

/// Which step decided the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No step rejected; publish.
    Approved,
    /// Text moderation flagged the title/description.
    RejectedText,
    /// A near-duplicate title exists.
    RejectedDuplicate,
    /// An image was flagged unsafe.
    RejectedImage,
}

/// Publish decision for one evaluation.
///
/// Every evaluation produces exactly one result; no failure escapes the
/// pipeline. Approved results carry no message.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationResult {
    pub outcome: Outcome,
    pub message: Option<String>,
}

impl ModerationResult {
    fn approved() -> Self {
        Self {
            outcome: Outcome::Approved,
            message: None,
        }
    }

    fn rejected(outcome: Outcome, message: impl Into<String>) -> Self {
        Self {
            outcome,
            message: Some(message.into()),
        }
    }

    /// True when the listing may be published.
    pub fn is_approved(&self) -> bool {
        self.outcome == Outcome::Approved
    }
}

/// Sequences the three checks into one publish decision.
///
/// Generic over the classifier seams so tests can substitute scripted
/// classifiers. Holds no mutable state: evaluations are independent and
/// safe to run concurrently for different requests.
pub struct ModerationPipeline<T, I> {
    config: ModerationConfig,
    text: T,
    image: I,
}

impl ModerationPipeline<OpenAiTextClassifier, OpenAiImageClassifier> {
    /// Build a pipeline backed by the hosted OpenAI classifiers.
    pub fn openai(config: ModerationConfig) -> Self {
        // A disabled pipeline approves before touching either classifier,
        // so the keyless client below is never exercised.
        let client = match &config.credentials {
            Some(credentials) => credentials.client(),
            None => openai_client::OpenAIClient::new(""),
        };

        let text =
            OpenAiTextClassifier::new(client.clone(), &config.text_model, config.text_threshold);
        let image = OpenAiImageClassifier::new(client, &config.image_model);

        Self::with_classifiers(config, text, image)
    }
}

impl<T: TextClassifier, I: ImageClassifier> ModerationPipeline<T, I> {
    /// Build a pipeline with explicit classifiers.
    pub fn with_classifiers(config: ModerationConfig, text: T, image: I) -> Self {
        Self {
            config,
            text,
            image,
        }
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &ModerationConfig {
        &self.config
    }

    /// Evaluate one listing submission.
    ///
    /// Steps, in order, each able to end the evaluation:
    /// 1. Disabled config approves immediately, zero external calls.
    /// 2. Text check on `title + "\n\n" + description`; flagged rejects,
    ///    failure continues.
    /// 3. Duplicate check of the title against the corpus; pure, cannot
    ///    fail.
    /// 4. Each image in order; the first flagged image rejects and later
    ///    images are never checked; failure continues to the next image.
    /// 5. Approved.
    pub async fn evaluate(&self, request: &ModerationRequest) -> ModerationResult {
        if !self.config.enabled() {
            return ModerationResult::approved();
        }

        let text = format!("{}\n\n{}", request.title, request.description);
        match self.text.classify(&text).await {
            Ok(verdict) if verdict.flagged => {
                return ModerationResult::rejected(
                    Outcome::RejectedText,
                    "Content blocked by automated text moderation.",
                );
            }
            Ok(_) => {}
            Err(error) => {
                warn!(%error, "text moderation failed, continuing");
            }
        }

        let duplicate = check_duplicates(
            &request.title,
            &request.existing_titles,
            self.config.duplicate_threshold,
        );
        if duplicate.is_duplicate {
            return ModerationResult::rejected(
                Outcome::RejectedDuplicate,
                "Duplicate or very similar listing title detected.",
            );
        }

        for (index, image) in request.images.iter().enumerate() {
            match self.image.classify(image).await {
                Ok(verdict) if verdict.flagged => {
                    return ModerationResult::rejected(
                        Outcome::RejectedImage,
                        "Image blocked by automated moderation.",
                    );
                }
                Ok(_) => {}
                Err(error) => {
                    warn!(%error, index, "image moderation failed, continuing");
                }
            }
        }

        ModerationResult::approved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_constructors() {
        let approved = ModerationResult::approved();
        assert!(approved.is_approved());
        assert_eq!(approved.message, None);

        let rejected = ModerationResult::rejected(Outcome::RejectedText, "blocked");
        assert!(!rejected.is_approved());
        assert_eq!(rejected.message.as_deref(), Some("blocked"));
    }

    #[test]
    fn test_request_builder() {
        let request = ModerationRequest::new("Sunset", "oil on canvas")
            .with_images(vec![vec![1, 2, 3]])
            .with_existing_titles(["Moonrise"]);

        assert_eq!(request.title, "Sunset");
        assert_eq!(request.images.len(), 1);
        assert_eq!(request.existing_titles, vec!["Moonrise".to_string()]);
    }
}
