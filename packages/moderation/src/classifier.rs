//! Classifier trait abstractions and their verdict types.
//!
//! The pipeline talks to the hosted classifiers through these traits so
//! tests (and alternative providers) can stand in for the real services.
//! Classifiers surface every failure to their caller; the pipeline owns
//! the fail-open policy, not the classifier.

use async_trait::async_trait;
use openai_client::error::Result;
use std::collections::BTreeMap;

/// Verdict from the text safety classifier.
#[derive(Debug, Clone)]
pub struct TextVerdict {
    /// Positive detection of unsafe content.
    pub flagged: bool,

    /// Maximum category score in [0, 1]; 0.0 when no categories returned.
    pub score: f64,

    /// Per-category boolean verdicts as reported by the provider.
    pub categories: BTreeMap<String, bool>,
}

/// Verdict from the image safety classifier.
///
/// The vision check is a coarse pass/fail: `score` is 1.0 when flagged
/// and 0.0 otherwise, not a calibrated probability.
#[derive(Debug, Clone)]
pub struct ImageVerdict {
    /// Positive detection of unsafe content.
    pub flagged: bool,

    /// 1.0 if flagged, else 0.0.
    pub score: f64,

    /// The classifier's own words, lower-cased.
    pub reason: String,
}

impl ImageVerdict {
    /// Build a verdict from the flag and the classifier's response text.
    pub fn new(flagged: bool, reason: impl Into<String>) -> Self {
        Self {
            flagged,
            score: if flagged { 1.0 } else { 0.0 },
            reason: reason.into(),
        }
    }
}

/// Classifies a text blob as safe or unsafe.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify the text. Failures propagate; a failed check never
    /// silently reads as "safe".
    async fn classify(&self, text: &str) -> Result<TextVerdict>;
}

/// Classifies a single image as safe or unsafe.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Classify the image bytes. Failures propagate like text checks.
    async fn classify(&self, image: &[u8]) -> Result<ImageVerdict>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_verdict_score_is_binary() {
        assert_eq!(ImageVerdict::new(true, "unsafe: violence").score, 1.0);
        assert_eq!(ImageVerdict::new(false, "safe").score, 0.0);
    }
}
