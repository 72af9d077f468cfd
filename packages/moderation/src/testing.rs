//! Scripted mock classifiers for testing.
//!
//! Useful for exercising the pipeline without real network calls. Mocks
//! are cheap to clone and share their script and call log, so tests can
//! keep a handle after moving a mock into a pipeline.

use async_trait::async_trait;
use openai_client::error::Result;
use openai_client::ClientError;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::classifier::{ImageClassifier, ImageVerdict, TextClassifier, TextVerdict};

/// A text classifier that answers from a script.
///
/// Responses are consumed in order; once the script is exhausted every
/// call answers "safe". Each call is recorded for assertions.
#[derive(Clone, Default)]
pub struct MockTextClassifier {
    script: Arc<RwLock<VecDeque<Result<TextVerdict>>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockTextClassifier {
    /// Create a mock that always answers "safe".
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a verdict.
    pub fn with_verdict(self, flagged: bool, score: f64) -> Self {
        self.script.write().unwrap().push_back(Ok(TextVerdict {
            flagged,
            score,
            categories: Default::default(),
        }));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: ClientError) -> Self {
        self.script.write().unwrap().push_back(Err(error));
        self
    }

    /// Texts passed to `classify`, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl TextClassifier for MockTextClassifier {
    async fn classify(&self, text: &str) -> Result<TextVerdict> {
        self.calls.write().unwrap().push(text.to_string());

        match self.script.write().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(TextVerdict {
                flagged: false,
                score: 0.0,
                categories: Default::default(),
            }),
        }
    }
}

/// An image classifier that answers from a script.
#[derive(Clone, Default)]
pub struct MockImageClassifier {
    script: Arc<RwLock<VecDeque<Result<ImageVerdict>>>>,
    calls: Arc<RwLock<Vec<usize>>>,
}

impl MockImageClassifier {
    /// Create a mock that always answers "safe".
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a verdict with the given reason.
    pub fn with_verdict(self, flagged: bool, reason: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(Ok(ImageVerdict::new(flagged, reason)));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: ClientError) -> Self {
        self.script.write().unwrap().push_back(Err(error));
        self
    }

    /// Byte lengths of the images passed to `classify`, in order.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.read().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl ImageClassifier for MockImageClassifier {
    async fn classify(&self, image: &[u8]) -> Result<ImageVerdict> {
        self.calls.write().unwrap().push(image.len());

        match self.script.write().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(ImageVerdict::new(false, "safe")),
        }
    }
}
