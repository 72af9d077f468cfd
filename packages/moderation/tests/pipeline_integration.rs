//! Integration tests for the moderation pipeline.
//!
//! These exercise the full evaluate() flow against scripted classifiers:
//! disabled short-circuit, fail-open on classifier errors, duplicate
//! rejection, and per-image short-circuit.

use moderation::testing::{MockImageClassifier, MockTextClassifier};
use moderation::{
    ClientError, Credentials, ModerationConfig, ModerationPipeline, ModerationRequest, Outcome,
};

fn enabled_config() -> ModerationConfig {
    ModerationConfig::new().with_credentials(Credentials::new("sk-test"))
}

/// Helper wiring a pipeline around scripted classifiers.
fn pipeline(
    config: ModerationConfig,
    text: MockTextClassifier,
    image: MockImageClassifier,
) -> ModerationPipeline<MockTextClassifier, MockImageClassifier> {
    ModerationPipeline::with_classifiers(config, text, image)
}

#[tokio::test]
async fn test_disabled_config_approves_with_zero_calls() {
    let text = MockTextClassifier::new().with_verdict(true, 1.0);
    let image = MockImageClassifier::new().with_verdict(true, "unsafe");
    let pipeline = pipeline(ModerationConfig::new(), text.clone(), image.clone());

    let request = ModerationRequest::new("Anything At All", "any description")
        .with_images(vec![vec![0u8; 8]])
        .with_existing_titles(["Anything At All"]);

    let result = pipeline.evaluate(&request).await;

    assert_eq!(result.outcome, Outcome::Approved);
    assert_eq!(result.message, None);
    assert_eq!(text.call_count(), 0);
    assert_eq!(image.call_count(), 0);
}

#[tokio::test]
async fn test_flagged_text_rejects_before_other_checks() {
    let text = MockTextClassifier::new().with_verdict(true, 0.95);
    let image = MockImageClassifier::new();
    let pipeline = pipeline(enabled_config(), text.clone(), image.clone());

    let request = ModerationRequest::new("Sunset", "description")
        .with_images(vec![vec![0u8; 8]]);

    let result = pipeline.evaluate(&request).await;

    assert_eq!(result.outcome, Outcome::RejectedText);
    assert!(result.message.unwrap().contains("text moderation"));
    assert_eq!(image.call_count(), 0, "images must not be checked after a text reject");
}

#[tokio::test]
async fn test_text_check_receives_title_and_description() {
    let text = MockTextClassifier::new();
    let pipeline = pipeline(enabled_config(), text.clone(), MockImageClassifier::new());

    pipeline
        .evaluate(&ModerationRequest::new("Sunset", "oil on canvas"))
        .await;

    assert_eq!(text.calls(), vec!["Sunset\n\noil on canvas"]);
}

#[tokio::test]
async fn test_text_transport_error_fails_open() {
    let text = MockTextClassifier::new()
        .with_error(ClientError::Transport("connection timed out".into()));
    let image = MockImageClassifier::new();
    let pipeline = pipeline(enabled_config(), text.clone(), image.clone());

    let request = ModerationRequest::new("Quiet Harbor", "watercolor")
        .with_images(vec![vec![0u8; 8]])
        .with_existing_titles(["Completely Different"]);

    let result = pipeline.evaluate(&request).await;

    // The failed text check is inconclusive; later checks still ran.
    assert_eq!(result.outcome, Outcome::Approved);
    assert_eq!(text.call_count(), 1);
    assert_eq!(image.call_count(), 1);
}

#[tokio::test]
async fn test_http_status_error_fails_open_too() {
    let text = MockTextClassifier::new().with_error(ClientError::Status {
        status: 429,
        message: "rate limited".into(),
    });
    let pipeline = pipeline(enabled_config(), text, MockImageClassifier::new());

    let result = pipeline
        .evaluate(&ModerationRequest::new("Quiet Harbor", "watercolor"))
        .await;

    assert_eq!(result.outcome, Outcome::Approved);
}

#[tokio::test]
async fn test_duplicate_title_rejected_end_to_end() {
    let text = MockTextClassifier::new().with_verdict(false, 0.01);
    let pipeline = pipeline(enabled_config(), text, MockImageClassifier::new());

    let request = ModerationRequest::new("Summer Field", "oil on canvas")
        .with_existing_titles(["Summer Field"]);

    let result = pipeline.evaluate(&request).await;

    assert_eq!(result.outcome, Outcome::RejectedDuplicate);
    let message = result.message.unwrap();
    assert!(
        message.contains("Duplicate") || message.contains("similar"),
        "message should mention a duplicate/similar title: {message}"
    );
}

#[tokio::test]
async fn test_first_flagged_image_short_circuits() {
    let image = MockImageClassifier::new()
        .with_verdict(true, "unsafe: nudity")
        .with_verdict(false, "safe");
    let pipeline = pipeline(enabled_config(), MockTextClassifier::new(), image.clone());

    let request = ModerationRequest::new("Sunset", "description")
        .with_images(vec![vec![1u8; 10], vec![2u8; 20]]);

    let result = pipeline.evaluate(&request).await;

    assert_eq!(result.outcome, Outcome::RejectedImage);
    assert_eq!(image.calls(), vec![10], "second image must never be classified");
}

#[tokio::test]
async fn test_failed_image_check_continues_to_next_image() {
    let image = MockImageClassifier::new()
        .with_error(ClientError::Parse("truncated body".into()))
        .with_verdict(true, "unsafe: violence");
    let pipeline = pipeline(enabled_config(), MockTextClassifier::new(), image.clone());

    let request = ModerationRequest::new("Sunset", "description")
        .with_images(vec![vec![1u8; 10], vec![2u8; 20]]);

    let result = pipeline.evaluate(&request).await;

    assert_eq!(result.outcome, Outcome::RejectedImage);
    assert_eq!(image.calls(), vec![10, 20]);
}

#[tokio::test]
async fn test_clean_listing_approved() {
    let text = MockTextClassifier::new();
    let image = MockImageClassifier::new();
    let pipeline = pipeline(enabled_config(), text, image.clone());

    let request = ModerationRequest::new("Quiet Harbor", "watercolor on paper")
        .with_images(vec![vec![1u8; 10], vec![2u8; 20]])
        .with_existing_titles(["Bronze Horse", "Clay Vase"]);

    let result = pipeline.evaluate(&request).await;

    assert_eq!(result.outcome, Outcome::Approved);
    assert!(result.is_approved());
    assert_eq!(result.message, None);
    assert_eq!(image.call_count(), 2);
}
