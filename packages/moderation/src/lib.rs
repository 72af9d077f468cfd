//! Content moderation and duplicate detection for marketplace listings.
//!
//! Gates publication with three sequential checks — hosted text
//! moderation, in-process near-duplicate title detection, and hosted
//! per-image safety classification — plus an independent, advisory-only
//! AI suggestion engine for listing metadata.
//!
//! # Design Philosophy
//!
//! **Availability over strictness.** Only a successful, positive
//! detection of unsafe or duplicate content blocks a listing; a failed
//! or unreachable classifier is logged and treated as inconclusive. A
//! missing credential disables the pipeline entirely: everything
//! approves with zero network calls. The suggestion engine goes one step
//! further and never fails visibly at all.
//!
//! # Usage
//!
//! ```rust,ignore
//! use moderation::{
//!     Credentials, ModerationConfig, ModerationPipeline, ModerationRequest,
//! };
//!
//! let config = ModerationConfig::new().with_credentials(Credentials::new(api_key));
//! let pipeline = ModerationPipeline::openai(config);
//!
//! let request = ModerationRequest::new(title, description)
//!     .with_images(images)
//!     .with_existing_titles(existing_titles);
//!
//! let result = pipeline.evaluate(&request).await;
//! if result.is_approved() {
//!     // persist the listing
//! }
//! ```
//!
//! # Modules
//!
//! - [`pipeline`] - The three-check moderation pipeline
//! - [`classifier`] - Classifier trait seams and verdict types
//! - [`text`] / [`image`] - Hosted classifier implementations
//! - [`duplicates`] - Pure near-duplicate title detection
//! - [`suggest`] - Advisory content suggestions
//! - [`config`] / [`credentials`] - Injected configuration
//! - [`testing`] - Scripted mock classifiers

pub mod classifier;
pub mod config;
pub mod credentials;
pub mod duplicates;
pub mod image;
pub mod pipeline;
pub mod suggest;
pub mod testing;
pub mod text;

// Re-export core types at crate root
pub use classifier::{ImageClassifier, ImageVerdict, TextClassifier, TextVerdict};
pub use config::{ModerationConfig, SuggestionConfig};
pub use credentials::{Credentials, SecretString};
pub use duplicates::{check_duplicates, similarity_ratio, DuplicateCheck};
pub use image::OpenAiImageClassifier;
pub use pipeline::{ModerationPipeline, ModerationRequest, ModerationResult, Outcome};
pub use suggest::{SuggestionEngine, SuggestionRequest, Suggestions};
pub use text::OpenAiTextClassifier;

// The classifier error taxonomy comes from the client crate.
pub use openai_client::ClientError;
