//! # Error Types Module
//!
//! Typed errors for each stage of the photo-to-link pipeline. The pipeline keeps
//! configuration problems, recognition failures and link construction failures
//! apart so the bot layer can choose a different reply for each.

use thiserror::Error;

/// Missing or invalid process configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value is absent or blank
    #[error("missing required configuration value: {0}")]
    Missing(&'static str),
    /// A value is present but cannot be used
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Failure of the single call to the recognition service
///
/// Every variant means the same thing to callers (the image could not be
/// analyzed); the variant only records the underlying cause for diagnostics.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The image payload had no bytes to upload
    #[error("image payload is empty")]
    EmptyImage,
    /// The temporary image file could not be read back
    #[error("failed to read image payload: {0}")]
    ImageRead(#[source] std::io::Error),
    /// The HTTP client could not be built or the request could not be assembled
    #[error("failed to prepare recognition request: {0}")]
    Client(#[source] reqwest::Error),
    /// The service did not answer within the configured timeout
    #[error("recognition request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    /// Connection, TLS or body transfer failure
    #[error("recognition request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The service answered with a non-2xx status
    #[error("recognition service returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The body was not the expected JSON document
    #[error("malformed recognition response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl RecognitionError {
    /// Classify a reqwest error raised while sending or reading the response
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RecognitionError::Timeout(err)
        } else if err.is_builder() {
            RecognitionError::Client(err)
        } else {
            RecognitionError::Transport(err)
        }
    }
}

/// Rejected input when building an affiliate search link
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("search keyword is empty")]
    EmptyKeyword,
    #[error("affiliate tag is empty")]
    EmptyTag,
    #[error("invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Failure exit of the photo-to-link pipeline
///
/// "Nothing recognized" is deliberately absent here; it is a successful
/// [`crate::pipeline::PipelineOutcome::NoMatchFound`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline is not configured: {0}")]
    Configuration(#[from] ConfigError),
    #[error("image recognition failed: {0}")]
    Recognition(#[from] RecognitionError),
    #[error("could not build affiliate link: {0}")]
    Link(#[from] LinkError),
}
