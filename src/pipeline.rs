//! # Pipeline Module
//!
//! Photo to affiliate link, in four linear stages:
//!
//! - **Validating**: credentials must be present before anything touches the network
//! - **Recognizing**: one call to the [`Recognizer`]; the image payload is released afterwards
//! - **Selecting**: an empty caption list ends the run with [`PipelineOutcome::NoMatchFound`]
//! - **LinkBuilt**: the first caption becomes the search keyword
//!
//! Any stage can exit with a [`PipelineError`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::affiliate::{build_affiliate_link, AffiliateLink};
use crate::config::{Config, Credentials};
use crate::errors::{ConfigError, PipelineError, RecognitionError};
use crate::image_payload::ImagePayload;
use crate::recognition::{DeepAiRecognizer, Recognizer};

/// Stage reached by a pipeline run, recorded in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validating,
    Recognizing,
    Selecting,
    LinkBuilt,
}

/// Successful end of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// A caption was recognized and turned into a search link
    LinkBuilt(AffiliateLink),
    /// The service recognized nothing in the image
    NoMatchFound,
}

pub type PipelineResult = Result<PipelineOutcome, PipelineError>;

/// The photo-to-affiliate-link pipeline
///
/// Holds only read-only state, so a single instance is shared across all
/// concurrently handled messages.
pub struct Pipeline {
    credentials: Credentials,
    recognizer: Arc<dyn Recognizer>,
}

impl Pipeline {
    pub fn new(credentials: Credentials, recognizer: Arc<dyn Recognizer>) -> Self {
        Self {
            credentials,
            recognizer,
        }
    }

    /// Build the production pipeline talking to DeepAI
    pub fn from_config(config: &Config) -> Result<Self, RecognitionError> {
        let recognizer = DeepAiRecognizer::new(&config.recognition)?;
        Ok(Self::new(config.credentials.clone(), Arc::new(recognizer)))
    }

    /// Fail early when the credentials cannot serve a request
    pub fn check_configuration(&self) -> Result<(), ConfigError> {
        self.credentials.validate()
    }

    /// Run the pipeline on a downloaded image
    ///
    /// The payload is consumed and its temporary file removed before this
    /// returns, whatever the outcome.
    pub async fn run(&self, payload: ImagePayload) -> PipelineResult {
        debug!(stage = ?PipelineStage::Validating, "Pipeline started");
        self.check_configuration()?;

        debug!(stage = ?PipelineStage::Recognizing, size = payload.len(), "Recognizing image");
        let recognized = match payload.read_bytes().await {
            Ok(bytes) if bytes.is_empty() => Err(RecognitionError::EmptyImage),
            Ok(bytes) => {
                self.recognizer
                    .recognize(&bytes, &self.credentials.recognition_api_key)
                    .await
            }
            Err(e) => Err(RecognitionError::ImageRead(e)),
        };
        payload.release();
        let recognized = recognized?;

        debug!(stage = ?PipelineStage::Selecting, captions = recognized.captions.len(), "Selecting keyword");
        let Some(keyword) = recognized.first_caption() else {
            info!("No recognizable objects found");
            return Ok(PipelineOutcome::NoMatchFound);
        };

        let link = build_affiliate_link(keyword, &self.credentials.affiliate_tag).map_err(|e| {
            warn!(keyword, error = %e, "Failed to build affiliate link");
            e
        })?;

        info!(stage = ?PipelineStage::LinkBuilt, keyword = %link.keyword, "Affiliate link built");
        Ok(PipelineOutcome::LinkBuilt(link))
    }

    /// Convenience entry for callers holding raw bytes
    pub async fn run_bytes(&self, image: &[u8]) -> PipelineResult {
        self.check_configuration()?;
        let payload = ImagePayload::from_bytes(image).map_err(RecognitionError::ImageRead)?;
        self.run(payload).await
    }
}
