//! # Recognition Module
//!
//! Client for the DeepAI DenseCap image captioning service. One multipart POST
//! per image, no retries, bounded by the configured timeout.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::RecognitionConfig;
use crate::errors::RecognitionError;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "api-key";
/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";
/// Longest response body quoted in a status error
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Captions returned by the service, in service order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionResult {
    pub captions: Vec<String>,
}

impl RecognitionResult {
    pub fn new(captions: Vec<String>) -> Self {
        Self { captions }
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// The caption used as the search keyword
    pub fn first_caption(&self) -> Option<&str> {
        self.captions.first().map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct DenseCapResponse {
    #[serde(default)]
    output: Option<DenseCapOutput>,
}

#[derive(Debug, Deserialize)]
struct DenseCapOutput {
    #[serde(default)]
    captions: Option<Vec<DenseCapCaption>>,
}

#[derive(Debug, Deserialize)]
struct DenseCapCaption {
    #[serde(default)]
    caption: Option<String>,
}

/// Extract captions from a DenseCap JSON body
///
/// A missing `output` or `captions` field yields an empty result. Entries with
/// a missing or blank caption are skipped.
pub fn parse_captions(body: &[u8]) -> Result<RecognitionResult, RecognitionError> {
    let response: DenseCapResponse =
        serde_json::from_slice(body).map_err(RecognitionError::MalformedResponse)?;

    let captions = response
        .output
        .and_then(|output| output.captions)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| item.caption)
        .filter(|caption| !caption.trim().is_empty())
        .collect();

    Ok(RecognitionResult::new(captions))
}

/// Anything that turns image bytes into captions
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, image: &[u8], api_key: &str) -> Result<RecognitionResult, RecognitionError>;
}

/// File name and MIME type announced for the uploaded image
pub fn upload_metadata(image: &[u8]) -> (&'static str, &'static str) {
    match image::guess_format(image) {
        Ok(image::ImageFormat::Jpeg) => ("image.jpg", "image/jpeg"),
        Ok(image::ImageFormat::Png) => ("image.png", "image/png"),
        Ok(image::ImageFormat::Gif) => ("image.gif", "image/gif"),
        Ok(image::ImageFormat::WebP) => ("image.webp", "image/webp"),
        Ok(image::ImageFormat::Bmp) => ("image.bmp", "image/bmp"),
        Ok(image::ImageFormat::Tiff) => ("image.tiff", "image/tiff"),
        _ => ("image", "application/octet-stream"),
    }
}

/// HTTP client for the DenseCap endpoint
#[derive(Debug, Clone)]
pub struct DeepAiRecognizer {
    client: reqwest::Client,
    endpoint: String,
}

impl DeepAiRecognizer {
    pub fn new(config: &RecognitionConfig) -> Result<Self, RecognitionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RecognitionError::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl Recognizer for DeepAiRecognizer {
    async fn recognize(&self, image: &[u8], api_key: &str) -> Result<RecognitionResult, RecognitionError> {
        if image.is_empty() {
            return Err(RecognitionError::EmptyImage);
        }

        let (file_name, mime_type) = upload_metadata(image);
        let part = Part::bytes(image.to_vec())
            .file_name(file_name)
            .mime_str(mime_type)
            .map_err(RecognitionError::Client)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        debug!(endpoint = %self.endpoint, size = image.len(), mime_type, "Sending image to recognition service");

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .multipart(form)
            .send()
            .await
            .map_err(RecognitionError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            warn!(status = status.as_u16(), "Recognition service rejected the request");
            return Err(RecognitionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(RecognitionError::from_request)?;
        let result = parse_captions(&body)?;

        info!(captions = result.captions.len(), "Recognition completed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_captions_preserves_order() {
        let body = br#"{"output":{"captions":[{"caption":"red sneaker"},{"caption":"shoe"}]}}"#;
        let result = parse_captions(body).unwrap();
        assert_eq!(result.captions, vec!["red sneaker", "shoe"]);
        assert_eq!(result.first_caption(), Some("red sneaker"));
    }

    #[test]
    fn test_parse_captions_ignores_extra_fields() {
        let body = br#"{"id":"abc","output":{"captions":[{"caption":"a lamp","bounding_box":[1,2,3,4],"confidence":0.9}]}}"#;
        let result = parse_captions(body).unwrap();
        assert_eq!(result.captions, vec!["a lamp"]);
    }

    #[test]
    fn test_parse_captions_empty_or_absent() {
        for body in [
            &br#"{"output":{"captions":[]}}"#[..],
            br#"{"output":{}}"#,
            br#"{"output":{"captions":null}}"#,
            br#"{"output":null}"#,
            br#"{}"#,
        ] {
            let result = parse_captions(body).unwrap();
            assert!(result.is_empty());
            assert_eq!(result.first_caption(), None);
        }
    }

    #[test]
    fn test_parse_captions_skips_blank_entries() {
        let body = br#"{"output":{"captions":[{"caption":""},{"bounding_box":[0,0,1,1]},{"caption":"mug"}]}}"#;
        let result = parse_captions(body).unwrap();
        assert_eq!(result.captions, vec!["mug"]);
    }

    #[test]
    fn test_parse_captions_malformed() {
        for body in [&b"not json"[..], b"[1,2,3]", br#"{"output":{"captions":"oops"}}"#] {
            assert!(matches!(
                parse_captions(body),
                Err(RecognitionError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_upload_metadata_detects_format() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        assert_eq!(upload_metadata(png), ("image.png", "image/png"));

        let jpeg = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0";
        assert_eq!(upload_metadata(jpeg), ("image.jpg", "image/jpeg"));

        assert_eq!(
            upload_metadata(b"plain text"),
            ("image", "application/octet-stream")
        );
    }
}
