//! # Image Payload Module
//!
//! Incoming photos are written to a temporary file for the lifetime of a
//! single pipeline run. The file is owned by [`ImagePayload`] and deleted when
//! the payload is released or dropped, so every exit path of the pipeline
//! (errors, panics, cancelled futures) cleans it up.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, error};

/// A downloaded photo backed by a temporary file
#[derive(Debug)]
pub struct ImagePayload {
    file: NamedTempFile,
    len: usize,
}

impl ImagePayload {
    /// Materialize `bytes` into a fresh temporary file
    pub fn from_bytes(bytes: &[u8]) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("affiliate-bot-")
            .suffix(".img")
            .tempfile()?;
        file.as_file_mut().write_all(bytes)?;
        file.as_file_mut().flush()?;

        debug!(temp_path = %file.path().display(), size = bytes.len(), "Image payload written");

        Ok(Self {
            file,
            len: bytes.len(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the image bytes back from disk
    pub async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.file.path()).await
    }

    /// Delete the temporary file now, logging instead of failing on errors
    pub fn release(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => debug!(temp_path = %path.display(), "Temporary image cleaned up"),
            Err(e) => error!(temp_path = %path.display(), error = %e, "Failed to clean up temporary image"),
        }
    }
}
