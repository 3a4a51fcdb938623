//! # Configuration Module
//!
//! Process configuration loaded once at startup. Nothing in the crate reads the
//! environment after [`Config::from_env`] returns; the resulting value is passed
//! explicitly to the pipeline and the bot.

use std::time::Duration;

use crate::errors::ConfigError;

// Environment variable names
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const API_KEY_VAR: &str = "DEEPAI_API_KEY";
pub const AFFILIATE_TAG_VAR: &str = "AFFILIATE_TAG";
pub const API_URL_VAR: &str = "DEEPAI_API_URL";
pub const TIMEOUT_VAR: &str = "RECOGNITION_TIMEOUT_SECS";

// Defaults
pub const DEFAULT_RECOGNITION_URL: &str = "https://api.deepai.org/api/densecap";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials the pipeline needs for every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API key sent to the recognition service
    pub recognition_api_key: String,
    /// Amazon Associates tag appended to search links
    pub affiliate_tag: String,
}

impl Credentials {
    pub fn new(recognition_api_key: impl Into<String>, affiliate_tag: impl Into<String>) -> Self {
        Self {
            recognition_api_key: recognition_api_key.into(),
            affiliate_tag: affiliate_tag.into(),
        }
    }

    /// Check that both credentials are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recognition_api_key.trim().is_empty() {
            return Err(ConfigError::Missing(API_KEY_VAR));
        }
        if self.affiliate_tag.trim().is_empty() {
            return Err(ConfigError::Missing(AFFILIATE_TAG_VAR));
        }
        Ok(())
    }
}

/// Recognition service connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    /// Endpoint receiving the multipart upload
    pub endpoint: String,
    /// Upper bound for the whole request
    pub timeout: Duration,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RECOGNITION_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Complete process configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token, only used by the transport
    pub telegram_token: String,
    pub credentials: Credentials,
    pub recognition: RecognitionConfig,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let telegram_token = required(TELEGRAM_TOKEN_VAR)?;
        let credentials = Credentials::new(required(API_KEY_VAR)?, required(AFFILIATE_TAG_VAR)?);

        let endpoint = lookup(API_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_RECOGNITION_URL.to_string());

        let timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: TIMEOUT_VAR,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            telegram_token,
            credentials,
            recognition: RecognitionConfig {
                endpoint,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
