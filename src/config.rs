//! Feed endpoint configuration.
//!
//! Configuration resolves in three layers: compiled-in defaults, environment
//! variables, then command-line flags applied by the CLI.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::constants::{
    DEFAULT_ELECTRICITY_FEED_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_WATER_FEED_URL,
    ELECTRICITY_URL_ENV, WATER_URL_ENV,
};
use crate::{Error, Result};

/// Endpoint and transport settings for the two feeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Water feed URL
    pub water_url: String,

    /// Electricity feed URL
    pub electricity_url: String,

    /// Append a timestamp query parameter to every request
    pub cache_bust: bool,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            water_url: DEFAULT_WATER_FEED_URL.to_string(),
            electricity_url: DEFAULT_ELECTRICITY_FEED_URL.to_string(),
            cache_bust: true,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl FeedConfig {
    /// Build the default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(WATER_URL_ENV) {
            if !url.trim().is_empty() {
                debug!("water feed URL overridden from {}", WATER_URL_ENV);
                config.water_url = url;
            }
        }
        if let Ok(url) = std::env::var(ELECTRICITY_URL_ENV) {
            if !url.trim().is_empty() {
                debug!("electricity feed URL overridden from {}", ELECTRICITY_URL_ENV);
                config.electricity_url = url;
            }
        }
        config
    }

    /// Validate endpoint URLs and transport settings
    pub fn validate(&self) -> Result<()> {
        validate_url("water feed", &self.water_url)?;
        validate_url("electricity feed", &self.electricity_url)?;

        if self.request_timeout_secs == 0 {
            return Err(Error::configuration(
                "request timeout must be at least 1 second",
            ));
        }

        Ok(())
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn validate_url(label: &str, url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::configuration(format!("{} URL is empty", label)));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(Error::configuration(format!(
            "{} URL must start with http:// or https://, got: {}",
            label, url
        )));
    }
    Ok(())
}
