//! Test utilities and mock transport for loader testing

use std::collections::HashMap;

use crate::app::services::feed_loader::source::FeedFetch;
use crate::config::FeedConfig;
use crate::{Error, Result};


pub const WATER_URL: &str = "https://feeds.test/water.csv";
pub const ELECTRICITY_URL: &str = "https://feeds.test/electricity.csv";

/// Mock transport serving canned bodies by URL
#[derive(Debug, Default)]
pub struct MockFeedSource {
    responses: HashMap<String, std::result::Result<String, String>>,
}

impl MockFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`
    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    /// Fail `url` with `reason`
    pub fn with_failure(mut self, url: &str, reason: &str) -> Self {
        self.responses
            .insert(url.to_string(), Err(reason.to_string()));
        self
    }
}

impl FeedFetch for MockFeedSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(reason)) => Err(Error::transport(reason.clone(), None)),
            None => Err(Error::transport(
                format!("No canned response for {}", url),
                None,
            )),
        }
    }
}

/// Config pointing at the canned feed URLs
pub fn create_test_config() -> FeedConfig {
    FeedConfig {
        water_url: WATER_URL.to_string(),
        electricity_url: ELECTRICITY_URL.to_string(),
        cache_bust: false,
        request_timeout_secs: 5,
    }
}
