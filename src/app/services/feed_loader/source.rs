//! Feed transport
//!
//! The loader talks to feeds through the [`FeedFetch`] seam so tests can
//! substitute canned bodies for the HTTP client.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::constants::CACHE_BUST_PARAM;
use crate::{Error, Result};

/// Transport seam for fetching one feed body
pub trait FeedFetch {
    /// Fetch the raw text published at `url`
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// HTTP GET transport with optional cache busting
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
    cache_bust: bool,
}

impl HttpFeedSource {
    /// Build an HTTP source with the given request timeout
    pub fn new(timeout: Duration, cache_bust: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::transport("Failed to build HTTP client", Some(error)))?;

        Ok(Self { client, cache_bust })
    }

    /// Append a millisecond timestamp so republished sheets are never served
    /// from a stale intermediary cache
    fn bust_cache(&self, url: &str) -> String {
        if !self.cache_bust {
            return url.to_string();
        }

        let separator = if url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            url,
            separator,
            CACHE_BUST_PARAM,
            Utc::now().timestamp_millis()
        )
    }
}

impl FeedFetch for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let target = self.bust_cache(url);
        debug!("Fetching feed from {}", target);

        let response = self
            .client
            .get(&target)
            .send()
            .await
            .map_err(|error| {
                Error::transport(format!("Request to {} failed", url), Some(error))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transport(
                format!("{} returned HTTP {}", url, status),
                None,
            ));
        }

        response.text().await.map_err(|error| {
            Error::transport(format!("Reading body from {} failed", url), Some(error))
        })
    }
}
