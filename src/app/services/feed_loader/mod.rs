//! Feed loading and snapshot assembly
//!
//! This module owns everything between the published feed URLs and an
//! immutable [`Snapshot`]: the transport seam, concurrent fetching, parsing,
//! and per-feed failure isolation.
//!
//! ## Architecture
//!
//! - [`source`] - The [`FeedFetch`] transport trait and its HTTP implementation
//! - [`loader`] - Concurrent fetch-and-parse into a snapshot
//! - [`snapshot`] - The immutable dataset with per-feed load status
//!
//! ## Usage
//!
//! ```no_run
//! use meter_dashboard::app::services::feed_loader::{HttpFeedSource, SnapshotLoader};
//! use meter_dashboard::config::FeedConfig;
//!
//! # async fn example() -> meter_dashboard::Result<()> {
//! let config = FeedConfig::default();
//! let source = HttpFeedSource::new(config.request_timeout(), config.cache_bust)?;
//! let mut loader = SnapshotLoader::new(config, source);
//!
//! let snapshot = loader.load().await;
//! println!("{} records loaded", snapshot.records.len());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod snapshot;
pub mod source;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use loader::SnapshotLoader;
pub use snapshot::{FeedStatus, Snapshot};
pub use source::{FeedFetch, HttpFeedSource};
