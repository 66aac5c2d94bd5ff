//! Meter dashboard - utility feed normalization and derived metrics
//!
//! Ingests two published CSV feeds (per-household water meter readings and
//! monthly electricity figures), normalizes their loosely formatted text into
//! typed records, and derives the numbers the dashboard shows: fixed-tariff
//! bills, month-over-month trends, per-month and per-user aggregates, and
//! filtered table views.
//!
//! Key features:
//! - Header-shape classification that decides how each feed is parsed
//! - Never-fail normalization: malformed cells become nulls, malformed rows
//!   become skip diagnostics
//! - Concurrent feed fetching where one failing feed never blocks the other
//! - Immutable snapshots that are swapped in wholesale on every reload
//! - Human, JSON, and CSV report output

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod feed_loader;
        pub mod feed_parser;
        pub mod filter;
        pub mod metrics;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ElectricityRecord, FeedKind, MonthKey, Record, WaterRecord};
pub use app::services::feed_loader::Snapshot;
pub use config::FeedConfig;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the meter dashboard
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Record or filter validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Feed fetch failed
    #[error("Feed transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Report rendering error
    #[error("Report error: {message}")]
    Report {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Run interrupted by the user
    #[error("Interrupted: {message}")]
    Interrupted { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a feed transport error
    pub fn transport(message: impl Into<String>, source: Option<reqwest::Error>) -> Self {
        Self::Transport {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a report rendering error
    pub fn report(message: impl Into<String>, source: Option<serde_json::Error>) -> Self {
        Self::Report {
            message: message.into(),
            source,
        }
    }

    /// Create an interruption error
    pub fn interrupted(message: impl Into<String>) -> Self {
        Self::Interrupted {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport {
            message: "feed request failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Report {
            message: "JSON serialization failed".to_string(),
            source: Some(error),
        }
    }
}
