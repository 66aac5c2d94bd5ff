//! CSV feed parser for the published utility sheets
//!
//! This module normalizes the two loosely formatted feeds (household water
//! meter readings and monthly electricity figures) into typed records. The
//! design never fails a whole feed for one bad row: malformed cells become
//! nulls and malformed rows become skip diagnostics.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Core parsing orchestration and the row loop
//! - [`classifier`] - Header-shape detection and column lookup
//! - [`record_parser`] - Individual row to record conversion
//! - [`fields`] - Never-fail numeric cell parsers
//! - [`stats`] - Parsing statistics and skip diagnostics
//!
//! ## Usage
//!
//! ```rust
//! use meter_dashboard::app::services::feed_parser::FeedParser;
//!
//! let parser = FeedParser::new();
//! let outcome = parser.parse("Name,Month,Usage,Reading\nJane,03-2024,15,120.5");
//!
//! println!(
//!     "Parsed {} records from {} rows",
//!     outcome.stats.records_parsed, outcome.stats.rows_seen
//! );
//! ```

pub mod classifier;
pub mod fields;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use classifier::ColumnMap;
pub use parser::FeedParser;
pub use stats::{ParseOutcome, ParseStats, RowDiagnostic};
