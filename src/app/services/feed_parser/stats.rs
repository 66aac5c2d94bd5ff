//! Parsing statistics and skip diagnostics for feed normalization
//!
//! This module provides types for tracking how many rows a feed yielded,
//! how many survived normalization, and why the rest were dropped.

use crate::app::models::Record;

/// One skipped row, kept for observability
///
/// Skips never halt parsing; every dropped row is recorded with enough
/// context to find it in the published sheet.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RowDiagnostic {
    /// 1-based line position in the feed text (the header is row 1)
    pub row_number: usize,

    /// Why the row was dropped
    pub reason: String,

    /// The raw line as published
    pub raw: String,
}

/// Parsing result with normalized records and basic statistics
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Successfully normalized records in source order
    pub records: Vec<Record>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of data rows encountered (header excluded)
    pub rows_seen: usize,

    /// Number of rows successfully normalized into records
    pub records_parsed: usize,

    /// Number of rows skipped with a diagnostic
    pub rows_skipped: usize,

    /// Skip diagnostics in row order
    pub diagnostics: Vec<RowDiagnostic>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            rows_seen: 0,
            records_parsed: 0,
            rows_skipped: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Record a skipped row with its reason and raw text
    pub fn skip(&mut self, row_number: usize, reason: impl Into<String>, raw: impl Into<String>) {
        self.rows_skipped += 1;
        self.diagnostics.push(RowDiagnostic {
            row_number,
            reason: reason.into(),
            raw: raw.into(),
        });
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.rows_seen == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.rows_seen as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
