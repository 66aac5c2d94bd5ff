//! Core feed parsing orchestration
//!
//! Owns the parse loop: finds the header row, classifies the feed shape,
//! and converts data rows one at a time. A bad row never aborts the feed;
//! it is recorded as a diagnostic and the loop moves on.

use tracing::{debug, warn};

use super::classifier::{self, ColumnMap};
use super::record_parser::{parse_electricity_row, parse_water_row, split_row};
use super::stats::{ParseOutcome, ParseStats};
use crate::app::models::{FeedKind, Record};

/// Parser for raw feed text in the published CSV dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedParser;

impl FeedParser {
    /// Create a new feed parser
    pub fn new() -> Self {
        Self
    }

    /// Parse one feed body into records and diagnostics
    ///
    /// Never fails: empty input yields an empty outcome, an unrecognized
    /// header yields zero records with a single diagnostic, and each bad
    /// data row becomes one diagnostic. Row numbers are 1-based physical
    /// line positions, with the header on row 1.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let mut stats = ParseStats::new();
        let mut records = Vec::new();

        let lines: Vec<&str> = text.lines().collect();
        let Some(header_position) = lines.iter().position(|line| !line.trim().is_empty()) else {
            debug!("feed body is empty");
            return ParseOutcome { records, stats };
        };

        let header_row = split_row(lines[header_position]);
        let Some(kind) = classifier::classify(&header_row) else {
            warn!("feed header matches no known shape: {:?}", header_row);
            stats.skip(
                header_position + 1,
                "Format not recognized",
                lines[header_position],
            );
            return ParseOutcome { records, stats };
        };
        debug!("classified feed as {} ({} columns)", kind, header_row.len());

        let columns = ColumnMap::analyze(&header_row);

        for (offset, line) in lines[header_position + 1..].iter().enumerate() {
            // Blank lines are sheet padding, not data rows
            if line.trim().is_empty() {
                continue;
            }

            let row_number = header_position + 2 + offset;
            let row = split_row(line);
            stats.rows_seen += 1;

            if row.len() < columns.width() {
                stats.skip(
                    row_number,
                    format!("Expected {} fields, found {}", columns.width(), row.len()),
                    *line,
                );
                debug!("skipped row {}: short row", row_number);
                continue;
            }
            if row.iter().all(|field| field.is_empty()) {
                stats.skip(row_number, "All fields empty", *line);
                debug!("skipped row {}: empty row", row_number);
                continue;
            }

            let parsed = match kind {
                FeedKind::Water => parse_water_row(&row, &columns).map(Record::Water),
                FeedKind::Electricity => {
                    parse_electricity_row(&row, &columns).map(Record::Electricity)
                }
            };

            match parsed {
                Ok(record) => {
                    records.push(record);
                    stats.records_parsed += 1;
                }
                Err(error) => {
                    debug!("skipped row {}: {}", row_number, error);
                    stats.skip(row_number, error.to_string(), *line);
                }
            }
        }

        ParseOutcome { records, stats }
    }
}
