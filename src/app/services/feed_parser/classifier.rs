//! Feed shape detection and column lookup
//!
//! The two feeds share no fixed column order, so the parser decides what a
//! feed is by which header tokens are present and then addresses cells by
//! header name rather than position.

use std::collections::HashMap;

use crate::app::models::FeedKind;
use crate::constants::headers;

/// Classify a header row by case-insensitive substring presence
///
/// A water feed must mention name, month, and usage; an electricity feed
/// must mention month plus both power tokens. Substring matching keeps
/// cosmetic header edits ("User Name", "Usage (units)") from breaking
/// ingestion. Anything else is unrecognized and yields no records.
pub fn classify(header_row: &[String]) -> Option<FeedKind> {
    let lowered: Vec<String> = header_row
        .iter()
        .map(|header| header.to_lowercase())
        .collect();
    let has_token = |token: &str| lowered.iter().any(|header| header.contains(token));

    if headers::WATER_TOKENS.iter().all(|token| has_token(token)) {
        return Some(FeedKind::Water);
    }
    if headers::ELECTRICITY_TOKENS
        .iter()
        .all(|token| has_token(token))
    {
        return Some(FeedKind::Electricity);
    }
    None
}

/// Exact-name column lookup built from a header row
///
/// Duplicate header names keep the rightmost column.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    name_to_index: HashMap<String, usize>,
    width: usize,
}

impl ColumnMap {
    /// Analyze a header row into a lookup table
    pub fn analyze(header_row: &[String]) -> Self {
        let mut name_to_index = HashMap::new();
        for (index, name) in header_row.iter().enumerate() {
            name_to_index.insert(name.clone(), index);
        }
        Self {
            name_to_index,
            width: header_row.len(),
        }
    }

    /// Number of columns in the header row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Fetch a field from a row by exact header name
    ///
    /// Returns `None` when the column does not exist or the row is too short
    /// to carry it. Present-but-empty cells come back as `Some("")` so
    /// callers can tell absence from emptiness.
    pub fn field<'a>(&self, row: &'a [String], name: &str) -> Option<&'a str> {
        let index = *self.name_to_index.get(name)?;
        row.get(index).map(|cell| cell.as_str())
    }
}
