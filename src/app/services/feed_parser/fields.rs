//! Numeric field normalization utilities
//!
//! The published feeds carry loosely formatted numbers: comma thousands
//! separators, stray text after the digits, blanks where a meter was not
//! read. Parsers here never fail a row; anything unusable becomes `None`.

use regex::Regex;
use std::sync::LazyLock;

/// Leading float token: optional sign, digits with optional fraction,
/// optional exponent
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("static regex")
});

/// Leading integer token: optional sign and digits
static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("static regex"));

/// Parse a float from the leading numeric prefix of a cell
///
/// Text after the number is ignored, so `"120.5 est"` reads as `120.5`.
/// Blank cells and cells with no leading number yield `None`.
pub fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let token = FLOAT_PREFIX.find(trimmed)?;
    token.as_str().parse::<f64>().ok()
}

/// Parse a monetary or consumption amount
///
/// Comma thousands separators are stripped before the float parse, so
/// `"1,234.50"` reads as `1234.5`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let stripped = raw.replace(',', "");
    parse_float(&stripped)
}

/// Parse a usage cell as a whole number of units
///
/// Negative values mean the meter has not been read and collapse to `None`,
/// the same as blank or non-numeric cells.
pub fn parse_usage(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let token = INT_PREFIX.find(trimmed)?;
    let value = token.as_str().parse::<i64>().ok()?;
    if value < 0 { None } else { Some(value) }
}
