//! Data models for the meter dashboard
//!
//! This module contains the core data structures for normalized feed records:
//! the canonical month key, the water and electricity record types, and the
//! derived trend and payment descriptors shared by every consumer.

use crate::constants;
use crate::{Error, Result};
use chrono::Datelike;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// =============================================================================
// Month Key
// =============================================================================

/// Canonical `MM-YYYY` month token in its exact published form
static CANONICAL_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})-(\d{4})$").expect("static regex"));

/// Permissive month extraction: a 1-2 digit month and a 4 digit year joined
/// by a slash or dash, anywhere in the cell
static EMBEDDED_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})[/-](\d{4})").expect("static regex"));

/// Canonical month identifier (`MM-YYYY`)
///
/// Construction goes through [`MonthKey::normalize`], so every value carries
/// a month in 1..=12 and a non-zero year. The derived ordering is
/// chronological, and [`MonthKey::ordinal`] gives the same total order as an
/// integer for adjacency arithmetic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct MonthKey {
    year: u32,
    month: u32,
}

impl MonthKey {
    /// Normalize a raw month cell into a canonical key
    ///
    /// Accepts the canonical `MM-YYYY` form directly, otherwise extracts the
    /// first embedded `M/YYYY` or `M-YYYY` token. Single-digit months are
    /// zero-padded; months outside 1..=12 are rejected.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let captures = CANONICAL_MONTH
            .captures(trimmed)
            .or_else(|| EMBEDDED_MONTH.captures(trimmed))?;
        let month = captures[1].parse::<u32>().ok()?;
        let year = captures[2].parse::<u32>().ok()?;
        Self::from_parts(month, year)
    }

    /// Build a key from numeric parts, rejecting out-of-range months
    pub fn from_parts(month: u32, year: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || year == 0 {
            return None;
        }
        Some(Self { year, month })
    }

    /// Key for the current calendar month (UTC)
    pub fn current() -> Self {
        let now = chrono::Utc::now();
        Self {
            year: now.year() as u32,
            month: now.month(),
        }
    }

    /// 1-based month number
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Four-digit year
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Position in the total month order (`year * 12 + month`, never zero)
    pub fn ordinal(&self) -> u32 {
        self.year * 12 + self.month
    }

    /// Ordinal for a raw month token without constructing a key
    ///
    /// Returns the zero sentinel for tokens that do not split into exactly
    /// two dash-separated numeric parts with an in-range month, so
    /// unparseable tokens sort before every real month.
    pub fn ordinal_of(raw: &str) -> u32 {
        let parts: Vec<&str> = raw.trim().split('-').collect();
        if parts.len() != 2 {
            return 0;
        }
        let month = parts[0].trim().parse::<u32>().unwrap_or(0);
        let year = parts[1].trim().parse::<u32>().unwrap_or(0);
        if !(1..=12).contains(&month) || year == 0 {
            return 0;
        }
        year * 12 + month
    }

    /// Human label, e.g. `March 2024`
    pub fn label(&self) -> String {
        format!(
            "{} {}",
            constants::MONTH_NAMES[(self.month - 1) as usize],
            self.year
        )
    }

    /// Human label for a raw month token
    ///
    /// Falls back to the raw text unchanged when the token does not split
    /// into exactly two dash parts or names an out-of-range month. The year
    /// part is carried through verbatim.
    pub fn label_of(raw: &str) -> String {
        let parts: Vec<&str> = raw.split('-').collect();
        if parts.len() != 2 {
            return raw.to_string();
        }
        let Ok(month) = parts[0].trim().parse::<u32>() else {
            return raw.to_string();
        };
        match constants::month_name(month) {
            Some(name) => format!("{} {}", name, parts[1]),
            None => raw.to_string(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{}", self.month, self.year)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        Self::normalize(raw).ok_or_else(|| {
            Error::data_validation(format!(
                "Invalid month '{}': expected MM-YYYY with month 01-12",
                raw
            ))
        })
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self> {
        raw.parse()
    }
}

// =============================================================================
// Feed Records
// =============================================================================

/// Which feed a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Water,
    Electricity,
}

impl FeedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Water => "water",
            FeedKind::Electricity => "electricity",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One normalized water meter row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterRecord {
    /// Household name exactly as published
    pub name: String,

    /// Canonical billing month
    pub month: MonthKey,

    /// Units consumed; `None` when the meter has not been read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<i64>,

    /// Raw meter reading, kept for audit display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<f64>,
}

impl WaterRecord {
    /// Create a new water record with validation
    pub fn new(
        name: String,
        month: MonthKey,
        usage: Option<i64>,
        reading: Option<f64>,
    ) -> Result<Self> {
        let record = Self {
            name,
            month,
            usage,
            reading,
        };

        record.validate()?;
        Ok(record)
    }

    /// Validate record fields for consistency
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::data_validation(
                "Water record name cannot be empty".to_string(),
            ));
        }

        if let Some(usage) = self.usage {
            if usage < 0 {
                return Err(Error::data_validation(format!(
                    "Water usage cannot be negative, got {}",
                    usage
                )));
            }
        }

        Ok(())
    }

    /// Whether this record carries a billable usage value
    ///
    /// Zero usage means the meter exists but has not been read, the same as
    /// a missing value.
    pub fn has_usage(&self) -> bool {
        matches!(self.usage, Some(usage) if usage != 0)
    }

    /// Payment standing derived from the usage value
    pub fn payment_status(&self) -> PaymentStatus {
        if self.has_usage() {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        }
    }
}

/// One normalized electricity row
///
/// Every figure may be absent: a blank or unparseable cell becomes `None`
/// rather than failing the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricityRecord {
    /// Canonical month
    pub month: MonthKey,

    /// Power consumed over the month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_consumption: Option<f64>,

    /// Meter reading at month end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electricity_reading: Option<f64>,

    /// Cost attributed to the month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_impact: Option<f64>,

    /// Generation-side cost for the month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_generation_cost: Option<f64>,
}

/// A normalized record from either feed
///
/// Tagged by feed kind so consumers match on the variant instead of probing
/// for fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Water(WaterRecord),
    Electricity(ElectricityRecord),
}

impl Record {
    /// Which feed this record came from
    pub fn kind(&self) -> FeedKind {
        match self {
            Record::Water(_) => FeedKind::Water,
            Record::Electricity(_) => FeedKind::Electricity,
        }
    }

    /// Canonical month of the record
    pub fn month(&self) -> MonthKey {
        match self {
            Record::Water(water) => water.month,
            Record::Electricity(electricity) => electricity.month,
        }
    }

    /// Water payload, if this is a water record
    pub fn as_water(&self) -> Option<&WaterRecord> {
        match self {
            Record::Water(water) => Some(water),
            Record::Electricity(_) => None,
        }
    }

    /// Electricity payload, if this is an electricity record
    pub fn as_electricity(&self) -> Option<&ElectricityRecord> {
        match self {
            Record::Water(_) => None,
            Record::Electricity(electricity) => Some(electricity),
        }
    }
}

// =============================================================================
// Trend Descriptors
// =============================================================================

/// Direction of a month-over-month comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

/// How the presentation layer should style a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStyle {
    Warning,
    Positive,
    Neutral,
}

/// Month-over-month movement of a value
///
/// Rising consumption styles as a warning and falling consumption as
/// positive. The magnitude is always an absolute percentage of the previous
/// month, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendDescriptor {
    pub direction: TrendDirection,

    /// Absolute percentage change against the previous month
    pub magnitude_percent: f64,

    /// Arrow glyph for table cells
    pub symbol: &'static str,

    /// Styling hint for the presentation layer
    pub style_hint: TrendStyle,
}

impl TrendDescriptor {
    /// No movement, or no usable baseline to compare against
    pub fn neutral() -> Self {
        Self {
            direction: TrendDirection::Neutral,
            magnitude_percent: 0.0,
            symbol: "→",
            style_hint: TrendStyle::Neutral,
        }
    }

    /// Value rose by `magnitude_percent`
    pub fn up(magnitude_percent: f64) -> Self {
        Self {
            direction: TrendDirection::Up,
            magnitude_percent,
            symbol: "↑",
            style_hint: TrendStyle::Warning,
        }
    }

    /// Value fell by `magnitude_percent`
    pub fn down(magnitude_percent: f64) -> Self {
        Self {
            direction: TrendDirection::Down,
            magnitude_percent,
            symbol: "↓",
            style_hint: TrendStyle::Positive,
        }
    }

    /// Table cell text: the arrow alone for neutral, arrow plus magnitude
    /// for moving values
    pub fn display(&self) -> String {
        match self.direction {
            TrendDirection::Neutral => self.symbol.to_string(),
            _ => format!("{} {:.1}%", self.symbol, self.magnitude_percent),
        }
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Payment standing of a water record, derived from its usage value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_water_record() -> WaterRecord {
        WaterRecord::new(
            "Jane".to_string(),
            MonthKey::normalize("03-2024").unwrap(),
            Some(15),
            Some(120.5),
        )
        .unwrap()
    }

    fn create_test_electricity_record() -> ElectricityRecord {
        ElectricityRecord {
            month: MonthKey::normalize("03-2024").unwrap(),
            power_consumption: Some(29000.0),
            electricity_reading: Some(1450.5),
            cost_impact: Some(3200.0),
            power_generation_cost: None,
        }
    }

    mod month_key_tests {
        use super::*;

        #[test]
        fn test_normalize_canonical_form() {
            let key = MonthKey::normalize("03-2024").unwrap();
            assert_eq!(key.month(), 3);
            assert_eq!(key.year(), 2024);
        }

        #[test]
        fn test_normalize_pads_single_digit_month() {
            let key = MonthKey::normalize("3-2024").unwrap();
            assert_eq!(key.to_string(), "03-2024");
        }

        #[test]
        fn test_normalize_accepts_slash_form() {
            let key = MonthKey::normalize("03/2024").unwrap();
            assert_eq!(key.to_string(), "03-2024");
        }

        #[test]
        fn test_normalize_extracts_embedded_token() {
            let key = MonthKey::normalize("usage for 3/2024 (estimated)").unwrap();
            assert_eq!(key.to_string(), "03-2024");
        }

        #[test]
        fn test_normalize_rejects_out_of_range_month() {
            assert_eq!(MonthKey::normalize("13-2024"), None);
            assert_eq!(MonthKey::normalize("0-2024"), None);
        }

        #[test]
        fn test_normalize_rejects_unusable_tokens() {
            assert_eq!(MonthKey::normalize("March"), None);
            assert_eq!(MonthKey::normalize(""), None);
            assert_eq!(MonthKey::normalize("2024"), None);
        }

        #[test]
        fn test_normalize_is_idempotent() {
            let key = MonthKey::normalize("3/2024").unwrap();
            let again = MonthKey::normalize(&key.to_string()).unwrap();
            assert_eq!(key, again);
        }

        #[test]
        fn test_ordinal_increments_across_year_boundary() {
            let december = MonthKey::normalize("12-2023").unwrap();
            let january = MonthKey::normalize("01-2024").unwrap();
            assert_eq!(december.ordinal() + 1, january.ordinal());
        }

        #[test]
        fn test_ordering_is_chronological() {
            let early = MonthKey::normalize("11-2023").unwrap();
            let late = MonthKey::normalize("02-2024").unwrap();
            assert!(early < late);
        }

        #[test]
        fn test_ordinal_of_matches_constructed_key() {
            let key = MonthKey::normalize("3-2024").unwrap();
            assert_eq!(MonthKey::ordinal_of("3-2024"), key.ordinal());
        }

        #[test]
        fn test_ordinal_of_returns_zero_sentinel() {
            assert_eq!(MonthKey::ordinal_of("garbage"), 0);
            assert_eq!(MonthKey::ordinal_of("13-2024"), 0);
            assert_eq!(MonthKey::ordinal_of("03/2024"), 0);
            assert_eq!(MonthKey::ordinal_of("03-2024-01"), 0);
        }

        #[test]
        fn test_label() {
            let key = MonthKey::normalize("03-2024").unwrap();
            assert_eq!(key.label(), "March 2024");
        }

        #[test]
        fn test_label_of_formats_valid_key() {
            assert_eq!(MonthKey::label_of("03-2024"), "March 2024");
        }

        #[test]
        fn test_label_of_falls_back_to_raw_text() {
            assert_eq!(MonthKey::label_of("March"), "March");
            assert_eq!(MonthKey::label_of("14-2024"), "14-2024");
            assert_eq!(MonthKey::label_of("a-b-c"), "a-b-c");
        }

        #[test]
        fn test_display_zero_pads() {
            let key = MonthKey::from_parts(7, 2025).unwrap();
            assert_eq!(key.to_string(), "07-2025");
        }

        #[test]
        fn test_from_str_rejects_invalid() {
            assert!("March".parse::<MonthKey>().is_err());
            assert!("07-2025".parse::<MonthKey>().is_ok());
        }

        #[test]
        fn test_serde_round_trip() {
            let key = MonthKey::normalize("03-2024").unwrap();
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, "\"03-2024\"");
            let back: MonthKey = serde_json::from_str(&json).unwrap();
            assert_eq!(back, key);
        }
    }

    mod water_record_tests {
        use super::*;

        #[test]
        fn test_create_valid_record() {
            let record = create_test_water_record();
            assert_eq!(record.name, "Jane");
            assert_eq!(record.usage, Some(15));
        }

        #[test]
        fn test_rejects_empty_name() {
            let result = WaterRecord::new(
                "   ".to_string(),
                MonthKey::normalize("03-2024").unwrap(),
                Some(15),
                None,
            );
            assert!(result.is_err());
        }

        #[test]
        fn test_rejects_negative_usage() {
            let result = WaterRecord::new(
                "Jane".to_string(),
                MonthKey::normalize("03-2024").unwrap(),
                Some(-5),
                None,
            );
            assert!(result.is_err());
        }

        #[test]
        fn test_payment_status_from_usage() {
            let mut record = create_test_water_record();
            assert_eq!(record.payment_status(), PaymentStatus::Paid);

            record.usage = None;
            assert_eq!(record.payment_status(), PaymentStatus::Pending);

            record.usage = Some(0);
            assert_eq!(record.payment_status(), PaymentStatus::Pending);
        }

        #[test]
        fn test_has_usage_treats_zero_as_unread() {
            let mut record = create_test_water_record();
            assert!(record.has_usage());

            record.usage = Some(0);
            assert!(!record.has_usage());
        }
    }

    mod record_tests {
        use super::*;

        #[test]
        fn test_kind_and_month() {
            let water = Record::Water(create_test_water_record());
            assert_eq!(water.kind(), FeedKind::Water);
            assert_eq!(water.month().to_string(), "03-2024");

            let electricity = Record::Electricity(create_test_electricity_record());
            assert_eq!(electricity.kind(), FeedKind::Electricity);
        }

        #[test]
        fn test_payload_accessors() {
            let water = Record::Water(create_test_water_record());
            assert!(water.as_water().is_some());
            assert!(water.as_electricity().is_none());
        }

        #[test]
        fn test_serde_tags_by_kind() {
            let water = Record::Water(create_test_water_record());
            let json = serde_json::to_string(&water).unwrap();
            assert!(json.contains("\"kind\":\"water\""));

            let back: Record = serde_json::from_str(&json).unwrap();
            assert_eq!(back, water);
        }
    }

    mod trend_tests {
        use super::*;

        #[test]
        fn test_constructors() {
            let up = TrendDescriptor::up(12.5);
            assert_eq!(up.direction, TrendDirection::Up);
            assert_eq!(up.symbol, "↑");
            assert_eq!(up.style_hint, TrendStyle::Warning);

            let down = TrendDescriptor::down(8.0);
            assert_eq!(down.symbol, "↓");
            assert_eq!(down.style_hint, TrendStyle::Positive);

            let neutral = TrendDescriptor::neutral();
            assert_eq!(neutral.magnitude_percent, 0.0);
            assert_eq!(neutral.symbol, "→");
        }

        #[test]
        fn test_display_includes_magnitude_when_moving() {
            assert_eq!(TrendDescriptor::up(12.5).display(), "↑ 12.5%");
            assert_eq!(TrendDescriptor::neutral().display(), "→");
        }
    }
}
