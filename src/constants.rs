//! Application constants for the meter dashboard
//!
//! This module contains billing constants, month names, feed header tokens,
//! and default endpoint configuration used throughout the application.

// =============================================================================
// Billing
// =============================================================================

/// Fixed tariff applied to every water usage unit
pub const TARIFF_RATE: i64 = 20;

/// Display text for meters with no usable reading
pub const METER_NOT_READ: &str = "Meter not read yet";

// =============================================================================
// Months
// =============================================================================

/// Full English month names, indexed by month number minus one
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Look up the full name for a 1-based month number
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = month.checked_sub(1)? as usize;
    MONTH_NAMES.get(index).copied()
}

// =============================================================================
// Feed Headers
// =============================================================================

/// Column names and classification tokens for the two feed shapes
pub mod headers {
    /// Water feed columns
    pub const NAME: &str = "Name";
    pub const MONTH: &str = "Month";
    pub const USAGE: &str = "Usage";
    pub const READING: &str = "Reading";

    /// Electricity feed columns
    pub const POWER_CONSUMPTION: &str = "Power Consumption";
    pub const ELECTRICITY_READING: &str = "Electricity Reading";
    pub const COST_IMPACT: &str = "Cost Impact";
    pub const POWER_GENERATION_COST: &str = "Power Generation Cost";

    /// Header variant seen in some published revisions of the electricity sheet
    pub const POWER_GENERATION_COST_ALIAS: &str = "PowerGenerationCost";

    /// Lowercase substrings that identify a water header row
    pub const WATER_TOKENS: [&str; 3] = ["name", "month", "usage"];

    /// Lowercase substrings that identify an electricity header row
    pub const ELECTRICITY_TOKENS: [&str; 3] =
        ["month", "power consumption", "electricity reading"];
}

// =============================================================================
// Charts
// =============================================================================

/// Number of trailing months shown in chart windows
pub const CHART_TRAILING_MONTHS: usize = 4;

// =============================================================================
// Feed Endpoints
// =============================================================================

/// Default published water feed (Google Sheets CSV export)
pub const DEFAULT_WATER_FEED_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQfMXH0sHyuEWGkVgbQZZ0cdLvTTXOOBK0Mh3BnlrQu7HZLkjuzpW1x/pub?gid=0&single=true&output=csv";

/// Default published electricity feed (Google Sheets CSV export)
pub const DEFAULT_ELECTRICITY_FEED_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQfMXH0sHyuEWGkVgbQZZ0cdLvTTXOOBK0Mh3BnlrQu7HZLkjuzpW1x/pub?gid=1382103659&single=true&output=csv";

/// Environment variable overriding the water feed URL
pub const WATER_URL_ENV: &str = "WATER_FEED_URL";

/// Environment variable overriding the electricity feed URL
pub const ELECTRICITY_URL_ENV: &str = "ELECTRICITY_FEED_URL";

/// Query parameter appended to defeat intermediary caching
pub const CACHE_BUST_PARAM: &str = "_t";

/// Default feed request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
