//! Row-to-record conversion for both feed shapes
//!
//! Rows are addressed through the [`ColumnMap`] so column order never
//! matters. Required fields reject the row with a reason; optional numeric
//! fields soften to `None` instead.

use super::classifier::ColumnMap;
use super::fields::{parse_amount, parse_float, parse_usage};
use crate::app::models::{ElectricityRecord, MonthKey, WaterRecord};
use crate::constants::headers;
use crate::{Error, Result};

/// Split one raw line into trimmed, unquoted fields
///
/// The feed dialect is deliberately naive: a plain comma split with no
/// escaping, then one leading and one trailing double quote stripped per
/// field.
pub fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| {
            let trimmed = field.trim();
            let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
            let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
            unquoted.to_string()
        })
        .collect()
}

/// Convert a water row into a record
///
/// Name and a normalizable month are required. Usage and reading are kept
/// nullable so an unread meter still produces a record.
pub fn parse_water_row(row: &[String], columns: &ColumnMap) -> Result<WaterRecord> {
    let name = columns.field(row, headers::NAME).unwrap_or("");
    if name.is_empty() {
        return Err(Error::data_validation(format!(
            "Missing required field '{}'",
            headers::NAME
        )));
    }

    let raw_month = columns.field(row, headers::MONTH).unwrap_or("");
    if raw_month.is_empty() {
        return Err(Error::data_validation(format!(
            "Missing required field '{}'",
            headers::MONTH
        )));
    }
    let month = MonthKey::normalize(raw_month)
        .ok_or_else(|| Error::data_validation(format!("Unrecognized month '{}'", raw_month)))?;

    let usage = columns.field(row, headers::USAGE).and_then(parse_usage);
    let reading = columns.field(row, headers::READING).and_then(parse_float);

    WaterRecord::new(name.to_string(), month, usage, reading)
}

/// Convert an electricity row into a record
///
/// Only the month is required. The generation cost column appears under two
/// published header names; the spaced form wins when both exist.
pub fn parse_electricity_row(row: &[String], columns: &ColumnMap) -> Result<ElectricityRecord> {
    let raw_month = columns.field(row, headers::MONTH).unwrap_or("");
    if raw_month.is_empty() {
        return Err(Error::data_validation(format!(
            "Missing required field '{}'",
            headers::MONTH
        )));
    }
    let month = MonthKey::normalize(raw_month)
        .ok_or_else(|| Error::data_validation(format!("Unrecognized month '{}'", raw_month)))?;

    let power_consumption = columns
        .field(row, headers::POWER_CONSUMPTION)
        .and_then(parse_amount);
    let electricity_reading = columns
        .field(row, headers::ELECTRICITY_READING)
        .and_then(parse_amount);
    let cost_impact = columns
        .field(row, headers::COST_IMPACT)
        .and_then(parse_amount);
    let power_generation_cost = columns
        .field(row, headers::POWER_GENERATION_COST)
        .or_else(|| columns.field(row, headers::POWER_GENERATION_COST_ALIAS))
        .and_then(parse_amount);

    Ok(ElectricityRecord {
        month,
        power_consumption,
        electricity_reading,
        cost_impact,
        power_generation_cost,
    })
}
