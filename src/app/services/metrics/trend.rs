//! Month-over-month trend derivation
//!
//! A trend always compares a value to the strictly previous month. Gap
//! months, missing values, and zero baselines all produce the neutral
//! descriptor so no consumer ever divides by zero or invents a baseline.

use crate::app::models::{ElectricityRecord, MonthKey, Record, TrendDescriptor, WaterRecord};

/// Compare a value against its previous-month baseline
///
/// The magnitude is the absolute percentage change, rounded to one decimal.
pub fn trend(current: Option<f64>, previous: Option<f64>) -> TrendDescriptor {
    let (Some(current), Some(previous)) = (current, previous) else {
        return TrendDescriptor::neutral();
    };
    if previous == 0.0 {
        return TrendDescriptor::neutral();
    }

    let delta = current - previous;
    let magnitude = round_percent((delta / previous).abs() * 100.0);
    if delta > 0.0 {
        TrendDescriptor::up(magnitude)
    } else if delta < 0.0 {
        TrendDescriptor::down(magnitude)
    } else {
        TrendDescriptor::neutral()
    }
}

/// Round a percentage to one decimal place
fn round_percent(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Usage for one household in the month immediately before `month`
///
/// Only the strictly adjacent month counts as a baseline; a gap month means
/// no trend. The first matching record wins, even when its usage is null.
pub fn previous_water_usage(records: &[Record], name: &str, month: MonthKey) -> Option<i64> {
    let target = month.ordinal() - 1;
    records
        .iter()
        .find_map(|record| match record {
            Record::Water(water) if water.name == name && water.month.ordinal() == target => {
                Some(water)
            }
            _ => None,
        })
        .and_then(|water| water.usage)
}

/// Electricity record for the month immediately before `month`
pub fn previous_electricity(records: &[Record], month: MonthKey) -> Option<&ElectricityRecord> {
    let target = month.ordinal() - 1;
    records.iter().find_map(|record| match record {
        Record::Electricity(electricity) if electricity.month.ordinal() == target => {
            Some(electricity)
        }
        _ => None,
    })
}

/// Trend for one water record against the same household's previous month
pub fn water_record_trend(records: &[Record], record: &WaterRecord) -> TrendDescriptor {
    let previous = previous_water_usage(records, &record.name, record.month);
    trend(
        record.usage.map(|units| units as f64),
        previous.map(|units| units as f64),
    )
}
