//! Grouping and selection over normalized records
//!
//! Aggregations only count usable water usage: a null or zero usage row is
//! a meter that was not read, not a zero-consumption month, so it never
//! dilutes totals or averages.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::app::models::{ElectricityRecord, MonthKey, Record, WaterRecord};

/// Aggregate water figures for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyUsage {
    /// The month being aggregated
    pub month: MonthKey,

    /// Total usage across all households with a usable reading
    pub total: i64,

    /// Distinct households with a usable reading in the month
    pub user_count: usize,

    /// Mean usage per contributing household
    pub average: f64,
}

/// Total usage attributed to one household
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTotal {
    pub name: String,
    pub total: i64,
}

/// One electricity chart point
///
/// Chart axes cannot render nulls, so missing figures flatten to zero here
/// and only here; tables keep the nulls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectricityPoint {
    pub month: MonthKey,
    pub power_consumption: f64,
    pub electricity_reading: f64,
    pub cost_impact: f64,
    pub power_generation_cost: f64,
}

/// Water usage grouped by month, chronologically sorted
///
/// Duplicate rows for the same household sum into the month; the household
/// still counts once.
pub fn monthly_water_usage(records: &[Record]) -> Vec<MonthlyUsage> {
    let mut totals: HashMap<MonthKey, i64> = HashMap::new();
    let mut users: HashMap<MonthKey, HashSet<&str>> = HashMap::new();

    for record in records {
        match record {
            Record::Water(water) => {
                let Some(units) = water.usage else { continue };
                if units == 0 {
                    continue;
                }
                *totals.entry(water.month).or_insert(0) += units;
                users
                    .entry(water.month)
                    .or_default()
                    .insert(water.name.as_str());
            }
            Record::Electricity(_) => {}
        }
    }

    let mut months: Vec<MonthKey> = totals.keys().copied().collect();
    months.sort();

    months
        .into_iter()
        .map(|month| {
            let total = totals[&month];
            let user_count = users[&month].len();
            MonthlyUsage {
                month,
                total,
                user_count,
                average: total as f64 / user_count as f64,
            }
        })
        .collect()
}

/// Per-household usage totals, sorted by total descending
///
/// Ties keep first-seen feed order. An optional month restricts the rows
/// that contribute.
pub fn user_totals(records: &[Record], month: Option<MonthKey>) -> Vec<UserTotal> {
    let mut totals: Vec<UserTotal> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match record {
            Record::Water(water) => {
                if let Some(selected) = month {
                    if water.month != selected {
                        continue;
                    }
                }
                let Some(units) = water.usage else { continue };
                if units == 0 {
                    continue;
                }
                match index_by_name.get(water.name.as_str()) {
                    Some(&position) => totals[position].total += units,
                    None => {
                        index_by_name.insert(water.name.as_str(), totals.len());
                        totals.push(UserTotal {
                            name: water.name.clone(),
                            total: units,
                        });
                    }
                }
            }
            Record::Electricity(_) => {}
        }
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Electricity records in ascending month order
pub fn electricity_by_month(records: &[Record]) -> Vec<ElectricityRecord> {
    let mut rows: Vec<ElectricityRecord> = records
        .iter()
        .filter_map(Record::as_electricity)
        .cloned()
        .collect();
    rows.sort_by_key(|row| row.month);
    rows
}

/// Latest water record, optionally restricted to one household
///
/// The maximum month wins; the first record encountered at that month wins
/// ties.
pub fn latest_water<'a>(records: &'a [Record], name: Option<&str>) -> Option<&'a WaterRecord> {
    let mut latest: Option<&WaterRecord> = None;
    for record in records {
        match record {
            Record::Water(water) => {
                if let Some(wanted) = name {
                    if water.name != wanted {
                        continue;
                    }
                }
                if latest.is_none_or(|best| water.month > best.month) {
                    latest = Some(water);
                }
            }
            Record::Electricity(_) => {}
        }
    }
    latest
}

/// Latest electricity record, first encountered wins ties
pub fn latest_electricity(records: &[Record]) -> Option<&ElectricityRecord> {
    let mut latest: Option<&ElectricityRecord> = None;
    for record in records {
        match record {
            Record::Electricity(electricity) => {
                if latest.is_none_or(|best| electricity.month > best.month) {
                    latest = Some(electricity);
                }
            }
            Record::Water(_) => {}
        }
    }
    latest
}

/// Trailing window of a chronological series (the chart view)
pub fn trailing<T>(series: &[T], window: usize) -> &[T] {
    let start = series.len().saturating_sub(window);
    &series[start..]
}

/// Chronological chart points for the electricity series
pub fn electricity_chart_points(records: &[Record]) -> Vec<ElectricityPoint> {
    electricity_by_month(records)
        .into_iter()
        .map(|row| ElectricityPoint {
            month: row.month,
            power_consumption: row.power_consumption.unwrap_or(0.0),
            electricity_reading: row.electricity_reading.unwrap_or(0.0),
            cost_impact: row.cost_impact.unwrap_or(0.0),
            power_generation_cost: row.power_generation_cost.unwrap_or(0.0),
        })
        .collect()
}
