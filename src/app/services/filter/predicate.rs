//! Record filtering
//!
//! Filters compose three criteria: exact household name, exact month, and a
//! case-insensitive free-text search. The search sees what the user sees:
//! the month label, the bill text, and the unread-meter sentinel all match.

use crate::app::models::{ElectricityRecord, MonthKey, Record, WaterRecord};
use crate::app::services::metrics::billing;
use crate::constants::METER_NOT_READ;

/// Criteria over water records; empty criteria match everything
#[derive(Debug, Clone, Default)]
pub struct WaterFilter {
    /// Exact household name
    pub name: Option<String>,

    /// Exact month
    pub month: Option<MonthKey>,

    /// Case-insensitive free text
    pub search: Option<String>,
}

impl WaterFilter {
    /// Whether any criterion is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.month.is_none() && normalize_query(&self.search).is_none()
    }

    /// All water records matching the criteria
    ///
    /// When a household is selected without a month, rows sort ascending by
    /// month so the household's history reads top to bottom; otherwise feed
    /// order is preserved.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a WaterRecord> {
        let mut rows: Vec<&WaterRecord> = records
            .iter()
            .filter_map(|record| match record {
                Record::Water(water) => self.matches(water).then_some(water),
                Record::Electricity(_) => None,
            })
            .collect();

        if self.name.is_some() && self.month.is_none() {
            rows.sort_by_key(|water| water.month);
        }
        rows
    }

    /// Whether one record satisfies every criterion
    pub fn matches(&self, record: &WaterRecord) -> bool {
        if let Some(name) = &self.name {
            if record.name != *name {
                return false;
            }
        }
        if let Some(month) = self.month {
            if record.month != month {
                return false;
            }
        }
        if let Some(query) = normalize_query(&self.search) {
            if !water_search_matches(record, &query) {
                return false;
            }
        }
        true
    }
}

/// Criteria over electricity records
#[derive(Debug, Clone, Default)]
pub struct ElectricityFilter {
    /// Exact month
    pub month: Option<MonthKey>,

    /// Case-insensitive free text
    pub search: Option<String>,
}

impl ElectricityFilter {
    /// Whether one record satisfies every criterion
    pub fn matches(&self, record: &ElectricityRecord) -> bool {
        if let Some(month) = self.month {
            if record.month != month {
                return false;
            }
        }
        if let Some(query) = normalize_query(&self.search) {
            if !electricity_search_matches(record, &query) {
                return false;
            }
        }
        true
    }
}

/// Lowercase a search box value, dropping blank queries
fn normalize_query(search: &Option<String>) -> Option<String> {
    let query = search.as_deref()?.trim().to_lowercase();
    if query.is_empty() { None } else { Some(query) }
}

/// Free-text match over a water record's visible texts
fn water_search_matches(record: &WaterRecord, query: &str) -> bool {
    if record.name.to_lowercase().contains(query) {
        return true;
    }
    if record.month.label().to_lowercase().contains(query) {
        return true;
    }
    match record.usage {
        Some(units) if units != 0 => {
            units.to_string().contains(query) || billing::bill_display(record.usage).contains(query)
        }
        // Unread meters match any fragment of the sentinel text
        _ => METER_NOT_READ.to_lowercase().contains(query),
    }
}

/// Free-text match over an electricity record's visible texts
fn electricity_search_matches(record: &ElectricityRecord, query: &str) -> bool {
    if record.month.label().to_lowercase().contains(query) {
        return true;
    }
    [
        record.power_consumption,
        record.electricity_reading,
        record.cost_impact,
        record.power_generation_cost,
    ]
    .iter()
    .flatten()
    .any(|value| value.to_string().contains(query))
}
