//! Selectable filter options derived from a snapshot

use std::collections::HashSet;

use crate::app::models::{MonthKey, Record};

/// Distinct household names in first-seen feed order
pub fn user_options(records: &[Record]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();
    for record in records {
        match record {
            Record::Water(water) => {
                if seen.insert(water.name.as_str()) {
                    names.push(water.name.clone());
                }
            }
            Record::Electricity(_) => {}
        }
    }
    names
}

/// Distinct water months up to and including `current`, chronologically
///
/// Future-dated rows stay hidden until their month arrives.
pub fn month_options(records: &[Record], current: MonthKey) -> Vec<MonthKey> {
    let mut months: Vec<MonthKey> = records
        .iter()
        .filter_map(Record::as_water)
        .map(|water| water.month)
        .filter(|month| *month <= current)
        .collect();
    months.sort();
    months.dedup();
    months
}

/// Default month selection: the latest available option
pub fn default_month(options: &[MonthKey]) -> Option<MonthKey> {
    options.last().copied()
}
