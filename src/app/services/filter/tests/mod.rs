//! Shared fixtures for filter tests

use crate::app::models::{ElectricityRecord, MonthKey, Record, WaterRecord};

// Test modules
mod options_tests;

/// Helper to create a water record
pub fn create_water(name: &str, month: &str, usage: Option<i64>) -> Record {
    Record::Water(
        WaterRecord::new(
            name.to_string(),
            MonthKey::normalize(month).unwrap(),
            usage,
            None,
        )
        .unwrap(),
    )
}

/// Helper to create an electricity record
pub fn create_electricity(month: &str, power_consumption: Option<f64>) -> Record {
    Record::Electricity(ElectricityRecord {
        month: MonthKey::normalize(month).unwrap(),
        power_consumption,
        electricity_reading: None,
        cost_impact: None,
        power_generation_cost: None,
    })
}

/// A small mixed dataset shared by several tests
pub fn create_mixed_records() -> Vec<Record> {
    vec![
        create_water("Jane", "03-2024", Some(15)),
        create_water("Jane", "01-2024", Some(10)),
        create_water("Jane", "02-2024", Some(12)),
        create_water("Omar", "02-2024", None),
        create_water("Priya", "03-2024", Some(0)),
        create_electricity("03-2024", Some(31000.0)),
    ]
}
