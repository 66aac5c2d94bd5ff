//! Shared fixtures for metrics tests

use crate::app::models::{ElectricityRecord, MonthKey, Record, WaterRecord};

// Test modules
mod aggregate_tests;

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

/// Helper to create an electricity record with one consumption figure
pub fn create_electricity(month: &str, power_consumption: Option<f64>) -> Record {
    Record::Electricity(ElectricityRecord {
        month: MonthKey::normalize(month).unwrap(),
        power_consumption,
        electricity_reading: None,
        cost_impact: None,
        power_generation_cost: None,
    })
}
