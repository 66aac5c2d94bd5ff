//! Test utilities and shared fixtures for feed parser testing
//!
//! This module provides canned feed bodies and helper functions used across
//! the parser test modules.

use crate::app::models::{Record, WaterRecord};

mod fields_tests;

/// Helper to create a complete water feed body
pub fn create_water_feed() -> String {
    r#"Name,Month,Usage,Reading
Jane,01-2024,10,100.5
Jane,02-2024,12,112.5
Jane,03-2024,15,127.5
Omar,01-2024,20,200.0
Omar,02-2024,,200.0
Priya,3/2024,18,310.25"#
        .to_string()
}

/// Helper to create a complete electricity feed body
pub fn create_electricity_feed() -> String {
    r#"Month,Power Consumption,Electricity Reading,Cost Impact,Power Generation Cost
01-2024,"28500.50",1400.0,3100.75,950.0
02-2024,29000,1425.5,,980.25
03-2024,31250.25,1460.0,3400.0,1020.00"#
        .to_string()
}

/// Helper to extract water payloads from parsed records
pub fn water_records(records: &[Record]) -> Vec<&WaterRecord> {
    records
        .iter()
        .filter_map(|record| record.as_water())
        .collect()
}
