//! Tests for filter option derivation

use super::{create_electricity, create_water};
use crate::app::models::MonthKey;
use crate::app::services::filter::options::{default_month, month_options, user_options};

#[test]
fn test_user_options_first_seen_distinct() {
    let records = vec![
        create_water("Omar", "01-2024", Some(10)),
        create_water("Jane", "01-2024", Some(12)),
        create_water("Omar", "02-2024", Some(11)),
    ];

    assert_eq!(user_options(&records), ["Omar", "Jane"]);
}

#[test]
fn test_user_options_ignore_electricity() {
    let records = vec![
        create_electricity("01-2024", Some(28000.0)),
        create_water("Jane", "01-2024", Some(12)),
    ];

    assert_eq!(user_options(&records), ["Jane"]);
}

#[test]
fn test_month_options_chronological_and_distinct() {
    let records = vec![
        create_water("Jane", "02-2024", Some(12)),
        create_water("Omar", "01-2024", Some(10)),
        create_water("Priya", "02-2024", Some(9)),
    ];
    let current = MonthKey::normalize("06-2024").unwrap();

    let months: Vec<String> = month_options(&records, current)
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(months, ["01-2024", "02-2024"]);
}

#[test]
fn test_month_options_hide_future_months() {
    let records = vec![
        create_water("Jane", "02-2024", Some(12)),
        create_water("Jane", "09-2024", Some(14)),
    ];
    let current = MonthKey::normalize("03-2024").unwrap();

    let months = month_options(&records, current);
    assert_eq!(months.len(), 1);
    assert_eq!(months[0].to_string(), "02-2024");
}

#[test]
fn test_month_options_include_current_month() {
    let records = vec![create_water("Jane", "03-2024", Some(12))];
    let current = MonthKey::normalize("03-2024").unwrap();

    assert_eq!(month_options(&records, current).len(), 1);
}

#[test]
fn test_default_month_is_latest_option() {
    let records = vec![
        create_water("Jane", "01-2024", Some(10)),
        create_water("Jane", "03-2024", Some(15)),
    ];
    let current = MonthKey::normalize("12-2024").unwrap();
    let options = month_options(&records, current);

    assert_eq!(default_month(&options).unwrap().to_string(), "03-2024");
    assert_eq!(default_month(&[]), None);
}
