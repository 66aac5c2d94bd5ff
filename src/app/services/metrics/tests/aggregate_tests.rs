//! Tests for grouping and selection

use super::{create_electricity, create_water};
use crate::app::models::MonthKey;
use crate::app::services::metrics::aggregate::{
    electricity_by_month, electricity_chart_points, latest_electricity, latest_water,
    monthly_water_usage, trailing, user_totals,
};

#[test]
fn test_monthly_usage_totals_and_averages() {
    let records = vec![
        create_water("A", "01-2024", Some(10)),
        create_water("B", "01-2024", Some(20)),
    ];
    let series = monthly_water_usage(&records);

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].total, 30);
    assert_eq!(series[0].user_count, 2);
    assert_eq!(series[0].average, 15.0);
}

#[test]
fn test_monthly_usage_skips_unread_meters() {
    let records = vec![
        create_water("A", "01-2024", Some(10)),
        create_water("B", "01-2024", None),
        create_water("C", "01-2024", Some(0)),
    ];
    let series = monthly_water_usage(&records);

    assert_eq!(series[0].total, 10);
    assert_eq!(series[0].user_count, 1);
}

#[test]
fn test_monthly_usage_is_chronological() {
    let records = vec![
        create_water("A", "01-2024", Some(10)),
        create_water("A", "11-2023", Some(8)),
        create_water("A", "12-2023", Some(9)),
    ];
    let series = monthly_water_usage(&records);

    let months: Vec<String> = series.iter().map(|m| m.month.to_string()).collect();
    assert_eq!(months, ["11-2023", "12-2023", "01-2024"]);
}

#[test]
fn test_duplicate_household_rows_are_summed() {
    let records = vec![
        create_water("A", "01-2024", Some(10)),
        create_water("A", "01-2024", Some(5)),
    ];
    let series = monthly_water_usage(&records);

    assert_eq!(series[0].total, 15);
    assert_eq!(series[0].user_count, 1);
    assert_eq!(series[0].average, 15.0);
}

#[test]
fn test_user_totals_sorted_descending() {
    let records = vec![
        create_water("Jane", "01-2024", Some(10)),
        create_water("Omar", "01-2024", Some(20)),
        create_water("Jane", "02-2024", Some(25)),
    ];
    let totals = user_totals(&records, None);

    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].name, "Jane");
    assert_eq!(totals[0].total, 35);
    assert_eq!(totals[1].name, "Omar");
}

#[test]
fn test_user_totals_restricted_to_month() {
    let records = vec![
        create_water("Jane", "01-2024", Some(10)),
        create_water("Jane", "02-2024", Some(25)),
        create_water("Omar", "02-2024", Some(20)),
    ];
    let february = MonthKey::normalize("02-2024").unwrap();
    let totals = user_totals(&records, Some(february));

    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].total, 25);
    assert_eq!(totals[1].total, 20);
}

#[test]
fn test_user_totals_ties_keep_feed_order() {
    let records = vec![
        create_water("Omar", "01-2024", Some(10)),
        create_water("Jane", "01-2024", Some(10)),
    ];
    let totals = user_totals(&records, None);

    assert_eq!(totals[0].name, "Omar");
    assert_eq!(totals[1].name, "Jane");
}

#[test]
fn test_electricity_rows_sort_ascending() {
    let records = vec![
        create_electricity("03-2024", Some(31000.0)),
        create_electricity("01-2024", Some(28000.0)),
        create_electricity("02-2024", Some(29000.0)),
    ];
    let rows = electricity_by_month(&records);

    let months: Vec<String> = rows.iter().map(|r| r.month.to_string()).collect();
    assert_eq!(months, ["01-2024", "02-2024", "03-2024"]);
}

#[test]
fn test_latest_water_prefers_max_month() {
    let records = vec![
        create_water("Jane", "01-2024", Some(10)),
        create_water("Jane", "03-2024", Some(15)),
        create_water("Jane", "02-2024", Some(12)),
    ];
    let latest = latest_water(&records, Some("Jane")).unwrap();

    assert_eq!(latest.month.to_string(), "03-2024");
}

#[test]
fn test_latest_water_first_encountered_wins_ties() {
    let records = vec![
        create_water("Jane", "03-2024", Some(15)),
        create_water("Jane", "03-2024", Some(99)),
    ];
    let latest = latest_water(&records, Some("Jane")).unwrap();

    assert_eq!(latest.usage, Some(15));
}

#[test]
fn test_latest_water_across_households() {
    let records = vec![
        create_water("Jane", "03-2024", Some(15)),
        create_water("Omar", "04-2024", Some(20)),
    ];

    let latest = latest_water(&records, None).unwrap();
    assert_eq!(latest.name, "Omar");

    let latest_jane = latest_water(&records, Some("Jane")).unwrap();
    assert_eq!(latest_jane.name, "Jane");
}

#[test]
fn test_latest_electricity() {
    let records = vec![
        create_electricity("02-2024", Some(29000.0)),
        create_electricity("03-2024", Some(31000.0)),
    ];
    let latest = latest_electricity(&records).unwrap();

    assert_eq!(latest.month.to_string(), "03-2024");
}

#[test]
fn test_trailing_window() {
    let series = [1, 2, 3, 4, 5, 6];

    assert_eq!(trailing(&series, 4), &[3, 4, 5, 6]);
    assert_eq!(trailing(&series, 10), &series);
    assert_eq!(trailing::<i32>(&[], 4), &[] as &[i32]);
}

#[test]
fn test_chart_points_flatten_missing_to_zero() {
    let records = vec![
        create_electricity("01-2024", Some(28000.0)),
        create_electricity("02-2024", None),
    ];
    let points = electricity_chart_points(&records);

    assert_eq!(points[0].power_consumption, 28000.0);
    assert_eq!(points[1].power_consumption, 0.0);
    assert_eq!(points[1].cost_impact, 0.0);
}
