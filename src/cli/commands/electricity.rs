//! Electricity command implementation for the meter dashboard CLI
//!
//! Renders the monthly electricity figures table with consumption trends, or
//! a trailing consumption chart, in human, JSON, or CSV format.

use super::shared::{
    LoadSummary, csv_escape, emit_report, figure_or_na, load_snapshot, report_feed_failures,
    setup_logging,
};
use crate::app::models::ElectricityRecord;
use crate::app::services::feed_loader::Snapshot;
use crate::app::services::filter::ElectricityFilter;
use crate::app::services::metrics::aggregate::{
    ElectricityPoint, electricity_by_month, electricity_chart_points, trailing,
};
use crate::app::services::metrics::billing::format_amount;
use crate::app::services::metrics::trend::{previous_electricity, trend};
use crate::cli::args::{ElectricityArgs, OutputFormat};
use crate::constants::CHART_TRAILING_MONTHS;
use crate::{Error, Result};
use std::time::Instant;
use tracing::{debug, info};

/// Maximum bar width for the consumption chart, in glyphs
const MAX_BAR_WIDTH: usize = 32;

/// Electricity command runner for the meter dashboard
///
/// Loads both feeds, applies the month/search criteria to the electricity
/// records, and renders the figures table or the trailing chart.
pub async fn run_electricity(args: ElectricityArgs) -> Result<LoadSummary> {
    let start_time = Instant::now();

    setup_logging(&args.feed)?;

    info!("Starting electricity report");
    debug!("Electricity arguments: {:?}", args);

    args.validate()?;

    let (snapshot, summary) = load_snapshot(&args.feed).await?;

    if snapshot.both_feeds_failed() {
        return Err(Error::transport(
            "Both feeds failed to load; nothing to report",
            None,
        ));
    }

    if matches!(args.output_format, OutputFormat::Human) {
        report_feed_failures(&snapshot);
    }

    let filter = ElectricityFilter {
        month: args.month,
        search: args.search.clone(),
    };
    let mut rows = electricity_by_month(&snapshot.records);
    rows.retain(|record| filter.matches(record));

    info!(
        "Rendering {} of {} electricity rows",
        rows.len(),
        summary.electricity_rows
    );

    let report = match args.output_format {
        OutputFormat::Human if args.chart => {
            let points = electricity_chart_points(&snapshot.records);
            render_chart(trailing(&points, CHART_TRAILING_MONTHS))
        }
        OutputFormat::Human => render_human_report(&snapshot, &rows),
        OutputFormat::Json => render_json_report(&args, &snapshot, &rows)?,
        OutputFormat::Csv => render_csv_report(&rows),
    };
    emit_report(&args.output_file, &report)?;

    info!(
        "Electricity report completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Render the human-readable electricity table
fn render_human_report(snapshot: &Snapshot, rows: &[ElectricityRecord]) -> String {
    let mut output = String::from(
        "⚡ Electricity Report\n\
         =====================\n",
    );
    output.push_str(&format!(
        "📄 Months: {} (of {} loaded)\n\n",
        rows.len(),
        snapshot.electricity().count()
    ));

    if rows.is_empty() {
        output.push_str("No electricity records match the current filters.\n");
        return output;
    }

    output.push_str(
        "Month          | Consumption | Reading     | Cost        | Generation  | Trend\n",
    );
    output.push_str(
        "---------------|-------------|-------------|-------------|-------------|----------\n",
    );

    for record in rows {
        let previous = previous_electricity(&snapshot.records, record.month);
        let movement = trend(
            record.power_consumption,
            previous.and_then(|previous| previous.power_consumption),
        );

        output.push_str(&format!(
            "{:14} | {:>11} | {:>11} | {:>11} | {:>11} | {}\n",
            record.month.label(),
            figure_or_na(record.power_consumption),
            figure_or_na(record.electricity_reading),
            figure_or_na(record.cost_impact),
            figure_or_na(record.power_generation_cost),
            movement.display()
        ));
    }

    output
}

/// Render the trailing consumption chart
///
/// Bars scale to the largest consumption in the window; missing figures were
/// already flattened to zero by the chart point projection.
fn render_chart(points: &[ElectricityPoint]) -> String {
    let mut output = format!(
        "⚡ Power Consumption (last {} months)\n\
         =====================================\n",
        points.len()
    );

    if points.is_empty() {
        output.push_str("No electricity records to chart.\n");
        return output;
    }

    let max = points
        .iter()
        .map(|point| point.power_consumption)
        .fold(0.0f64, f64::max);

    for point in points {
        let width = if max > 0.0 {
            ((point.power_consumption / max) * MAX_BAR_WIDTH as f64).round() as usize
        } else {
            0
        };

        output.push_str(&format!(
            "{:14} |{} {}\n",
            point.month.label(),
            "█".repeat(width),
            format_amount(point.power_consumption)
        ));
    }

    output
}

/// Render the JSON electricity report
fn render_json_report(
    args: &ElectricityArgs,
    snapshot: &Snapshot,
    rows: &[ElectricityRecord],
) -> Result<String> {
    use serde_json::json;

    let json_rows: Vec<_> = rows
        .iter()
        .map(|record| {
            let previous = previous_electricity(&snapshot.records, record.month);
            let movement = trend(
                record.power_consumption,
                previous.and_then(|previous| previous.power_consumption),
            );

            json!({
                "month": record.month,
                "month_label": record.month.label(),
                "power_consumption": record.power_consumption,
                "electricity_reading": record.electricity_reading,
                "cost_impact": record.cost_impact,
                "power_generation_cost": record.power_generation_cost,
                "trend": movement,
            })
        })
        .collect();

    let mut json_report = json!({
        "metadata": {
            "rows_in_report": rows.len(),
            "electricity_rows_loaded": snapshot.electricity().count(),
            "generated_at": chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        },
        "filters_applied": {
            "month": args.month,
            "search": args.search,
        },
        "records": json_rows,
    });

    if args.chart {
        let points = electricity_chart_points(&snapshot.records);
        json_report["chart_points"] =
            serde_json::to_value(trailing(&points, CHART_TRAILING_MONTHS))
                .map_err(|e| Error::report("Failed to serialize chart points", Some(e)))?;
    }

    serde_json::to_string_pretty(&json_report)
        .map_err(|e| Error::report("Failed to serialize electricity report", Some(e)))
}

/// Render the CSV electricity report
fn render_csv_report(rows: &[ElectricityRecord]) -> String {
    let mut csv = String::from(
        "month,power_consumption,electricity_reading,cost_impact,power_generation_cost\n",
    );

    for record in rows {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            record.month,
            csv_figure(record.power_consumption),
            csv_figure(record.electricity_reading),
            csv_figure(record.cost_impact),
            csv_figure(record.power_generation_cost)
        ));
    }

    csv
}

/// CSV cell for an optional figure: the bare number, or an empty cell
fn csv_figure(value: Option<f64>) -> String {
    value.map_or_else(String::new, |value| csv_escape(&value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{MonthKey, Record};
    use crate::app::services::feed_loader::FeedStatus;
    use crate::cli::args::FeedArgs;

    fn electricity(month: &str, consumption: Option<f64>, cost: Option<f64>) -> ElectricityRecord {
        ElectricityRecord {
            month: MonthKey::normalize(month).unwrap(),
            power_consumption: consumption,
            electricity_reading: Some(1000.0),
            cost_impact: cost,
            power_generation_cost: None,
        }
    }

    fn create_test_snapshot() -> Snapshot {
        let records = vec![
            Record::Electricity(electricity("01-2024", Some(28500.5), Some(3100.0))),
            Record::Electricity(electricity("02-2024", Some(14250.25), None)),
            Record::Electricity(electricity("03-2024", None, Some(900.0))),
        ];

        Snapshot {
            records,
            diagnostics: Vec::new(),
            water_status: FeedStatus::Loaded { rows: 0 },
            electricity_status: FeedStatus::Loaded { rows: 3 },
        }
    }

    fn create_test_args() -> ElectricityArgs {
        ElectricityArgs {
            feed: FeedArgs::default(),
            month: None,
            search: None,
            output_format: OutputFormat::Human,
            output_file: None,
            chart: false,
        }
    }

    #[test]
    fn test_human_report_shows_na_for_missing_figures() {
        let snapshot = create_test_snapshot();
        let rows = electricity_by_month(&snapshot.records);

        let report = render_human_report(&snapshot, &rows);

        assert!(report.contains("N/A"));
        assert!(report.contains("28,500.50"));
        assert!(report.contains("January 2024"));
    }

    #[test]
    fn test_human_report_shows_falling_trend() {
        let snapshot = create_test_snapshot();
        let rows = electricity_by_month(&snapshot.records);

        let report = render_human_report(&snapshot, &rows);

        // Consumption halved from January to February
        assert!(report.contains("↓ 50.0%"));
    }

    #[test]
    fn test_chart_scales_bars_to_maximum() {
        let snapshot = create_test_snapshot();
        let points = electricity_chart_points(&snapshot.records);

        let chart = render_chart(&points);
        let lines: Vec<&str> = chart.lines().collect();

        // January holds the maximum, so its bar is full width
        let full_bar = "█".repeat(MAX_BAR_WIDTH);
        assert!(lines[2].contains(&full_bar));
        // March has no consumption figure, so it charts at zero
        assert!(lines[4].contains("| 0.00"));
    }

    #[test]
    fn test_chart_with_no_points() {
        let chart = render_chart(&[]);
        assert!(chart.contains("No electricity records to chart"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let snapshot = create_test_snapshot();
        let rows = electricity_by_month(&snapshot.records);

        let report = render_json_report(&create_test_args(), &snapshot, &rows).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(value["metadata"]["rows_in_report"], 3);
        assert_eq!(value["records"][0]["month"], "01-2024");
        assert_eq!(value["records"][0]["power_consumption"], 28500.5);
        assert!(value["records"][2]["power_consumption"].is_null());
        assert!(value.get("chart_points").is_none());
    }

    #[test]
    fn test_json_report_includes_chart_points_when_requested() {
        let snapshot = create_test_snapshot();
        let rows = electricity_by_month(&snapshot.records);
        let mut args = create_test_args();
        args.chart = true;

        let report = render_json_report(&args, &snapshot, &rows).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(value["chart_points"][2]["power_consumption"], 0.0);
    }

    #[test]
    fn test_csv_report_leaves_missing_cells_empty() {
        let snapshot = create_test_snapshot();
        let rows = electricity_by_month(&snapshot.records);

        let csv = render_csv_report(&rows);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "01-2024,28500.5,1000,3100,");
        assert_eq!(lines[2], "02-2024,14250.25,1000,,");
        assert_eq!(lines[3], "03-2024,,1000,900,");
    }
}
