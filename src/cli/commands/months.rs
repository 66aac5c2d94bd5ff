//! Months command implementation for the meter dashboard CLI
//!
//! Renders per-month water usage aggregates: total usage, contributing
//! households, the per-household average, and the billed total.

use super::shared::{
    LoadSummary, emit_report, load_snapshot, report_feed_failures, setup_logging,
};
use crate::app::services::feed_loader::Snapshot;
use crate::app::services::metrics::aggregate::{MonthlyUsage, monthly_water_usage, trailing};
use crate::app::services::metrics::billing::{bill_amount, format_amount};
use crate::cli::args::{MonthsArgs, OutputFormat};
use crate::{Error, Result};
use std::time::Instant;
use tracing::{debug, info};

/// Months command runner for the meter dashboard
pub async fn run_months(args: MonthsArgs) -> Result<LoadSummary> {
    let start_time = Instant::now();

    setup_logging(&args.feed)?;

    info!("Starting monthly aggregates report");
    debug!("Months arguments: {:?}", args);

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

    let months = monthly_water_usage(&snapshot.records);
    let rows = match args.trailing {
        Some(window) => trailing(&months, window),
        None => &months[..],
    };

    info!("Rendering {} of {} months", rows.len(), months.len());

    let report = match args.output_format {
        OutputFormat::Human => render_human_report(&snapshot, rows, months.len()),
        OutputFormat::Json => render_json_report(&args, rows, months.len())?,
        OutputFormat::Csv => render_csv_report(rows),
    };
    emit_report(&args.output_file, &report)?;

    info!(
        "Months report completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Billed total for one aggregated month
fn month_bill(row: &MonthlyUsage) -> f64 {
    bill_amount(Some(row.total)).unwrap_or(0.0)
}

/// Render the human-readable months report
fn render_human_report(snapshot: &Snapshot, rows: &[MonthlyUsage], total_months: usize) -> String {
    let mut output = String::from(
        "📆 Monthly Water Usage\n\
         ======================\n",
    );
    output.push_str(&format!("📄 Months: {} (of {})\n\n", rows.len(), total_months));

    if rows.is_empty() {
        if snapshot.water().count() == 0 {
            output.push_str("No water records were loaded.\n");
        } else {
            output.push_str("No month has a usable meter reading yet.\n");
        }
        return output;
    }

    output.push_str("Month          | Total Usage | Households | Average | Total Bill\n");
    output.push_str("---------------|-------------|------------|---------|------------\n");

    for row in rows {
        output.push_str(&format!(
            "{:14} | {:>11} | {:>10} | {:>7.1} | {:>10}\n",
            row.month.label(),
            row.total,
            row.user_count,
            row.average,
            format_amount(month_bill(row))
        ));
    }

    output
}

/// Render the JSON months report
fn render_json_report(
    args: &MonthsArgs,
    rows: &[MonthlyUsage],
    total_months: usize,
) -> Result<String> {
    use serde_json::json;

    let json_rows: Vec<_> = rows
        .iter()
        .map(|row| {
            json!({
                "month": row.month,
                "month_label": row.month.label(),
                "total": row.total,
                "user_count": row.user_count,
                "average": row.average,
                "total_bill": month_bill(row),
            })
        })
        .collect();

    let json_report = json!({
        "metadata": {
            "months_in_report": rows.len(),
            "months_total": total_months,
            "trailing": args.trailing,
            "generated_at": chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        },
        "months": json_rows,
    });

    serde_json::to_string_pretty(&json_report)
        .map_err(|e| Error::report("Failed to serialize months report", Some(e)))
}

/// Render the CSV months report
fn render_csv_report(rows: &[MonthlyUsage]) -> String {
    let mut csv = String::from("month,total_usage,user_count,average,total_bill\n");

    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{:.2}\n",
            row.month,
            row.total,
            row.user_count,
            row.average,
            month_bill(row)
        ));
    }

    csv
}
