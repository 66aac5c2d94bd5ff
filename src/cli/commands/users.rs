//! Users command implementation for the meter dashboard CLI
//!
//! Renders per-household water usage totals in descending order, with each
//! household's share of the overall usage and its billed total.

use super::shared::{
    LoadSummary, csv_escape, emit_report, load_snapshot, report_feed_failures, setup_logging,
};
use crate::app::services::metrics::aggregate::{UserTotal, user_totals};
use crate::app::services::metrics::billing::{bill_amount, format_amount};
use crate::cli::args::{OutputFormat, UsersArgs};
use crate::{Error, Result};
use std::time::Instant;
use tracing::{debug, info};

/// Users command runner for the meter dashboard
pub async fn run_users(args: UsersArgs) -> Result<LoadSummary> {
    let start_time = Instant::now();

    setup_logging(&args.feed)?;

    info!("Starting per-user totals report");
    debug!("Users arguments: {:?}", args);

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

    let rows = user_totals(&snapshot.records, args.month);

    info!("Rendering totals for {} households", rows.len());

    let report = match args.output_format {
        OutputFormat::Human => render_human_report(&args, &rows),
        OutputFormat::Json => render_json_report(&args, &rows)?,
        OutputFormat::Csv => render_csv_report(&rows),
    };
    emit_report(&args.output_file, &report)?;

    info!(
        "Users report completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Share of the overall usage attributed to one household, in percent
fn share_percent(row: &UserTotal, grand_total: i64) -> f64 {
    if grand_total == 0 {
        return 0.0;
    }
    (row.total as f64 / grand_total as f64) * 100.0
}

/// Billed total for one household
fn user_bill(row: &UserTotal) -> f64 {
    bill_amount(Some(row.total)).unwrap_or(0.0)
}

/// Render the human-readable users report
fn render_human_report(args: &UsersArgs, rows: &[UserTotal]) -> String {
    let mut output = String::from(
        "👥 Water Usage by Household\n\
         ===========================\n",
    );
    output.push_str(&format!(
        "📅 Period: {}\n",
        args.month
            .map_or_else(|| "all months".to_string(), |month| month.label())
    ));
    output.push_str(&format!("🏠 Households: {}\n\n", rows.len()));

    if rows.is_empty() {
        output.push_str("No household has a usable meter reading in this period.\n");
        return output;
    }

    let grand_total: i64 = rows.iter().map(|row| row.total).sum();

    output.push_str("Name             | Total Usage | Share  | Total Bill\n");
    output.push_str("-----------------|-------------|--------|------------\n");

    for row in rows {
        output.push_str(&format!(
            "{:16} | {:>11} | {:>5.1}% | {:>10}\n",
            row.name,
            row.total,
            share_percent(row, grand_total),
            format_amount(user_bill(row))
        ));
    }

    output.push_str(&format!(
        "\n📈 Overall: {} units, {} billed\n",
        grand_total,
        format_amount(bill_amount(Some(grand_total)).unwrap_or(0.0))
    ));

    output
}

/// Render the JSON users report
fn render_json_report(args: &UsersArgs, rows: &[UserTotal]) -> Result<String> {
    use serde_json::json;

    let grand_total: i64 = rows.iter().map(|row| row.total).sum();

    let json_rows: Vec<_> = rows
        .iter()
        .map(|row| {
            json!({
                "name": row.name,
                "total": row.total,
                "share_percent": share_percent(row, grand_total),
                "total_bill": user_bill(row),
            })
        })
        .collect();

    let json_report = json!({
        "metadata": {
            "households": rows.len(),
            "grand_total": grand_total,
            "month": args.month,
            "generated_at": chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        },
        "users": json_rows,
    });

    serde_json::to_string_pretty(&json_report)
        .map_err(|e| Error::report("Failed to serialize users report", Some(e)))
}

/// Render the CSV users report
fn render_csv_report(rows: &[UserTotal]) -> String {
    let grand_total: i64 = rows.iter().map(|row| row.total).sum();
    let mut csv = String::from("name,total_usage,share_percent,total_bill\n");

    for row in rows {
        csv.push_str(&format!(
            "{},{},{:.1},{:.2}\n",
            csv_escape(&row.name),
            row.total,
            share_percent(row, grand_total),
            user_bill(row)
        ));
    }

    csv
}
