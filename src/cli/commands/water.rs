//! Water command implementation for the meter dashboard CLI
//!
//! Renders the per-household water usage table with fixed-tariff bills,
//! month-over-month trends, and payment status, in human, JSON, or CSV
//! format.

use super::shared::{
    LoadSummary, csv_escape, emit_report, load_snapshot, report_feed_failures, setup_logging,
};
use crate::app::models::WaterRecord;
use crate::app::services::feed_loader::Snapshot;
use crate::app::services::filter::WaterFilter;
use crate::app::services::metrics::billing::{bill_amount, bill_display, format_amount};
use crate::app::services::metrics::trend::water_record_trend;
use crate::cli::args::{OutputFormat, WaterArgs};
use crate::{Error, Result};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info};

/// Water command runner for the meter dashboard
///
/// Loads both feeds, applies the name/month/search criteria to the water
/// records, and renders the usage table.
pub async fn run_water(args: WaterArgs) -> Result<LoadSummary> {
    let start_time = Instant::now();

    setup_logging(&args.feed)?;

    info!("Starting water usage report");
    debug!("Water arguments: {:?}", args);

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

    let filter = WaterFilter {
        name: args.name.clone(),
        month: args.month,
        search: args.search.clone(),
    };
    let rows = filter.apply(&snapshot.records);
    let stats = UsageStatistics::compute(&rows);

    info!(
        "Rendering {} of {} water rows",
        rows.len(),
        summary.water_rows
    );

    let report = match args.output_format {
        OutputFormat::Human => render_human_report(&args, &snapshot, &rows, &stats),
        OutputFormat::Json => render_json_report(&args, &snapshot, &rows, &stats)?,
        OutputFormat::Csv => render_csv_report(&rows),
    };
    emit_report(&args.output_file, &report)?;

    info!(
        "Water report completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Aggregate figures over the filtered water rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageStatistics {
    /// Rows in the filtered view
    pub total_records: usize,
    /// Distinct households in the view
    pub unique_users: usize,
    /// Distinct months in the view
    pub months_covered: usize,
    /// Sum of usable usage values
    pub total_usage: i64,
    /// Sum of bills over billed rows
    pub total_bill: f64,
    /// Mean usage per billed row
    pub average_usage: f64,
    /// Rows with a usable reading
    pub paid_records: usize,
    /// Rows awaiting a meter reading
    pub pending_records: usize,
}

impl UsageStatistics {
    /// Compute statistics over a filtered view
    ///
    /// Only rows with a usable usage value contribute to totals and the
    /// average; unread meters count toward `pending_records` alone.
    pub fn compute(rows: &[&WaterRecord]) -> Self {
        let unique_users: HashSet<&str> = rows.iter().map(|record| record.name.as_str()).collect();
        let months_covered: HashSet<_> = rows.iter().map(|record| record.month).collect();

        let mut total_usage = 0i64;
        let mut total_bill = 0.0f64;
        let mut paid_records = 0usize;

        for record in rows {
            if record.has_usage() {
                paid_records += 1;
                if let Some(usage) = record.usage {
                    total_usage += usage;
                }
                if let Some(bill) = bill_amount(record.usage) {
                    total_bill += bill;
                }
            }
        }

        let average_usage = if paid_records > 0 {
            total_usage as f64 / paid_records as f64
        } else {
            0.0
        };

        Self {
            total_records: rows.len(),
            unique_users: unique_users.len(),
            months_covered: months_covered.len(),
            total_usage,
            total_bill,
            average_usage,
            paid_records,
            pending_records: rows.len() - paid_records,
        }
    }
}

/// Render the human-readable water report
fn render_human_report(
    args: &WaterArgs,
    snapshot: &Snapshot,
    rows: &[&WaterRecord],
    stats: &UsageStatistics,
) -> String {
    let mut output = String::from(
        "💧 Water Usage Report\n\
         =====================\n",
    );

    if let Some(span) = month_span(rows) {
        output.push_str(&format!("📅 Months: {}\n", span));
    }
    output.push_str(&format!("🏠 Households: {}\n", stats.unique_users));
    output.push_str(&format!(
        "📄 Rows: {} (of {} loaded)\n\n",
        rows.len(),
        snapshot.water().count()
    ));

    if rows.is_empty() {
        output.push_str("No water records match the current filters.\n");
        return output;
    }

    output.push_str(
        "Name             | Month          | Usage | Bill               | Trend     | Status\n",
    );
    output.push_str(
        "-----------------|----------------|-------|--------------------|-----------|--------\n",
    );

    for record in rows {
        let trend = water_record_trend(&snapshot.records, record);
        let usage_cell = match record.usage {
            Some(usage) if record.has_usage() => usage.to_string(),
            _ => "-".to_string(),
        };

        output.push_str(&format!(
            "{:16} | {:14} | {:>5} | {:18} | {:9} | {}\n",
            clip(&record.name, 16),
            record.month.label(),
            usage_cell,
            bill_display(record.usage),
            trend.display(),
            record.payment_status()
        ));
    }

    output.push_str("\n📈 Summary\n");
    output.push_str(&format!(
        "   • Total usage: {} units across {} households\n",
        stats.total_usage, stats.unique_users
    ));
    output.push_str(&format!(
        "   • Total billed: {}\n",
        format_amount(stats.total_bill)
    ));
    output.push_str(&format!("   • Months covered: {}\n", stats.months_covered));
    output.push_str(&format!(
        "   • Average usage: {:.1} units per billed row\n",
        stats.average_usage
    ));
    output.push_str(&format!(
        "   • Payment status: {} paid, {} pending\n",
        stats.paid_records, stats.pending_records
    ));

    if args.diagnostics {
        output.push('\n');
        output.push_str(&render_diagnostics(snapshot));
    } else if !snapshot.diagnostics.is_empty() {
        output.push_str(&format!(
            "\n💡 {} feed rows were skipped during normalization (rerun with --diagnostics)\n",
            snapshot.diagnostics.len()
        ));
    }

    output
}

/// Render the skipped-row diagnostics section
fn render_diagnostics(snapshot: &Snapshot) -> String {
    if snapshot.diagnostics.is_empty() {
        return "⚠️  Skipped Rows: none\n".to_string();
    }

    let mut output = format!("⚠️  Skipped Rows ({})\n", snapshot.diagnostics.len());
    for diagnostic in &snapshot.diagnostics {
        output.push_str(&format!(
            "   • Row {}: {} | raw: {}\n",
            diagnostic.row_number, diagnostic.reason, diagnostic.raw
        ));
    }

    output
}

/// Render the JSON water report
fn render_json_report(
    args: &WaterArgs,
    snapshot: &Snapshot,
    rows: &[&WaterRecord],
    stats: &UsageStatistics,
) -> Result<String> {
    use serde_json::json;

    let json_rows: Vec<_> = rows
        .iter()
        .map(|record| {
            let trend = water_record_trend(&snapshot.records, record);
            json!({
                "name": record.name,
                "month": record.month,
                "month_label": record.month.label(),
                "usage": record.usage,
                "reading": record.reading,
                "bill": bill_amount(record.usage),
                "bill_display": bill_display(record.usage),
                "trend": trend,
                "status": record.payment_status().as_str(),
            })
        })
        .collect();

    let mut json_report = json!({
        "metadata": {
            "rows_in_report": rows.len(),
            "water_rows_loaded": snapshot.water().count(),
            "rows_skipped": snapshot.diagnostics.len(),
            "generated_at": chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        },
        "filters_applied": {
            "name": args.name,
            "month": args.month,
            "search": args.search,
        },
        "statistics": {
            "total_usage": stats.total_usage,
            "total_bill": stats.total_bill,
            "unique_users": stats.unique_users,
            "months_covered": stats.months_covered,
            "average_usage": stats.average_usage,
            "paid_records": stats.paid_records,
            "pending_records": stats.pending_records,
        },
        "records": json_rows,
    });

    if args.diagnostics {
        json_report["diagnostics"] = serde_json::to_value(&snapshot.diagnostics)
            .map_err(|e| Error::report("Failed to serialize diagnostics", Some(e)))?;
    }

    serde_json::to_string_pretty(&json_report)
        .map_err(|e| Error::report("Failed to serialize water report", Some(e)))
}

/// Render the CSV water report
fn render_csv_report(rows: &[&WaterRecord]) -> String {
    let mut csv = String::from("name,month,usage,reading,bill,status\n");

    for record in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_escape(&record.name),
            record.month,
            record
                .usage
                .map_or_else(String::new, |usage| usage.to_string()),
            record
                .reading
                .map_or_else(String::new, |reading| reading.to_string()),
            bill_amount(record.usage).map_or_else(String::new, |bill| format!("{:.2}", bill)),
            record.payment_status()
        ));
    }

    csv
}

/// Label span of the months present in the view, e.g. `January - March 2024`
fn month_span(rows: &[&WaterRecord]) -> Option<String> {
    let first = rows.iter().map(|record| record.month).min()?;
    let last = rows.iter().map(|record| record.month).max()?;

    if first == last {
        Some(first.label())
    } else {
        Some(format!("{} - {}", first.label(), last.label()))
    }
}

/// Clip text to a column width, ellipsizing long values
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let clipped: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", clipped)
}
