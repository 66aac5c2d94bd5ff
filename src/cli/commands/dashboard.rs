//! Dashboard command implementation for the meter dashboard CLI
//!
//! The default command: prints a combined console overview of the latest
//! water and electricity figures with bills, payment status, and
//! month-over-month trends.

use super::shared::{
    LoadSummary, figure_or_na, load_snapshot, paint_trend, report_feed_failures, setup_logging,
};
use crate::app::models::MonthKey;
use crate::app::services::feed_loader::Snapshot;
use crate::app::services::filter::options::{default_month, month_options};
use crate::app::services::metrics::aggregate::{
    electricity_chart_points, latest_electricity, monthly_water_usage, trailing, user_totals,
};
use crate::app::services::metrics::billing::{bill_amount, bill_display, format_amount};
use crate::app::services::metrics::trend::{previous_electricity, trend, water_record_trend};
use crate::cli::args::DashboardArgs;
use crate::constants::CHART_TRAILING_MONTHS;
use crate::{Error, Result};
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Dashboard command runner for the meter dashboard
///
/// Loads both feeds and prints the water and electricity overview cards.
pub async fn run_dashboard(args: DashboardArgs) -> Result<LoadSummary> {
    let start_time = Instant::now();

    setup_logging(&args.feed)?;

    info!("Starting dashboard overview");
    debug!("Dashboard arguments: {:?}", args);

    args.validate()?;

    let (snapshot, summary) = load_snapshot(&args.feed).await?;

    if snapshot.both_feeds_failed() {
        return Err(Error::transport(
            "Both feeds failed to load; nothing to show",
            None,
        ));
    }

    report_feed_failures(&snapshot);

    print_water_card(&snapshot, args.name.as_deref(), args.month);
    print_electricity_card(&snapshot);

    if !snapshot.diagnostics.is_empty() {
        println!(
            "\n{}",
            format!(
                "{} feed rows were skipped during normalization (see water --diagnostics)",
                snapshot.diagnostics.len()
            )
            .dimmed()
        );
    }

    println!(
        "\n{} {:.2}s",
        "Loaded in".bright_cyan(),
        summary.load_time.as_secs_f64()
    );

    info!(
        "Dashboard completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Month the water card shows: the explicit flag, else the latest month
/// present in the feed
fn selected_month(snapshot: &Snapshot, flag: Option<MonthKey>) -> Option<MonthKey> {
    flag.or_else(|| {
        let options = month_options(&snapshot.records, MonthKey::current());
        default_month(&options)
    })
}

/// Print the water overview card
fn print_water_card(snapshot: &Snapshot, name: Option<&str>, month_flag: Option<MonthKey>) {
    println!("\n{}", "💧 Water".bright_green().bold());

    let Some(month) = selected_month(snapshot, month_flag) else {
        println!("  {}", "No water records loaded".dimmed());
        return;
    };

    println!(
        "  {} {}",
        "Month:".bright_cyan(),
        month.label().bright_white()
    );

    if let Some(name) = name {
        print_household_lines(snapshot, name, month);
        return;
    }

    let months = monthly_water_usage(&snapshot.records);
    match months.iter().find(|row| row.month == month) {
        Some(row) => {
            let previous_total = months
                .iter()
                .find(|candidate| candidate.month.ordinal() + 1 == month.ordinal())
                .map(|candidate| candidate.total as f64);
            let movement = trend(Some(row.total as f64), previous_total);

            println!(
                "  {} {} units across {} households (avg {:.1}) {}",
                "Usage:".bright_cyan(),
                row.total.to_string().bright_white().bold(),
                row.user_count,
                row.average,
                paint_trend(&movement)
            );
            println!(
                "  {} {}",
                "Billed:".bright_cyan(),
                format_amount(bill_amount(Some(row.total)).unwrap_or(0.0))
                    .bright_white()
                    .bold()
            );
        }
        None => {
            println!("  {}", "No usable meter readings this month".dimmed());
        }
    }

    let totals = user_totals(&snapshot.records, Some(month));
    if !totals.is_empty() {
        println!("  {}", "Top households:".bright_cyan());
        for row in totals.iter().take(5) {
            println!(
                "    {:16} {:>6} units  {}",
                row.name,
                row.total,
                bill_display(Some(row.total))
            );
        }
    }
}

/// Print the spotlight lines for one household
fn print_household_lines(snapshot: &Snapshot, name: &str, month: MonthKey) {
    let record = snapshot
        .water()
        .find(|record| record.name == name && record.month == month);

    match record {
        Some(record) => {
            let movement = water_record_trend(&snapshot.records, record);

            println!(
                "  {} {}",
                "Household:".bright_cyan(),
                record.name.bright_white().bold()
            );
            match record.usage {
                Some(usage) if record.has_usage() => {
                    println!(
                        "  {} {} units",
                        "Usage:".bright_cyan(),
                        usage.to_string().bright_white().bold()
                    );
                }
                _ => println!("  {} {}", "Usage:".bright_cyan(), "-".dimmed()),
            }
            println!(
                "  {} {}",
                "Bill:".bright_cyan(),
                bill_display(record.usage).bright_white()
            );
            println!("  {} {}", "Trend:".bright_cyan(), paint_trend(&movement));
            println!(
                "  {} {}",
                "Status:".bright_cyan(),
                record.payment_status()
            );
        }
        None => {
            println!(
                "  {} no reading for {} in {}",
                "Household:".bright_cyan(),
                name,
                month.label()
            );
        }
    }
}

/// Print the electricity overview card
fn print_electricity_card(snapshot: &Snapshot) {
    println!("\n{}", "⚡ Electricity".bright_green().bold());

    let Some(latest) = latest_electricity(&snapshot.records) else {
        println!("  {}", "No electricity records loaded".dimmed());
        return;
    };

    let previous = previous_electricity(&snapshot.records, latest.month);
    let consumption_trend = trend(
        latest.power_consumption,
        previous.and_then(|previous| previous.power_consumption),
    );
    let cost_trend = trend(
        latest.cost_impact,
        previous.and_then(|previous| previous.cost_impact),
    );

    println!(
        "  {} {}",
        "Month:".bright_cyan(),
        latest.month.label().bright_white()
    );
    println!(
        "  {} {} {}",
        "Consumption:".bright_cyan(),
        figure_or_na(latest.power_consumption).bright_white().bold(),
        paint_trend(&consumption_trend)
    );
    println!(
        "  {} {}",
        "Reading:".bright_cyan(),
        figure_or_na(latest.electricity_reading).bright_white()
    );
    println!(
        "  {} {} {}",
        "Cost:".bright_cyan(),
        figure_or_na(latest.cost_impact).bright_white(),
        paint_trend(&cost_trend)
    );
    println!(
        "  {} {}",
        "Generation:".bright_cyan(),
        figure_or_na(latest.power_generation_cost).bright_white()
    );

    let points = electricity_chart_points(&snapshot.records);
    let window = trailing(&points, CHART_TRAILING_MONTHS);
    if window.len() > 1 {
        println!("  {}", "Recent months:".bright_cyan());
        for point in window {
            println!(
                "    {:14} {}",
                point.month.label(),
                format_amount(point.power_consumption)
            );
        }
    }
}
