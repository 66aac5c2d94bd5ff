//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::app::models::{TrendDescriptor, TrendStyle};
use crate::app::services::feed_loader::{FeedStatus, HttpFeedSource, Snapshot, SnapshotLoader};
use crate::app::services::metrics::billing::format_amount;
use crate::cli::args::FeedArgs;
use crate::config::FeedConfig;
use crate::{Error, Result};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Load statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// Water records loaded
    pub water_rows: usize,
    /// Electricity records loaded
    pub electricity_rows: usize,
    /// Feed rows skipped during normalization
    pub rows_skipped: usize,
    /// Feeds that failed transport (0, 1, or 2)
    pub feeds_failed: usize,
    /// Total fetch-and-parse time
    pub load_time: Duration,
}

impl LoadSummary {
    /// Build a summary from an assembled snapshot
    pub fn from_snapshot(snapshot: &Snapshot, load_time: Duration) -> Self {
        let feeds_failed = [
            !snapshot.water_status.is_loaded(),
            !snapshot.electricity_status.is_loaded(),
        ]
        .iter()
        .filter(|failed| **failed)
        .count();

        Self {
            water_rows: snapshot.water().count(),
            electricity_rows: snapshot.electricity().count(),
            rows_skipped: snapshot.diagnostics.len(),
            feeds_failed,
            load_time,
        }
    }

    /// Whether any feed failed this load
    pub fn is_degraded(&self) -> bool {
        self.feeds_failed > 0
    }
}

/// Set up structured logging based on the shared feed flags
pub fn setup_logging(args: &FeedArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("meter_dashboard={}", log_level)));

    // Set up subscriber based on output format preference
    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Resolve feed configuration using layered settings (defaults -> env -> flags)
pub fn resolve_config(args: &FeedArgs) -> Result<FeedConfig> {
    let mut config = FeedConfig::from_env();

    if let Some(url) = &args.water_url {
        config.water_url = url.clone();
    }
    if let Some(url) = &args.electricity_url {
        config.electricity_url = url.clone();
    }
    config.request_timeout_secs = args.timeout_secs;
    if args.no_cache_bust {
        config.cache_bust = false;
    }

    config.validate()?;
    Ok(config)
}

/// Fetch both feeds and assemble a snapshot
pub async fn load_snapshot(args: &FeedArgs) -> Result<(Snapshot, LoadSummary)> {
    let config = resolve_config(args)?;
    let source = HttpFeedSource::new(config.request_timeout(), config.cache_bust)?;
    let mut loader = SnapshotLoader::new(config, source);

    let spinner = if args.show_progress() {
        Some(create_spinner("Fetching feeds..."))
    } else {
        None
    };

    let start_time = Instant::now();
    let snapshot = loader.load().await;
    let summary = LoadSummary::from_snapshot(&snapshot, start_time.elapsed());

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    info!(
        "Loaded {} water and {} electricity records in {:.2}s",
        summary.water_rows,
        summary.electricity_rows,
        summary.load_time.as_secs_f64()
    );

    Ok((snapshot, summary))
}

/// Print per-feed failure warnings for a degraded load
pub fn report_feed_failures(snapshot: &Snapshot) {
    if let FeedStatus::Failed { reason } = &snapshot.water_status {
        eprintln!("{} {}", "Water feed unavailable:".bright_red(), reason);
    }
    if let FeedStatus::Failed { reason } = &snapshot.electricity_status {
        eprintln!("{} {}", "Electricity feed unavailable:".bright_red(), reason);
    }
}

/// Create a fetch spinner with appropriate styling
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Write a rendered report to the output file, or print it to stdout
pub fn emit_report(output_file: &Option<PathBuf>, report: &str) -> Result<()> {
    match output_file {
        Some(path) => {
            std::fs::write(path, report).map_err(|e| {
                Error::io(format!("Failed to write report to {}", path.display()), e)
            })?;
            info!("Report written to: {}", path.display());
        }
        None => {
            println!("{}", report);
        }
    }

    Ok(())
}

/// Style a trend cell for terminal display
pub fn paint_trend(trend: &TrendDescriptor) -> ColoredString {
    let text = trend.display();
    match trend.style_hint {
        TrendStyle::Warning => text.as_str().bright_red(),
        TrendStyle::Positive => text.as_str().bright_green(),
        TrendStyle::Neutral => text.as_str().dimmed(),
    }
}

/// Format an optional figure, showing N/A for missing values
pub fn figure_or_na(value: Option<f64>) -> String {
    match value {
        Some(value) => format_amount(value),
        None => "N/A".to_string(),
    }
}

/// Escape CSV field values
pub fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{MonthKey, Record, WaterRecord};

    fn create_test_snapshot() -> Snapshot {
        let water = WaterRecord::new(
            "Jane".to_string(),
            MonthKey::normalize("01-2024").unwrap(),
            Some(10),
            Some(100.0),
        )
        .unwrap();

        Snapshot {
            records: vec![Record::Water(water)],
            diagnostics: Vec::new(),
            water_status: FeedStatus::Loaded { rows: 1 },
            electricity_status: FeedStatus::Failed {
                reason: "timeout".to_string(),
            },
        }
    }

    #[test]
    fn test_load_summary_default() {
        let summary = LoadSummary::default();
        assert_eq!(summary.water_rows, 0);
        assert_eq!(summary.feeds_failed, 0);
        assert!(!summary.is_degraded());
    }

    #[test]
    fn test_load_summary_from_snapshot() {
        let snapshot = create_test_snapshot();
        let summary = LoadSummary::from_snapshot(&snapshot, Duration::from_millis(250));

        assert_eq!(summary.water_rows, 1);
        assert_eq!(summary.electricity_rows, 0);
        assert_eq!(summary.rows_skipped, 0);
        assert_eq!(summary.feeds_failed, 1);
        assert!(summary.is_degraded());
    }

    #[test]
    fn test_resolve_config_applies_flag_overrides() {
        let args = FeedArgs {
            water_url: Some("https://example.com/water.csv".to_string()),
            electricity_url: None,
            timeout_secs: 10,
            no_cache_bust: true,
            verbose: 0,
            quiet: false,
        };

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.water_url, "https://example.com/water.csv");
        assert_eq!(config.request_timeout_secs, 10);
        assert!(!config.cache_bust);
    }

    #[test]
    fn test_resolve_config_rejects_bad_scheme() {
        let args = FeedArgs {
            water_url: Some("ftp://example.com/water.csv".to_string()),
            ..FeedArgs::default()
        };

        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("simple"), "simple");
        assert_eq!(csv_escape("with,comma"), "\"with,comma\"");
        assert_eq!(csv_escape("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(csv_escape("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_figure_or_na() {
        assert_eq!(figure_or_na(Some(1234.5)), "1,234.50");
        assert_eq!(figure_or_na(None), "N/A");
    }
}
