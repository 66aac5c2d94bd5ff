//! Command-line argument definitions for the meter dashboard
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Every command reads the same two feeds, so the feed endpoint and logging
//! flags are shared through [`FeedArgs`].

use crate::app::models::MonthKey;
use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the meter dashboard
///
/// Fetches published water and electricity meter feeds, normalizes their
/// loosely formatted CSV into typed records, and renders bills, trends, and
/// aggregates as dashboard-style reports.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "meter-dashboard",
    version,
    about = "Normalize published meter feeds into dashboard tables and reports",
    long_about = "Fetches two published CSV feeds (per-household water meter readings and \
                  monthly electricity figures), normalizes their loosely formatted text into \
                  typed records, and renders fixed-tariff bills, month-over-month trends, and \
                  per-month and per-user aggregates in human, JSON, or CSV format."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the meter dashboard
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show the combined water and electricity overview (default command)
    Dashboard(DashboardArgs),
    /// Render the water usage table with bills and payment status
    Water(WaterArgs),
    /// Render the monthly electricity figures table
    Electricity(ElectricityArgs),
    /// Render per-month water usage aggregates
    Months(MonthsArgs),
    /// Render per-user water usage totals
    Users(UsersArgs),
}

/// Feed endpoint and logging flags shared by every command
#[derive(Debug, Clone, Parser)]
pub struct FeedArgs {
    /// Water feed URL
    ///
    /// Overrides both the compiled-in default and the WATER_FEED_URL
    /// environment variable.
    #[arg(long = "water-url", value_name = "URL", help = "Water feed URL override")]
    pub water_url: Option<String>,

    /// Electricity feed URL
    ///
    /// Overrides both the compiled-in default and the ELECTRICITY_FEED_URL
    /// environment variable.
    #[arg(
        long = "electricity-url",
        value_name = "URL",
        help = "Electricity feed URL override"
    )]
    pub electricity_url: Option<String>,

    /// Request timeout in seconds for each feed fetch
    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        help = "Request timeout in seconds for each feed fetch"
    )]
    pub timeout_secs: u64,

    /// Disable the cache-busting query parameter
    ///
    /// By default every request carries a timestamp parameter so republished
    /// sheets are never served from a stale intermediary cache.
    #[arg(
        long = "no-cache-bust",
        help = "Fetch feed URLs verbatim without a cache-busting parameter"
    )]
    pub no_cache_bust: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the dashboard command (combined overview)
#[derive(Debug, Clone, Parser)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Household to spotlight in the water card
    ///
    /// If not specified, the water card shows the monthly aggregate across
    /// all households.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Household to spotlight in the water card"
    )]
    pub name: Option<String>,

    /// Billing month to show (MM-YYYY)
    ///
    /// If not specified, the latest month present in the water feed is used.
    #[arg(
        short = 'm',
        long = "month",
        value_name = "MM-YYYY",
        help = "Billing month to show (defaults to the latest month in the feed)"
    )]
    pub month: Option<MonthKey>,
}

/// Arguments for the water command (usage and billing table)
#[derive(Debug, Clone, Parser)]
pub struct WaterArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Filter rows to one household (exact match)
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Filter rows to one household (exact match)"
    )]
    pub name: Option<String>,

    /// Filter rows to one billing month (MM-YYYY)
    #[arg(
        short = 'm',
        long = "month",
        value_name = "MM-YYYY",
        help = "Filter rows to one billing month"
    )]
    pub month: Option<MonthKey>,

    /// Free-text search across names, month labels, usage, and bills
    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help = "Free-text search across names, month labels, usage, and bills"
    )]
    pub search: Option<String>,

    /// Output format for the water report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the water report"
    )]
    pub output_format: OutputFormat,

    /// Output file for the water report
    ///
    /// If not specified, outputs to stdout
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Output file for the water report"
    )]
    pub output_file: Option<PathBuf>,

    /// Include skipped-row diagnostics in the report
    ///
    /// Lists every feed row that failed normalization with its row number
    /// and reason. Included in human and JSON output.
    #[arg(
        long = "diagnostics",
        help = "Include skipped-row diagnostics in the report"
    )]
    pub diagnostics: bool,
}

/// Arguments for the electricity command (monthly figures table)
#[derive(Debug, Clone, Parser)]
pub struct ElectricityArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Filter rows to one month (MM-YYYY)
    #[arg(
        short = 'm',
        long = "month",
        value_name = "MM-YYYY",
        help = "Filter rows to one month"
    )]
    pub month: Option<MonthKey>,

    /// Free-text search across month labels and figures
    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help = "Free-text search across month labels and figures"
    )]
    pub search: Option<String>,

    /// Output format for the electricity report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the electricity report"
    )]
    pub output_format: OutputFormat,

    /// Output file for the electricity report
    ///
    /// If not specified, outputs to stdout
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Output file for the electricity report"
    )]
    pub output_file: Option<PathBuf>,

    /// Show a trailing consumption chart instead of the table
    ///
    /// Charts the most recent months of power consumption with missing
    /// figures flattened to zero.
    #[arg(long = "chart", help = "Show a trailing consumption chart")]
    pub chart: bool,
}

/// Arguments for the months command (per-month aggregates)
#[derive(Debug, Clone, Parser)]
pub struct MonthsArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Limit output to the most recent N months
    #[arg(
        short = 't',
        long = "trailing",
        value_name = "COUNT",
        help = "Limit output to the most recent N months"
    )]
    pub trailing: Option<usize>,

    /// Output format for the months report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the months report"
    )]
    pub output_format: OutputFormat,

    /// Output file for the months report
    ///
    /// If not specified, outputs to stdout
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Output file for the months report"
    )]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the users command (per-user totals)
#[derive(Debug, Clone, Parser)]
pub struct UsersArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Restrict totals to one billing month (MM-YYYY)
    ///
    /// If not specified, totals cover every month in the feed.
    #[arg(
        short = 'm',
        long = "month",
        value_name = "MM-YYYY",
        help = "Restrict totals to one billing month"
    )]
    pub month: Option<MonthKey>,

    /// Output format for the users report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the users report"
    )]
    pub output_format: OutputFormat,

    /// Output file for the users report
    ///
    /// If not specified, outputs to stdout
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Output file for the users report"
    )]
    pub output_file: Option<PathBuf>,
}

/// Output format options for rendered reports
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl FeedArgs {
    /// Validate the shared feed flags for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.water_url {
            if url.trim().is_empty() {
                return Err(Error::configuration(
                    "Water feed URL cannot be empty".to_string(),
                ));
            }
        }

        if let Some(url) = &self.electricity_url {
            if url.trim().is_empty() {
                return Err(Error::configuration(
                    "Electricity feed URL cannot be empty".to_string(),
                ));
            }
        }

        if self.timeout_secs == 0 {
            return Err(Error::configuration(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show the fetch spinner (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl Default for FeedArgs {
    fn default() -> Self {
        Self {
            water_url: None,
            electricity_url: None,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            no_cache_bust: false,
            verbose: 0,
            quiet: false,
        }
    }
}

impl DashboardArgs {
    /// Validate the dashboard command arguments
    pub fn validate(&self) -> Result<()> {
        self.feed.validate()
    }
}

impl WaterArgs {
    /// Validate the water command arguments
    pub fn validate(&self) -> Result<()> {
        self.feed.validate()?;
        validate_output_file(&self.output_file)
    }
}

impl ElectricityArgs {
    /// Validate the electricity command arguments
    pub fn validate(&self) -> Result<()> {
        self.feed.validate()?;
        validate_output_file(&self.output_file)
    }
}

impl MonthsArgs {
    /// Validate the months command arguments
    pub fn validate(&self) -> Result<()> {
        self.feed.validate()?;

        if self.trailing == Some(0) {
            return Err(Error::configuration(
                "Trailing month count must be at least 1".to_string(),
            ));
        }

        validate_output_file(&self.output_file)
    }
}

impl UsersArgs {
    /// Validate the users command arguments
    pub fn validate(&self) -> Result<()> {
        self.feed.validate()?;
        validate_output_file(&self.output_file)
    }
}

/// Validate that the output file's directory exists if one was specified
fn validate_output_file(output_file: &Option<PathBuf>) -> Result<()> {
    if let Some(output_file) = output_file {
        if let Some(parent) = output_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::configuration(format!(
                    "Output file directory does not exist: {}",
                    parent.display()
                )));
            }
        }
    }

    Ok(())
}
