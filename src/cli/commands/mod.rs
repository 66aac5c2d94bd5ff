//! Command implementations for the meter dashboard CLI
//!
//! This module contains the main command execution logic, report rendering,
//! and error handling for the CLI interface. Each command is implemented in
//! its own module for better organization and maintainability.

pub mod dashboard;
pub mod electricity;
pub mod months;
pub mod shared;
pub mod users;
pub mod water;

// Re-export main types for easy access
pub use shared::LoadSummary;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the meter dashboard
///
/// This function dispatches to the appropriate subcommand handler based on CLI args.
/// Each command is implemented in its own module:
/// - `dashboard`: Combined water and electricity console overview
/// - `water`: Usage and billing table with filters and diagnostics
/// - `electricity`: Monthly figures table and trailing consumption chart
/// - `months`: Per-month water usage aggregates
/// - `users`: Per-user water usage totals
pub async fn run(args: Args) -> Result<LoadSummary> {
    match args.get_command() {
        Commands::Dashboard(dashboard_args) => dashboard::run_dashboard(dashboard_args).await,
        Commands::Water(water_args) => water::run_water(water_args).await,
        Commands::Electricity(electricity_args) => {
            electricity::run_electricity(electricity_args).await
        }
        Commands::Months(months_args) => months::run_months(months_args).await,
        Commands::Users(users_args) => users::run_users(users_args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_summary_re_export() {
        // Verify that LoadSummary is properly re-exported
        let summary = LoadSummary::default();
        assert_eq!(summary.water_rows, 0);
        assert!(!summary.is_degraded());
    }
}
