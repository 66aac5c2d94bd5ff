use clap::Parser;
use meter_dashboard::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        // Run the main command, aborting cleanly on Ctrl+C
        tokio::select! {
            result = commands::run(args) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(meter_dashboard::Error::interrupted(
                    "Load interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(_summary) => {
            // Success - the report has already been emitted by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Meter Dashboard - Utility Feed Normalizer");
    println!("=========================================");
    println!();
    println!("Fetch published water and electricity meter feeds, normalize their");
    println!("loosely formatted CSV into typed records, and render bills, trends,");
    println!("and aggregates as dashboard-style reports.");
    println!();
    println!("USAGE:");
    println!("    meter-dashboard <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    dashboard      Show the combined water and electricity overview");
    println!("    water          Render the water usage table with bills and status");
    println!("    electricity    Render the monthly electricity figures table");
    println!("    months         Render per-month water usage aggregates");
    println!("    users          Render per-user water usage totals");
    println!("    help           Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Combined overview of the latest month:");
    println!("    meter-dashboard dashboard");
    println!();
    println!("    # One household's water usage for March 2024:");
    println!("    meter-dashboard water --name Jane --month 03-2024");
    println!();
    println!("    # Monthly aggregates for the last four months as JSON:");
    println!("    meter-dashboard months --trailing 4 --format json");
    println!();
    println!("    # Electricity consumption chart from a custom feed:");
    println!("    meter-dashboard electricity --chart --electricity-url <URL>");
    println!();
    println!("For detailed help on any command, use:");
    println!("    meter-dashboard <COMMAND> --help");
}
