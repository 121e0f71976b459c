//! Rotaly CLI - inspect the booking backend from a terminal
//!
//! Reads the same `SUPABASE_*` environment as the web app. Without it every
//! read comes back empty instead of failing.

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use rotaly_api_client::RotalyClient;
use std::process::ExitCode;

mod commands;
mod output;

use commands::{get, list, status};

/// Command-line access to the Rotaly booking backend
#[derive(Parser)]
#[command(name = "rotaly")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether a backend is configured and where it lives
    Status,

    /// List the newest rows of a table
    List {
        /// Table to read
        #[arg(value_enum)]
        resource: Resource,

        #[command(flatten)]
        filters: list::ListArgs,
    },

    /// Fetch a single row by id
    Get {
        /// Table to read
        #[arg(value_enum)]
        resource: Resource,

        /// Row id
        id: String,
    },
}

/// Output format for command results
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Tables reachable from the CLI
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    Bookings,
    Properties,
    Users,
    #[value(alias = "hotel-applications")]
    Applications,
    #[value(alias = "support-tickets")]
    Tickets,
    Reviews,
}

impl Resource {
    /// Backend table name
    pub fn table(self) -> &'static str {
        match self {
            Self::Bookings => "bookings",
            Self::Properties => "properties",
            Self::Users => "users",
            Self::Applications => "hotel_applications",
            Self::Tickets => "support_tickets",
            Self::Reviews => "reviews",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        let config = rotaly_telemetry::TelemetryConfig::verbose();
        if let Err(e) = rotaly_telemetry::init_with_config(&config) {
            eprintln!("{} {}", "Warning:".yellow().bold(), e);
        }
    }

    let result = match RotalyClient::new() {
        Ok(client) => match cli.command {
            Commands::Status => status::run(&client, cli.format),
            Commands::List { resource, filters } => {
                list::run(&client, resource, &filters, cli.format).await
            }
            Commands::Get { resource, id } => get::run(&client, resource, &id, cli.format).await,
        },
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
