//! # Innovation Dashboard CLI Module
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `dashboard` - Show every dashboard section (default)
//! - `pipeline` - Show the pipeline table, optionally filtered
//! - `stack` - Show the stack buckets
//! - `customers` - Show the customer-use table
//! - `experiment` - Show one experiment in detail
//! - `classify` - Classify a status string

mod commands;
pub mod render;

use crate::config::Config;
use clap::{Parser, Subcommand};
use innodash_core::DashboardError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Innovation Dashboard
///
/// Pipeline, stack and usage views over an experiments spreadsheet export.
#[derive(Parser, Debug)]
#[command(name = "innodash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Spreadsheet export to read: an http(s) URL or a JSON file
    #[arg(short = 'S', long, global = true)]
    pub source: Option<String>,

    /// Configuration file (default: innodash.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Fail when the source cannot be loaded instead of showing empty sections
    #[arg(long, global = true)]
    pub strict: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show every dashboard section
    Dashboard {
        /// Only show pipeline rows with this status
        #[arg(short, long)]
        status: Option<String>,

        /// Only show pipeline rows whose customers mention this name
        #[arg(short = 'C', long)]
        customer: Option<String>,
    },

    /// Show the pipeline table, most advanced first
    Pipeline {
        /// Only show rows with this status
        #[arg(short, long)]
        status: Option<String>,

        /// Only show rows whose customers mention this name
        #[arg(short = 'C', long)]
        customer: Option<String>,
    },

    /// Show the stack buckets
    Stack,

    /// Show experiments with usage data
    Customers,

    /// Show one experiment in detail
    Experiment {
        /// Experiment title (case-insensitive)
        title: String,
    },

    /// Classify a status string
    Classify {
        /// Status text, e.g. "hypothesis" or "wip"
        status: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), DashboardError> {
    let json_mode = cli.json_mode;
    let config = Config::load(cli.config.as_deref())?.with_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            cmd_serve(config.with_overrides(cli.source, host, port, cli.strict)).await
        }
        Some(Commands::Classify { status }) => cmd_classify(&status, json_mode),
        command => {
            let config = config.with_overrides(cli.source, None, None, cli.strict);
            let data = load_data(&config).await?;

            match command {
                Some(Commands::Pipeline { status, customer }) => {
                    cmd_pipeline(&data, json_mode, status, customer)
                }
                Some(Commands::Stack) => cmd_stack(&data, json_mode),
                Some(Commands::Customers) => cmd_customers(&data, json_mode),
                Some(Commands::Experiment { title }) => cmd_experiment(&data, json_mode, &title),
                Some(Commands::Dashboard { status, customer }) => {
                    cmd_dashboard(&data, json_mode, status, customer)
                }
                // No subcommand - show the dashboard by default
                _ => cmd_dashboard(&data, json_mode, None, None),
            }
        }
    }
}
