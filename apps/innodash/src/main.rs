//! # Innovation Dashboard
//!
//! The main binary of the Innovation Dashboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 apps/innodash (THE BINARY)               │
//! │                                                          │
//! │  ┌─────────────┐   ┌─────────────┐   ┌───────────────┐   │
//! │  │    CLI      │   │  HTTP API   │   │ Source Loader │   │
//! │  │   (clap)    │   │   (axum)    │   │  (reqwest)    │   │
//! │  └──────┬──────┘   └──────┬──────┘   └───────┬───────┘   │
//! │         └─────────────────┼──────────────────┘           │
//! │                           ▼                              │
//! │                  ┌────────────────┐                      │
//! │                  │ innodash-core  │                      │
//! │                  │  (THE LOGIC)   │                      │
//! │                  └────────────────┘                      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Show the dashboard for an export
//! innodash --source ./innovation.json
//!
//! # Filter the pipeline
//! innodash -S https://example.com/innovation.json pipeline --status hypothesis
//!
//! # Start the HTTP server
//! innodash -S ./innovation.json serve --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use innodash::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // INNODASH_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("INNODASH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "innodash=info,tower_http=debug".into());

    // Logs go to stderr so text and JSON output on stdout stay clean.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ╦╔╗╔╔╗╔╔═╗╔╦╗╔═╗╔═╗╦ ╦
  ║║║║║║║║ ║ ║║╠═╣╚═╗╠═╣
  ╩╝╚╝╝╚╝╚═╝═╩╝╩ ╩╚═╝╩ ╩

  Innovation Dashboard v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
