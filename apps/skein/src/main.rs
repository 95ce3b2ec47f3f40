//! # skein - HOMFLY Polynomial Calculator
//!
//! The main binary for the skein knot-diagram engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              apps/skein (THE BINARY)          │
//! │                                               │
//! │   ┌─────────────┐        ┌────────────────┐   │
//! │   │    CLI      │        │  Config / I/O  │   │
//! │   │   (clap)    │        │ (toml, json)   │   │
//! │   └──────┬──────┘        └───────┬────────┘   │
//! │          └───────────┬───────────┘            │
//! │                      ▼                        │
//! │              ┌───────────────┐                │
//! │              │  skein-core   │                │
//! │              │  (THE LOGIC)  │                │
//! │              └───────────────┘                │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! skein catalog trefoil -o trefoil.json
//! skein homfly -f trefoil.json --latex
//! skein batch -f a.json b.json --log results.csv
//! skein reduce -f kinked.json
//! ```

use clap::Parser;
use skein::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // SKEIN_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SKEIN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "skein=info,skein_core=warn".into());

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

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner to stderr so stdout stays machine-readable.
fn print_banner() {
    eprintln!(
        "skein v{} - knot diagram reduction and HOMFLY skein recursion",
        env!("CARGO_PKG_VERSION")
    );
}
