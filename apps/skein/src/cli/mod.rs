//! # Skein CLI Module
//!
//! This module implements the CLI interface for skein.
//!
//! ## Available Commands
//!
//! - `homfly` - Compute the HOMFLY polynomial of one diagram file
//! - `batch` - Compute many diagrams and append rows to the results log
//! - `reduce` - Eliminate Reidemeister-I kinks and report the result
//! - `components` - List the closed strands of a diagram
//! - `catalog` - Write a standard diagram as JSON

mod commands;

use crate::config::SkeinConfig;
use clap::{Parser, Subcommand};
use skein_core::SkeinError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// skein - HOMFLY polynomial calculator
///
/// Reduces knot diagrams and solves the skein relation recursively.
#[derive(Parser, Debug)]
#[command(name = "skein")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the recursion depth bound
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the HOMFLY polynomial of a diagram
    Homfly {
        /// Path to the diagram file (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Print the polynomial in LaTeX form
        #[arg(long)]
        latex: bool,
    },

    /// Compute many diagrams and append `<name>,<polynomial>` rows
    Batch {
        /// Diagram files (JSON)
        #[arg(short, long, num_args = 1.., required = true)]
        file: Vec<PathBuf>,

        /// Results log to append to
        #[arg(short, long)]
        log: Option<PathBuf>,
    },

    /// Eliminate Reidemeister-I kinks
    Reduce {
        /// Path to the diagram file (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Stop after this many eliminations
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List the closed strands of a diagram
    Components {
        /// Path to the diagram file (JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Write a standard diagram as JSON
    Catalog {
        /// Diagram name (unknot, unlink-<n>, trefoil, figure-eight, hopf, torus-2-<n>)
        name: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), SkeinError> {
    let config = SkeinConfig::load(cli.config.as_deref())?.with_max_depth(cli.max_depth);
    let json_mode = cli.json_mode;
    let verbose = cli.verbose;

    match cli.command {
        Commands::Homfly { file, latex } => {
            let latex = latex || config.output.latex;
            cmd_homfly(&config, json_mode, verbose, &file, latex)
        }
        Commands::Batch { file, log } => {
            let log = log.or_else(|| config.output.results_log.clone());
            cmd_batch(&config, json_mode, &file, log.as_deref())
        }
        Commands::Reduce { file, limit } => cmd_reduce(json_mode, &file, limit),
        Commands::Components { file } => cmd_components(json_mode, &file),
        Commands::Catalog { name, output } => cmd_catalog(&name, output.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "skein",
            "homfly",
            "-f",
            "knot.json",
            "--json-mode",
            "--max-depth",
            "32",
        ])
        .expect("parse");
        assert!(cli.json_mode);
        assert_eq!(cli.max_depth, Some(32));
        assert!(matches!(cli.command, Commands::Homfly { latex: false, .. }));
    }

    #[test]
    fn batch_takes_many_files() {
        let cli = Cli::try_parse_from(["skein", "batch", "-f", "a.json", "b.json", "-l", "out.csv"])
            .expect("parse");
        let Commands::Batch { file, log } = cli.command else {
            unreachable!("parsed as batch");
        };
        assert_eq!(file.len(), 2);
        assert_eq!(log, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["skein"]).is_err());
    }
}
