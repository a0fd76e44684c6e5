//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Load song-play logs from S3 into a Redshift star schema
#[derive(Parser, Debug)]
#[command(name = "dwh-etl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true, default_value = "dwh.yaml")]
    pub config: PathBuf,

    /// Inline config JSON (takes precedence over --config)
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Print statements instead of executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Verbose output (logs full SQL)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Load staging tables from S3, then fill the analytics tables
    Etl,

    /// COPY raw JSON from S3 into the staging tables
    LoadStaging,

    /// Fill the analytics tables from the staging tables
    Insert,

    /// Drop and recreate every table
    CreateTables,

    /// Test the connection to the cluster
    Check,

    /// Print the rendered SQL without connecting
    Print {
        /// Which statements to print
        #[arg(long, default_value = "all")]
        phase: PrintPhase,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Statement groups for `print`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PrintPhase {
    All,
    Drop,
    Create,
    Copy,
    Insert,
}
