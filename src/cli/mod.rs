//! CLI module
//!
//! Command-line interface for running the load.
//!
//! # Commands
//!
//! - `etl` - Load staging tables, then the analytics tables
//! - `load-staging` - COPY from S3 only
//! - `insert` - INSERT ... SELECT only
//! - `create-tables` - Drop and recreate every table
//! - `check` - Test connection to the cluster
//! - `print` - Show the rendered SQL

mod commands;
mod logging;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PrintPhase};
pub use logging::log_filter;
pub use runner::Runner;
