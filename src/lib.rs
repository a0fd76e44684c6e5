//! # dwh-etl
//!
//! Loads song-play event logs and song metadata from S3 into Amazon
//! Redshift, then reshapes them into a star schema for analytics.
//!
//! ## Flow
//!
//! ```text
//!  S3 log_data  ──COPY──▶ staging_events ─┐
//!                                         ├─INSERT ... SELECT─▶ songplays (fact)
//!  S3 song_data ──COPY──▶ staging_songs  ─┘                     users, songs,
//!                                                               artists, time
//! ```
//!
//! Every statement runs in its own transaction and is committed before the
//! next one starts. The first failure ends the run.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dwh_etl::{config::DwhConfig, pipeline::Pipeline, warehouse::RedshiftWarehouse, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = DwhConfig::from_file("dwh.yaml")?;
//!     let warehouse = RedshiftWarehouse::connect(&config.cluster).await?;
//!
//!     let mut pipeline = Pipeline::new(warehouse);
//!     pipeline.run_etl(&config).await?;
//!
//!     println!("{} rows", pipeline.stats().rows_affected);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Warehouse configuration
pub mod config;

/// Template interpolation for SQL
pub mod template;

/// Table DDL, COPY and INSERT statements
pub mod sql;

/// Warehouse connections
pub mod warehouse;

/// Sequential statement executor
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
