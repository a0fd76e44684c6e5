//! Sequential statement executor
//!
//! Runs each phase's statements in order against a single connection,
//! committing after every statement. The first failure stops the run and
//! is returned with the driver's error intact.
//!
//! # Overview
//!
//! - `create_tables` - drop then recreate every table
//! - `load_staging_tables` - COPY from S3 into staging
//! - `insert_tables` - INSERT ... SELECT into the star schema
//! - `run_etl` - load staging, then insert

mod types;

pub use types::{Phase, RunStats, StatementReport};

use crate::config::DwhConfig;
use crate::error::{Error, Result};
use crate::sql::{self, Statement};
use crate::warehouse::Warehouse;
use std::time::Instant;

/// Executes statement lists against a warehouse
pub struct Pipeline<W> {
    warehouse: W,
    stats: RunStats,
}

impl<W: Warehouse> Pipeline<W> {
    /// Create a pipeline over a connected warehouse
    pub fn new(warehouse: W) -> Self {
        Self {
            warehouse,
            stats: RunStats::new(),
        }
    }

    /// Get statistics
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Get the warehouse
    pub fn warehouse(&self) -> &W {
        &self.warehouse
    }

    /// Take back the warehouse and the collected statistics
    pub fn into_parts(self) -> (W, RunStats) {
        (self.warehouse, self.stats)
    }

    /// Execute statements in order, committing after each
    pub async fn run_phase(&mut self, phase: Phase, statements: &[Statement]) -> Result<()> {
        self.stats.start();
        let phase_start = Instant::now();
        tracing::info!(%phase, statements = statements.len(), "Starting phase");

        for stmt in statements {
            tracing::info!(%phase, statement = %stmt.name, "Executing");
            tracing::debug!("{}", stmt.sql);

            let start = Instant::now();
            let rows = match self.warehouse.execute(&stmt.sql).await {
                Ok(rows) => rows,
                Err(e) => {
                    self.stats.add_error();
                    self.stats.add_duration(phase_start.elapsed().as_millis() as u64);
                    tracing::error!(%phase, statement = %stmt.name, "Statement failed: {}", e);
                    return Err(Error::statement(phase.to_string(), &stmt.name, e));
                }
            };
            let duration_ms = start.elapsed().as_millis() as u64;

            tracing::debug!(statement = %stmt.name, rows, duration_ms, "Committed");
            self.stats.add_statement(StatementReport {
                phase,
                statement: stmt.name.clone(),
                table: stmt.table.to_string(),
                rows,
                duration_ms,
            });
        }

        self.stats.add_phase();
        self.stats.add_duration(phase_start.elapsed().as_millis() as u64);
        tracing::info!(%phase, "Phase complete");
        Ok(())
    }

    /// Drop every table, then create every table
    pub async fn create_tables(&mut self) -> Result<()> {
        self.run_phase(Phase::DropTables, &sql::drop_table_queries())
            .await?;
        self.run_phase(Phase::CreateTables, &sql::create_table_queries())
            .await
    }

    /// Load data from S3 into the staging tables
    pub async fn load_staging_tables(&mut self, config: &DwhConfig) -> Result<()> {
        let statements = sql::copy_table_queries(config)?;
        self.run_phase(Phase::LoadStaging, &statements).await
    }

    /// Load data from the staging tables into the analytics tables
    pub async fn insert_tables(&mut self) -> Result<()> {
        self.run_phase(Phase::InsertAnalytics, &sql::insert_table_queries())
            .await
    }

    /// Staging load followed by the analytics insert
    pub async fn run_etl(&mut self, config: &DwhConfig) -> Result<()> {
        self.load_staging_tables(config).await?;
        self.insert_tables().await
    }
}
