//! Pipeline types
//!
//! Phases of a run and the statistics collected while executing them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A group of statements executed together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Drop every table
    DropTables,
    /// Create every table
    CreateTables,
    /// COPY raw JSON from S3 into staging
    LoadStaging,
    /// Fill the star schema from staging
    InsertAnalytics,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::DropTables => "drop tables",
            Phase::CreateTables => "create tables",
            Phase::LoadStaging => "load staging",
            Phase::InsertAnalytics => "insert analytics",
        };
        f.write_str(s)
    }
}

/// Outcome of one executed statement
#[derive(Debug, Clone, Serialize)]
pub struct StatementReport {
    /// Phase the statement ran in
    pub phase: Phase,
    /// Statement name
    pub statement: String,
    /// Table the statement targets
    pub table: String,
    /// Rows affected as reported by the warehouse
    pub rows: u64,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

/// Statistics from a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    /// When the first phase started
    pub started_at: Option<DateTime<Utc>>,
    /// Statements committed
    pub statements_executed: usize,
    /// Sum of rows affected
    pub rows_affected: u64,
    /// Phases run to completion
    pub phases_completed: usize,
    /// Statements that failed (a run stops at the first)
    pub errors: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// One entry per committed statement
    pub statements: Vec<StatementReport>,
}

impl RunStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of the run, once
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Utc::now());
        }
    }

    /// Record a committed statement
    pub fn add_statement(&mut self, report: StatementReport) {
        self.statements_executed += 1;
        self.rows_affected += report.rows;
        self.statements.push(report);
    }

    /// Add a completed phase
    pub fn add_phase(&mut self) {
        self.phases_completed += 1;
    }

    /// Add an error
    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Add to the duration
    pub fn add_duration(&mut self, ms: u64) {
        self.duration_ms += ms;
    }

    /// Rows affected per table for one phase, in execution order
    pub fn rows_for(&self, phase: Phase) -> Vec<(&str, u64)> {
        self.statements
            .iter()
            .filter(|r| r.phase == phase)
            .map(|r| (r.table.as_str(), r.rows))
            .collect()
    }
}
