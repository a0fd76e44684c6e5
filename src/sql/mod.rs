//! Statement lists for each phase of the load
//!
//! # Overview
//!
//! - `drop_table_queries` / `create_table_queries` - (re)build every table
//! - `copy_table_queries` - bulk-load raw JSON from S3 into staging tables
//! - `insert_table_queries` - populate the star schema from staging
//!
//! The order of each list matters: the fact table references every
//! dimension table, so dimensions are created and filled first.

mod queries;

use crate::config::DwhConfig;
use crate::error::Result;
use crate::template;
use serde::Serialize;
use std::fmt;

/// What a statement does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Drop,
    Create,
    Copy,
    Insert,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatementKind::Drop => "drop",
            StatementKind::Create => "create",
            StatementKind::Copy => "copy",
            StatementKind::Insert => "insert",
        };
        f.write_str(s)
    }
}

/// A single SQL statement, ready to execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// Identifier used in logs and errors (e.g. `staging_events_copy`)
    pub name: String,
    /// Table the statement targets
    pub table: &'static str,
    /// What the statement does
    pub kind: StatementKind,
    /// SQL text
    pub sql: String,
}

impl Statement {
    fn new(table: &'static str, kind: StatementKind, sql: impl Into<String>) -> Self {
        Self {
            name: format!("{table}_{kind}"),
            table,
            kind,
            sql: sql.into(),
        }
    }
}

/// Drop every table, staging included
pub fn drop_table_queries() -> Vec<Statement> {
    use queries::{
        ARTISTS_DROP, SONGPLAYS_DROP, SONGS_DROP, STAGING_EVENTS_DROP, STAGING_SONGS_DROP,
        TIME_DROP, USERS_DROP,
    };

    [
        ("staging_events", STAGING_EVENTS_DROP),
        ("staging_songs", STAGING_SONGS_DROP),
        ("songplays", SONGPLAYS_DROP),
        ("users", USERS_DROP),
        ("songs", SONGS_DROP),
        ("artists", ARTISTS_DROP),
        ("time", TIME_DROP),
    ]
    .into_iter()
    .map(|(table, sql)| Statement::new(table, StatementKind::Drop, sql))
    .collect()
}

/// Create every table; dimensions before the fact table
pub fn create_table_queries() -> Vec<Statement> {
    use queries::{
        ARTISTS_CREATE, SONGPLAYS_CREATE, SONGS_CREATE, STAGING_EVENTS_CREATE,
        STAGING_SONGS_CREATE, TIME_CREATE, USERS_CREATE,
    };

    [
        ("staging_events", STAGING_EVENTS_CREATE),
        ("staging_songs", STAGING_SONGS_CREATE),
        ("users", USERS_CREATE),
        ("artists", ARTISTS_CREATE),
        ("songs", SONGS_CREATE),
        ("time", TIME_CREATE),
        ("songplays", SONGPLAYS_CREATE),
    ]
    .into_iter()
    .map(|(table, sql)| Statement::new(table, StatementKind::Create, sql))
    .collect()
}

/// COPY statements loading S3 data into the staging tables
pub fn copy_table_queries(config: &DwhConfig) -> Result<Vec<Statement>> {
    let ctx = config.template_context();

    [
        ("staging_events", queries::STAGING_EVENTS_COPY),
        ("staging_songs", queries::STAGING_SONGS_COPY),
    ]
    .into_iter()
    .map(|(table, tmpl)| {
        let sql = template::render_sql(tmpl, &ctx)?;
        Ok(Statement::new(table, StatementKind::Copy, sql))
    })
    .collect()
}

/// INSERT ... SELECT statements filling the star schema from staging
pub fn insert_table_queries() -> Vec<Statement> {
    use queries::{ARTISTS_INSERT, SONGPLAYS_INSERT, SONGS_INSERT, TIME_INSERT, USERS_INSERT};

    [
        ("users", USERS_INSERT),
        ("artists", ARTISTS_INSERT),
        ("songs", SONGS_INSERT),
        ("time", TIME_INSERT),
        ("songplays", SONGPLAYS_INSERT),
    ]
    .into_iter()
    .map(|(table, sql)| Statement::new(table, StatementKind::Insert, sql))
    .collect()
}

#[cfg(test)]
mod tests;
