//! Warehouse access
//!
//! The pipeline only needs to run a statement and commit it, so the seam is
//! a small async trait:
//! - `RedshiftWarehouse` - a live cluster over the PostgreSQL wire protocol
//! - `DryRunWarehouse` - records statements without connecting

mod dry_run;
mod redshift;

pub use dry_run::DryRunWarehouse;
pub use redshift::RedshiftWarehouse;

use crate::error::Result;
use async_trait::async_trait;

/// A connection able to execute statements one at a time
#[async_trait]
pub trait Warehouse: Send {
    /// Execute one statement in its own transaction and commit it.
    ///
    /// Returns the number of rows the server reports as affected (0 for DDL).
    async fn execute(&mut self, sql: &str) -> Result<u64>;

    /// Verify the connection is usable
    async fn check(&mut self) -> Result<()>;

    /// Close the connection
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}
