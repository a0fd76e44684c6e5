//! A warehouse that only records what it was asked to run

use super::Warehouse;
use crate::error::Result;
use async_trait::async_trait;

/// Records every statement instead of executing it
#[derive(Debug, Default)]
pub struct DryRunWarehouse {
    executed: Vec<String>,
    echo: bool,
}

impl DryRunWarehouse {
    /// Create a silent dry-run warehouse
    pub fn new() -> Self {
        Self::default()
    }

    /// Print each statement to stdout as it is "executed"
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Statements received so far, in order
    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

#[async_trait]
impl Warehouse for DryRunWarehouse {
    async fn execute(&mut self, sql: &str) -> Result<u64> {
        if self.echo {
            println!("{};", sql.trim_end());
        }
        self.executed.push(sql.to_string());
        Ok(0)
    }

    async fn check(&mut self) -> Result<()> {
        Ok(())
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}
