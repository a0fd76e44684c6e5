//! Redshift connection via tokio-postgres
//!
//! Statements go through the simple query protocol: Redshift-only syntax
//! such as `COPY ... CREDENTIALS` is sent as-is, with no prepare step.

use super::Warehouse;
use crate::config::ClusterConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};

/// Live connection to a Redshift (or PostgreSQL) cluster
pub struct RedshiftWarehouse {
    client: Client,
    connection: JoinHandle<()>,
    dsn: String,
}

impl RedshiftWarehouse {
    /// Connect to the cluster
    pub async fn connect(cluster: &ClusterConfig) -> Result<Self> {
        let dsn = cluster.display_dsn();
        tracing::info!("Connecting to {}", dsn);

        let (client, connection) = cluster
            .pg_config()
            .connect(NoTls)
            .await
            .map_err(|source| Error::Connection {
                dsn: dsn.clone(),
                source,
            })?;

        let task_dsn = dsn.clone();
        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("Connection to {} failed: {}", task_dsn, e);
            }
        });

        Ok(Self {
            client,
            connection,
            dsn,
        })
    }

    /// Masked connection string of this connection
    pub fn dsn(&self) -> &str {
        &self.dsn
    }
}

#[async_trait]
impl Warehouse for RedshiftWarehouse {
    async fn execute(&mut self, sql: &str) -> Result<u64> {
        let tx = self.client.transaction().await?;
        let messages = tx.simple_query(sql).await?;
        tx.commit().await?;
        Ok(rows_affected(&messages))
    }

    async fn check(&mut self) -> Result<()> {
        self.client.simple_query("SELECT 1").await?;
        Ok(())
    }

    async fn close(self) -> Result<()> {
        drop(self.client);
        if let Err(e) = self.connection.await {
            tracing::warn!("Connection task for {} ended abnormally: {}", self.dsn, e);
        }
        tracing::debug!("Closed connection to {}", self.dsn);
        Ok(())
    }
}

/// Sum of the row counts reported by each completed command
fn rows_affected(messages: &[SimpleQueryMessage]) -> u64 {
    messages
        .iter()
        .map(|m| match m {
            SimpleQueryMessage::CommandComplete(n) => *n,
            _ => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_affected_empty() {
        assert_eq!(rows_affected(&[]), 0);
    }

    #[test]
    fn test_rows_affected_counts_completions() {
        let messages = vec![
            SimpleQueryMessage::CommandComplete(3),
            SimpleQueryMessage::CommandComplete(4),
        ];
        assert_eq!(rows_affected(&messages), 7);
    }
}
