//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, PrintPhase};
use crate::config::DwhConfig;
use crate::error::{Error, Result, ResultExt};
use crate::pipeline::{Pipeline, RunStats};
use crate::sql::{self, Statement};
use crate::warehouse::{DryRunWarehouse, RedshiftWarehouse, Warehouse};
use std::fmt::Write as _;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match self.cli.command {
            Commands::Check => self.check(&config).await,
            Commands::Print { phase } => self.print(&config, phase),
            command => {
                let stats = if self.cli.dry_run {
                    let warehouse =
                        DryRunWarehouse::new().with_echo(self.cli.format == OutputFormat::Pretty);
                    run_command(command, warehouse, &config).await?
                } else {
                    let warehouse = RedshiftWarehouse::connect(&config.cluster).await?;
                    run_command(command, warehouse, &config).await?
                };
                self.emit_stats(&stats)
            }
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<DwhConfig> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return DwhConfig::from_json_str(json_str).context("Invalid --config-json");
        }
        DwhConfig::from_file(&self.cli.config)
    }

    /// Check connection
    async fn check(&self, config: &DwhConfig) -> Result<()> {
        if self.cli.dry_run {
            let dsn = config.cluster.display_dsn();
            println!("{}", check_report(self.cli.format, CheckStatus::DryRun, &dsn));
            return Ok(());
        }

        let mut warehouse = RedshiftWarehouse::connect(&config.cluster).await?;
        warehouse.check().await?;
        let dsn = warehouse.dsn().to_string();
        warehouse.close().await?;

        println!("{}", check_report(self.cli.format, CheckStatus::Succeeded, &dsn));
        Ok(())
    }

    /// Print rendered SQL
    fn print(&self, config: &DwhConfig, phase: PrintPhase) -> Result<()> {
        for stmt in statements_for(phase, config)? {
            match self.cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&stmt)?),
                OutputFormat::Pretty => println!("-- {}\n{};\n", stmt.name, stmt.sql.trim()),
            }
        }
        Ok(())
    }

    fn emit_stats(&self, stats: &RunStats) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(stats)?),
            OutputFormat::Pretty => print!("{}", format_stats(stats)),
        }
        Ok(())
    }
}

/// Outcome shown by `check`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckStatus {
    Succeeded,
    DryRun,
}

/// Render the result of `check` in the selected format
fn check_report(format: OutputFormat, status: CheckStatus, dsn: &str) -> String {
    match (format, status) {
        (OutputFormat::Json, CheckStatus::Succeeded) => {
            serde_json::json!({"status": "SUCCEEDED", "dsn": dsn}).to_string()
        }
        (OutputFormat::Json, CheckStatus::DryRun) => {
            serde_json::json!({"status": "DRY_RUN", "dsn": dsn}).to_string()
        }
        (OutputFormat::Pretty, CheckStatus::Succeeded) => format!("Connection OK: {dsn}"),
        (OutputFormat::Pretty, CheckStatus::DryRun) => format!("Dry run: would connect to {dsn}"),
    }
}

/// Run one pipeline command and close the warehouse, whether or not it failed
async fn run_command<W: Warehouse>(
    command: Commands,
    warehouse: W,
    config: &DwhConfig,
) -> Result<RunStats> {
    let mut pipeline = Pipeline::new(warehouse);

    let outcome = match command {
        Commands::Etl => pipeline.run_etl(config).await,
        Commands::LoadStaging => pipeline.load_staging_tables(config).await,
        Commands::Insert => pipeline.insert_tables().await,
        Commands::CreateTables => pipeline.create_tables().await,
        Commands::Check | Commands::Print { .. } => Err(Error::Other(format!(
            "{command:?} does not run the pipeline"
        ))),
    };

    let (warehouse, stats) = pipeline.into_parts();
    let closed = warehouse.close().await;

    // The statement failure is the one worth reporting
    outcome?;
    closed?;
    Ok(stats)
}

/// Statements printed by `print --phase`
fn statements_for(phase: PrintPhase, config: &DwhConfig) -> Result<Vec<Statement>> {
    let statements = match phase {
        PrintPhase::Drop => sql::drop_table_queries(),
        PrintPhase::Create => sql::create_table_queries(),
        PrintPhase::Copy => sql::copy_table_queries(config)?,
        PrintPhase::Insert => sql::insert_table_queries(),
        PrintPhase::All => {
            let mut all = sql::drop_table_queries();
            all.extend(sql::create_table_queries());
            all.extend(sql::copy_table_queries(config)?);
            all.extend(sql::insert_table_queries());
            all
        }
    };
    Ok(statements)
}

/// Human-readable run summary
fn format_stats(stats: &RunStats) -> String {
    let mut out = String::new();
    for report in &stats.statements {
        let _ = writeln!(
            out,
            "{:<20} {:<18} {:>10} rows {:>8} ms",
            report.statement,
            report.phase.to_string(),
            report.rows,
            report.duration_ms
        );
    }
    let _ = writeln!(
        out,
        "Executed {} statements in {} phases ({} rows) in {} ms",
        stats.statements_executed, stats.phases_completed, stats.rows_affected, stats.duration_ms
    );
    out
}
