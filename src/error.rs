//! Error types for dwh-etl
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! Database errors are wrapped, never rewritten, so the driver's message
//! reaches the operator verbatim.

use thiserror::Error;

/// The main error type for dwh-etl
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Template Errors
    // ============================================================================
    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable { variable: String },

    // ============================================================================
    // Warehouse Errors
    // ============================================================================
    #[error("Failed to connect to {dsn}: {source}")]
    Connection {
        dsn: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("{0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("{phase} failed at '{statement}': {source}")]
    Statement {
        phase: String,
        statement: String,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Wrap a failure of a single statement with the phase it belongs to
    pub fn statement(phase: impl Into<String>, statement: impl Into<String>, source: Error) -> Self {
        Self::Statement {
            phase: phase.into(),
            statement: statement.into(),
            source: Box::new(source),
        }
    }

    /// The underlying driver error, if this error came from the warehouse
    pub fn as_db_error(&self) -> Option<&tokio_postgres::Error> {
        match self {
            Error::Database(e) | Error::Connection { source: e, .. } => Some(e),
            Error::Statement { source, .. } => source.as_db_error(),
            _ => None,
        }
    }
}

/// Result type alias for dwh-etl
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}
