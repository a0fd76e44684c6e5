//! Warehouse configuration
//!
//! Connection details for the cluster, the IAM role Redshift assumes when
//! reading from S3, and the S3 locations of the raw JSON. Loaded from YAML
//! or inline JSON.

use crate::error::{Error, Result};
use crate::template::TemplateContext;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DwhConfig {
    /// Cluster connection
    pub cluster: ClusterConfig,

    /// Role used by COPY to read from S3
    pub iam_role: IamRoleConfig,

    /// Source data locations
    pub s3: S3Config,

    /// COPY tuning
    #[serde(default)]
    pub copy: CopyConfig,
}

impl DwhConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.normalized().validated()
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.normalized().validated()
    }

    /// Check that every required field is present
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("cluster.host", &self.cluster.host),
            ("cluster.db_name", &self.cluster.db_name),
            ("cluster.db_user", &self.cluster.db_user),
            ("cluster.db_password", &self.cluster.db_password),
            ("iam_role.arn", &self.iam_role.arn),
            ("s3.log_data", &self.s3.log_data),
            ("s3.log_jsonpath", &self.s3.log_jsonpath),
            ("s3.song_data", &self.s3.song_data),
            ("s3.region", &self.s3.region),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::missing_field(field));
            }
        }

        if self.cluster.db_port == 0 {
            return Err(Error::invalid_value("cluster.db_port", "must be non-zero"));
        }

        Ok(())
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Strip the surrounding quotes that values copied from a `dwh.cfg` carry
    fn normalized(mut self) -> Self {
        for value in [
            &mut self.cluster.host,
            &mut self.cluster.db_name,
            &mut self.cluster.db_user,
            &mut self.cluster.db_password,
            &mut self.iam_role.arn,
            &mut self.s3.log_data,
            &mut self.s3.log_jsonpath,
            &mut self.s3.song_data,
            &mut self.s3.region,
        ] {
            *value = strip_quotes(value.trim()).to_string();
        }
        self
    }

    /// Variables available to SQL templates
    pub fn template_context(&self) -> TemplateContext {
        TemplateContext::with_vars(json!({
            "iam_role": {
                "arn": self.iam_role.arn,
                "credentials": format!("aws_iam_role={}", self.iam_role.arn),
            },
            "s3": {
                "log_data": self.s3.log_data,
                "log_jsonpath": self.s3.log_jsonpath,
                "song_data": self.s3.song_data,
                "region": self.s3.region,
            },
            "copy": { "max_error": self.copy.max_error },
        }))
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

// ============================================================================
// Cluster
// ============================================================================

/// Cluster connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Cluster endpoint
    pub host: String,

    /// Database name
    pub db_name: String,

    /// Database user
    pub db_user: String,

    /// Database password
    pub db_password: String,

    /// Port (Redshift listens on 5439)
    #[serde(default = "default_port")]
    pub db_port: u16,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_port() -> u16 {
    5439
}

fn default_connect_timeout() -> u64 {
    30
}

impl ClusterConfig {
    /// Driver configuration for this cluster
    pub fn pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.db_port)
            .dbname(&self.db_name)
            .user(&self.db_user)
            .password(&self.db_password)
            .application_name(crate::NAME)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs));
        config
    }

    /// Connection string for logs, with the password masked
    pub fn display_dsn(&self) -> String {
        format!(
            "postgresql://{}:****@{}:{}/{}",
            self.db_user, self.host, self.db_port, self.db_name
        )
    }
}

// ============================================================================
// IAM / S3 / COPY
// ============================================================================

/// IAM role settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IamRoleConfig {
    /// Role ARN passed to COPY as `aws_iam_role=<arn>`
    pub arn: String,
}

/// Source data locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// Prefix of the event log files
    pub log_data: String,

    /// JSONPaths file mapping event log fields to staging columns
    pub log_jsonpath: String,

    /// Prefix of the song metadata files
    pub song_data: String,

    /// Region of the source bucket
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "us-west-2".to_string()
}

/// COPY settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyConfig {
    /// Rows a COPY may reject before failing (rejections land in stl_load_errors)
    #[serde(default = "default_max_error")]
    pub max_error: u32,
}

fn default_max_error() -> u32 {
    1000
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            max_error: default_max_error(),
        }
    }
}
