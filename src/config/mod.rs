//! Configuration loading and management
//!
//! Configuration is read from a YAML file (every key optional) and then
//! overridden by environment variables:
//!
//! - `CRM_BIND_ADDR` overrides `server.bind_addr`
//! - `CRM_DATABASE_URL` overrides `database.url`
//! - `CRM_GRAPHQL_URL` overrides `graphql_url`

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the YAML file to load
pub const CONFIG_PATH_ENV: &str = "CRM_CONFIG";

const BIND_ADDR_ENV: &str = "CRM_BIND_ADDR";
const DATABASE_URL_ENV: &str = "CRM_DATABASE_URL";
const GRAPHQL_URL_ENV: &str = "CRM_GRAPHQL_URL";

/// Longest accepted job interval: one year
pub const MAX_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;
/// Longest accepted heartbeat probe timeout
pub const MAX_TIMEOUT_SECS: u64 = 5 * 60;
/// Longest accepted reminder lookback: about ten years
pub const MAX_LOOKBACK_DAYS: i64 = 3650;

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the GraphQL server binds to
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Storage settings. Without a URL the in-memory store is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

/// Settings for the heartbeat job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    pub enabled: bool,
    pub log_path: String,
    pub interval_secs: u64,
    /// Probe the GraphQL endpoint with `{ hello }` on every beat
    pub check_endpoint: bool,
    pub timeout_secs: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_path: "/tmp/crm_heartbeat_log.txt".to_string(),
            interval_secs: 5 * 60,
            check_endpoint: true,
            timeout_secs: 5,
        }
    }
}

/// Settings for the low-stock restock job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestockConfig {
    pub enabled: bool,
    pub log_path: String,
    pub interval_secs: u64,
}

impl Default for RestockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_path: "/tmp/low_stock_updates_log.txt".to_string(),
            interval_secs: 12 * 60 * 60,
        }
    }
}

/// Settings for the order reminder job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderRemindersConfig {
    pub enabled: bool,
    pub log_path: String,
    pub interval_secs: u64,
    /// Orders dated within this many days count as pending
    pub lookback_days: i64,
}

impl Default for OrderRemindersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_path: "/tmp/order_reminders_log.txt".to_string(),
            interval_secs: 24 * 60 * 60,
            lookback_days: 7,
        }
    }
}

/// Settings for every scheduled job. A disabled job is left out of the
/// task table entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    pub heartbeat: HeartbeatConfig,
    pub restock: RestockConfig,
    pub order_reminders: OrderRemindersConfig,
}

/// Whether `crm serve` also runs the job scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub enabled: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Complete configuration for the CRM backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Endpoint the scheduled jobs send their GraphQL requests to
    pub graphql_url: String,
    pub jobs: JobsConfig,
    pub scheduler: SchedulerConfig,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            graphql_url: "http://127.0.0.1:8000/graphql".to_string(),
            jobs: JobsConfig::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl CrmConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Load the file named by `path` (or `CRM_CONFIG`), falling back to
    /// defaults when neither is set, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var(CONFIG_PATH_ENV).ok();
        let path = path.map(Path::to_path_buf).or(from_env.map(Into::into));

        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };

        let config = config.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides looked up by environment variable name
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup(BIND_ADDR_ENV) {
            self.server.bind_addr = addr;
        }
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database.url = Some(url);
        }
        if let Some(url) = lookup(GRAPHQL_URL_ENV) {
            self.graphql_url = url;
        }
        self
    }

    /// Reject values that would make a job spin, never fire or overflow
    /// its clock arithmetic
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jobs = &self.jobs;
        let durations = [
            ("jobs.heartbeat.interval_secs", jobs.heartbeat.interval_secs, MAX_INTERVAL_SECS),
            ("jobs.restock.interval_secs", jobs.restock.interval_secs, MAX_INTERVAL_SECS),
            (
                "jobs.order_reminders.interval_secs",
                jobs.order_reminders.interval_secs,
                MAX_INTERVAL_SECS,
            ),
            ("jobs.heartbeat.timeout_secs", jobs.heartbeat.timeout_secs, MAX_TIMEOUT_SECS),
        ];

        for (field, value, max) in durations {
            if value == 0 || value > max {
                return Err(invalid(
                    field,
                    value,
                    format!("must be between 1 and {}", max),
                ));
            }
        }

        let lookback = jobs.order_reminders.lookback_days;
        if !(0..=MAX_LOOKBACK_DAYS).contains(&lookback) {
            return Err(invalid(
                "jobs.order_reminders.lookback_days",
                lookback,
                format!("must be between 0 and {}", MAX_LOOKBACK_DAYS),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message,
    }
}

impl HeartbeatConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RestockConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl OrderRemindersConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
