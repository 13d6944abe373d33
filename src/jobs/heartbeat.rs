//! Liveness heartbeat

use super::ScheduledJob;
use super::client::GraphQLClient;
use super::log_file;
use crate::config::HeartbeatConfig;
use crate::core::error::JobError;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

const HELLO_QUERY: &str = "{ hello }";

/// Appends `"<DD/MM/YYYY-HH:MM:SS> CRM is alive"` to its log, optionally
/// followed by the result of a `{ hello }` probe.
pub struct Heartbeat {
    probe: Option<GraphQLClient>,
    log_path: PathBuf,
    interval: Duration,
}

impl Heartbeat {
    pub fn from_config(config: &HeartbeatConfig, graphql_url: &str) -> Result<Self, JobError> {
        let probe = if config.check_endpoint {
            Some(GraphQLClient::with_timeout(graphql_url, config.timeout())?)
        } else {
            None
        };

        Ok(Self {
            probe,
            log_path: PathBuf::from(&config.log_path),
            interval: config.interval(),
        })
    }

    /// Build the heartbeat line (without the trailing newline)
    pub async fn message(&self) -> String {
        let mut message = alive_line(Local::now());

        if let Some(probe) = &self.probe {
            message.push_str(&probe_suffix(probe.send(HELLO_QUERY, None).await));
        }

        message
    }
}

#[async_trait]
impl ScheduledJob for Heartbeat {
    fn name(&self) -> &'static str {
        "heartbeat"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run(&self) -> Result<String, JobError> {
        let message = self.message().await;
        log_file::append(&self.log_path, &format!("{}\n", message)).await?;
        Ok(message)
    }
}

fn alive_line(now: DateTime<Local>) -> String {
    format!("{} CRM is alive", now.format("%d/%m/%Y-%H:%M:%S"))
}

/// A 200 response without `data.hello` adds nothing.
fn probe_suffix(response: Result<Value, JobError>) -> String {
    match response {
        Ok(body) => match body.pointer("/data/hello") {
            Some(Value::String(hello)) => format!(" - GraphQL endpoint responsive: {}", hello),
            Some(hello) if !hello.is_null() => format!(" - GraphQL endpoint responsive: {}", hello),
            _ => String::new(),
        },
        Err(JobError::Status { status, .. }) => {
            format!(" - GraphQL endpoint returned status {}", status)
        }
        Err(e) => format!(" - GraphQL endpoint check failed: {}", e),
    }
}
