//! Scheduled maintenance jobs
//!
//! Every job talks to the CRM through its public GraphQL endpoint and
//! appends its result to a log file. Jobs never propagate request failures:
//! those become log entries. Only a failure to write the log itself is
//! returned as an error.

pub mod client;
pub mod heartbeat;
pub mod log_file;
pub mod order_reminders;
pub mod restock;
pub mod scheduler;

pub use client::GraphQLClient;
pub use heartbeat::Heartbeat;
pub use order_reminders::OrderReminders;
pub use restock::Restock;
pub use scheduler::Scheduler;

use crate::config::CrmConfig;
use crate::core::error::JobError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A zero-argument job run on a fixed cadence
#[async_trait]
pub trait ScheduledJob: Send + Sync {
    /// Name used by `crm run-job` and in logs
    fn name(&self) -> &'static str;

    /// Time between two runs
    fn interval(&self) -> Duration;

    /// Run once and return a one-line summary
    async fn run(&self) -> Result<String, JobError>;
}

/// The registered jobs, in a fixed order
#[derive(Clone)]
pub struct TaskTable {
    jobs: Vec<Arc<dyn ScheduledJob>>,
}

impl TaskTable {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Heartbeat, restock and order reminders, configured from `config`.
    /// Jobs whose `enabled` flag is off are not registered.
    pub fn from_config(config: &CrmConfig) -> Result<Self, JobError> {
        let url = config.graphql_url.as_str();
        let jobs = &config.jobs;
        let mut table = Self::new();

        if jobs.heartbeat.enabled {
            table = table.with_job(Heartbeat::from_config(&jobs.heartbeat, url)?);
        }
        if jobs.restock.enabled {
            table = table.with_job(Restock::from_config(&jobs.restock, url)?);
        }
        if jobs.order_reminders.enabled {
            table = table.with_job(OrderReminders::from_config(&jobs.order_reminders, url)?);
        }

        Ok(table)
    }

    pub fn with_job(mut self, job: impl ScheduledJob + 'static) -> Self {
        self.jobs.push(Arc::new(job));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ScheduledJob>> {
        self.jobs.iter().find(|job| job.name() == name)
    }

    pub fn jobs(&self) -> &[Arc<dyn ScheduledJob>] {
        &self.jobs
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.jobs.iter().map(|job| job.name()).collect()
    }

    /// Run one job by name, once
    pub async fn run_once(&self, name: &str) -> Result<String, JobError> {
        let job = self
            .get(name)
            .ok_or_else(|| JobError::UnknownJob(name.to_string()))?;
        job.run().await
    }
}

impl Default for TaskTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_table_from_config() {
        let table = TaskTable::from_config(&CrmConfig::default()).unwrap();

        assert_eq!(table.names(), vec!["heartbeat", "restock", "order_reminders"]);
        assert_eq!(
            table.get("restock").unwrap().interval(),
            Duration::from_secs(12 * 60 * 60)
        );
        assert!(table.get("cleanup").is_none());
    }

    #[test]
    fn test_disabled_jobs_are_not_registered() {
        let mut config = CrmConfig::default();
        config.jobs.heartbeat.enabled = false;

        let table = TaskTable::from_config(&config).unwrap();

        assert_eq!(table.names(), vec!["restock", "order_reminders"]);
    }

    #[tokio::test]
    async fn test_run_unknown_job() {
        let err = TaskTable::new().run_once("cleanup").await.unwrap_err();
        assert!(matches!(err, JobError::UnknownJob(name) if name == "cleanup"));
    }
}
