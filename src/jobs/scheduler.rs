//! In-process job scheduler
//!
//! Each job gets its own tokio interval. A run that outlasts its period
//! delays the next one; missed ticks are skipped rather than replayed.

use super::{ScheduledJob, TaskTable};
use futures::future::join_all;
use std::sync::Arc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

pub struct Scheduler {
    table: TaskTable,
}

impl Scheduler {
    pub fn new(table: TaskTable) -> Self {
        Self { table }
    }

    /// Drive every job forever. The first run of each job happens one
    /// interval after start.
    pub async fn run(self) {
        tracing::info!(jobs = ?self.table.names(), "scheduler started");

        join_all(self.table.jobs().iter().cloned().map(run_periodically)).await;
    }
}

async fn run_periodically(job: Arc<dyn ScheduledJob>) {
    let period = job.interval();
    let Some(first_tick) = Instant::now().checked_add(period) else {
        tracing::error!(job = job.name(), ?period, "interval too large to schedule");
        return;
    };
    let mut ticker = interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        run_and_log(job.as_ref()).await;
    }
}

/// Run a job once, reporting the result through tracing
pub async fn run_and_log(job: &dyn ScheduledJob) {
    match job.run().await {
        Ok(summary) => tracing::info!(job = job.name(), "{}", summary),
        Err(e) => tracing::error!(job = job.name(), error = %e, "job failed"),
    }
}
