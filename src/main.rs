//! `crm` binary: runs the GraphQL server and the scheduled jobs

use anyhow::Result;
use clap::{Parser, Subcommand};
use crm::config::CrmConfig;
use crm::jobs::{Scheduler, TaskTable};
use crm::server::ServerBuilder;
use crm::storage::open_store;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "crm=info,tower_http=info";

#[derive(Debug, Parser)]
#[command(name = "crm", version)]
#[command(about = "CRM GraphQL backend and maintenance jobs")]
struct Cli {
    /// YAML configuration file (defaults to $CRM_CONFIG, then built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP server (and the job scheduler unless disabled)
    Serve,
    /// Run one scheduled job once, e.g. from an external cron
    RunJob {
        /// Job name, as listed by `crm jobs`
        name: String,
    },
    /// List the scheduled jobs and their cadence
    Jobs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = CrmConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::RunJob { name } => {
            let summary = TaskTable::from_config(&config)?.run_once(&name).await?;
            println!("{}", summary);
            Ok(())
        }
        Commands::Jobs => {
            for job in TaskTable::from_config(&config)?.jobs() {
                println!("{:<16} every {}s", job.name(), job.interval().as_secs());
            }
            Ok(())
        }
    }
}

async fn serve(config: CrmConfig) -> Result<()> {
    let store = open_store(&config.database).await?;

    let scheduler = if config.scheduler.enabled {
        let table = TaskTable::from_config(&config)?;
        Some(tokio::spawn(Scheduler::new(table).run()))
    } else {
        tracing::info!("scheduler disabled");
        None
    };

    let result = ServerBuilder::new()
        .with_shared_store(store)
        .with_config(config)
        .serve()
        .await;

    if let Some(scheduler) = scheduler {
        scheduler.abort();
    }
    result
}
