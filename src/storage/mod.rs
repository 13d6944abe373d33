//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

use crate::config::DatabaseConfig;
use crate::core::service::CrmStore;
use anyhow::Result;
use std::sync::Arc;

/// Open the store named by the configuration.
///
/// Without a database URL the store is in-memory. With one, the PostgreSQL
/// store is connected and migrated.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn CrmStore>> {
    let Some(url) = config.url.as_deref() else {
        tracing::info!("using in-memory store");
        return Ok(Arc::new(InMemoryStore::new()));
    };

    connect(url).await
}

#[cfg(feature = "postgres")]
async fn connect(url: &str) -> Result<Arc<dyn CrmStore>> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(url)
        .await?;
    postgres::run_migrations(&pool).await?;

    tracing::info!("using PostgreSQL store");
    Ok(Arc::new(PostgresStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn connect(_url: &str) -> Result<Arc<dyn CrmStore>> {
    anyhow::bail!("database.url is set but the 'postgres' feature is not enabled")
}
