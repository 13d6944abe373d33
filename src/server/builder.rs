//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::{GraphQLExposure, health_routes};
use super::host::ServerHost;
use crate::config::CrmConfig;
use crate::core::service::CrmStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for creating the CRM HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryStore::new())
///     .with_config(config)
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn CrmStore>>,
    config: CrmConfig,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            store: None,
            config: CrmConfig::default(),
        }
    }

    /// Set the store (required)
    pub fn with_store(self, store: impl CrmStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set a store that is already shared elsewhere
    pub fn with_shared_store(mut self, store: Arc<dyn CrmStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_config(mut self, config: CrmConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("A store is required. Call .with_store()"))?;

        Ok(ServerHost::new(store, self.config.clone()))
    }

    /// Build the final router: GraphQL and health checks, wrapped in
    /// request tracing and permissive CORS.
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        Self::router_for(host)
    }

    /// Build the router for an existing host
    pub fn router_for(host: Arc<ServerHost>) -> Result<Router> {
        let app = health_routes().merge(GraphQLExposure::build_router(host)?);

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.bind_addr` from the configuration and stops on
    /// SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_addr.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
