//! Server host for transport-agnostic API exposure
//!
//! `ServerHost` holds all state needed to expose the CRM over any protocol.
//! Exposures only ever talk to the operations layer, never to the store.

use crate::config::CrmConfig;
use crate::core::service::CrmStore;
use crate::operations::CrmOperations;
use std::sync::Arc;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(Arc::new(InMemoryStore::new()), CrmConfig::default()));
/// let graphql_app = GraphQLExposure::build_router(host)?;
/// ```
pub struct ServerHost {
    /// Loaded configuration
    pub config: Arc<CrmConfig>,

    /// Queries and mutations over the configured store
    pub operations: CrmOperations,
}

impl ServerHost {
    pub fn new(store: Arc<dyn CrmStore>, config: CrmConfig) -> Self {
        Self {
            config: Arc::new(config),
            operations: CrmOperations::new(store),
        }
    }

    pub fn store(&self) -> &Arc<dyn CrmStore> {
        self.operations.store()
    }
}
