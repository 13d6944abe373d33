//! CRM operations: the queries and mutations behind the GraphQL API
//!
//! This layer knows nothing about GraphQL or HTTP. Mutations return
//! [`Outcome`](crate::core::Outcome)s and never fail across this boundary;
//! queries return `Result` only for storage failures ("not found" is
//! `Ok(None)`).

mod customers;
mod orders;
mod products;

pub use customers::NewCustomer;
pub use orders::NewOrder;
pub use products::NewProduct;

use crate::core::service::CrmStore;
use std::sync::Arc;

/// Greeting returned by the `hello` query, used by health checks.
pub const HELLO: &str = "Hello, GraphQL!";

/// Entry point for every CRM query and mutation
#[derive(Clone)]
pub struct CrmOperations {
    store: Arc<dyn CrmStore>,
}

impl CrmOperations {
    pub fn new(store: Arc<dyn CrmStore>) -> Self {
        Self { store }
    }

    /// Build operations over any store implementation
    pub fn with_store(store: impl CrmStore + 'static) -> Self {
        Self::new(Arc::new(store))
    }

    pub fn store(&self) -> &Arc<dyn CrmStore> {
        &self.store
    }

    pub fn hello(&self) -> &'static str {
        HELLO
    }
}
