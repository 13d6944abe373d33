//! # CRM
//!
//! A small customer relationship management backend: customers, products
//! and orders behind a GraphQL API, plus scheduled maintenance jobs.
//!
//! ## Layers
//!
//! - **Entities**: `Customer`, `Product`, `Order`
//! - **Storage**: async store traits with in-memory and PostgreSQL backends
//! - **Operations**: validated queries and mutations; validation failures are
//!   returned as data (`success` + `message`), never as errors
//! - **Server**: axum + async-graphql exposure of the operations
//! - **Jobs**: heartbeat, low-stock restock and order reminders, which call
//!   the GraphQL endpoint and append to log files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crm::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_store(InMemoryStore::new())
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod jobs;
pub mod operations;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        BulkOutcome, CrmError, CrmStore, CustomerService, Entity, EntityError, JobError,
        OrderService, Outcome, ProductService, ValidationError, parse_id,
    };

    // === Entities ===
    pub use crate::entities::{
        Customer, LOW_STOCK_THRESHOLD, Order, Product, RESTOCK_INCREMENT, RestockedProduct,
    };

    // === Operations ===
    pub use crate::operations::{CrmOperations, NewCustomer, NewOrder, NewProduct};

    // === Storage ===
    pub use crate::storage::{InMemoryStore, open_store};
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::CrmConfig;

    // === Server ===
    pub use crate::server::{GraphQLExposure, ServerBuilder, ServerHost};

    // === Jobs ===
    pub use crate::jobs::{ScheduledJob, Scheduler, TaskTable};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use rust_decimal::Decimal;
    pub use uuid::Uuid;
}
