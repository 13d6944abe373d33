//! Core module containing the fundamental traits and types of the CRM

pub mod entity;
pub mod error;
pub mod outcome;
pub mod service;
pub mod validation;

pub use entity::{Entity, parse_id};
pub use error::{CrmError, EntityError, JobError, ValidationError};
pub use outcome::{BulkOutcome, Outcome};
pub use service::{CrmStore, CustomerService, OrderService, ProductService};
