//! Customer record

use crate::core::entity::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer of the CRM.
///
/// `email` is unique across all customers. Ordered newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Build a new, not yet persisted customer. Empty phone strings become `None`.
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            phone: phone.filter(|p| !p.is_empty()),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Customer {
    fn display_name() -> &'static str {
        "Customer"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Default presentation order: newest first.
pub fn sort_newest_first(customers: &mut [Customer]) {
    customers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
