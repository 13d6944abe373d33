//! Order record
//!
//! `total_amount` is derived from the associated products' prices. It is
//! computed when the order is created and on an explicit recompute only;
//! later price changes do not flow into existing orders.

use crate::core::entity::Entity;
use crate::entities::product::Product;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An order placed by a customer. Ordered newest-first by `order_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub total_amount: Decimal,
    pub order_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build an order with a zero total. `order_date` defaults to now.
    pub fn new(customer_id: Uuid, order_date: Option<DateTime<Utc>>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            total_amount: Decimal::ZERO,
            order_date: order_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Order {
    fn display_name() -> &'static str {
        "Order"
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

/// Sum of the given products' current prices.
pub fn total_of<'a>(products: impl IntoIterator<Item = &'a Product>) -> Decimal {
    products.into_iter().map(|p| p.price).sum()
}

/// Collapse repeated ids while keeping first-seen order.
pub fn dedup_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Default presentation order: newest first.
pub fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
}
