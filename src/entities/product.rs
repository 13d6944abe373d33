//! Product record and the restock rules applied to it

use crate::core::entity::Entity;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Products with stock strictly below this value are restocked.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Amount added to a low-stock product's stock on each restock.
pub const RESTOCK_INCREMENT: i32 = 10;

/// Prices are stored with two decimal places.
pub const PRICE_SCALE: u32 = 2;

/// A sellable product. Ordered alphabetically by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Decimal, stock: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price: price.round_dp(PRICE_SCALE),
            stock,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Product {
    fn display_name() -> &'static str {
        "Product"
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

/// A product after a restock, with the stock it had before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockedProduct {
    pub product: Product,
    pub previous_stock: i32,
}

/// Default presentation order: alphabetical.
pub fn sort_by_name(products: &mut [Product]) {
    products.sort_by(|a, b| a.name.cmp(&b.name));
}
