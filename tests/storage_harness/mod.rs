//! Shared test harness for storage backend testing
//!
//! Provides record builders and the `store_contract_tests!` macro, which
//! validates any CRM store implementation against the store contract.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! store_contract_tests!(InMemoryStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod store_contract_tests;

use chrono::{DateTime, Duration, Utc};
use crm::entities::{Customer, Order, Product};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Record builders
// ---------------------------------------------------------------------------

/// Parse a decimal literal such as `"19.99"`.
pub fn price(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// A customer with a unique email derived from `name`.
pub fn customer(name: &str) -> Customer {
    Customer::new(
        name,
        format!("{}@example.com", name.to_lowercase()),
        None,
    )
}

/// A customer created `minutes_ago` minutes in the past.
pub fn customer_created_ago(name: &str, minutes_ago: i64) -> Customer {
    let mut customer = customer(name);
    customer.created_at = Utc::now() - Duration::minutes(minutes_ago);
    customer.updated_at = customer.created_at;
    customer
}

pub fn product(name: &str, unit_price: &str, stock: i32) -> Product {
    Product::new(name, price(unit_price), stock)
}

pub fn order_for(customer_id: Uuid) -> Order {
    Order::new(customer_id, None)
}

pub fn order_dated(customer_id: Uuid, order_date: DateTime<Utc>) -> Order {
    Order::new(customer_id, Some(order_date))
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert that a list contains exactly `n` items.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

/// Names of the given products, in order.
pub fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}
