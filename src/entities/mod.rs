//! Persisted record types of the CRM
//!
//! - [`Customer`]: people who place orders, unique by email
//! - [`Product`]: priced items with a stock level
//! - [`Order`]: a customer's purchase of a set of products

pub mod customer;
pub mod order;
pub mod product;

pub use customer::Customer;
pub use order::Order;
pub use product::{LOW_STOCK_THRESHOLD, Product, RESTOCK_INCREMENT, RestockedProduct};
