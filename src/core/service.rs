//! Store traits for customers, products and orders
//!
//! Implementations provide persistence for one entity family each. The
//! application is agnostic to the underlying storage mechanism; see
//! [`crate::storage`] for the in-memory and PostgreSQL backends.

use crate::entities::{Customer, Order, Product, RestockedProduct};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Persistence for [`Customer`] records
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Insert a customer.
    ///
    /// Fails with [`EntityError::Conflict`](crate::core::error::EntityError)
    /// when the email is already taken.
    async fn create_customer(&self, customer: Customer) -> Result<Customer>;

    /// Get a customer by ID
    async fn get_customer(&self, id: &Uuid) -> Result<Option<Customer>>;

    /// Find the customer owning an email address (exact match)
    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>>;

    /// List all customers, newest first
    async fn list_customers(&self) -> Result<Vec<Customer>>;

    /// Delete a customer together with all of their orders
    async fn delete_customer(&self, id: &Uuid) -> Result<()>;
}

/// Persistence for [`Product`] records
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Insert a product
    async fn create_product(&self, product: Product) -> Result<Product>;

    /// Get a product by ID
    async fn get_product(&self, id: &Uuid) -> Result<Option<Product>>;

    /// List all products, alphabetically
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Replace a product's mutable fields (name, price, stock)
    async fn update_product(&self, product: Product) -> Result<Product>;

    /// List products whose stock is strictly below `threshold`
    async fn list_products_below_stock(&self, threshold: i32) -> Result<Vec<Product>>;

    /// Atomically add `amount` to a product's stock.
    ///
    /// Returns the updated product with the stock it had just before the
    /// increment, or `None` if the product no longer exists.
    async fn increment_stock(&self, id: &Uuid, amount: i32) -> Result<Option<RestockedProduct>>;
}

/// Persistence for [`Order`] records and their product associations
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order and associate `product_ids` in one transaction.
    ///
    /// The customer and every product must exist; otherwise nothing is
    /// written and an [`EntityError::NotFound`](crate::core::error::EntityError)
    /// is returned. `total_amount` is set to the sum of the products' prices.
    async fn create_order(&self, order: Order, product_ids: &[Uuid]) -> Result<Order>;

    /// Get an order by ID
    async fn get_order(&self, id: &Uuid) -> Result<Option<Order>>;

    /// List all orders, newest first
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// List orders with `order_date >= since`, newest first
    async fn list_orders_since(&self, since: DateTime<Utc>) -> Result<Vec<Order>>;

    /// List the orders of one customer, newest first
    async fn list_orders_for_customer(&self, customer_id: &Uuid) -> Result<Vec<Order>>;

    /// Products associated with an order, alphabetically
    async fn order_products(&self, order_id: &Uuid) -> Result<Vec<Product>>;

    /// Recompute `total_amount` from the currently associated products
    async fn recompute_order_total(&self, order_id: &Uuid) -> Result<Option<Order>>;
}

/// Everything the CRM needs from a storage backend
pub trait CrmStore: CustomerService + ProductService + OrderService {}

impl<T> CrmStore for T where T: CustomerService + ProductService + OrderService {}
