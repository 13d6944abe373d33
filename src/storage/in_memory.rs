//! In-memory implementation of the CRM store traits for testing and development

use crate::core::error::{EntityError, StorageError};
use crate::core::service::{CustomerService, OrderService, ProductService};
use crate::core::Entity;
use crate::entities::order::{dedup_ids, total_of};
use crate::entities::{Customer, Order, Product, RestockedProduct, customer, order, product};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    customers: HashMap<Uuid, Customer>,
    products: HashMap<Uuid, Product>,
    orders: HashMap<Uuid, Order>,
    /// order id -> associated product ids
    order_products: HashMap<Uuid, Vec<Uuid>>,
}

impl Tables {
    fn products_of(&self, order_id: &Uuid) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .order_products
            .get(order_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.products.get(id).cloned())
            .collect();
        product::sort_by_name(&mut products);
        products
    }
}

/// In-memory store implementation
///
/// Useful for testing and development. All tables live behind one RwLock,
/// so every write (including order creation with its associations) is
/// applied atomically.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| {
            StorageError::Poisoned {
                kind: "read",
                message: e.to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| {
            StorageError::Poisoned {
                kind: "write",
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl CustomerService for InMemoryStore {
    async fn create_customer(&self, customer: Customer) -> Result<Customer> {
        let mut tables = self.write()?;

        if tables.customers.values().any(|c| c.email == customer.email) {
            return Err(EntityError::Conflict {
                entity_type: Customer::display_name().to_string(),
                field: "email".to_string(),
                value: customer.email,
            }
            .into());
        }

        tables.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn get_customer(&self, id: &Uuid) -> Result<Option<Customer>> {
        Ok(self.read()?.customers.get(id).cloned())
    }

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>> {
        Ok(self
            .read()?
            .customers
            .values()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let mut customers: Vec<Customer> = self.read()?.customers.values().cloned().collect();
        customer::sort_newest_first(&mut customers);
        Ok(customers)
    }

    async fn delete_customer(&self, id: &Uuid) -> Result<()> {
        let mut tables = self.write()?;

        tables.customers.remove(id);

        let doomed: Vec<Uuid> = tables
            .orders
            .values()
            .filter(|o| &o.customer_id == id)
            .map(|o| o.id)
            .collect();
        for order_id in doomed {
            tables.orders.remove(&order_id);
            tables.order_products.remove(&order_id);
        }

        Ok(())
    }
}

#[async_trait]
impl ProductService for InMemoryStore {
    async fn create_product(&self, product: Product) -> Result<Product> {
        self.write()?.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: &Uuid) -> Result<Option<Product>> {
        Ok(self.read()?.products.get(id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self.read()?.products.values().cloned().collect();
        product::sort_by_name(&mut products);
        Ok(products)
    }

    async fn update_product(&self, updated: Product) -> Result<Product> {
        let mut tables = self.write()?;

        let stored = tables
            .products
            .get_mut(&updated.id)
            .ok_or_else(|| EntityError::not_found(Product::display_name(), updated.id))?;

        stored.name = updated.name;
        stored.price = updated.price;
        stored.stock = updated.stock;
        stored.touch();

        Ok(stored.clone())
    }

    async fn list_products_below_stock(&self, threshold: i32) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self
            .read()?
            .products
            .values()
            .filter(|p| p.stock < threshold)
            .cloned()
            .collect();
        product::sort_by_name(&mut products);
        Ok(products)
    }

    async fn increment_stock(&self, id: &Uuid, amount: i32) -> Result<Option<RestockedProduct>> {
        let mut tables = self.write()?;

        let Some(stored) = tables.products.get_mut(id) else {
            return Ok(None);
        };

        let previous_stock = stored.stock;
        stored.stock += amount;
        stored.touch();

        Ok(Some(RestockedProduct {
            product: stored.clone(),
            previous_stock,
        }))
    }
}

#[async_trait]
impl OrderService for InMemoryStore {
    async fn create_order(&self, mut order: Order, product_ids: &[Uuid]) -> Result<Order> {
        let mut tables = self.write()?;

        if !tables.customers.contains_key(&order.customer_id) {
            return Err(EntityError::not_found(Customer::display_name(), order.customer_id).into());
        }

        let product_ids = dedup_ids(product_ids);
        let mut products = Vec::with_capacity(product_ids.len());
        for id in &product_ids {
            let product = tables
                .products
                .get(id)
                .ok_or_else(|| EntityError::not_found(Product::display_name(), id))?;
            products.push(product);
        }

        order.total_amount = total_of(products);
        tables.orders.insert(order.id, order.clone());
        tables.order_products.insert(order.id, product_ids);

        Ok(order)
    }

    async fn get_order(&self, id: &Uuid) -> Result<Option<Order>> {
        Ok(self.read()?.orders.get(id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self.read()?.orders.values().cloned().collect();
        order::sort_newest_first(&mut orders);
        Ok(orders)
    }

    async fn list_orders_since(&self, since: DateTime<Utc>) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .read()?
            .orders
            .values()
            .filter(|o| o.order_date >= since)
            .cloned()
            .collect();
        order::sort_newest_first(&mut orders);
        Ok(orders)
    }

    async fn list_orders_for_customer(&self, customer_id: &Uuid) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .read()?
            .orders
            .values()
            .filter(|o| &o.customer_id == customer_id)
            .cloned()
            .collect();
        order::sort_newest_first(&mut orders);
        Ok(orders)
    }

    async fn order_products(&self, order_id: &Uuid) -> Result<Vec<Product>> {
        Ok(self.read()?.products_of(order_id))
    }

    async fn recompute_order_total(&self, order_id: &Uuid) -> Result<Option<Order>> {
        let mut tables = self.write()?;

        let total = total_of(&tables.products_of(order_id));
        let Some(stored) = tables.orders.get_mut(order_id) else {
            return Ok(None);
        };

        stored.total_amount = total;
        stored.touch();

        Ok(Some(stored.clone()))
    }
}
