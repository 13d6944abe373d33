use super::CrmOperations;
use crate::core::error::{CrmError, EntityError, Result, ValidationError};
use crate::core::validation::fits_amount;
use crate::core::{Entity, Outcome, parse_id};
use crate::entities::order::total_of;
use crate::entities::{Customer, Order, Product};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// Request to place an order. Ids arrive as raw strings from the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewOrder {
    pub customer_id: String,
    pub product_ids: Vec<String>,
    pub order_date: Option<DateTime<Utc>>,
}

impl NewOrder {
    pub fn new(customer_id: impl ToString, product_ids: &[impl ToString]) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            product_ids: product_ids.iter().map(ToString::to_string).collect(),
            order_date: None,
        }
    }

    pub fn at(mut self, order_date: DateTime<Utc>) -> Self {
        self.order_date = Some(order_date);
        self
    }
}

impl CrmOperations {
    /// Place an order for an existing customer over existing products.
    ///
    /// Nothing is persisted unless every referenced record exists; the total
    /// is the sum of the distinct products' prices.
    pub async fn create_order(&self, input: NewOrder) -> Outcome<Order> {
        match self.insert_order(input).await {
            Ok(order) => {
                tracing::info!(
                    order_id = %order.id,
                    customer_id = %order.customer_id,
                    total = %order.total_amount,
                    "order created"
                );
                Outcome::ok(order, "Order created successfully")
            }
            Err(e) => {
                tracing::debug!(error = %e, code = e.error_code(), "order rejected");
                Outcome::fail(order_failure_message(&e))
            }
        }
    }

    async fn insert_order(&self, input: NewOrder) -> Result<Order> {
        let customer_id = self.existing_customer_id(&input.customer_id).await?;

        if input.product_ids.is_empty() {
            return Err(ValidationError::EmptyProductList.into());
        }

        // Repeated ids collapse to one association
        let mut seen = HashSet::with_capacity(input.product_ids.len());
        let mut products = Vec::with_capacity(input.product_ids.len());
        for raw in &input.product_ids {
            let not_found = || EntityError::not_found(Product::display_name(), raw);
            let id = parse_id(raw).ok_or_else(not_found)?;
            let product = self.store.get_product(&id).await?.ok_or_else(not_found)?;
            if seen.insert(product.id) {
                products.push(product);
            }
        }

        if !fits_amount(total_of(&products)) {
            return Err(ValidationError::AmountTooLarge {
                field: "total_amount",
            }
            .into());
        }
        let product_ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();

        // The store re-checks existence inside its own transaction
        let order = Order::new(customer_id, input.order_date);
        Ok(self.store.create_order(order, &product_ids).await?)
    }

    async fn existing_customer_id(&self, raw: &str) -> Result<Uuid> {
        let not_found = || EntityError::not_found(Customer::display_name(), raw);

        let id = parse_id(raw).ok_or_else(not_found)?;
        match self.store.get_customer(&id).await? {
            Some(customer) => Ok(customer.id),
            None => Err(not_found().into()),
        }
    }

    /// Re-derive an order's total from its current products' prices.
    pub async fn recompute_order_total(&self, id: &str) -> Result<Option<Order>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.store.recompute_order_total(&id).await?)
    }

    pub async fn order(&self, id: &str) -> Result<Option<Order>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.store.get_order(&id).await?)
    }

    /// All orders, or only those dated on/after `since` when given.
    ///
    /// `since` accepts `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
    pub async fn orders(&self, since: Option<&str>) -> Result<Vec<Order>> {
        match since {
            Some(raw) => {
                let since = parse_date_floor(raw)?;
                Ok(self.store.list_orders_since(since).await?)
            }
            None => Ok(self.store.list_orders().await?),
        }
    }

    pub async fn customer_of(&self, order: &Order) -> Result<Option<Customer>> {
        Ok(self.store.get_customer(&order.customer_id).await?)
    }

    pub async fn products_of(&self, order: &Order) -> Result<Vec<Product>> {
        Ok(self.store.order_products(&order.id).await?)
    }
}

/// Parse a lower date bound given as a calendar date or a full timestamp.
pub fn parse_date_floor(raw: &str) -> std::result::Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| ValidationError::InvalidDate {
            value: raw.to_string(),
        })
}

fn order_failure_message(err: &CrmError) -> String {
    match err {
        CrmError::Entity(EntityError::NotFound { entity_type, id }) if entity_type == "Customer" => {
            format!("Customer with ID {} not found", id)
        }
        CrmError::Entity(EntityError::NotFound { entity_type, id }) if entity_type == "Product" => {
            format!("Invalid product ID: {}", id)
        }
        CrmError::Validation(e) => e.to_string(),
        other => format!("Error: {}", other),
    }
}
