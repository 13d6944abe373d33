//! GraphQL object, input and payload types
//!
//! Records are wrapped so that relation fields can resolve through the
//! [`CrmOperations`] stored in the schema data.

use crate::core::{BulkOutcome, Outcome};
use crate::entities::{Customer, Order, Product, RestockedProduct};
use crate::operations::{CrmOperations, NewCustomer, NewOrder, NewProduct};
use async_graphql::{Context, ID, InputObject, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

fn operations<'a>(ctx: &Context<'a>) -> Result<&'a CrmOperations> {
    ctx.data::<CrmOperations>()
}

// =============================================================================
// Objects
// =============================================================================

pub struct CustomerType(pub Customer);

#[Object]
impl CustomerType {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn phone(&self) -> Option<&str> {
        self.0.phone.as_deref()
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    /// Orders placed by this customer, newest first
    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<OrderType>> {
        let orders = operations(ctx)?.orders_of(&self.0).await?;
        Ok(orders.into_iter().map(OrderType).collect())
    }
}

pub struct ProductType(pub Product);

#[Object]
impl ProductType {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn price(&self) -> Decimal {
        self.0.price
    }

    async fn stock(&self) -> i32 {
        self.0.stock
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }
}

pub struct OrderType(pub Order);

#[Object]
impl OrderType {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn total_amount(&self) -> Decimal {
        self.0.total_amount
    }

    async fn order_date(&self) -> DateTime<Utc> {
        self.0.order_date
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    async fn customer(&self, ctx: &Context<'_>) -> Result<Option<CustomerType>> {
        let customer = operations(ctx)?.customer_of(&self.0).await?;
        Ok(customer.map(CustomerType))
    }

    /// Products in this order, alphabetical
    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<ProductType>> {
        let products = operations(ctx)?.products_of(&self.0).await?;
        Ok(products.into_iter().map(ProductType).collect())
    }
}

/// A product touched by a restock run, with its stock before and after
pub struct RestockedProductType(pub RestockedProduct);

#[Object]
impl RestockedProductType {
    async fn id(&self) -> ID {
        ID(self.0.product.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.product.name
    }

    async fn price(&self) -> Decimal {
        self.0.product.price
    }

    async fn previous_stock(&self) -> i32 {
        self.0.previous_stock
    }

    /// Stock after the restock
    async fn stock(&self) -> i32 {
        self.0.product.stock
    }
}

// =============================================================================
// Inputs
// =============================================================================

#[derive(InputObject)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<CustomerInput> for NewCustomer {
    fn from(input: CustomerInput) -> Self {
        NewCustomer {
            name: input.name,
            email: input.email,
            phone: input.phone,
        }
    }
}

#[derive(InputObject)]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub stock: Option<i32>,
}

impl From<ProductInput> for NewProduct {
    fn from(input: ProductInput) -> Self {
        NewProduct {
            name: input.name,
            price: input.price,
            stock: input.stock,
        }
    }
}

#[derive(InputObject)]
pub struct OrderInput {
    pub customer_id: ID,
    pub product_ids: Vec<ID>,
    pub order_date: Option<DateTime<Utc>>,
}

impl From<OrderInput> for NewOrder {
    fn from(input: OrderInput) -> Self {
        NewOrder {
            customer_id: input.customer_id.0,
            product_ids: input.product_ids.into_iter().map(|id| id.0).collect(),
            order_date: input.order_date,
        }
    }
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(SimpleObject)]
pub struct CreateCustomerPayload {
    pub customer: Option<CustomerType>,
    pub success: bool,
    pub message: String,
}

impl From<Outcome<Customer>> for CreateCustomerPayload {
    fn from(outcome: Outcome<Customer>) -> Self {
        Self {
            customer: outcome.payload.map(CustomerType),
            success: outcome.success,
            message: outcome.message,
        }
    }
}

#[derive(SimpleObject)]
pub struct BulkCreateCustomersPayload {
    pub customers: Vec<CustomerType>,
    /// Per-row failures; null when every row was created
    pub errors: Option<Vec<String>>,
    pub success: bool,
}

impl From<BulkOutcome<Customer>> for BulkCreateCustomersPayload {
    fn from(outcome: BulkOutcome<Customer>) -> Self {
        let success = outcome.success();
        Self {
            customers: outcome.created.into_iter().map(CustomerType).collect(),
            errors: (!outcome.errors.is_empty()).then_some(outcome.errors),
            success,
        }
    }
}

#[derive(SimpleObject)]
pub struct CreateProductPayload {
    pub product: Option<ProductType>,
    pub success: bool,
    pub message: String,
}

impl From<Outcome<Product>> for CreateProductPayload {
    fn from(outcome: Outcome<Product>) -> Self {
        Self {
            product: outcome.payload.map(ProductType),
            success: outcome.success,
            message: outcome.message,
        }
    }
}

#[derive(SimpleObject)]
pub struct CreateOrderPayload {
    pub order: Option<OrderType>,
    pub success: bool,
    pub message: String,
}

impl From<Outcome<Order>> for CreateOrderPayload {
    fn from(outcome: Outcome<Order>) -> Self {
        Self {
            order: outcome.payload.map(OrderType),
            success: outcome.success,
            message: outcome.message,
        }
    }
}

#[derive(SimpleObject)]
pub struct UpdateLowStockProductsPayload {
    pub success: bool,
    pub message: String,
    pub updated_products: Vec<RestockedProductType>,
}

impl From<Outcome<Vec<RestockedProduct>>> for UpdateLowStockProductsPayload {
    fn from(outcome: Outcome<Vec<RestockedProduct>>) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            updated_products: outcome
                .payload
                .unwrap_or_default()
                .into_iter()
                .map(RestockedProductType)
                .collect(),
        }
    }
}
