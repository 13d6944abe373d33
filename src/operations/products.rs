use super::CrmOperations;
use crate::core::error::{CrmError, Result};
use crate::core::validation::{MAX_PRODUCT_NAME_LEN, validate_length, validate_price, validate_stock};
use crate::core::{Outcome, parse_id};
use crate::entities::product::PRICE_SCALE;
use crate::entities::{LOW_STOCK_THRESHOLD, Product, RESTOCK_INCREMENT, RestockedProduct};
use rust_decimal::Decimal;

/// Request to create one product. `stock` defaults to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: Option<i32>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Decimal, stock: Option<i32>) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }
}

impl CrmOperations {
    pub async fn create_product(&self, input: NewProduct) -> Outcome<Product> {
        match self.insert_product(input).await {
            Ok(product) => {
                tracing::info!(product_id = %product.id, name = %product.name, "product created");
                Outcome::ok(product, "Product created successfully")
            }
            Err(CrmError::Validation(e)) => {
                tracing::debug!(error = %e, code = e.error_code(), "product rejected");
                Outcome::fail(e.to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "product creation failed");
                Outcome::fail(format!("Error: {}", e))
            }
        }
    }

    async fn insert_product(&self, input: NewProduct) -> Result<Product> {
        validate_length("name", &input.name, MAX_PRODUCT_NAME_LEN)?;
        // Validate the value that will actually be stored
        validate_price(input.price.round_dp(PRICE_SCALE))?;
        let stock = input.stock.unwrap_or(0);
        validate_stock(stock)?;

        let product = Product::new(input.name, input.price, stock);
        Ok(self.store.create_product(product).await?)
    }

    /// Add [`RESTOCK_INCREMENT`] to every product whose stock is below
    /// [`LOW_STOCK_THRESHOLD`].
    ///
    /// Finding nothing to restock is still a success. Each increment is an
    /// atomic read-modify-write in the store, so concurrent runs never lose
    /// an update. A product that vanishes mid-run is skipped. If any
    /// increment fails the run reports `success = false`; the products that
    /// were restocked before and after it are still returned.
    pub async fn update_low_stock_products(&self) -> Outcome<Vec<RestockedProduct>> {
        let low = match self.store.list_products_below_stock(LOW_STOCK_THRESHOLD).await {
            Ok(low) => low,
            Err(e) => {
                tracing::error!(error = %e, "failed to list low-stock products");
                return Outcome::fail(format!("Error: {}", CrmError::from(e)));
            }
        };

        let mut restocked = Vec::with_capacity(low.len());
        let mut failures = Vec::new();
        for product in &low {
            match self.store.increment_stock(&product.id, RESTOCK_INCREMENT).await {
                Ok(Some(updated)) => {
                    tracing::info!(
                        product_id = %updated.product.id,
                        previous_stock = updated.previous_stock,
                        stock = updated.product.stock,
                        "product restocked"
                    );
                    restocked.push(updated);
                }
                Ok(None) => tracing::debug!(product_id = %product.id, "product removed before restock"),
                Err(e) => {
                    tracing::error!(product_id = %product.id, error = %e, "restock failed");
                    failures.push(format!("{}: {}", product.name, CrmError::from(e)));
                }
            }
        }

        if !failures.is_empty() {
            let message = format!(
                "Error: failed to restock {} of {} low-stock products ({})",
                failures.len(),
                low.len(),
                failures.join("; ")
            );
            return Outcome::fail_with(restocked, message);
        }

        let message = if restocked.is_empty() {
            "No low-stock products found".to_string()
        } else {
            format!("{} products updated successfully", restocked.len())
        };
        Outcome::ok(restocked, message)
    }

    pub async fn product(&self, id: &str) -> Result<Option<Product>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.store.get_product(&id).await?)
    }

    pub async fn all_products(&self) -> Result<Vec<Product>> {
        Ok(self.store.list_products().await?)
    }
}
