//! Low-stock restock job

use super::ScheduledJob;
use super::client::GraphQLClient;
use super::log_file;
use crate::config::RestockConfig;
use crate::core::error::JobError;
use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

const RESTOCK_MUTATION: &str = r#"
mutation {
    updateLowStockProducts {
        message
        updatedProducts {
            name
            stock
        }
    }
}
"#;

const UPDATED_PRODUCTS: &str = "/data/updateLowStockProducts/updatedProducts";

/// Triggers `updateLowStockProducts` and records the outcome as one block
/// in its log.
pub struct Restock {
    client: GraphQLClient,
    log_path: PathBuf,
    interval: Duration,
}

impl Restock {
    pub fn from_config(config: &RestockConfig, graphql_url: &str) -> Result<Self, JobError> {
        Ok(Self {
            client: GraphQLClient::new(graphql_url)?,
            log_path: PathBuf::from(&config.log_path),
            interval: config.interval(),
        })
    }
}

#[async_trait]
impl ScheduledJob for Restock {
    fn name(&self) -> &'static str {
        "restock"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run(&self) -> Result<String, JobError> {
        let header = format!(
            "\n\n=== Update Run: {} ===\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.6f")
        );

        let (block, summary) = match self.client.send(RESTOCK_MUTATION, None).await {
            Ok(body) => render_response(&body),
            // Error responses still carry a body worth recording
            Err(JobError::Status { status, body }) => (
                render_failure(&format!("endpoint returned status {}", status), &body),
                format!("restock request returned status {}", status),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "restock request failed");
                (format!("Error: {}\n", e), format!("restock request failed: {}", e))
            }
        };

        log_file::append(&self.log_path, &format!("{}{}", header, block)).await?;
        Ok(summary)
    }
}

/// Render the block body for a response, plus a one-line summary.
///
/// Lines for products already read are kept when a later entry is malformed.
fn render_response(body: &Value) -> (String, String) {
    let Some(products) = body.pointer(UPDATED_PRODUCTS).and_then(Value::as_array) else {
        return (
            render_failure("missing 'data.updateLowStockProducts.updatedProducts'", body),
            "restock response had an unexpected shape".to_string(),
        );
    };

    let mut block = String::new();
    for product in products {
        let name = product.get("name").and_then(Value::as_str);
        let stock = product.get("stock").filter(|s| !s.is_null());

        match (name, stock) {
            (Some(name), Some(stock)) => {
                block.push_str(&format!("{} → New Stock: {}\n", name, stock));
            }
            _ => {
                block.push_str(&render_failure("product entry without 'name' or 'stock'", body));
                return (block, "restock response had an unexpected shape".to_string());
            }
        }
    }

    block.push_str("Status: SUCCESS\n");
    (block, format!("{} products restocked", products.len()))
}

fn render_failure(reason: &str, body: &Value) -> String {
    format!("Error: {}\nRaw response: {}\n", reason, body)
}
