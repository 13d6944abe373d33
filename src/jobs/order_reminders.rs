//! Reminder log for recent orders

use super::ScheduledJob;
use super::client::GraphQLClient;
use super::log_file;
use crate::config::OrderRemindersConfig;
use crate::core::error::JobError;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::time::Duration;

const PENDING_ORDERS_QUERY: &str = r#"
query GetPendingOrders($startDate: String!) {
    orders(orderDateGte: $startDate) {
        id
        orderDate
        customer {
            email
        }
    }
}
"#;

/// Lists orders placed within the lookback window in its log.
pub struct OrderReminders {
    client: GraphQLClient,
    log_path: PathBuf,
    interval: Duration,
    lookback_days: i64,
}

/// One order as reported in the reminder log
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOrder {
    pub id: String,
    pub customer_email: Option<String>,
}

impl OrderReminders {
    pub fn from_config(config: &OrderRemindersConfig, graphql_url: &str) -> Result<Self, JobError> {
        Ok(Self {
            client: GraphQLClient::new(graphql_url)?,
            log_path: PathBuf::from(&config.log_path),
            interval: config.interval(),
            lookback_days: config.lookback_days,
        })
    }

    /// Orders dated within the lookback window. Failures are logged through
    /// tracing and reported as no orders.
    pub async fn pending_orders(&self) -> Vec<PendingOrder> {
        let Some(start_date) = window_start(Utc::now(), self.lookback_days) else {
            tracing::error!(
                lookback_days = self.lookback_days,
                "lookback window does not fit the calendar"
            );
            return Vec::new();
        };

        let data = match self
            .client
            .query_data(PENDING_ORDERS_QUERY, Some(json!({ "startDate": start_date })))
            .await
        {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, "error querying GraphQL endpoint for pending orders");
                return Vec::new();
            }
        };

        data.get("orders")
            .and_then(Value::as_array)
            .map(|orders| orders.iter().map(PendingOrder::from_json).collect())
            .unwrap_or_default()
    }
}

impl PendingOrder {
    fn from_json(order: &Value) -> Self {
        let id = match order.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(other) if !other.is_null() => other.to_string(),
            _ => "N/A".to_string(),
        };

        Self {
            id,
            customer_email: order
                .pointer("/customer/email")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

#[async_trait]
impl ScheduledJob for OrderReminders {
    fn name(&self) -> &'static str {
        "order_reminders"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run(&self) -> Result<String, JobError> {
        let orders = self.pending_orders().await;
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        log_file::append(&self.log_path, &render_block(&timestamp, &orders)).await?;
        tracing::info!(pending = orders.len(), "order reminders processed");
        Ok("Order reminders processed!".to_string())
    }
}

/// First UTC calendar day of the lookback window, as `YYYY-MM-DD`.
///
/// The server reads a bare date as midnight UTC, so the day is taken in UTC
/// too.
fn window_start(now: DateTime<Utc>, lookback_days: i64) -> Option<String> {
    let start = now.checked_sub_signed(TimeDelta::try_days(lookback_days)?)?;
    Some(start.format("%Y-%m-%d").to_string())
}

fn render_block(timestamp: &str, orders: &[PendingOrder]) -> String {
    if orders.is_empty() {
        return format!("\n[{}] No pending orders found.\n", timestamp);
    }

    let mut block = format!("\n[{}] Processing {} pending orders:\n", timestamp, orders.len());
    for order in orders {
        block.push_str(&format!(
            "  - Order ID: {}, Customer Email: {}\n",
            order.id,
            order.customer_email.as_deref().unwrap_or("N/A")
        ));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_block_with_orders() {
        let orders = vec![
            PendingOrder::from_json(&json!({ "id": "a1", "customer": { "email": "alice@example.com" } })),
            PendingOrder::from_json(&json!({ "id": "b2", "customer": null })),
        ];

        assert_eq!(
            render_block("2024-03-05 07:08:09", &orders),
            "\n[2024-03-05 07:08:09] Processing 2 pending orders:\n  \
             - Order ID: a1, Customer Email: alice@example.com\n  \
             - Order ID: b2, Customer Email: N/A\n"
        );
    }

    #[test]
    fn test_window_start_uses_utc_days() {
        let now = DateTime::parse_from_rfc3339("2024-03-08T23:30:00-05:00")
            .unwrap()
            .with_timezone(&Utc);

        // 04:30 UTC on the 9th, so the window opens on the 2nd
        assert_eq!(window_start(now, 7).as_deref(), Some("2024-03-02"));
        assert_eq!(window_start(now, 0).as_deref(), Some("2024-03-09"));
    }

    #[test]
    fn test_window_start_out_of_range() {
        assert_eq!(window_start(Utc::now(), 9_000_000_000_000_000), None);
        assert_eq!(window_start(Utc::now(), i64::MAX), None);
    }

    #[test]
    fn test_render_block_without_orders() {
        assert_eq!(
            render_block("2024-03-05 07:08:09", &[]),
            "\n[2024-03-05 07:08:09] No pending orders found.\n"
        );
    }
}
