//! Minimal GraphQL-over-HTTP client used by the scheduled jobs

use crate::core::error::JobError;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GraphQLClient {
    http: reqwest::Client,
    url: String,
}

impl GraphQLClient {
    pub fn new(url: impl Into<String>) -> Result<Self, JobError> {
        Self::build(url, None)
    }

    /// Client whose requests fail after `timeout`
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, JobError> {
        Self::build(url, Some(timeout))
    }

    fn build(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, JobError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST a GraphQL document and return the raw response body.
    ///
    /// Any status other than 200 is a [`JobError::Status`] carrying the body
    /// (as JSON when it parses, as a string otherwise).
    pub async fn send(&self, query: &str, variables: Option<Value>) -> Result<Value, JobError> {
        let mut payload = json!({ "query": query });
        if let Some(variables) = variables {
            payload["variables"] = variables;
        }

        let response = self.http.post(&self.url).json(&payload).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(JobError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Like [`send`](Self::send), but returns only `data` and turns a
    /// non-empty `errors` list into [`JobError::GraphQL`].
    pub async fn query_data(&self, query: &str, variables: Option<Value>) -> Result<Value, JobError> {
        let body = self.send(query, variables).await?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let messages: Vec<&str> = errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(Value::as_str))
                    .collect();
                return Err(JobError::GraphQL(messages.join("; ")));
            }
        }

        match body.get("data") {
            Some(data) if !data.is_null() => Ok(data.clone()),
            _ => Err(JobError::UnexpectedShape { path: "data", body }),
        }
    }
}
