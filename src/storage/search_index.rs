//! Search index backend for order documents
//!
//! Queries a hosted search service over its REST API:
//!
//! ```text
//! GET {endpoint}/indexes/{index}/docs?api-version=2023-11-01&search=*&$top=1000
//! api-key: {key}
//! ```
//!
//! The response body is `{"value": [Order, ...]}`; extra document fields
//! such as relevance scores are ignored. Documents without a positive order
//! number are skipped with a warning.

use crate::core::{BackendError, Order};
#[cfg(feature = "search-index")]
use crate::core::OrderIndex;
#[cfg(feature = "search-index")]
use anyhow::Result;
#[cfg(feature = "search-index")]
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// REST API version sent with every query
pub const API_VERSION: &str = "2023-11-01";

/// Maximum documents fetched per query
pub const PAGE_SIZE: usize = 1000;

#[cfg_attr(not(feature = "search-index"), allow(dead_code))]
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Parsed backend connection string
///
/// Accepts either a bare endpoint URL or `key=value` pairs separated by
/// semicolons, with `Endpoint` required and `ApiKey` optional:
///
/// ```text
/// https://acme.search.windows.net
/// Endpoint=https://acme.search.windows.net;ApiKey=secret
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConnection {
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl SearchConnection {
    pub fn parse(connection_string: &str) -> Result<Self, BackendError> {
        let raw = connection_string.trim();

        let (endpoint, api_key) = if raw.contains('=') {
            let mut endpoint = None;
            let mut api_key = None;
            for pair in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                let (key, value) = pair.split_once('=').ok_or_else(|| init_error(format!(
                    "malformed connection string segment '{pair}'"
                )))?;
                match key.trim().to_ascii_lowercase().as_str() {
                    "endpoint" => endpoint = Some(value.trim().to_string()),
                    "apikey" | "api-key" | "key" => api_key = Some(value.trim().to_string()),
                    other => {
                        return Err(init_error(format!(
                            "unknown connection string key '{other}'"
                        )));
                    }
                }
            }
            let endpoint =
                endpoint.ok_or_else(|| init_error("connection string has no Endpoint"))?;
            (endpoint, api_key.filter(|k| !k.is_empty()))
        } else {
            (raw.to_string(), None)
        };

        let endpoint = endpoint.trim_end_matches('/').to_string();
        let scheme_ok = endpoint
            .split_once("://")
            .is_some_and(|(scheme, rest)| {
                matches!(scheme, "http" | "https") && !rest.is_empty() && !rest.starts_with('/')
            });
        if !scheme_ok {
            return Err(init_error(format!(
                "endpoint '{endpoint}' is not an absolute http(s) URL"
            )));
        }

        Ok(Self { endpoint, api_key })
    }

    /// URL of the document query for `index`
    pub fn docs_url(&self, index: &str) -> String {
        format!("{}/indexes/{}/docs", self.endpoint, index)
    }
}

fn init_error(message: impl Into<String>) -> BackendError {
    BackendError::Initialization {
        message: message.into(),
    }
}

#[cfg_attr(not(feature = "search-index"), allow(dead_code))]
#[derive(Debug, Deserialize)]
struct SearchResponse {
    value: Vec<Order>,
}

/// Drop documents whose order number is not positive
#[cfg_attr(not(feature = "search-index"), allow(dead_code))]
fn numbered_orders(index: &str, orders: Vec<Order>) -> Vec<Order> {
    let total = orders.len();
    let kept: Vec<Order> = orders
        .into_iter()
        .filter(|order| {
            let valid = order.order_number > 0;
            if !valid {
                tracing::warn!(
                    index = %index,
                    order_number = order.order_number,
                    store_id = %order.store_id,
                    "Skipping search index document without a valid order number"
                );
            }
            valid
        })
        .collect();

    if kept.len() < total {
        tracing::warn!(
            index = %index,
            skipped = total - kept.len(),
            "Search index returned invalid documents"
        );
    }
    kept
}

/// HTTP client for one order index
#[cfg(feature = "search-index")]
#[derive(Debug, Clone)]
pub struct SearchIndexClient {
    http: reqwest::Client,
    connection: SearchConnection,
    index_name: String,
}

#[cfg(feature = "search-index")]
impl SearchIndexClient {
    /// Build a client from a connection string and index name
    pub fn new(connection_string: &str, index_name: &str) -> Result<Self, BackendError> {
        let connection = SearchConnection::parse(connection_string)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| init_error(e.to_string()))?;

        Ok(Self {
            http,
            connection,
            index_name: index_name.to_string(),
        })
    }

    pub fn connection(&self) -> &SearchConnection {
        &self.connection
    }

    fn query_error(&self, message: impl Into<String>) -> BackendError {
        BackendError::Query {
            index: self.index_name.clone(),
            message: message.into(),
        }
    }
}

#[cfg(feature = "search-index")]
#[async_trait]
impl OrderIndex for SearchIndexClient {
    fn index_name(&self) -> &str {
        &self.index_name
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        let url = self.connection.docs_url(&self.index_name);
        tracing::debug!(%url, index = %self.index_name, "Querying search index");

        let top = PAGE_SIZE.to_string();
        let mut request = self.http.get(&url).query(&[
            ("api-version", API_VERSION),
            ("search", "*"),
            ("$top", top.as_str()),
        ]);
        if let Some(key) = &self.connection.api_key {
            request = request.header("api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.query_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.query_error(format!("unexpected status {status}")).into());
        }

        let body: SearchResponse = response.json().await.map_err(|e| BackendError::Decode {
            index: self.index_name.clone(),
            message: e.to_string(),
        })?;

        let orders = numbered_orders(&self.index_name, body.value);
        tracing::debug!(
            index = %self.index_name,
            order_count = orders.len(),
            "Search index returned orders"
        );
        Ok(orders)
    }
}
