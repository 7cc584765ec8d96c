//! Order data provider with search index and sample data modes
//!
//! The mode is chosen once, when the provider is built:
//!
//! - no connection string: sample data for the lifetime of the provider
//! - connection string that cannot be turned into a client: sample data,
//!   with a warning logged at startup
//! - working client: every call queries the index; a failed query falls back
//!   to sample data for that call only

use super::sample::SampleOrderGenerator;
use crate::config::SearchIndexConfig;
use crate::core::{Clock, Order, OrderIndex, OrderProvider};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// [`OrderProvider`] backed by an optional search index
#[derive(Clone)]
pub struct OrderDataProvider {
    index: Option<Arc<dyn OrderIndex>>,
    generator: SampleOrderGenerator,
}

impl OrderDataProvider {
    /// Provider that only ever serves sample data
    pub fn sample(clock: Clock) -> Self {
        Self {
            index: None,
            generator: SampleOrderGenerator::new(clock),
        }
    }

    /// Provider that queries `index` and falls back to sample data
    pub fn with_index(index: Arc<dyn OrderIndex>, clock: Clock) -> Self {
        Self {
            index: Some(index),
            generator: SampleOrderGenerator::new(clock),
        }
    }

    /// Select the mode from configuration
    pub fn from_config(config: &SearchIndexConfig, clock: Clock) -> Self {
        if !config.is_configured() {
            tracing::info!("Search index connection string not configured, using sample data");
            return Self::sample(clock);
        }

        Self::connect(config, clock)
    }

    #[cfg(feature = "search-index")]
    fn connect(config: &SearchIndexConfig, clock: Clock) -> Self {
        use super::search_index::SearchIndexClient;

        match SearchIndexClient::new(&config.connection_string, &config.orders_index_name) {
            Ok(client) => {
                tracing::info!(
                    endpoint = %client.connection().endpoint,
                    index = %config.orders_index_name,
                    "Search index client initialized"
                );
                Self::with_index(Arc::new(client), clock)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to initialize search index client, using sample data"
                );
                Self::sample(clock)
            }
        }
    }

    #[cfg(not(feature = "search-index"))]
    fn connect(_config: &SearchIndexConfig, clock: Clock) -> Self {
        tracing::warn!(
            "Search index configured but the search-index feature is disabled, using sample data"
        );
        Self::sample(clock)
    }

    /// Whether calls go to a search index first
    pub fn uses_index(&self) -> bool {
        self.index.is_some()
    }

    fn sample_orders(&self) -> Vec<Order> {
        self.generator.generate(self.generator.clock().today())
    }
}

#[async_trait]
impl OrderProvider for OrderDataProvider {
    async fn orders(&self) -> Result<Vec<Order>> {
        let Some(index) = &self.index else {
            tracing::info!("Using sample data for orders");
            return Ok(self.sample_orders());
        };

        tracing::info!(index = index.index_name(), "Retrieving orders from search index");
        match index.fetch_orders().await {
            Ok(orders) => {
                tracing::info!(order_count = orders.len(), "Retrieved orders from search index");
                Ok(orders)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    index = index.index_name(),
                    "Error retrieving orders from search index, falling back to sample data"
                );
                Ok(self.sample_orders())
            }
        }
    }
}
