//! Service traits and the dashboard application service

use super::clock::Clock;
use super::grid::GridView;
use super::metrics::{DashboardMetrics, compute_metrics};
use super::order::Order;
use super::query::GridQuery;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Supplies the order collection shown on the dashboard
///
/// Every call may regenerate or refetch; implementations keep no shared
/// mutable state, so concurrent calls are independent.
#[async_trait]
pub trait OrderProvider: Send + Sync {
    /// Retrieve all orders
    async fn orders(&self) -> Result<Vec<Order>>;
}

/// An external index that stores order documents
///
/// This is the seam between the data provider and a concrete search
/// backend. Errors are expected to be [`BackendError`](super::error::BackendError)s.
#[async_trait]
pub trait OrderIndex: Send + Sync {
    /// Name of the index being queried
    fn index_name(&self) -> &str;

    /// Fetch every order document in the index
    async fn fetch_orders(&self) -> Result<Vec<Order>>;
}

/// Read-side operations behind the HTTP handlers
///
/// Binds an [`OrderProvider`] to a [`Clock`]; each call fetches a fresh
/// snapshot and derives its result from it.
#[derive(Clone)]
pub struct DashboardService {
    provider: Arc<dyn OrderProvider>,
    clock: Clock,
}

impl DashboardService {
    pub fn new(provider: Arc<dyn OrderProvider>, clock: Clock) -> Self {
        Self { provider, clock }
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Retrieve all orders
    pub async fn orders(&self) -> Result<Vec<Order>> {
        tracing::info!("Retrieving all orders");
        let orders = self.provider.orders().await?;
        tracing::debug!(order_count = orders.len(), "Orders retrieved");
        Ok(orders)
    }

    /// Compute metrics over the current snapshot
    pub async fn metrics(&self) -> Result<DashboardMetrics> {
        let orders = self.provider.orders().await?;
        Ok(self.metrics_for(&orders))
    }

    /// Compute metrics over an already fetched snapshot
    pub fn metrics_for(&self, orders: &[Order]) -> DashboardMetrics {
        let today = self.clock.today();
        tracing::info!(%today, order_count = orders.len(), "Calculating dashboard metrics");

        let metrics = compute_metrics(orders, today);

        tracing::info!(
            placed_today = metrics.placed_orders_today,
            average_7day = metrics.average_7day_placed_orders,
            completed = metrics.completed_orders,
            red_lights = metrics.red_lights,
            "Dashboard metrics calculated"
        );
        metrics
    }

    /// Visible grid rows for a query over the current snapshot
    pub async fn grid(&self, query: &GridQuery) -> Result<GridView> {
        let orders = self.orders().await?;
        let view = GridView::build(&orders, query);
        tracing::debug!(
            visible = view.count,
            total = view.total,
            sort = %query.sort,
            "Orders grid built"
        );
        Ok(view)
    }
}
