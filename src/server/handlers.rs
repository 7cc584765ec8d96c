//! HTTP handlers for the dashboard routes

use super::host::AppState;
use super::view::DashboardPage;
use crate::core::{DashboardMetrics, DashboardResult, GridParams, GridQuery, GridView};
use axum::Json;
use axum::extract::{Query, State};
use axum::response::Html;
use serde_json::{Value, json};

/// Health check endpoint handler
pub async fn health_check(State(host): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": host.service_name(),
    }))
}

/// `GET /api/orders`: visible grid rows for the query-string state
pub async fn list_orders(
    State(host): State<AppState>,
    Query(params): Query<GridParams>,
) -> DashboardResult<Json<GridView>> {
    let query = GridQuery::from_params(&params)?;
    let view = host.service.grid(&query).await?;
    Ok(Json(view))
}

/// `GET /api/metrics`
pub async fn get_metrics(State(host): State<AppState>) -> DashboardResult<Json<DashboardMetrics>> {
    let metrics = host.service.metrics().await?;
    Ok(Json(metrics))
}

/// `GET /`: the dashboard page
///
/// Cards and grid are derived from the same snapshot, so they agree even when
/// the provider returns different data on every call.
pub async fn dashboard_page(
    State(host): State<AppState>,
    Query(params): Query<GridParams>,
) -> DashboardResult<Html<String>> {
    let query = GridQuery::from_params(&params)?;

    let orders = host.service.orders().await?;
    let metrics = host.service.metrics_for(&orders);
    let grid = GridView::build(&orders, &query);

    let html = DashboardPage::new(host.service_name(), &metrics, &query, &grid)
        .render(&host.templates)?;
    Ok(Html(html))
}
