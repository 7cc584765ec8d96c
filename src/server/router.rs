//! Router assembly for the dashboard routes

use super::handlers::{dashboard_page, get_metrics, health_check, list_orders};
use super::host::AppState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Build all dashboard routes
///
/// - GET / - Dashboard page
/// - GET /api/orders - Filtered and sorted orders grid
/// - GET /api/metrics - Dashboard metrics
/// - GET /health, GET /healthz - Health checks
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/orders", get(list_orders))
        .route("/api/metrics", get(get_metrics))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
