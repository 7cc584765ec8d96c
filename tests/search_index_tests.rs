//! Search index client and provider fallback tests
//!
//! A small axum app on an ephemeral local port plays the search service.

#![cfg(feature = "search-index")]

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use orders_dashboard::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

const API_KEY: &str = "test-key";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
}

async fn docs(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if headers.get("api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": "bad key" })));
    }
    if params.get("api-version").map(String::as_str) != Some("2023-11-01")
        || params.get("search").map(String::as_str) != Some("*")
    {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad query" })));
    }

    (
        StatusCode::OK,
        Json(json!({
            "@odata.context": "https://stub/indexes('orders')/$metadata#docs",
            "value": [
                {
                    "@search.score": 1.0,
                    "order_number": 5001,
                    "status": "Placed",
                    "store_id": "ST009",
                    "store_name": "Harbor Store",
                    "number_of_items": 4,
                    "fulfillment_type": "Delivery",
                    "fulfillment_partner": "Shipt",
                    "order_date": "2024-05-15T09:00:00"
                },
                {
                    "@search.score": 1.0,
                    "order_number": 5002,
                    "status": "Completed",
                    "store_id": "ST009",
                    "store_name": "Harbor Store",
                    "number_of_items": 1,
                    "fulfillment_type": "Pickup",
                    "fulfillment_partner": "Mi9",
                    "order_date": "2024-05-14T12:00:00"
                },
                {
                    "@search.score": 0.5,
                    "order_number": 0,
                    "status": "Placed",
                    "store_id": "ST009",
                    "store_name": "Harbor Store",
                    "number_of_items": 2,
                    "fulfillment_type": "Pickup",
                    "fulfillment_partner": "Mi9",
                    "order_date": "2024-05-15T11:00:00"
                }
            ]
        })),
    )
}

async fn broken() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, "index offline")
}

async fn garbage() -> impl IntoResponse {
    (StatusCode::OK, "not json")
}

/// Serve the stub search service and return its address
async fn spawn_stub() -> SocketAddr {
    let app = Router::new()
        .route("/indexes/orders/docs", get(docs))
        .route("/indexes/broken/docs", get(broken))
        .route("/indexes/garbage/docs", get(garbage));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn connection_string(addr: SocketAddr, key: &str) -> String {
    format!("Endpoint=http://{addr};ApiKey={key}")
}

#[tokio::test]
async fn test_client_fetches_documents() {
    let addr = spawn_stub().await;
    let client = SearchIndexClient::new(&connection_string(addr, API_KEY), "orders").unwrap();

    // The document numbered 0 is dropped
    let orders = client.fetch_orders().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].order_number, 5001);
    assert_eq!(orders[0].fulfillment_type, FulfillmentType::Delivery);
    assert_eq!(orders[1].status, OrderStatus::Completed);
}

#[tokio::test]
async fn test_client_reports_http_failure_as_query_error() {
    let addr = spawn_stub().await;
    let client = SearchIndexClient::new(&connection_string(addr, API_KEY), "broken").unwrap();

    let err = client.fetch_orders().await.unwrap_err();
    let backend = err.downcast_ref::<BackendError>().unwrap();
    assert!(matches!(backend, BackendError::Query { index, .. } if index == "broken"));
}

#[tokio::test]
async fn test_client_reports_bad_body_as_decode_error() {
    let addr = spawn_stub().await;
    let client = SearchIndexClient::new(&connection_string(addr, API_KEY), "garbage").unwrap();

    let err = client.fetch_orders().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BackendError>(),
        Some(BackendError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_provider_serves_index_orders() {
    let addr = spawn_stub().await;
    let config = SearchIndexConfig {
        connection_string: connection_string(addr, API_KEY),
        orders_index_name: "orders".to_string(),
    };

    let provider = OrderDataProvider::from_config(&config, Clock::Fixed(today()));
    assert!(provider.uses_index());

    let orders = provider.orders().await.unwrap();
    let numbers: Vec<i32> = orders.iter().map(|o| o.order_number).collect();
    assert_eq!(numbers, [5001, 5002]);
}

#[tokio::test]
async fn test_provider_falls_back_on_rejected_key() {
    let addr = spawn_stub().await;
    let config = SearchIndexConfig {
        connection_string: connection_string(addr, "wrong-key"),
        orders_index_name: "orders".to_string(),
    };

    let provider = OrderDataProvider::from_config(&config, Clock::Fixed(today()));
    let orders = provider.orders().await.unwrap();
    assert_eq!(orders, SampleOrderGenerator::default().generate(today()));
}

#[tokio::test]
async fn test_provider_falls_back_when_unreachable() {
    // Bind and drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = OrderDataProvider::with_index(
        Arc::new(SearchIndexClient::new(&format!("http://{addr}"), "orders").unwrap()),
        Clock::Fixed(today()),
    );
    assert_eq!(provider.orders().await.unwrap().len(), 10);
}

#[tokio::test]
async fn test_dashboard_metrics_from_index() {
    let addr = spawn_stub().await;
    let mut config = DashboardConfig::default();
    config.search_index.connection_string = connection_string(addr, API_KEY);

    let host = ServerBuilder::new()
        .with_config(config)
        .with_clock(Clock::Fixed(today()))
        .build_host()
        .unwrap();

    let metrics = host.service.metrics().await.unwrap();
    assert_eq!(metrics.placed_orders_today, 1);
    assert_eq!(metrics.completed_orders, 1);
    assert_eq!(metrics.red_lights, 0);
}
