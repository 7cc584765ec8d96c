//! HTTP server for the dashboard
//!
//! This module provides a `ServerBuilder` that wires the order provider,
//! the clock and the configuration into a [`DashboardHost`] and exposes it as
//! an axum router:
//! - JSON endpoints for the orders grid and the metrics
//! - the server-rendered dashboard page
//! - health checks

pub mod builder;
pub mod handlers;
pub mod host;
pub mod router;
pub mod view;

pub use builder::ServerBuilder;
pub use host::{AppState, DashboardHost};
