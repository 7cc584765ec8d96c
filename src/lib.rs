//! # Orders Dashboard
//!
//! An operations dashboard for retail orders, served over HTTP.
//!
//! ## Features
//!
//! - **Metrics**: placed orders today, 7-day placed average, completed
//!   orders and canceled "red lights"
//! - **Orders grid**: free-text search, status and fulfillment filters,
//!   sortable columns, per-row actions
//! - **Two data sources**: a hosted search index, or deterministic sample
//!   data when no index is configured or it cannot be reached
//! - **Configuration-Based**: YAML file plus environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orders_dashboard::prelude::*;
//!
//! let config = DashboardConfig::from_yaml_file("dashboard.yaml")?.with_env_overrides()?;
//! ServerBuilder::new().with_config(config).serve().await?;
//! ```
//!
//! The pure parts work without a server:
//!
//! ```rust,ignore
//! let orders = SampleOrderGenerator::default().generate(today);
//! let metrics = compute_metrics(&orders, today);
//! let view = GridView::build(&orders, &GridQuery::default().with_search("downtown"));
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Model ===
    pub use crate::core::{
        Clock, DashboardMetrics, FulfillmentType, Order, OrderStatus, compute_metrics,
    };

    // === Grid ===
    pub use crate::core::{
        GridParams, GridQuery, GridRow, GridSort, GridView, NO_RESULTS_MESSAGE, RowAction,
        SortColumn, SortDirection,
    };

    // === Services ===
    pub use crate::core::{DashboardService, OrderIndex, OrderProvider};

    // === Errors ===
    pub use crate::core::{
        BackendError, ConfigError, DashboardError, DashboardResult, RequestError,
    };

    // === Configuration ===
    pub use crate::config::{DashboardConfig, SearchIndexConfig, ServerConfig, TelemetryConfig};

    // === Storage ===
    pub use crate::storage::{OrderDataProvider, SampleOrderGenerator};
    #[cfg(feature = "search-index")]
    pub use crate::storage::SearchIndexClient;

    // === Server ===
    pub use crate::server::{DashboardHost, ServerBuilder};
}
