//! Core module containing the order model and the dashboard logic

pub mod clock;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod order;
pub mod query;
pub mod service;

pub use clock::Clock;
pub use error::{BackendError, ConfigError, DashboardError, DashboardResult, RequestError};
pub use grid::{GridRow, GridView, NO_RESULTS_MESSAGE, RowAction};
pub use metrics::{DashboardMetrics, compute_metrics};
pub use order::{FulfillmentType, Order, OrderStatus};
pub use query::{GridParams, GridQuery, GridSort, SortColumn, SortDirection};
pub use service::{DashboardService, OrderIndex, OrderProvider};
