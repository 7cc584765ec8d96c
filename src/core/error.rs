//! Typed error handling for the orders dashboard
//!
//! # Error Categories
//!
//! - [`ConfigError`]: configuration loading and validation
//! - [`BackendError`]: search index initialization and queries
//! - [`RequestError`]: malformed HTTP requests
//!
//! Backend errors never reach HTTP callers in practice: the data provider
//! logs them and serves generated orders instead. They still map to a
//! status code so that any code path which does surface one stays
//! well-formed.
//!
//! # Example
//!
//! ```rust,ignore
//! match GridQuery::from_params(&params) {
//!     Ok(query) => render(query),
//!     Err(e) => return DashboardError::from(e).into_response(),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The main error type of the dashboard
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Request(#[from] RequestError),

    /// Unexpected failures (template rendering, task panics)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Backend(e) => e.status_code(),
            DashboardError::Request(e) => e.status_code(),
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Backend(e) => e.error_code(),
            DashboardError::Request(e) => e.error_code(),
            DashboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Request(RequestError::InvalidQueryParam { param, value, .. }) => {
                Some(serde_json::json!({
                    "param": param,
                    "value": value,
                }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "Request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<BackendError>() {
            Ok(backend) => DashboardError::Backend(backend),
            Err(err) => DashboardError::Internal(format!("{err:#}")),
        }
    }
}

impl From<tera::Error> for DashboardError {
    fn from(err: tera::Error) -> Self {
        DashboardError::Internal(format!("template rendering failed: {err}"))
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config{}: {message}", file_suffix(.file.as_deref()))]
    Parse {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

fn file_suffix(file: Option<&str>) -> String {
    file.map(|f| format!(" file '{f}'")).unwrap_or_default()
}

// =============================================================================
// Backend Errors
// =============================================================================

/// Errors raised by the search index backend
///
/// A missing connection string is not an error: it selects sample-data mode.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The client could not be built; the provider stays on sample data
    #[error("Failed to initialize search index client: {message}")]
    Initialization { message: String },

    /// A single query failed; only that call falls back to sample data
    #[error("Search index query on '{index}' failed: {message}")]
    Query { index: String, message: String },

    /// The index answered with a body that does not decode into orders
    #[error("Search index '{index}' returned malformed documents: {message}")]
    Decode { index: String, message: String },
}

impl BackendError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BackendError::Initialization { .. } => StatusCode::SERVICE_UNAVAILABLE,
            BackendError::Query { .. } => StatusCode::BAD_GATEWAY,
            BackendError::Decode { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            BackendError::Initialization { .. } => "BACKEND_INITIALIZATION_FAILED",
            BackendError::Query { .. } => "BACKEND_QUERY_FAILED",
            BackendError::Decode { .. } => "BACKEND_DECODE_FAILED",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid value '{value}' for query parameter '{param}': {message}")]
    InvalidQueryParam {
        param: String,
        value: String,
        message: String,
    },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidQueryParam { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidQueryParam { .. } => "INVALID_QUERY_PARAM",
        }
    }
}

/// A specialized Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_maps_to_400() {
        let err: DashboardError = RequestError::InvalidQueryParam {
            param: "status".to_string(),
            value: "Lost".to_string(),
            message: "unknown order status".to_string(),
        }
        .into();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_QUERY_PARAM");

        let response = err.to_response();
        assert_eq!(response.code, "INVALID_QUERY_PARAM");
        assert!(response.message.contains("Lost"));
        assert_eq!(response.details.unwrap()["param"], "status");
    }

    #[test]
    fn test_backend_error_codes() {
        let err: DashboardError = BackendError::Query {
            index: "orders".to_string(),
            message: "connection refused".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "BACKEND_QUERY_FAILED");
        assert!(err.to_string().contains("orders"));

        let init = BackendError::Initialization {
            message: "relative URL without a base".to_string(),
        };
        assert_eq!(init.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_config_parse_error_display() {
        let with_file = ConfigError::Parse {
            file: Some("dashboard.yaml".to_string()),
            message: "invalid syntax".to_string(),
        };
        assert_eq!(
            with_file.to_string(),
            "Failed to parse config file 'dashboard.yaml': invalid syntax"
        );

        let without_file = ConfigError::Parse {
            file: None,
            message: "invalid syntax".to_string(),
        };
        assert_eq!(without_file.to_string(), "Failed to parse config: invalid syntax");

        let err: DashboardError = without_file.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_anyhow_conversion_keeps_backend_errors() {
        let err = anyhow::Error::new(BackendError::Decode {
            index: "orders".to_string(),
            message: "missing field".to_string(),
        });
        let converted: DashboardError = err.into();
        assert_eq!(converted.error_code(), "BACKEND_DECODE_FAILED");

        let other: DashboardError = anyhow::anyhow!("boom").into();
        assert_eq!(other.error_code(), "INTERNAL_ERROR");
    }
}
