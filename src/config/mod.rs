//! Configuration loading and management
//!
//! The dashboard reads a YAML file with three optional sections:
//!
//! ```yaml
//! search_index:
//!   connection_string: "Endpoint=https://acme.search.windows.net;ApiKey=secret"
//!   orders_index_name: orders
//! server:
//!   bind_addr: 0.0.0.0:8080
//! telemetry:
//!   service_name: OrdersDashboard
//!   service_version: 1.0.0
//! ```
//!
//! An empty `connection_string` selects sample-data mode.

use crate::core::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Environment variable overriding `search_index.connection_string`
pub const ENV_CONNECTION_STRING: &str = "ORDERS_DASHBOARD_SEARCH_CONNECTION_STRING";
/// Environment variable overriding `search_index.orders_index_name`
pub const ENV_INDEX_NAME: &str = "ORDERS_DASHBOARD_SEARCH_INDEX_NAME";
/// Environment variable overriding `server.bind_addr`
pub const ENV_BIND_ADDR: &str = "ORDERS_DASHBOARD_BIND_ADDR";

/// Search index backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchIndexConfig {
    /// Backend connection string; empty means "use sample data"
    pub connection_string: String,

    /// Name of the index holding order documents
    pub orders_index_name: String,
}

impl SearchIndexConfig {
    /// Section name in the configuration file
    pub const SECTION_NAME: &'static str = "search_index";

    pub fn is_configured(&self) -> bool {
        !self.connection_string.trim().is_empty()
    }
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            connection_string: String::new(),
            orders_index_name: "orders".to_string(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Service identity reported in logs and health checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "OrdersDashboard".to_string(),
            service_version: "1.0.0".to_string(),
        }
    }
}

/// Complete dashboard configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub search_index: SearchIndexConfig,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: display.clone(),
            },
            _ => ConfigError::Io {
                path: display.clone(),
                message: e.to_string(),
            },
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            file: Some(display),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_CONNECTION_STRING) {
            self.search_index.connection_string = value;
        }
        if let Some(value) = lookup(ENV_INDEX_NAME) {
            self.search_index.orders_index_name = value;
        }
        if let Some(value) = lookup(ENV_BIND_ADDR) {
            self.server.bind_addr = value;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject values that cannot work at runtime
    ///
    /// The connection string is deliberately not checked here: a bad one
    /// downgrades the provider to sample data instead of failing startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_index.orders_index_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "search_index.orders_index_name".to_string(),
                value: self.search_index.orders_index_name.clone(),
                message: "index name must not be empty".to_string(),
            });
        }

        self.bind_addr()?;
        Ok(())
    }

    /// Parsed listen address
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.bind_addr".to_string(),
                value: self.server.bind_addr.clone(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();

        assert_eq!(config.search_index.connection_string, "");
        assert_eq!(config.search_index.orders_index_name, "orders");
        assert!(!config.search_index.is_configured());
        assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.telemetry.service_name, "OrdersDashboard");
        assert_eq!(config.telemetry.service_version, "1.0.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_section_name() {
        assert_eq!(SearchIndexConfig::SECTION_NAME, "search_index");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = DashboardConfig::from_yaml_str(
            r#"
search_index:
  connection_string: "https://acme.search.windows.net"
"#,
        )
        .unwrap();

        assert!(config.search_index.is_configured());
        assert_eq!(config.search_index.orders_index_name, "orders");
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_yaml_serialization() {
        let mut config = DashboardConfig::default();
        config.search_index.orders_index_name = "test-index".to_string();
        config.server.bind_addr = "0.0.0.0:8080".to_string();

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = DashboardConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        let err = DashboardConfig::from_yaml_str("search_index: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { file: None, .. }));
    }

    #[test]
    fn test_empty_index_name_is_rejected() {
        let err = DashboardConfig::from_yaml_str(
            r#"
search_index:
  orders_index_name: "  "
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "search_index.orders_index_name"));
    }

    #[test]
    fn test_bad_bind_addr_is_rejected() {
        let err = DashboardConfig::from_yaml_str("server:\n  bind_addr: nowhere\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "server.bind_addr"));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_CONNECTION_STRING, "https://override.example.net"),
            (ENV_INDEX_NAME, "orders-v2"),
            (ENV_BIND_ADDR, "0.0.0.0:9000"),
        ]);

        let config = DashboardConfig::default()
            .with_overrides_from(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.search_index.connection_string, "https://override.example.net");
        assert_eq!(config.search_index.orders_index_name, "orders-v2");
        assert_eq!(config.bind_addr().unwrap().port(), 9000);
    }

    #[test]
    fn test_no_overrides_leaves_config_untouched() {
        let config = DashboardConfig::default()
            .with_overrides_from(|_| None)
            .unwrap();
        assert_eq!(config, DashboardConfig::default());
    }
}
