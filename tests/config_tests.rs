//! Integration tests for configuration files and environment overrides

use orders_dashboard::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
search_index:
  connection_string: "Endpoint=https://acme.search.windows.net;ApiKey=secret"
  orders_index_name: orders-prod
server:
  bind_addr: 0.0.0.0:8080
telemetry:
  service_name: OrdersDashboard-Prod
  service_version: 2.1.0
"#,
    );

    let config = DashboardConfig::from_yaml_file(file.path()).unwrap();

    assert!(config.search_index.is_configured());
    assert_eq!(config.search_index.orders_index_name, "orders-prod");
    assert_eq!(config.bind_addr().unwrap().port(), 8080);
    assert_eq!(config.telemetry.service_name, "OrdersDashboard-Prod");
    assert_eq!(config.telemetry.service_version, "2.1.0");
}

#[test]
fn test_empty_file_yields_defaults() {
    let file = write_config("{}\n");
    let config = DashboardConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config, DashboardConfig::default());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    let err = DashboardConfig::from_yaml_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_malformed_file_names_the_path() {
    let file = write_config("server: [unclosed\n");

    let err = DashboardConfig::from_yaml_file(file.path()).unwrap_err();
    match &err {
        ConfigError::Parse { file: Some(path), .. } => {
            assert_eq!(path, &file.path().display().to_string());
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_invalid_value_in_file() {
    let file = write_config("server:\n  bind_addr: \"not an address\"\n");

    let err = DashboardConfig::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "server.bind_addr"));
}

#[test]
fn test_overrides_apply_on_top_of_file() {
    let file = write_config(
        r#"
search_index:
  connection_string: "https://from-file.example.net"
"#,
    );

    let config = DashboardConfig::from_yaml_file(file.path())
        .unwrap()
        .with_overrides_from(|key| match key {
            "ORDERS_DASHBOARD_SEARCH_CONNECTION_STRING" => Some(String::new()),
            "ORDERS_DASHBOARD_BIND_ADDR" => Some("127.0.0.1:0".to_string()),
            _ => None,
        })
        .unwrap();

    assert!(!config.search_index.is_configured());
    assert_eq!(config.bind_addr().unwrap().port(), 0);
}

#[test]
fn test_invalid_override_is_rejected() {
    let err = DashboardConfig::default()
        .with_overrides_from(|key| {
            (key == "ORDERS_DASHBOARD_SEARCH_INDEX_NAME").then(String::new)
        })
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[tokio::test]
async fn test_config_file_drives_provider_selection() {
    let file = write_config(
        r#"
search_index:
  connection_string: "not a url"
"#,
    );
    let config = DashboardConfig::from_yaml_file(file.path()).unwrap();

    let provider = OrderDataProvider::from_config(&config.search_index, Clock::System);
    assert!(!provider.uses_index());
    assert_eq!(provider.orders().await.unwrap().len(), 10);
}
