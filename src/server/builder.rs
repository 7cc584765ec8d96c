//! ServerBuilder for fluent API to build the dashboard server

use super::host::DashboardHost;
use super::router::build_routes;
use crate::config::DashboardConfig;
use crate::core::{Clock, OrderProvider};
use crate::storage::OrderDataProvider;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the dashboard HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(DashboardConfig::from_yaml_file("dashboard.yaml")?)
///     .build()?;
/// ```
///
/// Without an explicit provider, one is derived from the configuration's
/// `search_index` section.
pub struct ServerBuilder {
    config: DashboardConfig,
    provider: Option<Arc<dyn OrderProvider>>,
    clock: Clock,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: DashboardConfig::default(),
            provider: None,
            clock: Clock::System,
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Serve orders from `provider` instead of the configured backend
    pub fn with_provider(mut self, provider: impl OrderProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Set the clock that defines "today"
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the shared host
    pub fn build_host(mut self) -> Result<DashboardHost> {
        let provider = match self.provider.take() {
            Some(provider) => provider,
            None => Arc::new(OrderDataProvider::from_config(
                &self.config.search_index,
                self.clock,
            )),
        };

        DashboardHost::from_components(self.config, provider, self.clock)
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        Ok(build_routes(host))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured `server.bind_addr`
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr()?;
        let service_name = self.config.telemetry.service_name.clone();
        let service_version = self.config.telemetry.service_version.clone();

        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(
            service = %service_name,
            version = %service_version,
            "Server listening on {}",
            addr
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
///
/// A handler that cannot be installed never fires; the other one still does.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Order;
    use async_trait::async_trait;

    struct EmptyProvider;

    #[async_trait]
    impl OrderProvider for EmptyProvider {
        async fn orders(&self) -> Result<Vec<Order>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_new_uses_default_config() {
        let builder = ServerBuilder::new();
        assert_eq!(builder.config, DashboardConfig::default());
        assert!(builder.provider.is_none());
        assert_eq!(builder.clock, Clock::System);
    }

    #[test]
    fn test_default_is_same_as_new() {
        let builder = ServerBuilder::default();
        assert!(builder.provider.is_none());
    }

    #[tokio::test]
    async fn test_build_host_defaults_to_sample_data() {
        let host = ServerBuilder::new().build_host().unwrap();
        assert_eq!(host.service.orders().await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_explicit_provider_wins_over_config() {
        let mut config = DashboardConfig::default();
        config.search_index.connection_string = "https://acme.search.windows.net".to_string();

        let host = ServerBuilder::new()
            .with_config(config)
            .with_provider(EmptyProvider)
            .build_host()
            .unwrap();
        assert!(host.service.orders().await.unwrap().is_empty());
    }

    #[test]
    fn test_with_clock_reaches_service() {
        let day = chrono::NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let host = ServerBuilder::new()
            .with_clock(Clock::Fixed(day))
            .build_host()
            .unwrap();
        assert_eq!(host.service.clock(), Clock::Fixed(day));
    }

    #[test]
    fn test_build_produces_router() {
        assert!(ServerBuilder::new().build().is_ok());
    }
}
