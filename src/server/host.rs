//! Server host holding the shared dashboard state
//!
//! The host is built once by the [`ServerBuilder`](super::ServerBuilder) and
//! shared by every handler through [`AppState`].

use super::view::{DASHBOARD_TEMPLATE, DASHBOARD_TEMPLATE_NAME};
use crate::config::DashboardConfig;
use crate::core::{Clock, DashboardService, OrderProvider};
use anyhow::Result;
use std::sync::Arc;
use tera::Tera;

/// Handler state
pub type AppState = Arc<DashboardHost>;

/// Host context containing all dashboard state
pub struct DashboardHost {
    /// Effective configuration
    pub config: Arc<DashboardConfig>,

    /// Read-side operations over the order provider
    pub service: DashboardService,

    /// Compiled page templates
    pub templates: Arc<Tera>,
}

impl DashboardHost {
    /// Build the host from builder components
    ///
    /// Fails only if the embedded templates do not compile.
    pub fn from_components(
        config: DashboardConfig,
        provider: Arc<dyn OrderProvider>,
        clock: Clock,
    ) -> Result<Self> {
        let mut templates = Tera::default();
        templates.add_raw_template(DASHBOARD_TEMPLATE_NAME, DASHBOARD_TEMPLATE)?;

        Ok(Self {
            config: Arc::new(config),
            service: DashboardService::new(provider, clock),
            templates: Arc::new(templates),
        })
    }

    /// Service name reported in health checks and the page title
    pub fn service_name(&self) -> &str {
        &self.config.telemetry.service_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SampleOrderGenerator;

    fn make_host() -> DashboardHost {
        DashboardHost::from_components(
            DashboardConfig::default(),
            Arc::new(SampleOrderGenerator::default()),
            Clock::System,
        )
        .expect("should build host")
    }

    #[test]
    fn test_templates_compile() {
        let host = make_host();
        assert!(
            host.templates
                .get_template_names()
                .any(|name| name == DASHBOARD_TEMPLATE_NAME)
        );
    }

    #[test]
    fn test_service_name_from_config() {
        let host = make_host();
        assert_eq!(host.service_name(), "OrdersDashboard");
    }

    #[tokio::test]
    async fn test_service_reads_from_provider() {
        let host = make_host();
        assert_eq!(host.service.orders().await.unwrap().len(), 10);
    }
}
