//! Shared application state built once at startup.

use crate::{
    config::{LocationConfig, MetricsConfig, UpstreamConfig},
    error::DashboardError,
    services::{AppMetrics, DashboardService},
};

/// Everything the handlers share across workers.
///
/// Clones share the same HTTP client and metrics registry.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: DashboardService,
    pub metrics: AppMetrics,
    pub metrics_config: MetricsConfig,
}

impl AppState {
    pub fn new(
        location: LocationConfig,
        upstream: UpstreamConfig,
        metrics_config: MetricsConfig,
    ) -> Result<Self, DashboardError> {
        let metrics = AppMetrics::new()
            .map_err(|e| DashboardError::Config(format!("Failed to create metrics: {e}")))?;
        let dashboard = DashboardService::new(location, &upstream, Some(metrics.upstream.clone()))?;

        Ok(Self {
            dashboard,
            metrics,
            metrics_config,
        })
    }

    /// Build state from environment configuration
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::new(
            LocationConfig::from_env(),
            UpstreamConfig::from_env(),
            MetricsConfig::from_env(),
        )
    }
}
