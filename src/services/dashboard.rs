//! Weather route orchestration: fetch every source, then aggregate.

use crate::{
    config::{LocationConfig, UpstreamConfig},
    error::DashboardError,
    models::{AggregatedResponse, AqiSummary},
    services::{
        aggregator::aggregate_forecast,
        aqi::AqiService,
        http_client::{UpstreamClient, UpstreamMetrics},
        openweather::OpenWeatherService,
    },
};
use tracing::{info, instrument};

/// Builds the aggregated dashboard response.
///
/// Holds no per-request state; each call works from its own fetched snapshot.
#[derive(Clone)]
pub struct DashboardService {
    weather: OpenWeatherService,
    aqi: AqiService,
    location: LocationConfig,
}

impl DashboardService {
    pub fn new(
        location: LocationConfig,
        upstream: &UpstreamConfig,
        metrics: Option<UpstreamMetrics>,
    ) -> Result<Self, DashboardError> {
        let client = UpstreamClient::new(upstream, metrics)
            .map_err(|e| DashboardError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            weather: OpenWeatherService::new(client.clone(), upstream, location.clone()),
            aqi: AqiService::new(client, upstream),
            location,
        })
    }

    /// Fetch all five sources concurrently and aggregate them.
    ///
    /// `requested_days` must already be clamped. The first failing source
    /// aborts the whole request.
    #[instrument(skip(self), fields(location = %self.location.name))]
    pub async fn aggregate(&self, requested_days: usize) -> Result<AggregatedResponse, DashboardError> {
        self.weather.credential()?;

        let (weather, samples, current_aqi, predictions, alerts) = tokio::try_join!(
            self.weather.current(),
            self.weather.hourly_forecast(),
            self.aqi.current(),
            self.aqi.predictions(),
            self.aqi.alerts(),
        )?;

        let forecast = aggregate_forecast(
            &samples,
            requested_days,
            &predictions,
            &self.location.timezone,
        );

        info!(
            samples = samples.len(),
            days = forecast.len(),
            predictions = predictions.len(),
            "Aggregated weather response"
        );

        Ok(AggregatedResponse {
            weather,
            forecast,
            aqi: AqiSummary {
                current: current_aqi.value,
                category: current_aqi.category,
                predictions,
                alerts,
            },
        })
    }
}
