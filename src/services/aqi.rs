//! Client for the AQI prediction backend.

use crate::{
    config::UpstreamConfig,
    error::{DashboardError, UpstreamSource},
    models::{
        AqiBand, AqiPrediction,
        upstream::{AlertsPayload, CurrentAqiPayload, PredictionsPayload},
    },
    services::http_client::UpstreamClient,
};

/// Current AQI reading and its category
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurrentAqi {
    pub value: Option<f64>,
    pub category: Option<String>,
}

/// Reads current AQI, per-day predictions and alerts
#[derive(Clone)]
pub struct AqiService {
    client: UpstreamClient,
    base_url: String,
}

impl AqiService {
    pub fn new(client: UpstreamClient, config: &UpstreamConfig) -> Self {
        Self {
            client,
            base_url: config.aqi_api_base.trim_end_matches('/').to_string(),
        }
    }

    pub async fn current(&self) -> Result<CurrentAqi, DashboardError> {
        let payload: CurrentAqiPayload = self
            .client
            .get_json(&format!("{}/api/current-aqi", self.base_url))
            .await
            .map_err(DashboardError::upstream(UpstreamSource::CurrentAqi))?;

        let category = payload.category.or_else(|| {
            payload
                .current_aqi
                .map(|aqi| AqiBand::from_value(aqi).label().to_string())
        });

        Ok(CurrentAqi {
            value: payload.current_aqi,
            category,
        })
    }

    /// Per-day predictions in the backend's order, which is assumed to match
    /// the forecast days
    pub async fn predictions(&self) -> Result<Vec<AqiPrediction>, DashboardError> {
        let payload: PredictionsPayload = self
            .client
            .get_json(&format!("{}/api/predictions", self.base_url))
            .await
            .map_err(DashboardError::upstream(UpstreamSource::AqiPredictions))?;

        Ok(payload
            .predictions
            .into_iter()
            .map(AqiPrediction::with_derived_category)
            .collect())
    }

    pub async fn alerts(&self) -> Result<Vec<String>, DashboardError> {
        let payload: AlertsPayload = self
            .client
            .get_json(&format!("{}/api/alerts", self.base_url))
            .await
            .map_err(DashboardError::upstream(UpstreamSource::AqiAlerts))?;

        Ok(payload.alerts)
    }
}
