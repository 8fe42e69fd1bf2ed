//! Error types for upstream fetches and the aggregated weather request.

use crate::models::ErrorResponse;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

/// Generic message used when an upstream gives no usable error text
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch weather data";

/// Transport-level failures talking to an upstream service
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Upstream returned status {status}")]
    Status {
        status: u16,
        /// Message extracted from the upstream's error body, if any
        message: Option<String>,
    },

    #[error("Invalid response payload: {0}")]
    Parse(String),
}

impl UpstreamError {
    /// The upstream's own explanation, when it sent one
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            UpstreamError::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// The five upstream reads the weather route depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamSource {
    CurrentWeather,
    Forecast,
    CurrentAqi,
    AqiPredictions,
    AqiAlerts,
}

impl UpstreamSource {
    /// Stable label for metrics and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamSource::CurrentWeather => "current_weather",
            UpstreamSource::Forecast => "forecast",
            UpstreamSource::CurrentAqi => "current_aqi",
            UpstreamSource::AqiPredictions => "aqi_predictions",
            UpstreamSource::AqiAlerts => "aqi_alerts",
        }
    }
}

impl fmt::Display for UpstreamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpstreamSource::CurrentWeather => "current weather",
            UpstreamSource::Forecast => "forecast",
            UpstreamSource::CurrentAqi => "current AQI",
            UpstreamSource::AqiPredictions => "AQI predictions",
            UpstreamSource::AqiAlerts => "AQI alerts",
        };
        f.write_str(name)
    }
}

/// Errors that abort a weather request.
///
/// Every variant maps to a 500 with a `{ "error": ... }` body; there is no
/// partial delivery.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Missing OpenWeather API key")]
    MissingCredential,

    #[error("{}", upstream_display(.upstream, .error))]
    Upstream {
        upstream: UpstreamSource,
        error: UpstreamError,
    },

    #[error("{0}")]
    Config(String),
}

fn upstream_display(upstream: &UpstreamSource, error: &UpstreamError) -> String {
    match error.upstream_message() {
        Some(message) => message.to_string(),
        None => format!("Failed to fetch {upstream}"),
    }
}

impl DashboardError {
    /// The upstream read that failed, if the failure came from one
    pub fn upstream_source(&self) -> Option<UpstreamSource> {
        match self {
            DashboardError::Upstream { upstream, .. } => Some(*upstream),
            _ => None,
        }
    }

    pub fn upstream(upstream: UpstreamSource) -> impl FnOnce(UpstreamError) -> Self {
        move |error| DashboardError::Upstream { upstream, error }
    }
}

impl ResponseError for DashboardError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let error = if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse { error })
    }
}
