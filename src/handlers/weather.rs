//! Weather endpoint handler.

use crate::{
    error::DashboardError,
    middleware::request_id,
    models::{AggregatedResponse, ForecastQuery},
    services::{DashboardService, aggregator::clamp_days},
    telemetry::redact_secrets,
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Weather endpoint
///
/// Returns current conditions, a day-by-day forecast and AQI data for the
/// configured location. Any upstream failure fails the whole request with a
/// 500 and an `{ "error": ... }` body.
#[api_v2_operation(
    summary = "Aggregated Weather Endpoint",
    description = "Returns current weather, a daily forecast of up to `days` days (default 5, clamped to 1..=16) merged with AQI predictions, and the current AQI with alerts. Failures return status 500 with an `error` message.",
    tags("Weather")
)]
pub async fn weather(req: HttpRequest) -> Result<web::Json<AggregatedResponse>, Error> {
    let Some(dashboard) = req.app_data::<web::Data<DashboardService>>() else {
        return Err(DashboardError::Config("Weather service is not configured".to_string()).into());
    };

    let query = ForecastQuery::from_query_string(req.query_string());
    let days = clamp_days(query.days.as_deref());

    let response = dashboard.aggregate(days).await.map_err(|e| {
        tracing::error!(
            request_id = ?request_id(&req),
            upstream = e.upstream_source().map(|source| source.as_str()),
            requested_days = days,
            error = %redact_secrets(&e.to_string()),
            "Weather request failed"
        );
        e
    })?;

    tracing::debug!(
        requested_days = days,
        forecast_days = response.forecast.len(),
        "Returning weather response"
    );

    Ok(web::Json(response))
}
