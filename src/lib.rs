//! Smogcast API - weather and air quality for a single location
//!
//! A small Actix Web service behind a weather/AQI dashboard. One route,
//! `GET /weather`, fetches current conditions and an hourly forecast from
//! OpenWeather plus current AQI, per-day AQI predictions and alerts from a
//! prediction backend, then reduces the hourly forecast into per-day
//! summaries merged with the predictions.
//!
//! ## Architecture
//!
//! - `models/` - Response models and raw upstream payload shapes
//! - `services/` - Forecast aggregation, upstream clients, orchestration
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - Request IDs, request logging and metrics
//! - `config/` - Environment-driven configuration
//! - `telemetry` - Tracing setup and secret redaction
//! - `utils/` - Request inspection helpers
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::HttpServer;
//! use smogcast_api::{AppState, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let state = AppState::from_env().map_err(std::io::Error::other)?;
//!     HttpServer::new(move || create_app(state.clone()))
//!         .bind("127.0.0.1:8080")?
//!         .run()
//!         .await
//! }
//! ```

pub mod build_info;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use config::{LocationConfig, MetricsConfig, ServerConfig, UpstreamConfig};
pub use error::{DashboardError, UpstreamError, UpstreamSource};
pub use handlers::{
    aqi_bands, create_app, create_base_app, create_openapi_spec, get_metrics, health, version,
    weather,
};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{
    AggregatedResponse, AqiBand, AqiBandInfo, AqiPrediction, AqiSummary, CurrentWeather,
    DailySummary, ErrorResponse, ForecastQuery, HealthResponse, HourlySample, VersionResponse,
};
pub use services::{
    AppMetrics, AqiService, DashboardService, OpenWeatherService, UpstreamClient, UpstreamMetrics,
    aggregator,
};
pub use state::AppState;
pub use telemetry::{LoggingConfig, init_tracing, redact_secrets};
