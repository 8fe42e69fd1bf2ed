//! OpenAPI specification generation and app factory.

use crate::{
    error::DashboardError,
    handlers::{aqi_bands, get_metrics, health, version, weather},
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    state::AppState,
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the shared OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Smogcast API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Weather and air quality for a single configured location.\n\n\
                ## Weather\n\
                `GET /weather?days=N` joins current conditions, the hourly forecast and the AQI \
                prediction backend into one response:\n\
                ```json\n\
                {\n\
                  \"weather\": { \"city\": \"Karachi, Pakistan\", \"temp\": 31, ... },\n\
                  \"forecast\": [ { \"time\": \"Mon, Jan 15\", \"date\": \"01/15/2024\", \"predictedAQI\": 142, ... } ],\n\
                  \"aqi\": { \"current\": 156, \"category\": \"Unhealthy\", \"predictions\": [], \"alerts\": [] }\n\
                }\n\
                ```\n\
                Forecast days are calendar days in the location's own time zone. \
                `chanceOfRain` is the cloud cover of the day's midpoint sample. \
                AQI predictions are attached to forecast days by position.\n\
                \n\
                **Configuration:**\n\
                - `OPENWEATHER_API_KEY` (required), `OPENWEATHER_BASE_URL`\n\
                - `AQI_API_BASE` for the prediction backend\n\
                - `LOCATION_LAT`, `LOCATION_LON`, `LOCATION_NAME`, `LOCATION_TIMEZONE`\n\
                - `UPSTREAM_TIMEOUT_SECONDS`, `UPSTREAM_CONNECT_TIMEOUT_SECONDS`"
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the application around already-built shared state
///
/// Used by `main` (state built once, cloned per worker) and by tests that
/// need to point the upstream sources at mock servers.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(state.dashboard))
        .app_data(web::Data::new(state.metrics))
        .app_data(web::Data::new(state.metrics_config))
        .service(web::resource("/weather").route(web::get().to(weather)))
        .service(web::resource("/api/weather").route(web::get().to(weather)))
        .service(web::resource("/api/aqi/bands").route(web::get().to(aqi_bands)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}

/// Creates the application with state loaded from the environment
pub fn create_base_app() -> Result<
    App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    >,
    DashboardError,
> {
    Ok(create_app(AppState::from_env()?))
}
