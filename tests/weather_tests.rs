//! Weather endpoint integration tests.
//!
//! OpenWeather and the AQI prediction backend are replaced by a wiremock
//! server; the app is built exactly as `main` builds it.

use actix_web::{App, http::StatusCode, test, web};
use smogcast_api::{AppState, LocationConfig, MetricsConfig, UpstreamConfig, create_app, weather};
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Local midnight of 2024-01-15 in Karachi (UTC+5), epoch seconds
const JAN_15_LOCAL_MIDNIGHT: i64 = 1_705_258_800;
const HOUR: i64 = 3_600;
const DAY: i64 = 24 * HOUR;

// =============================================================================
// Fixtures
// =============================================================================

fn forecast_item(
    dt: i64,
    temp: f64,
    humidity: f64,
    wind: f64,
    condition: &str,
    icon: &str,
    clouds: u32,
) -> serde_json::Value {
    serde_json::json!({
        "dt": dt,
        "main": { "temp": temp, "feels_like": temp, "humidity": humidity, "pressure": 1010 },
        "weather": [{ "id": 800, "main": condition, "description": condition.to_lowercase(), "icon": icon }],
        "clouds": { "all": clouds },
        "wind": { "speed": wind, "deg": 200 },
        "dt_txt": ""
    })
}

/// Three local days. The last sample is 01:00 on Jan 17 in Karachi, which is
/// still Jan 16 in UTC.
fn forecast_response() -> serde_json::Value {
    let day1 = JAN_15_LOCAL_MIDNIGHT;
    let day2 = day1 + DAY;
    let day3 = day2 + DAY;

    serde_json::json!({
        "cod": "200",
        "cnt": 7,
        "list": [
            forecast_item(day1 + 2 * HOUR, 20.0, 40.0, 2.0, "Clear", "01n", 0),
            forecast_item(day1 + 5 * HOUR, 22.0, 45.0, 3.0, "Clear", "01d", 5),
            forecast_item(day1 + 8 * HOUR, 25.0, 50.0, 3.5, "Clouds", "03d", 40),
            forecast_item(day1 + 11 * HOUR, 23.0, 52.0, 4.0, "Clouds", "04d", 60),
            forecast_item(day2 + 2 * HOUR, 18.0, 60.0, 5.0, "Rain", "10n", 80),
            forecast_item(day2 + 5 * HOUR, 19.0, 70.0, 6.0, "Rain", "10d", 90),
            forecast_item(day3 + HOUR, 15.0, 65.0, 1.0, "Mist", "50n", 20),
        ],
        "city": { "name": "Karachi", "timezone": 18000 }
    })
}

fn current_weather_response() -> serde_json::Value {
    serde_json::json!({
        "weather": [{ "id": 721, "main": "Haze", "description": "haze", "icon": "50d" }],
        "main": { "temp": 31.6, "feels_like": 35.2, "humidity": 62, "pressure": 1008 },
        "visibility": 4500,
        "wind": { "speed": 5.14, "deg": 230 },
        "sys": { "country": "PK", "sunrise": 1_705_284_000, "sunset": 1_705_323_600 },
        "timezone": 18000,
        "name": "Karachi"
    })
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount every upstream with a successful response
async fn mount_all_upstreams(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_response()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_response()))
        .mount(server)
        .await;

    mount_aqi_upstreams(server).await;
}

async fn mount_aqi_upstreams(server: &MockServer) {
    mount_json(
        server,
        "/api/current-aqi",
        serde_json::json!({ "current_aqi": 156, "category": "Unhealthy", "timestamp": "2024-01-15T09:00:00" }),
    )
    .await;
    mount_json(
        server,
        "/api/predictions",
        serde_json::json!({
            "predictions": [
                { "date": "2024-01-15", "predicted_aqi": 142.5, "category": "Unhealthy for Sensitive Groups" }
            ]
        }),
    )
    .await;
    mount_json(
        server,
        "/api/alerts",
        serde_json::json!({
            "alerts": ["UNHEALTHY: Some members of the general public may experience health effects"],
            "current_aqi": 156
        }),
    )
    .await;
}

fn upstream_config(server: &MockServer, api_key: Option<&str>) -> UpstreamConfig {
    UpstreamConfig {
        openweather_api_key: api_key.map(str::to_string),
        openweather_base_url: server.uri(),
        aqi_api_base: server.uri(),
        timeout_seconds: 1,
        connect_timeout_seconds: 1,
    }
}

fn test_state(server: &MockServer, api_key: Option<&str>) -> AppState {
    AppState::new(
        LocationConfig::default(),
        upstream_config(server, api_key),
        MetricsConfig::default(),
    )
    .expect("Failed to create app state")
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = test::init_service(create_app(state)).await;
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).expect("Response should be JSON");
    (status, json)
}

// =============================================================================
// Success path
// =============================================================================

#[actix_web::test]
async fn test_weather_aggregates_all_sources() {
    let server = MockServer::start().await;
    mount_all_upstreams(&server).await;

    let (status, json) = get_json(test_state(&server, Some("test-key")), "/weather?days=5").await;

    assert_eq!(status, StatusCode::OK, "Unexpected body: {json}");

    // Current conditions
    let weather = &json["weather"];
    assert_eq!(weather["city"], "Karachi, Pakistan");
    assert_eq!(weather["temp"], 32);
    assert_eq!(weather["feelsLike"], 35);
    assert_eq!(weather["humidity"], 62);
    assert_eq!(weather["windSpeed"], 5.1);
    assert_eq!(weather["visibility"], 5);
    assert_eq!(weather["condition"], "Haze");
    assert_eq!(weather["sunrise"], "07:00 AM");
    assert_eq!(weather["sunset"], "06:00 PM");

    // Three local calendar days, ascending
    let forecast = json["forecast"].as_array().expect("forecast should be an array");
    assert_eq!(forecast.len(), 3);
    assert_eq!(forecast[0]["date"], "01/15/2024");
    assert_eq!(forecast[1]["date"], "01/16/2024");
    assert_eq!(forecast[2]["date"], "01/17/2024");

    let day1 = &forecast[0];
    assert_eq!(day1["time"], "Mon, Jan 15");
    assert_eq!(day1["temp"], 25);
    assert_eq!(day1["tempMax"], 25);
    assert_eq!(day1["tempMin"], 20);
    assert_eq!(day1["humidity"], 47);
    assert_eq!(day1["windSpeed"], 3.1);
    assert_eq!(day1["condition"], "Clouds");
    assert_eq!(day1["icon"], "03d");
    assert_eq!(day1["chanceOfRain"], 40);

    let day2 = &forecast[1];
    assert_eq!(day2["temp"], 19);
    assert_eq!(day2["tempMax"], 19);
    assert_eq!(day2["tempMin"], 18);
    assert_eq!(day2["humidity"], 65);
    assert_eq!(day2["windSpeed"], 5.5);
    assert_eq!(day2["condition"], "Rain");

    assert_eq!(forecast[2]["condition"], "Mist");

    // One prediction: only the first day gets AQI fields
    assert_eq!(day1["predictedAQI"].as_f64(), Some(142.5));
    assert_eq!(day1["aqiCategory"], "Unhealthy for Sensitive Groups");
    assert!(day2["predictedAQI"].is_null());
    assert!(day2["aqiCategory"].is_null());
    assert!(forecast[2]["predictedAQI"].is_null());

    // AQI block
    let aqi = &json["aqi"];
    assert_eq!(aqi["current"].as_f64(), Some(156.0));
    assert_eq!(aqi["category"], "Unhealthy");
    assert_eq!(aqi["predictions"].as_array().map(Vec::len), Some(1));
    assert_eq!(aqi["predictions"][0]["date"], "2024-01-15");
    assert_eq!(aqi["alerts"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_weather_truncates_to_requested_days() {
    let server = MockServer::start().await;
    mount_all_upstreams(&server).await;

    let (status, json) = get_json(test_state(&server, Some("test-key")), "/weather?days=2").await;

    assert_eq!(status, StatusCode::OK);
    let forecast = json["forecast"].as_array().unwrap();
    assert_eq!(forecast.len(), 2);
    assert_eq!(forecast[0]["date"], "01/15/2024");
    assert_eq!(forecast[1]["date"], "01/16/2024");
}

#[actix_web::test]
async fn test_weather_days_clamped_and_defaulted() {
    let server = MockServer::start().await;
    mount_all_upstreams(&server).await;

    // More days than the feed covers is not an error
    let (status, json) = get_json(test_state(&server, Some("test-key")), "/weather?days=30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["forecast"].as_array().unwrap().len(), 3);

    // Malformed and missing values fall back to the default of 5
    let (status, json) = get_json(test_state(&server, Some("test-key")), "/weather?days=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["forecast"].as_array().unwrap().len(), 3);

    // Negative values clamp to one day
    let (status, json) = get_json(test_state(&server, Some("test-key")), "/api/weather?days=-3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["forecast"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_weather_fills_missing_prediction_category() {
    let server = MockServer::start().await;
    mount_json(&server, "/weather", current_weather_response()).await;
    mount_json(&server, "/forecast", forecast_response()).await;
    mount_json(&server, "/api/current-aqi", serde_json::json!({ "current_aqi": 45 })).await;
    mount_json(
        &server,
        "/api/predictions",
        serde_json::json!({ "predictions": [{ "predicted_aqi": 210 }] }),
    )
    .await;
    mount_json(&server, "/api/alerts", serde_json::json!({})).await;

    let (status, json) = get_json(test_state(&server, Some("test-key")), "/weather").await;

    assert_eq!(status, StatusCode::OK, "Unexpected body: {json}");
    assert_eq!(json["aqi"]["category"], "Good");
    assert_eq!(json["forecast"][0]["aqiCategory"], "Very Unhealthy");
    assert_eq!(json["aqi"]["alerts"], serde_json::json!([]));
}

#[actix_web::test]
async fn test_weather_null_predictions_and_alerts() {
    let server = MockServer::start().await;
    mount_json(&server, "/weather", current_weather_response()).await;
    mount_json(&server, "/forecast", forecast_response()).await;
    mount_json(&server, "/api/current-aqi", serde_json::json!({ "current_aqi": 156 })).await;
    mount_json(&server, "/api/predictions", serde_json::json!({ "predictions": null })).await;
    mount_json(&server, "/api/alerts", serde_json::json!({ "alerts": null })).await;

    let (status, json) = get_json(test_state(&server, Some("test-key")), "/weather").await;

    assert_eq!(status, StatusCode::OK, "Unexpected body: {json}");
    let forecast = json["forecast"].as_array().unwrap();
    assert_eq!(forecast.len(), 3);
    assert!(forecast.iter().all(|day| day["predictedAQI"].is_null()));
    assert!(forecast.iter().all(|day| day["aqiCategory"].is_null()));
    assert_eq!(json["aqi"]["predictions"], serde_json::json!([]));
    assert_eq!(json["aqi"]["alerts"], serde_json::json!([]));
}

#[actix_web::test]
async fn test_weather_repeated_days_uses_first_value() {
    let server = MockServer::start().await;
    mount_all_upstreams(&server).await;

    let (status, json) =
        get_json(test_state(&server, Some("test-key")), "/weather?days=2&days=1").await;
    assert_eq!(status, StatusCode::OK, "Unexpected body: {json}");
    assert_eq!(json["forecast"].as_array().unwrap().len(), 2);

    let (status, json) =
        get_json(test_state(&server, Some("test-key")), "/weather?days=abc&days=1").await;
    assert_eq!(status, StatusCode::OK, "Unexpected body: {json}");
    assert_eq!(json["forecast"].as_array().unwrap().len(), 3);
}

// =============================================================================
// Failure path
// =============================================================================

#[actix_web::test]
async fn test_weather_missing_api_key() {
    let server = MockServer::start().await;

    // Nothing upstream should be called without a credential
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, json) = get_json(test_state(&server, None), "/weather").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({ "error": "Missing OpenWeather API key" }));
}

#[actix_web::test]
async fn test_weather_surfaces_upstream_message() {
    let server = MockServer::start().await;
    mount_aqi_upstreams(&server).await;
    mount_json(&server, "/forecast", forecast_response()).await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
        })))
        .mount(&server)
        .await;

    let (status, json) = get_json(test_state(&server, Some("test-key")), "/weather").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("Invalid API key"), "Unexpected error: {error}");
}

#[actix_web::test]
async fn test_weather_aqi_failure_aborts_request() {
    let server = MockServer::start().await;
    mount_json(&server, "/weather", current_weather_response()).await;
    mount_json(&server, "/forecast", forecast_response()).await;
    mount_json(&server, "/api/current-aqi", serde_json::json!({ "current_aqi": 80 })).await;
    mount_json(&server, "/api/alerts", serde_json::json!({ "alerts": [] })).await;

    Mock::given(method("GET"))
        .and(path("/api/predictions"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (status, json) = get_json(test_state(&server, Some("test-key")), "/weather").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({ "error": "Failed to fetch AQI predictions" }));
}

#[actix_web::test]
async fn test_weather_prediction_backend_detail() {
    let server = MockServer::start().await;
    mount_json(&server, "/weather", current_weather_response()).await;
    mount_json(&server, "/forecast", forecast_response()).await;
    mount_json(&server, "/api/predictions", serde_json::json!({ "predictions": [] })).await;
    mount_json(&server, "/api/alerts", serde_json::json!({ "alerts": [] })).await;

    Mock::given(method("GET"))
        .and(path("/api/current-aqi"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "detail": "No recent data available" })),
        )
        .mount(&server)
        .await;

    let (status, json) = get_json(test_state(&server, Some("test-key")), "/weather").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "No recent data available");
}

#[actix_web::test]
async fn test_weather_malformed_forecast_fails() {
    let server = MockServer::start().await;
    mount_aqi_upstreams(&server).await;
    mount_json(&server, "/weather", current_weather_response()).await;
    mount_json(
        &server,
        "/forecast",
        serde_json::json!({ "list": [{ "dt": 1_705_266_000, "weather": [] }] }),
    )
    .await;

    let (status, json) = get_json(test_state(&server, Some("test-key")), "/weather").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to fetch forecast");
}

#[actix_web::test]
async fn test_weather_upstream_timeout() {
    let server = MockServer::start().await;
    mount_aqi_upstreams(&server).await;
    mount_json(&server, "/forecast", forecast_response()).await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_weather_response())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let (status, json) = get_json(test_state(&server, Some("test-key")), "/weather").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to fetch current weather");
}

#[actix_web::test]
async fn test_weather_without_service_configured() {
    let app = test::init_service(App::new().route("/weather", web::get().to(weather))).await;

    let req = test::TestRequest::get().uri("/weather").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}
