use actix_web::{App, HttpRequest, HttpResponse, http::StatusCode, test, web};
use smogcast_api::{
    AppState, LocationConfig, MetricsConfig, RequestIdMiddleware, UpstreamConfig, create_app,
    create_base_app, health, middleware::request_id, version,
};

fn offline_state(metrics_enabled: bool) -> AppState {
    AppState::new(
        LocationConfig::default(),
        UpstreamConfig::default(),
        MetricsConfig {
            enabled: metrics_enabled,
        },
    )
    .expect("Failed to create app state")
}

/// Integration test for the health check endpoint
///
/// Uses the full app factory so the middleware stack and OpenAPI wrapping
/// are exercised along with the handler.
#[actix_web::test]
async fn test_health_endpoint_integration() {
    let app = test::init_service(create_base_app().expect("Failed to create app")).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK, "Expected 200 OK status");

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.contains("application/json"),
        "Expected JSON content type, got: {content_type}"
    );

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json, serde_json::json!({ "status": "healthy" }));
}

#[actix_web::test]
async fn test_version_endpoint_integration() {
    let app = test::init_service(create_app(offline_state(true))).await;

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["commit"].is_string(), "Commit should be a string");
    assert!(json["build_time"].is_string(), "Build time should be a string");
}

#[actix_web::test]
async fn test_handlers_without_app_state() {
    let app = test::init_service(
        App::new()
            .route("/api/health", web::get().to(health))
            .route("/api/version", web::get().to(version)),
    )
    .await;

    for uri in ["/api/health", "/api/version"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "{uri} should succeed");
    }
}

#[actix_web::test]
async fn test_request_id_generated_and_propagated() {
    let app = test::init_service(create_app(offline_state(true))).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("Response should carry a request ID");
    assert!(uuid::Uuid::parse_str(generated).is_ok(), "Generated ID should be a UUID");

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "dashboard-refresh-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get("x-request-id").unwrap(),
        "dashboard-refresh-42"
    );
}

#[actix_web::test]
async fn test_request_id_visible_to_handlers() {
    async fn echo_request_id(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(request_id(&req).unwrap_or_default())
    }

    let app = test::init_service(
        App::new()
            .wrap(RequestIdMiddleware)
            .route("/echo", web::get().to(echo_request_id)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/echo")
        .insert_header(("X-Request-ID", "trace-abc"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body.as_ref(), b"trace-abc");

    let req = test::TestRequest::get().uri("/echo").to_request();
    let resp = test::call_service(&app, req).await;
    let header = resp.headers().get("x-request-id").unwrap().to_str().unwrap().to_string();
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), header.as_bytes());
}

#[actix_web::test]
async fn test_metrics_endpoint_records_requests() {
    let app = test::init_service(create_app(offline_state(true))).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("http_requests_total"));
    assert!(text.contains(r#"route="/api/health""#));
    assert!(text.contains("app_uptime_seconds"));
}

#[actix_web::test]
async fn test_metrics_endpoint_disabled() {
    let app = test::init_service(create_app(offline_state(false))).await;

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_aqi_bands_endpoint() {
    let app = test::init_service(create_app(offline_state(true))).await;

    let req = test::TestRequest::get().uri("/api/aqi/bands").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    let bands = json.as_array().expect("Bands should be an array");
    let bounds: Vec<Option<u64>> = bands.iter().map(|b| b["max"].as_u64()).collect();
    assert_eq!(
        bounds,
        vec![Some(50), Some(100), Some(150), Some(200), Some(300), None]
    );
    assert_eq!(bands[0]["label"], "Good");
    assert_eq!(bands[5]["label"], "Hazardous");
}

#[actix_web::test]
async fn test_openapi_spec_lists_routes() {
    let app = test::init_service(create_app(offline_state(true))).await;

    let req = test::TestRequest::get().uri("/api/spec/v2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["info"]["title"], "Smogcast API");

    let paths = json["paths"].as_object().expect("Spec should list paths");
    for route in ["/weather", "/api/weather", "/api/health", "/api/version", "/api/aqi/bands"] {
        assert!(paths.contains_key(route), "Spec should document {route}");
    }
}
