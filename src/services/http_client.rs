//! HTTP client for upstream JSON sources.
//!
//! One GET per call: explicit timeout, no retries. Each call is logged with
//! secrets redacted from the URL and recorded in Prometheus by destination
//! host and outcome.

use crate::{config::UpstreamConfig, error::UpstreamError, telemetry::redact_secrets};
use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Metrics for upstream HTTP calls
#[derive(Clone)]
pub struct UpstreamMetrics {
    /// Upstream requests by destination and outcome
    pub requests_total: CounterVec,

    /// Upstream request duration by destination
    pub request_duration_seconds: HistogramVec,
}

impl UpstreamMetrics {
    /// Create the collectors and register them with `registry`
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = CounterVec::new(
            Opts::new(
                "upstream_requests_total",
                "Total upstream HTTP requests by destination and outcome",
            ),
            &["destination", "outcome"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "upstream_request_duration_seconds",
                "Duration of upstream HTTP requests",
            )
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["destination"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
        })
    }
}

/// Shared, cheaply cloneable client for all upstream sources
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    timeout: Duration,
    metrics: Option<UpstreamMetrics>,
}

impl UpstreamClient {
    pub fn new(
        config: &UpstreamConfig,
        metrics: Option<UpstreamMetrics>,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(config.timeout_seconds),
            metrics,
        })
    }

    /// GET `url` and decode the JSON body.
    ///
    /// Non-2xx responses become [`UpstreamError::Status`] carrying whatever
    /// message the upstream put in its error body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let destination = extract_destination(url);
        let safe_url = redact_secrets(url);
        let start = Instant::now();

        let result = self.fetch(url).await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                debug!(
                    destination = %destination,
                    url = %safe_url,
                    duration_ms = duration.as_millis(),
                    "Upstream request completed"
                );
            }
            Err(UpstreamError::Status { status, .. }) => {
                warn!(
                    destination = %destination,
                    url = %safe_url,
                    status = *status,
                    duration_ms = duration.as_millis(),
                    "Upstream returned error status"
                );
            }
            Err(e) => {
                error!(
                    destination = %destination,
                    url = %safe_url,
                    error = %redact_secrets(&e.to_string()),
                    duration_ms = duration.as_millis(),
                    "Upstream request failed"
                );
            }
        }

        self.record(&destination, outcome_label(&result), duration);
        result
    }

    /// Send and read the body under one deadline covering the whole exchange
    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let exchange = async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, UpstreamError>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| UpstreamError::Timeout(self.timeout.as_secs()))??;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Parse(e.to_string()))
    }

    fn record(&self, destination: &str, outcome: &str, duration: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics
                .requests_total
                .with_label_values(&[destination, outcome])
                .inc();
            metrics
                .request_duration_seconds
                .with_label_values(&[destination])
                .observe(duration.as_secs_f64());
        }
    }
}

fn outcome_label<T>(result: &Result<T, UpstreamError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(UpstreamError::Network(_)) => "network_error",
        Err(UpstreamError::Timeout(_)) => "timeout",
        Err(UpstreamError::Status { .. }) => "error_status",
        Err(UpstreamError::Parse(_)) => "invalid_payload",
    }
}

/// Destination host of `url`, used to group metrics
pub fn extract_destination(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.host_str().unwrap_or("unknown").to_string())
        .unwrap_or_else(|_| "invalid_url".to_string())
}

/// Pull a human-readable message out of an upstream error body.
///
/// OpenWeather uses `message`, the prediction backend uses `detail`.
fn extract_error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "detail", "error"]
        .iter()
        .find_map(|field| value.get(*field).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
