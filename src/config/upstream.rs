//! Configuration for the upstream weather and AQI sources.

use super::{env_or, env_string};

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_AQI_API_BASE: &str = "http://localhost:8000";

/// Upstream endpoints, credentials and timeouts
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    /// OpenWeather credential; absence is reported per request, not at startup
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    /// Base URL of the AQI prediction backend
    pub aqi_api_base: String,
    /// Whole-request timeout for a single upstream call (in seconds)
    pub timeout_seconds: u64,
    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            openweather_api_key: None,
            openweather_base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            aqi_api_base: DEFAULT_AQI_API_BASE.to_string(),
            timeout_seconds: 10,
            connect_timeout_seconds: 3,
        }
    }
}

impl UpstreamConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let aqi_api_base = env_string("AQI_API_BASE")
            .or_else(|| env_string("PYTHON_API_BASE"))
            .unwrap_or(defaults.aqi_api_base);

        Self {
            openweather_api_key: env_string("OPENWEATHER_API_KEY"),
            openweather_base_url: env_string("OPENWEATHER_BASE_URL")
                .unwrap_or(defaults.openweather_base_url),
            aqi_api_base,
            timeout_seconds: env_or("UPSTREAM_TIMEOUT_SECONDS", defaults.timeout_seconds),
            connect_timeout_seconds: env_or(
                "UPSTREAM_CONNECT_TIMEOUT_SECONDS",
                defaults.connect_timeout_seconds,
            ),
        }
    }
}
