//! Logging setup and log hygiene.

use regex::Regex;
use std::{env, sync::LazyLock};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. "info,smogcast_api=debug"
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            filter: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}

/// Install the global tracing subscriber
pub fn init_tracing(
    config: &LoggingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    }
}

/// Query parameters that carry credentials
static SECRET_PARAMS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b(appid|api_?key|token)=[^&\s]+").ok());

/// Redact credential query parameters from a URL or message before logging
pub fn redact_secrets(input: &str) -> String {
    match SECRET_PARAMS.as_ref() {
        Some(re) => re.replace_all(input, "$1=[REDACTED]").into_owned(),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_openweather_key() {
        let url = "https://api.openweathermap.org/data/2.5/weather?lat=24.86&lon=67&units=metric&appid=abc123";
        let redacted = redact_secrets(url);

        assert!(!redacted.contains("abc123"));
        assert!(redacted.ends_with("appid=[REDACTED]"));
        assert!(redacted.contains("lat=24.86"));
    }

    #[test]
    fn test_redacts_mid_query_and_case_insensitive() {
        let redacted = redact_secrets("http://x/y?API_KEY=secret&days=3");
        assert_eq!(redacted, "http://x/y?API_KEY=[REDACTED]&days=3");
    }

    #[test]
    fn test_leaves_plain_text_alone() {
        assert_eq!(redact_secrets("no secrets here"), "no secrets here");
    }
}
