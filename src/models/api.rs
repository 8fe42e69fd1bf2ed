//! API request and response models for standard endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response model for the version information endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub version: String,
    pub commit: String,
    pub build_time: String,
}

/// Request query parameters for the weather endpoint
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForecastQuery {
    /// Number of forecast days (default 5, clamped to 1..=16).
    ///
    /// Kept as text so that malformed values fall back to the default
    /// instead of rejecting the request.
    pub days: Option<String>,
}

impl ForecastQuery {
    /// Read the query string leniently: the first `days` pair wins and
    /// nothing in the string can reject the request.
    pub fn from_query_string(query: &str) -> Self {
        let days = url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "days")
            .map(|(_, value)| value.into_owned());

        Self { days }
    }
}

/// Body returned for any failed request
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct ErrorResponse {
    pub error: String,
}
