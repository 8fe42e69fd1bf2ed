//! Weather models: raw hourly samples in, daily summaries and the aggregated
//! dashboard response out.

use super::aqi::AqiPrediction;
use chrono::{DateTime, Utc};
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// One hourly forecast observation from the weather feed
#[derive(Clone, Debug, PartialEq)]
pub struct HourlySample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub condition: String,
    pub icon: String,
    /// Cloud cover percentage; absent when the feed omits it
    pub cloud_cover: Option<u8>,
}

/// Current conditions at the configured location.
///
/// Fields the upstream omits are reported as `null` rather than failing the
/// request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub city: String,
    pub temp: Option<i64>,
    pub feels_like: Option<i64>,
    pub humidity: Option<i64>,
    pub wind_speed: Option<f64>,
    pub pressure: Option<i64>,
    pub condition: Option<String>,
    pub description: Option<String>,
    /// Visibility in kilometres
    pub visibility: Option<i64>,
    /// Local time, e.g. "06:45 AM"
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub icon: Option<String>,
}

/// Reduced, externally visible record for one forecast day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Display label, e.g. "Mon, Jan 15"
    pub time: String,
    /// Calendar date key in the location's zone, "MM/DD/YYYY"
    pub date: String,
    /// Temperature of the day's midpoint sample
    pub temp: i64,
    pub temp_max: i64,
    pub temp_min: i64,
    pub condition: String,
    pub icon: String,
    pub humidity: i64,
    pub wind_speed: f64,
    /// Cloud cover of the midpoint sample. The feed carries no precipitation
    /// probability, so cloud cover stands in for it.
    pub chance_of_rain: u8,
    #[serde(rename = "predictedAQI")]
    pub predicted_aqi: Option<f64>,
    pub aqi_category: Option<String>,
}

/// AQI block of the aggregated response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct AqiSummary {
    pub current: Option<f64>,
    pub category: Option<String>,
    pub predictions: Vec<AqiPrediction>,
    pub alerts: Vec<String>,
}

/// Response model for the weather endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct AggregatedResponse {
    pub weather: CurrentWeather,
    pub forecast: Vec<DailySummary>,
    pub aqi: AqiSummary,
}
