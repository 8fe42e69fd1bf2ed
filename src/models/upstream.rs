//! Raw payload shapes of the upstream sources.
//!
//! Only the fields the dashboard reads are modelled. Most are optional so a
//! payload missing one of them degrades that field instead of failing.

use super::aqi::AqiPrediction;
use serde::{Deserialize, Deserializer};

/// Read a list that may be absent or `null` as an empty list
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// OpenWeather `/weather` response
#[derive(Debug, Default, Deserialize)]
pub struct OpenWeatherCurrent {
    pub main: Option<CurrentMain>,
    pub wind: Option<Wind>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub weather: Vec<Condition>,
    /// Metres
    pub visibility: Option<f64>,
    pub sys: Option<Sun>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentMain {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sun {
    /// Epoch seconds
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Wind {
    pub speed: Option<f64>,
}

/// OpenWeather `/forecast` response: samples at fixed intervals over several days
#[derive(Debug, Deserialize)]
pub struct OpenWeatherForecast {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub list: Vec<ForecastItem>,
}

/// One forecast entry. Temperature, humidity and wind are required; an item
/// without them cannot take part in the daily reduction.
#[derive(Debug, Deserialize)]
pub struct ForecastItem {
    /// Epoch seconds
    pub dt: i64,
    pub main: ForecastMain,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub weather: Vec<Condition>,
    pub clouds: Option<Clouds>,
    pub wind: ForecastWind,
}

#[derive(Debug, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastWind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct Clouds {
    pub all: Option<f64>,
}

/// Prediction backend `/api/current-aqi` response
#[derive(Debug, Default, Deserialize)]
pub struct CurrentAqiPayload {
    pub current_aqi: Option<f64>,
    pub category: Option<String>,
}

/// Prediction backend `/api/predictions` response
#[derive(Debug, Default, Deserialize)]
pub struct PredictionsPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub predictions: Vec<AqiPrediction>,
}

/// Prediction backend `/api/alerts` response
#[derive(Debug, Default, Deserialize)]
pub struct AlertsPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alerts: Vec<String>,
}
