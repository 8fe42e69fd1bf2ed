//! OpenWeather client: current conditions and the hourly forecast feed.

use crate::{
    config::{LocationConfig, UpstreamConfig},
    error::{DashboardError, UpstreamError, UpstreamSource},
    models::{
        CurrentWeather, HourlySample,
        upstream::{ForecastItem, OpenWeatherCurrent, OpenWeatherForecast},
    },
    services::{
        aggregator::{round_half_up, round_tenths},
        http_client::UpstreamClient,
    },
};
use chrono::{DateTime, TimeZone, Utc};

/// Local time format for sunrise/sunset, e.g. "06:45 AM"
const CLOCK_FORMAT: &str = "%I:%M %p";

/// Weather source for the configured location
#[derive(Clone)]
pub struct OpenWeatherService {
    client: UpstreamClient,
    api_key: Option<String>,
    base_url: String,
    location: LocationConfig,
}

impl OpenWeatherService {
    pub fn new(client: UpstreamClient, config: &UpstreamConfig, location: LocationConfig) -> Self {
        Self {
            client,
            api_key: config.openweather_api_key.clone(),
            base_url: config.openweather_base_url.trim_end_matches('/').to_string(),
            location,
        }
    }

    /// The API key, or the missing-credential error every request must report
    pub fn credential(&self) -> Result<&str, DashboardError> {
        self.api_key.as_deref().ok_or(DashboardError::MissingCredential)
    }

    /// Fetch current conditions
    pub async fn current(&self) -> Result<CurrentWeather, DashboardError> {
        let url = self.url("weather")?;
        let payload: OpenWeatherCurrent = self
            .client
            .get_json(&url)
            .await
            .map_err(DashboardError::upstream(UpstreamSource::CurrentWeather))?;

        Ok(current_from_payload(payload, &self.location))
    }

    /// Fetch the hourly forecast as time-ordered samples
    pub async fn hourly_forecast(&self) -> Result<Vec<HourlySample>, DashboardError> {
        let url = self.url("forecast")?;
        let payload: OpenWeatherForecast = self
            .client
            .get_json(&url)
            .await
            .map_err(DashboardError::upstream(UpstreamSource::Forecast))?;

        samples_from_payload(payload)
            .map_err(DashboardError::upstream(UpstreamSource::Forecast))
    }

    fn url(&self, endpoint: &str) -> Result<String, DashboardError> {
        Ok(format!(
            "{}/{}?lat={}&lon={}&units=metric&appid={}",
            self.base_url,
            endpoint,
            self.location.latitude,
            self.location.longitude,
            self.credential()?
        ))
    }
}

/// Convert the `/weather` payload, leaving absent fields as `None`
pub fn current_from_payload(payload: OpenWeatherCurrent, location: &LocationConfig) -> CurrentWeather {
    let main = payload.main.unwrap_or_default();
    let condition = payload.weather.into_iter().next();
    let sun = payload.sys.unwrap_or_default();

    CurrentWeather {
        city: location.name.clone(),
        temp: main.temp.map(round_half_up),
        feels_like: main.feels_like.map(round_half_up),
        humidity: main.humidity.map(round_half_up),
        wind_speed: payload.wind.and_then(|w| w.speed).map(round_tenths),
        pressure: main.pressure.map(round_half_up),
        condition: condition.as_ref().map(|c| c.main.clone()),
        description: condition.as_ref().map(|c| c.description.clone()),
        visibility: payload.visibility.map(|metres| round_half_up(metres / 1000.0)),
        sunrise: sun.sunrise.and_then(|ts| local_clock(ts, &location.timezone)),
        sunset: sun.sunset.and_then(|ts| local_clock(ts, &location.timezone)),
        icon: condition.map(|c| c.icon),
    }
}

/// Convert the `/forecast` payload into samples, preserving feed order
pub fn samples_from_payload(payload: OpenWeatherForecast) -> Result<Vec<HourlySample>, UpstreamError> {
    payload.list.into_iter().map(sample_from_item).collect()
}

fn sample_from_item(item: ForecastItem) -> Result<HourlySample, UpstreamError> {
    let timestamp = DateTime::<Utc>::from_timestamp(item.dt, 0)
        .ok_or_else(|| UpstreamError::Parse(format!("invalid forecast timestamp {}", item.dt)))?;
    let condition = item.weather.into_iter().next().unwrap_or_default();

    Ok(HourlySample {
        timestamp,
        temperature: item.main.temp,
        humidity: item.main.humidity,
        wind_speed: item.wind.speed,
        condition: condition.main,
        icon: condition.icon,
        cloud_cover: item
            .clouds
            .and_then(|c| c.all)
            .map(|all| all.clamp(0.0, 100.0).round() as u8),
    })
}

fn local_clock<Tz: TimeZone>(epoch_seconds: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::<Utc>::from_timestamp(epoch_seconds, 0)
        .map(|utc| utc.with_timezone(tz).format(CLOCK_FORMAT).to_string())
}
