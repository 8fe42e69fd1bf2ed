//! Location configuration for the single monitored city.

use super::{env_or, env_string};
use chrono_tz::Tz;

pub const DEFAULT_LATITUDE: f64 = 24.8607;
pub const DEFAULT_LONGITUDE: f64 = 67.0011;
pub const DEFAULT_LOCATION_NAME: &str = "Karachi, Pakistan";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Karachi;

/// The fixed location the dashboard reports on.
///
/// `timezone` decides which calendar day an hourly sample belongs to and how
/// sunrise/sunset are rendered, so it must be the location's own zone rather
/// than the server's.
#[derive(Clone, Debug)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub timezone: Tz,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            name: DEFAULT_LOCATION_NAME.to_string(),
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

impl LocationConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let (latitude, longitude) = checked_coordinates(
            env_or("LOCATION_LAT", DEFAULT_LATITUDE),
            env_or("LOCATION_LON", DEFAULT_LONGITUDE),
        );

        let timezone = match env_string("LOCATION_TIMEZONE") {
            Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!(timezone = %name, "Unknown time zone, using default");
                DEFAULT_TIMEZONE
            }),
            None => DEFAULT_TIMEZONE,
        };

        Self {
            latitude,
            longitude,
            name: env_string("LOCATION_NAME").unwrap_or_else(|| DEFAULT_LOCATION_NAME.to_string()),
            timezone,
        }
    }

    /// Whether the coordinates are inside the valid lat/lon ranges
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Out-of-range coordinates are replaced by the default location's
fn checked_coordinates(latitude: f64, longitude: f64) -> (f64, f64) {
    let candidate = LocationConfig {
        latitude,
        longitude,
        ..LocationConfig::default()
    };
    if candidate.has_valid_coordinates() {
        return (latitude, longitude);
    }

    tracing::warn!(latitude, longitude, "Coordinates out of range, using default location");
    (DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
}
