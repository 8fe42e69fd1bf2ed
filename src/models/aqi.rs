//! AQI models and the static severity band table.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Severity bands of the US AQI scale, ordered by upper bound.
///
/// The last band has no upper bound.
pub const AQI_BANDS: [(Option<u32>, AqiBand); 6] = [
    (Some(50), AqiBand::Good),
    (Some(100), AqiBand::Moderate),
    (Some(150), AqiBand::UnhealthyForSensitiveGroups),
    (Some(200), AqiBand::Unhealthy),
    (Some(300), AqiBand::VeryUnhealthy),
    (None, AqiBand::Hazardous),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AqiBand {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiBand {
    /// Band for an AQI value; upper bounds are inclusive
    pub fn from_value(aqi: f64) -> Self {
        AQI_BANDS
            .iter()
            .find(|(max, _)| max.is_none_or(|max| aqi <= f64::from(max)))
            .map(|(_, band)| *band)
            .unwrap_or(AqiBand::Hazardous)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiBand::Good => "Good",
            AqiBand::Moderate => "Moderate",
            AqiBand::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiBand::Unhealthy => "Unhealthy",
            AqiBand::VeryUnhealthy => "Very Unhealthy",
            AqiBand::Hazardous => "Hazardous",
        }
    }
}

/// One entry of the static band table as served to clients
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct AqiBandInfo {
    /// Inclusive upper bound, `null` for the open-ended top band
    pub max: Option<u32>,
    pub label: String,
}

impl AqiBandInfo {
    pub fn table() -> Vec<Self> {
        AQI_BANDS
            .iter()
            .map(|(max, band)| AqiBandInfo {
                max: *max,
                label: band.label().to_string(),
            })
            .collect()
    }
}

/// A per-day AQI prediction from the prediction backend.
///
/// Predictions are positional: entry `i` belongs to forecast day `i`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct AqiPrediction {
    /// Predicted day as "YYYY-MM-DD", when the backend sends it
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub predicted_aqi: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

impl AqiPrediction {
    /// Fill a missing category from the band table
    pub fn with_derived_category(mut self) -> Self {
        if self.category.is_none() {
            self.category = self
                .predicted_aqi
                .map(|aqi| AqiBand::from_value(aqi).label().to_string());
        }
        self
    }
}
