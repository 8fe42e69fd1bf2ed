//! Forecast aggregation: hourly samples to ordered daily summaries.
//!
//! Everything here is a pure function of its inputs. The only time zone
//! involved is the one passed in, which decides the calendar day each sample
//! belongs to; the wall clock is never read.
//!
//! Pipeline: [`bucket_by_day`] → [`reduce_day`] → [`select_window`] →
//! [`merge_aqi`], composed by [`aggregate_forecast`].

use crate::models::{AqiPrediction, DailySummary, HourlySample};
use chrono::{NaiveDate, TimeZone};
use std::collections::BTreeMap;
use tracing::warn;

pub const MIN_FORECAST_DAYS: usize = 1;
pub const MAX_FORECAST_DAYS: usize = 16;
pub const DEFAULT_FORECAST_DAYS: usize = 5;

/// Format of the `date` key on a [`DailySummary`]
pub const DATE_KEY_FORMAT: &str = "%m/%d/%Y";
/// Format of the display label on a [`DailySummary`]
pub const DAY_LABEL_FORMAT: &str = "%a, %b %-d";
/// Format of the `date` field the prediction backend sends
const PREDICTION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Samples that fall on one local calendar day, in input order
#[derive(Clone, Debug, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub samples: Vec<HourlySample>,
}

impl DayBucket {
    /// Date key, "MM/DD/YYYY"
    pub fn key(&self) -> String {
        self.date.format(DATE_KEY_FORMAT).to_string()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.temperature).collect()
    }

    pub fn humidities(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.humidity).collect()
    }

    pub fn wind_speeds(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.wind_speed).collect()
    }

    /// The sample at index `floor(n / 2)`
    pub fn midpoint(&self) -> Option<&HourlySample> {
        self.samples.get(self.samples.len() / 2)
    }
}

/// Group samples by their calendar date in `tz`.
///
/// Buckets come back in ascending date order no matter what order the feed
/// used; samples inside a bucket keep their input order. No bucket is empty.
pub fn bucket_by_day<Tz: TimeZone>(samples: &[HourlySample], tz: &Tz) -> Vec<DayBucket> {
    let mut buckets: BTreeMap<NaiveDate, Vec<HourlySample>> = BTreeMap::new();

    for sample in samples {
        let date = sample.timestamp.with_timezone(tz).date_naive();
        buckets.entry(date).or_default().push(sample.clone());
    }

    buckets
        .into_iter()
        .map(|(date, samples)| DayBucket { date, samples })
        .collect()
}

/// Reduce one bucket to its daily summary.
///
/// Point values (temperature, condition, icon, cloud cover) come from the
/// midpoint sample; max/min and means cover the whole bucket. Returns `None`
/// for an empty bucket, which [`bucket_by_day`] never produces.
pub fn reduce_day(bucket: &DayBucket) -> Option<DailySummary> {
    let mid = bucket.midpoint()?;

    let temperatures = bucket.temperatures();
    let temp_max = temperatures.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let temp_min = temperatures.iter().copied().fold(f64::INFINITY, f64::min);

    Some(DailySummary {
        time: bucket.date.format(DAY_LABEL_FORMAT).to_string(),
        date: bucket.key(),
        temp: round_half_up(mid.temperature),
        temp_max: round_half_up(temp_max),
        temp_min: round_half_up(temp_min),
        condition: mid.condition.clone(),
        icon: mid.icon.clone(),
        humidity: round_half_up(mean(&bucket.humidities())),
        wind_speed: round_tenths(mean(&bucket.wind_speeds())),
        chance_of_rain: mid.cloud_cover.unwrap_or(0),
        predicted_aqi: None,
        aqi_category: None,
    })
}

/// Order summaries by calendar date and keep the first `requested_days`.
///
/// Dates are compared as parsed dates, not strings. Keys that fail to parse
/// sort after every valid date. Duplicate dates keep their first entry.
pub fn select_window(mut summaries: Vec<DailySummary>, requested_days: usize) -> Vec<DailySummary> {
    summaries.sort_by_key(|summary| {
        let date = parse_date_key(&summary.date);
        (date.is_none(), date)
    });
    summaries.dedup_by(|later, earlier| later.date == earlier.date);
    summaries.truncate(requested_days);
    summaries
}

/// Attach AQI predictions to summaries by position.
///
/// `summaries[i]` takes `predictions[i]`; summaries past the end of the
/// predictions keep null AQI fields. Dates are not used to align the two
/// lists, but a disagreement is logged when a prediction carries its own date.
pub fn merge_aqi(summaries: Vec<DailySummary>, predictions: &[AqiPrediction]) -> Vec<DailySummary> {
    summaries
        .into_iter()
        .enumerate()
        .map(|(index, mut summary)| {
            if let Some(prediction) = predictions.get(index) {
                if let Some(predicted_for) = misaligned_date(&summary, prediction) {
                    warn!(
                        index,
                        forecast_date = %summary.date,
                        prediction_date = %predicted_for,
                        "AQI prediction date does not match forecast day"
                    );
                }
                summary.predicted_aqi = prediction.predicted_aqi;
                summary.aqi_category = prediction.category.clone();
            }
            summary
        })
        .collect()
}

/// Full pipeline from raw samples to the forecast list of the response
pub fn aggregate_forecast<Tz: TimeZone>(
    samples: &[HourlySample],
    requested_days: usize,
    predictions: &[AqiPrediction],
    tz: &Tz,
) -> Vec<DailySummary> {
    let summaries = bucket_by_day(samples, tz)
        .iter()
        .filter_map(reduce_day)
        .collect();

    merge_aqi(select_window(summaries, requested_days), predictions)
}

/// Parse the `days` query value the way the dashboard has always sent it.
///
/// Reads a leading integer (`"3abc"` is 3). Missing, unparsable and zero
/// values mean the default; the result is clamped to 1..=16.
pub fn clamp_days(raw: Option<&str>) -> usize {
    let requested = raw.and_then(parse_leading_int).filter(|days| *days != 0);

    match requested {
        Some(days) => days.clamp(MIN_FORECAST_DAYS as i64, MAX_FORECAST_DAYS as i64) as usize,
        None => DEFAULT_FORECAST_DAYS,
    }
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Anything too long for i64 is far outside the clamp range anyway
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}

fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

fn misaligned_date<'a>(summary: &DailySummary, prediction: &'a AqiPrediction) -> Option<&'a str> {
    let predicted_for = prediction.date.as_deref()?;
    let predicted = NaiveDate::parse_from_str(predicted_for, PREDICTION_DATE_FORMAT).ok()?;
    let forecast = parse_date_key(&summary.date)?;
    (predicted != forecast).then_some(predicted_for)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round to the nearest integer with halves going up (-2.5 → -2, 2.5 → 3)
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Round to one decimal place with halves going up
pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}
