//! Historical weather dataset loading
//!
//! The rain classifier trains on a fixed-schema CSV of past observations.
//! The file is re-read on every build cycle, so edits to the dataset show up
//! on the next request without a restart.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{AppError, AppResult};

/// One cleaned observation from the historical dataset
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalObservation {
    pub min_temp: f64,
    pub max_temp: f64,
    pub wind_gust_dir: String,
    pub wind_gust_speed: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub temp: f64,
    pub rain_tomorrow: String,
}

/// Raw CSV row with every field optional, so incomplete rows can be filtered
/// instead of failing the whole file
#[derive(Debug, Deserialize)]
struct RawObservation {
    #[serde(rename = "MinTemp", deserialize_with = "numeric_or_missing")]
    min_temp: Option<f64>,
    #[serde(rename = "MaxTemp", deserialize_with = "numeric_or_missing")]
    max_temp: Option<f64>,
    #[serde(rename = "WindGustDir", deserialize_with = "text_or_missing")]
    wind_gust_dir: Option<String>,
    #[serde(rename = "WindGustSpeed", deserialize_with = "numeric_or_missing")]
    wind_gust_speed: Option<f64>,
    #[serde(rename = "Humidity", deserialize_with = "numeric_or_missing")]
    humidity: Option<f64>,
    #[serde(rename = "Pressure", deserialize_with = "numeric_or_missing")]
    pressure: Option<f64>,
    #[serde(rename = "Temp", deserialize_with = "numeric_or_missing")]
    temp: Option<f64>,
    #[serde(rename = "RainTomorrow", deserialize_with = "text_or_missing")]
    rain_tomorrow: Option<String>,
}

impl RawObservation {
    /// All schema fields present, or nothing
    fn into_complete(self) -> Option<HistoricalObservation> {
        Some(HistoricalObservation {
            min_temp: self.min_temp?,
            max_temp: self.max_temp?,
            wind_gust_dir: self.wind_gust_dir?,
            wind_gust_speed: self.wind_gust_speed?,
            humidity: self.humidity?,
            pressure: self.pressure?,
            temp: self.temp?,
            rain_tomorrow: self.rain_tomorrow?,
        })
    }
}

/// Parse a numeric cell, treating "" and "NA" as missing
fn numeric_or_missing<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") | Some("NA") => Ok(None),
        Some(text) => text.parse::<f64>().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("invalid numeric value '{}'", text))
        }),
    }
}

/// Parse a text cell, treating "" and "NA" as missing
fn text_or_missing<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") | Some("NA") => Ok(None),
        Some(text) => Ok(Some(text.to_string())),
    }
}

/// Duplicate detection works on exact bit-level repeats, not numeric
/// closeness, so float fields are keyed by their raw bits
type ObservationKey = (u64, u64, String, u64, u64, u64, u64, String);

fn dedup_key(observation: &HistoricalObservation) -> ObservationKey {
    (
        observation.min_temp.to_bits(),
        observation.max_temp.to_bits(),
        observation.wind_gust_dir.clone(),
        observation.wind_gust_speed.to_bits(),
        observation.humidity.to_bits(),
        observation.pressure.to_bits(),
        observation.temp.to_bits(),
        observation.rain_tomorrow.clone(),
    )
}

/// Load and clean the historical dataset
///
/// Rows with missing fields are dropped before duplicate detection, so a
/// complete row never disappears because an incomplete near-copy of it came
/// first. Exact duplicates keep their first occurrence; extra columns are
/// ignored.
pub fn load_historical_data(path: &Path) -> AppResult<Vec<HistoricalObservation>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::DataUnavailable(format!("cannot read {}: {}", path.display(), e)))?;

    let mut observations = Vec::new();
    let mut seen = HashSet::new();

    for row in reader.deserialize::<RawObservation>() {
        let raw = row.map_err(|e| AppError::DataUnavailable(format!("malformed row: {}", e)))?;
        let Some(observation) = raw.into_complete() else {
            continue;
        };
        if seen.insert(dedup_key(&observation)) {
            observations.push(observation);
        }
    }

    Ok(observations)
}
