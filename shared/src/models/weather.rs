//! Weather data models

use serde::{Deserialize, Serialize};

/// Canonical current-weather observation for one location
///
/// Built fresh from the provider payload on every request and discarded with
/// the response; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherRecord {
    pub city: String,
    /// ISO country code as reported by the provider
    pub country: String,
    pub current_temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub description: String,
    /// Wind bearing in degrees, not yet bucketed
    pub wind_gust_dir: f64,
    pub pressure: f64,
    pub wind_gust_speed: f64,
    /// Cloud cover percentage
    pub clouds: i32,
    /// Visibility in meters, zero when the provider omits it
    pub visibility: i32,
    pub lat: f64,
    pub lon: f64,
    /// Epoch seconds; the provider omits these for some locations
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// One hourly forecast slot, already formatted for presentation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastEntry {
    /// Local "HH:MM" in the forecast location's UTC offset
    #[serde(rename = "time")]
    pub local_time: String,
    /// Temperature with one decimal
    pub temp: String,
    /// Humidity with one decimal
    pub humidity: String,
    pub description: String,
}

/// The fully assembled view model served to the presentation layer
///
/// Every numeric value is stringified here so the consumer renders fields
/// without further formatting. The wire keys follow the established template
/// contract, including the capitalized temperature extremes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherContext {
    /// The location name the caller asked for
    pub location: String,
    pub current_temp: String,
    #[serde(rename = "MinTemp")]
    pub min_temp: String,
    #[serde(rename = "MaxTemp")]
    pub max_temp: String,
    pub feels_like: String,
    pub humidity: String,
    pub clouds: String,
    pub description: String,
    /// Styling token derived from the description
    pub description_class: String,
    /// The provider's canonical name for the location
    pub city: String,
    pub country: String,
    /// Local wall-clock time, "07:45 PM" style
    pub time: String,
    /// Local date, "August 30, 2024" style
    pub date: String,
    pub wind: String,
    pub pressure: String,
    pub visibility: String,
    /// Local sunrise time, or "--" when unavailable
    pub sunrise: String,
    pub sunset: String,
    /// One of the fixed rain outlook strings
    pub rain_outlook: String,
    pub forecast: Vec<ForecastEntry>,
    /// RFC 3339 build timestamp in UTC
    pub updated_at: String,
    /// Configured city a client may retry with when geolocation fails
    pub fallback_city: String,
}
