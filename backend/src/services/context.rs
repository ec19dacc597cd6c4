//! Weather context assembly
//!
//! One builder call turns a city name (or a pre-fetched record) into the
//! full view model: current conditions, hourly forecast, and rain outlook.
//! Only the primary current-weather fetch can fail the build; the forecast
//! and the outlook degrade to placeholders so a provider hiccup or a missing
//! dataset never blanks the whole response.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::weather::{WeatherClient, FORECAST_SLOTS};
use crate::models::{ForecastEntry, WeatherContext, WeatherRecord};
use crate::services::outlook::{compute_rain_outlook, RAIN_OUTLOOK_UNAVAILABLE};

/// Builds the per-request weather context
#[derive(Clone)]
pub struct ContextBuilder {
    weather: WeatherClient,
    dataset_path: PathBuf,
    fallback_city: String,
}

impl ContextBuilder {
    /// Create a builder from application configuration
    pub fn new(weather: WeatherClient, config: &Config) -> Self {
        Self {
            weather,
            dataset_path: PathBuf::from(&config.dataset.path),
            fallback_city: config.weather.default_city.clone(),
        }
    }

    /// Build the weather context for a city
    ///
    /// A pre-fetched record (from a coordinate lookup) skips the primary
    /// fetch. A blank city with no record is rejected before any network
    /// traffic happens.
    pub async fn build(
        &self,
        city: &str,
        current_weather: Option<WeatherRecord>,
    ) -> AppResult<WeatherContext> {
        let city = city.trim();
        if city.is_empty() && current_weather.is_none() {
            return Err(AppError::InvalidInput("City name is required".to_string()));
        }

        let record = match current_weather {
            Some(record) => record,
            None => self.weather.fetch_by_city(city).await?,
        };

        let requested = if city.is_empty() {
            record.city.clone()
        } else {
            city.to_string()
        };

        let (forecast, offset) = match self
            .weather
            .fetch_hourly_forecast(record.lat, record.lon, FORECAST_SLOTS)
            .await
        {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(city = %record.city, %error, "hourly forecast unavailable");
                (Vec::new(), Utc.fix())
            }
        };

        let rain_outlook = self.rain_outlook(&record).await;

        Ok(assemble_context(
            requested,
            record,
            forecast,
            offset,
            rain_outlook,
            self.fallback_city.clone(),
        ))
    }

    /// Run the outlook pipeline off the async runtime
    ///
    /// Training is CPU-bound, so it runs on a blocking worker. Every failure
    /// mode collapses to the fixed placeholder string.
    async fn rain_outlook(&self, record: &WeatherRecord) -> String {
        let path = self.dataset_path.clone();
        let record = record.clone();
        let city = record.city.clone();

        let result =
            tokio::task::spawn_blocking(move || compute_rain_outlook(&path, &record)).await;

        match result {
            Ok(Ok(outlook)) => outlook,
            Ok(Err(error)) => {
                tracing::warn!(city = %city, %error, "rain outlook unavailable");
                RAIN_OUTLOOK_UNAVAILABLE.to_string()
            }
            Err(error) => {
                tracing::warn!(city = %city, %error, "rain outlook worker failed");
                RAIN_OUTLOOK_UNAVAILABLE.to_string()
            }
        }
    }
}

/// Assemble the view model with its presentation formatting
fn assemble_context(
    location: String,
    record: WeatherRecord,
    forecast: Vec<ForecastEntry>,
    offset: FixedOffset,
    rain_outlook: String,
    fallback_city: String,
) -> WeatherContext {
    let now = Utc::now().with_timezone(&offset);
    let description_class = description_class(&record.description);

    WeatherContext {
        location,
        current_temp: fmt_rounded(record.current_temp),
        min_temp: fmt_rounded(record.temp_min),
        max_temp: fmt_rounded(record.temp_max),
        feels_like: fmt_rounded(record.feels_like),
        humidity: fmt_rounded(record.humidity),
        clouds: record.clouds.to_string(),
        description: record.description,
        description_class,
        city: record.city,
        country: record.country,
        time: now.format("%I:%M %p").to_string(),
        date: now.format("%B %d, %Y").to_string(),
        wind: fmt_plain(record.wind_gust_speed),
        pressure: fmt_plain(record.pressure),
        visibility: record.visibility.to_string(),
        sunrise: format_local_time(record.sunrise, offset),
        sunset: format_local_time(record.sunset, offset),
        rain_outlook,
        forecast,
        updated_at: Utc::now().to_rfc3339(),
        fallback_city,
    }
}

/// Integer-rounded presentation of a measurement
fn fmt_rounded(value: f64) -> String {
    let text = format!("{:.0}", value);
    // Values just below zero would otherwise print as "-0".
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

/// Shortest plain representation; 1009.0 prints as "1009", 4.6 stays "4.6"
fn fmt_plain(value: f64) -> String {
    value.to_string()
}

/// Local "07:01 AM"-style rendering, or the placeholder when absent
fn format_local_time(timestamp: Option<i64>, offset: FixedOffset) -> String {
    timestamp
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.with_timezone(&offset).format("%I:%M %p").to_string())
        .unwrap_or_else(|| "--".to_string())
}

/// Styling token derived from a weather description
///
/// The provider's cloud vocabulary collapses onto one token; other leading
/// words pass through lowercased.
fn description_class(description: &str) -> String {
    let Some(first) = description.split_whitespace().next() else {
        return "no-forecast".to_string();
    };

    let first = first.to_lowercase();
    match first.as_str() {
        "broken" | "scattered" | "few" | "partly" => "clouds".to_string(),
        "heavy" => "rain".to_string(),
        _ => first,
    }
}
