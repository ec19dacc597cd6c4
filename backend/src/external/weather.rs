//! Weather provider client for current conditions and forecasts
//!
//! Talks to an OpenWeatherMap-compatible API and normalizes the payloads
//! into the records the rest of the pipeline consumes. The base URL is
//! injectable so tests can point the client at a local mock server.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use crate::models::{ForecastEntry, WeatherRecord};

/// Number of hourly forecast slots requested per build
pub const FORECAST_SLOTS: usize = 5;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CURRENT_WEATHER_ERROR: &str = "Unable to fetch weather data";
const FORECAST_ERROR: &str = "Unable to fetch forecast data";

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> Self {
        Self::with_base_url(config.api_key.clone(), config.api_endpoint.clone())
    }

    /// Create a new WeatherClient with a custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Fetch current conditions by city name
    pub async fn fetch_by_city(&self, city: &str) -> AppResult<WeatherRecord> {
        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Weather API request failed: {}", e)))?;

        let data: OWMCurrentResponse = read_payload(response, CURRENT_WEATHER_ERROR).await?;
        Ok(self.convert_current_response(data))
    }

    /// Fetch current conditions by GPS coordinates
    pub async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<WeatherRecord> {
        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Weather API request failed: {}", e)))?;

        let data: OWMCurrentResponse = read_payload(response, CURRENT_WEATHER_ERROR).await?;
        Ok(self.convert_current_response(data))
    }

    /// Fetch the short-term hourly forecast for a location
    ///
    /// Returns up to `count` presentation-ready entries together with the
    /// location's UTC offset as reported by the provider.
    pub async fn fetch_hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        count: usize,
    ) -> AppResult<(Vec<ForecastEntry>, FixedOffset)> {
        let url = format!("{}/forecast", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
                ("cnt", count.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Forecast API request failed: {}", e)))?;

        let data: OWMForecastResponse = read_payload(response, FORECAST_ERROR).await?;
        Ok(convert_forecast_response(data, count))
    }

    /// Convert an OpenWeatherMap current-weather response to our format
    fn convert_current_response(&self, data: OWMCurrentResponse) -> WeatherRecord {
        let description = data
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_default();

        WeatherRecord {
            city: data.name,
            country: data.sys.country,
            current_temp: data.main.temp,
            feels_like: data.main.feels_like,
            temp_min: data.main.temp_min,
            temp_max: data.main.temp_max,
            humidity: data.main.humidity,
            description,
            wind_gust_dir: data.wind.deg,
            pressure: data.main.pressure,
            wind_gust_speed: data.wind.speed,
            clouds: data.clouds.all,
            visibility: data.visibility.unwrap_or(0),
            lat: data.coord.lat,
            lon: data.coord.lon,
            sunrise: data.sys.sunrise,
            sunset: data.sys.sunset,
        }
    }
}

/// Convert an OpenWeatherMap forecast response to presentation entries
fn convert_forecast_response(
    data: OWMForecastResponse,
    count: usize,
) -> (Vec<ForecastEntry>, FixedOffset) {
    let offset = FixedOffset::east_opt(data.city.timezone).unwrap_or_else(|| Utc.fix());

    let entries = data
        .list
        .into_iter()
        .take(count)
        .map(|item| {
            let local_time = DateTime::from_timestamp(item.dt, 0)
                .map(|dt| dt.with_timezone(&offset).format("%H:%M").to_string())
                .unwrap_or_else(|| "--".to_string());
            let description = item
                .weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_default();

            ForecastEntry {
                local_time,
                temp: format!("{:.1}", item.main.temp),
                humidity: format!("{:.1}", item.main.humidity),
                description,
            }
        })
        .collect();

    (entries, offset)
}

/// Check the response status and deserialize the payload
///
/// Non-success statuses surface the provider's own `message` field when one
/// is present so callers can relay it verbatim.
async fn read_payload<T: DeserializeOwned>(
    response: Response,
    default_message: &str,
) -> AppResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<OWMErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| default_message.to_string());
        return Err(AppError::Upstream(message));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to parse weather response: {}", e)))
}

/// OpenWeatherMap current-weather response
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    coord: OWMCoord,
    weather: Vec<OWMWeather>,
    main: OWMMain,
    #[serde(default)]
    visibility: Option<i32>,
    wind: OWMWind,
    clouds: OWMClouds,
    sys: OWMSys,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OWMClouds {
    all: i32,
}

#[derive(Debug, Deserialize)]
struct OWMSys {
    country: String,
    #[serde(default)]
    sunrise: Option<i64>,
    #[serde(default)]
    sunset: Option<i64>,
}

/// OpenWeatherMap forecast response
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    city: OWMForecastCity,
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMForecastCity {
    /// UTC offset in seconds; zero when the provider omits it
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMForecastMain,
    weather: Vec<OWMWeather>,
}

#[derive(Debug, Deserialize)]
struct OWMForecastMain {
    temp: f64,
    humidity: f64,
}

/// Error body returned by the provider on non-success statuses
#[derive(Debug, Deserialize)]
struct OWMErrorBody {
    message: Option<String>,
}
