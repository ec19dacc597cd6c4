//! Weather context handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use shared::validation::{validate_city_name, validate_coordinates};

use crate::error::{AppError, AppResult};
use crate::models::WeatherContext;
use crate::services::ContextBuilder;
use crate::AppState;

/// Location payload for the weather context endpoint
///
/// Resolution order: explicit city, then coordinates, then the configured
/// fallback city. Coordinates arrive as numbers or numeric strings depending
/// on the client, so they are coerced here.
#[derive(Debug, Deserialize)]
pub struct WeatherContextRequest {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lon: Option<Value>,
    #[serde(default)]
    pub fallback_city: Option<String>,
}

/// Build and return the weather context for the requested location
pub async fn weather_context(
    State(state): State<AppState>,
    Json(request): Json<WeatherContextRequest>,
) -> AppResult<Json<WeatherContext>> {
    let builder = ContextBuilder::new(state.weather.clone(), &state.config);

    if let Some(city) = request
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        validate_city_name(city).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        let context = builder.build(city, None).await?;
        return Ok(Json(context));
    }

    if let (Some(lat), Some(lon)) = (request.lat.as_ref(), request.lon.as_ref()) {
        let lat = coerce_coordinate(lat, "lat")?;
        let lon = coerce_coordinate(lon, "lon")?;
        validate_coordinates(lat, lon).map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let record = state.weather.fetch_by_coordinates(lat, lon).await?;
        let resolved = record.city.clone();
        let context = builder.build(&resolved, Some(record)).await?;
        return Ok(Json(context));
    }

    if let Some(fallback) = request
        .fallback_city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        let context = builder.build(fallback, None).await?;
        return Ok(Json(context));
    }

    Err(AppError::InvalidInput("Missing coordinates".to_string()))
}

/// Accept numbers or numeric strings for a coordinate field
fn coerce_coordinate(value: &Value, field: &str) -> AppResult<f64> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid {} value", field))),
        Value::String(text) => text.trim().parse::<f64>().map_err(|_| {
            AppError::InvalidInput(format!(
                "could not convert string to float: '{}'",
                text.trim()
            ))
        }),
        _ => Err(AppError::InvalidInput(format!("Invalid {} value", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_coordinates_pass_through() {
        assert_eq!(coerce_coordinate(&json!(6.9271), "lat").unwrap(), 6.9271);
        assert_eq!(coerce_coordinate(&json!(-79), "lon").unwrap(), -79.0);
    }

    #[test]
    fn string_coordinates_are_parsed() {
        assert_eq!(coerce_coordinate(&json!("6.9271"), "lat").unwrap(), 6.9271);
        assert_eq!(coerce_coordinate(&json!(" 79.86 "), "lon").unwrap(), 79.86);
    }

    #[test]
    fn non_numeric_coordinates_are_rejected() {
        assert!(coerce_coordinate(&json!("north"), "lat").is_err());
        assert!(coerce_coordinate(&json!(null), "lat").is_err());
        assert!(coerce_coordinate(&json!([6.9]), "lon").is_err());
    }

    #[test]
    fn string_parse_failures_echo_the_input() {
        let err = coerce_coordinate(&json!("due north"), "lat").unwrap_err();
        match err {
            AppError::InvalidInput(message) => {
                assert_eq!(message, "could not convert string to float: 'due north'");
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn request_payload_tolerates_missing_fields() {
        let request: WeatherContextRequest = serde_json::from_str("{}").unwrap();

        assert!(request.city.is_none());
        assert!(request.lat.is_none());
        assert!(request.lon.is_none());
        assert!(request.fallback_city.is_none());
    }
}
