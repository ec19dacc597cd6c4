//! Validation utilities for the Weather Outlook Service
//!
//! Request-level checks applied before any upstream call is made.

// ============================================================================
// Location Validations
// ============================================================================

/// Maximum accepted length for a city name, in characters
pub const MAX_CITY_NAME_LENGTH: usize = 100;

/// Validate a user-supplied city name
pub fn validate_city_name(city: &str) -> Result<(), &'static str> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err("City name is required");
    }
    if trimmed.chars().count() > MAX_CITY_NAME_LENGTH {
        return Err("City name is too long");
    }
    Ok(())
}

/// Validate latitude is on the globe
pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() {
        return Err("Latitude must be a finite number");
    }
    if latitude < -90.0 || latitude > 90.0 {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

/// Validate longitude is on the globe
pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if !longitude.is_finite() {
        return Err("Longitude must be a finite number");
    }
    if longitude < -180.0 || longitude > 180.0 {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a coordinate pair
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    validate_latitude(latitude)?;
    validate_longitude(longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // City Name Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_city_name_valid() {
        assert!(validate_city_name("Colombo").is_ok());
        assert!(validate_city_name("  Nuwara Eliya  ").is_ok());
        assert!(validate_city_name("St. John's").is_ok());
    }

    #[test]
    fn test_validate_city_name_invalid() {
        assert!(validate_city_name("").is_err());
        assert!(validate_city_name("   ").is_err());
        assert!(validate_city_name(&"x".repeat(MAX_CITY_NAME_LENGTH + 1)).is_err());
    }

    // ========================================================================
    // Coordinate Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_latitude_valid() {
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(6.9271).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
    }

    #[test]
    fn test_validate_latitude_invalid() {
        assert!(validate_latitude(90.0001).is_err());
        assert!(validate_latitude(-120.0).is_err());
        assert!(validate_latitude(f64::NAN).is_err());
        assert!(validate_latitude(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_longitude_valid() {
        assert!(validate_longitude(79.8612).is_ok());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.0).is_ok());
    }

    #[test]
    fn test_validate_longitude_invalid() {
        assert!(validate_longitude(180.5).is_err());
        assert!(validate_longitude(-200.0).is_err());
        assert!(validate_longitude(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_coordinates_pairs() {
        assert!(validate_coordinates(6.9271, 79.8612).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
    }
}
