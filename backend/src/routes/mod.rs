//! Route definitions for the Weather Outlook Service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Service health, including dataset availability
        .route("/health", get(handlers::health_check))
        // Weather context lookup by city, coordinates, or fallback
        .route("/weather", post(handlers::weather_context))
}
