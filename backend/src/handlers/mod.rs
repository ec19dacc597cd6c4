//! HTTP request handlers for the Weather Outlook Service

pub mod health;
pub mod weather;

pub use health::health_check;
pub use weather::weather_context;
