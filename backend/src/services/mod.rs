//! Business logic services for the Weather Outlook Service

pub mod context;
pub mod dataset;
pub mod encoding;
pub mod outlook;

pub use context::ContextBuilder;
pub use dataset::load_historical_data;
pub use encoding::LabelEncoder;
pub use outlook::{compute_rain_outlook, RainPredictor};
