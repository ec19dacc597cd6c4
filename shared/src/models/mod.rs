//! Domain models for the Weather Outlook Service

mod weather;

pub use weather::*;
