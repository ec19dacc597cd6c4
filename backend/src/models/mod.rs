//! Data models for the Weather Outlook Service
//!
//! Re-exports models and types from the shared crate

pub use shared::models::*;
pub use shared::types::*;
