//! Shared types and models for the Weather Outlook Service
//!
//! This crate contains domain types shared between the backend server and
//! its integration tests.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
