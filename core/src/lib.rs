//! # VibeCheck Core
//!
//! Core OTP lifecycle logic for the VibeCheck backend. This crate contains
//! the challenge entity, the session manager service, collaborator traits,
//! and error types; delivery and persistence implementations live in the
//! infrastructure crate.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
