//! Domain layer: entities for the OTP verification lifecycle.

pub mod entities;

pub use entities::*;
