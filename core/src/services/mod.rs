//! Business services for the OTP lifecycle.

pub mod otp;

pub use otp::*;
