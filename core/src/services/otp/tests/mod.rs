//! Unit tests for the OTP session manager
