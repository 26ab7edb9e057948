//! Error-code contract shared by every error enum in the crate.
//!
//! Hosts show `Display` text to users and key telemetry or retry buttons off
//! the stable code.

/// Stable, grep-able code plus a retry hint for an error value.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
