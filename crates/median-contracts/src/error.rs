//! Error types shared by every Median crate.
//!
//! Generators in this workspace are total over their input domain, so the
//! error surface is small: it covers the boundaries where untyped input
//! (CLI arguments, TOML, enum names typed by a user) is turned into typed
//! values, plus the two simulator seams that can refuse a request.

use thiserror::Error;

/// The unified error type for the Median crates.
#[derive(Debug, Error)]
pub enum MedianError {
    /// A batch generator was asked for a negative number of records.
    #[error("invalid batch size {requested}: count must be zero or greater")]
    InvalidCount { requested: i64 },

    /// An enum name (status, category, route...) did not match any variant.
    #[error("unknown {kind} '{value}'")]
    UnknownFilter { kind: String, value: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The geolocation source could not produce a position.
    #[error("geolocation unavailable: {reason}")]
    Geolocation { reason: String },

    /// The simulator rejected a request (e.g. a destination off the map).
    #[error("simulation error: {reason}")]
    Simulation { reason: String },
}

/// Convenience alias used throughout the Median crates.
pub type MedianResult<T> = Result<T, MedianError>;
