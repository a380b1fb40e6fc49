//! Error types for the fallible edges of the tracker
//!
//! The tracking core itself never fails; only configuration can.

use thiserror::Error;

/// Errors raised while loading or validating tracker configuration
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Configuration sources could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// Gap window must be a finite, positive number of seconds
    #[error("interact time gap must be finite and positive, got {0}")]
    InvalidTimeGap(f32),

    /// At least one touch slot is required
    #[error("max touches must be at least 1, got {0}")]
    InvalidMaxTouches(usize),
}

/// Convenience alias used by configuration APIs
pub type Result<T> = std::result::Result<T, TrackerError>;
