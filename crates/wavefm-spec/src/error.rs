//! Error types for configuration and label handling.

use thiserror::Error;

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while validating configuration or serializing labels.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Sample rate is not a positive finite number.
    #[error("invalid sample rate: {rate} Hz")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: f64,
    },

    /// Duration is not a positive finite number.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Sample rate and duration round to an empty buffer.
    #[error("render of {duration} s at {rate} Hz contains no samples")]
    EmptyRender {
        /// Sample rate in Hz.
        rate: f64,
        /// Duration in seconds.
        duration: f64,
    },

    /// A parameter range is malformed.
    #[error("invalid range for '{param}': {message}")]
    InvalidRange {
        /// Parameter name.
        param: &'static str,
        /// Error message.
        message: String,
    },

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpecError {
    /// Creates an invalid range error.
    pub fn invalid_range(param: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRange {
            param,
            message: message.into(),
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            SpecError::InvalidSampleRate { .. } => "SPEC_001",
            SpecError::InvalidDuration { .. } => "SPEC_002",
            SpecError::EmptyRender { .. } => "SPEC_003",
            SpecError::InvalidRange { .. } => "SPEC_004",
            SpecError::Json(_) => "SPEC_005",
        }
    }
}
