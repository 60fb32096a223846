//! Error types for the synthesis engine.

use thiserror::Error;
use wavefm_spec::SpecError;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while building or running the engine.
///
/// Every variant describes an invalid argument detected synchronously at the
/// call that received it. Rendering has no transient failure modes.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Render configuration was rejected.
    #[error("invalid render configuration: {0}")]
    Config(#[from] SpecError),

    /// An input sequence was empty.
    #[error("'{name}' must not be empty")]
    EmptyInput {
        /// Name of the empty input.
        name: &'static str,
    },

    /// Two sequences that must align differ in length.
    #[error("'{name}' has length {found}, expected {expected}")]
    LengthMismatch {
        /// Name of the offending sequence.
        name: &'static str,
        /// Required length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// Wavetable bank has no tables or zero-length tables.
    #[error("wavetable bank must contain at least one non-empty table")]
    EmptyWavetable,

    /// Wavetable rows differ in length.
    #[error("wavetable row {row} has length {found}, expected {expected}")]
    RaggedWavetable {
        /// Index of the offending row.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// Sample rate is not a positive finite number.
    #[error("invalid sample rate: {rate} Hz")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: f64,
    },

    /// Signal is too short for zero-phase filtering.
    #[error("signal of {len} samples is shorter than the {min}-sample filter minimum")]
    SignalTooShort {
        /// Signal length.
        len: usize,
        /// Minimum accepted length.
        min: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },
}

impl SynthError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a length mismatch error.
    pub fn length_mismatch(name: &'static str, expected: usize, found: usize) -> Self {
        Self::LengthMismatch {
            name,
            expected,
            found,
        }
    }

    /// Returns true for errors caused by a malformed argument.
    ///
    /// Only a JSON failure surfaced through the configuration layer falls
    /// outside this class.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, SynthError::Config(SpecError::Json(_)))
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::Config(_) => "SYNTH_001",
            SynthError::EmptyInput { .. } => "SYNTH_002",
            SynthError::LengthMismatch { .. } => "SYNTH_003",
            SynthError::EmptyWavetable => "SYNTH_004",
            SynthError::RaggedWavetable { .. } => "SYNTH_005",
            SynthError::InvalidSampleRate { .. } => "SYNTH_006",
            SynthError::SignalTooShort { .. } => "SYNTH_007",
            SynthError::InvalidParameter { .. } => "SYNTH_008",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = SynthError::invalid_param("shape", "must be finite");
        assert!(err.to_string().contains("shape"));
        assert!(err.to_string().contains("must be finite"));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = SynthError::length_mismatch("amp", 80, 79);
        assert_eq!(err.to_string(), "'amp' has length 79, expected 80");
        assert_eq!(err.code(), "SYNTH_003");
    }

    #[test]
    fn test_config_errors_convert() {
        let err: SynthError = SpecError::InvalidSampleRate { rate: 0.0 }.into();
        assert!(matches!(err, SynthError::Config(_)));
        assert!(err.is_invalid_argument());
    }
}
