//! Error types for dataset generation.

use thiserror::Error;
use wavefm_spec::SpecError;
use wavefm_synth::SynthError;

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors that can occur while sampling modulations or rendering examples.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Active modulation count outside 0..=6.
    #[error("number of active modulations must be between 0 and {max}, got {count}")]
    InvalidActiveCount {
        /// Requested count.
        count: usize,
        /// Largest accepted count.
        max: usize,
    },

    /// Control-point generator asked for zero points.
    #[error("control-point count must be at least 1")]
    InvalidPointCount,

    /// Sampling bounds are unordered or not finite.
    #[error("invalid sampling bounds [{min}, {max}]")]
    InvalidBounds {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Configuration or label error.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Rendering error.
    #[error(transparent)]
    Synth(#[from] SynthError),
}

impl DatasetError {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            DatasetError::InvalidActiveCount { .. } => "DATASET_001",
            DatasetError::InvalidPointCount => "DATASET_002",
            DatasetError::InvalidBounds { .. } => "DATASET_003",
            DatasetError::Spec(_) => "DATASET_004",
            DatasetError::Synth(_) => "DATASET_005",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_count_message() {
        let err = DatasetError::InvalidActiveCount { count: 7, max: 6 };
        assert_eq!(
            err.to_string(),
            "number of active modulations must be between 0 and 6, got 7"
        );
        assert_eq!(err.code(), "DATASET_001");
    }

    #[test]
    fn test_synth_errors_are_transparent() {
        let err: DatasetError = SynthError::EmptyWavetable.into();
        assert_eq!(err.to_string(), SynthError::EmptyWavetable.to_string());
        assert_eq!(err.code(), "DATASET_005");
    }
}
