//! Render configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};

/// Sample rate and duration of a single render.
///
/// The engine derives its buffer length from this once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
    /// Duration of the rendered clip in seconds.
    #[serde(default = "default_duration")]
    pub duration_seconds: f64,
}

fn default_sample_rate() -> f64 {
    44100.0
}

fn default_duration() -> f64 {
    10.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            duration_seconds: default_duration(),
        }
    }
}

impl RenderConfig {
    /// Creates a new render configuration.
    pub fn new(sample_rate: f64, duration_seconds: f64) -> Self {
        Self {
            sample_rate,
            duration_seconds,
        }
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> SpecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks that sample rate and duration are positive and finite.
    pub fn validate(&self) -> SpecResult<()> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(SpecError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        if !(self.duration_seconds.is_finite() && self.duration_seconds > 0.0) {
            return Err(SpecError::InvalidDuration {
                duration: self.duration_seconds,
            });
        }
        Ok(())
    }

    /// Number of samples in the render: `round(sample_rate * duration)`.
    ///
    /// Fails if the configuration is invalid or rounds to zero samples.
    pub fn sample_count(&self) -> SpecResult<usize> {
        self.validate()?;
        let count = (self.sample_rate * self.duration_seconds).round();
        if count < 1.0 {
            return Err(SpecError::EmptyRender {
                rate: self.sample_rate,
                duration: self.duration_seconds,
            });
        }
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_count_rounds() {
        assert_eq!(RenderConfig::new(8000.0, 0.01).sample_count().unwrap(), 80);
        assert_eq!(RenderConfig::new(44100.0, 1.0).sample_count().unwrap(), 44100);
        // 3 * 0.5 = 1.5 rounds away from zero
        assert_eq!(RenderConfig::new(3.0, 0.5).sample_count().unwrap(), 2);
        // 10 * 0.33 = 3.3 rounds down
        assert_eq!(RenderConfig::new(10.0, 0.33).sample_count().unwrap(), 3);
    }

    #[test]
    fn test_invalid_sample_rate() {
        for rate in [0.0, -44100.0, f64::NAN, f64::INFINITY] {
            let err = RenderConfig::new(rate, 1.0).validate().unwrap_err();
            assert!(matches!(err, SpecError::InvalidSampleRate { .. }));
        }
    }

    #[test]
    fn test_invalid_duration() {
        for duration in [0.0, -1.0, f64::NAN] {
            let err = RenderConfig::new(44100.0, duration).validate().unwrap_err();
            assert!(matches!(err, SpecError::InvalidDuration { .. }));
        }
    }

    #[test]
    fn test_empty_render() {
        let err = RenderConfig::new(8000.0, 0.00001).sample_count().unwrap_err();
        assert!(matches!(err, SpecError::EmptyRender { .. }));
    }

    #[test]
    fn test_json_defaults() {
        let config = RenderConfig::from_json(r#"{"sample_rate": 22050}"#).unwrap();
        assert_eq!(config, RenderConfig::new(22050.0, 10.0));

        let config = RenderConfig::from_json("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_json_rejects_unknown_fields() {
        assert!(RenderConfig::from_json(r#"{"sample_rate": 8000, "channels": 2}"#).is_err());
    }
}
