//! Dataset generation configuration.

use serde::{Deserialize, Serialize};
use wavefm_spec::{ParamKind, ParamRanges, RenderConfig};

use crate::error::{DatasetError, DatasetResult};
use crate::points::RandomPointGenerator;

/// Settings shared by every example of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Sample rate and clip duration.
    #[serde(default)]
    pub render: RenderConfig,
    /// Sampling range per parameter.
    #[serde(default)]
    pub ranges: ParamRanges,
    /// Parameters that vary within each clip (0-6).
    #[serde(default = "default_num_active_mods")]
    pub num_active_mods: usize,
    /// Control points drawn per parameter.
    #[serde(default = "default_num_points")]
    pub num_points: usize,
}

fn default_num_active_mods() -> usize {
    1
}

fn default_num_points() -> usize {
    RandomPointGenerator::DEFAULT_NUM_POINTS
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            ranges: ParamRanges::default(),
            num_active_mods: default_num_active_mods(),
            num_points: default_num_points(),
        }
    }
}

impl DatasetConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> DatasetResult<Self> {
        serde_json::from_str(json).map_err(|e| DatasetError::Spec(e.into()))
    }

    /// Checks every field before any example is generated.
    pub fn validate(&self) -> DatasetResult<()> {
        self.render.validate()?;
        self.ranges.validate()?;
        if self.num_active_mods > ParamKind::ALL.len() {
            return Err(DatasetError::InvalidActiveCount {
                count: self.num_active_mods,
                max: ParamKind::ALL.len(),
            });
        }
        if self.num_points == 0 {
            return Err(DatasetError::InvalidPointCount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = DatasetConfig::default();
        config.validate().unwrap();
        assert_eq!(config.num_active_mods, 1);
        assert_eq!(config.num_points, 4);
        assert_eq!(config.render.sample_rate, 44100.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = DatasetConfig::from_json(
            r#"{
                "render": {"sample_rate": 16000, "duration_seconds": 1.0},
                "num_active_mods": 3
            }"#,
        )
        .unwrap();
        assert_eq!(config.render, RenderConfig::new(16000.0, 1.0));
        assert_eq!(config.num_active_mods, 3);
        assert_eq!(config.num_points, 4);
        assert_eq!(config.ranges, ParamRanges::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = DatasetConfig::from_json(r#"{"voices": 8}"#).unwrap_err();
        assert_eq!(err.code(), "DATASET_004");
    }

    #[test]
    fn test_validate_rejects_bad_counts() {
        let config = DatasetConfig {
            num_active_mods: 7,
            ..DatasetConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DatasetError::InvalidActiveCount { .. })
        ));

        let config = DatasetConfig {
            num_points: 0,
            ..DatasetConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DatasetError::InvalidPointCount)
        ));
    }
}
