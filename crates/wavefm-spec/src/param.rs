//! Modulatable synthesis parameters and their sampling ranges.

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};

/// Converts a MIDI note number to frequency in Hz.
///
/// Fractional notes are allowed, so ranges sampled in note space map to
/// continuous frequencies.
pub fn midi_to_frequency(midi_note: f64) -> f64 {
    440.0 * 2.0_f64.powf((midi_note - 69.0) / 12.0)
}

/// How values are distributed between a range's minimum and maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    /// Uniform in value.
    Linear,
    /// Uniform in log-value (perceptually linear for pitch).
    Logarithmic,
}

/// The six parameters driving the FM engine, one control curve each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Carrier base frequency in Hz.
    BaseFreq,
    /// Output amplitude, 0.0 to 1.0.
    Amp,
    /// Modulator frequency as a multiple of the base frequency.
    ModFreqRatio,
    /// Modulator wavetable position, 0.0 to 1.0.
    ModShape,
    /// Carrier wavetable position, 0.0 to 1.0.
    CarrShape,
    /// FM depth relative to the base frequency, 0.0 to 1.0.
    FmAmount,
}

impl ParamKind {
    /// All parameters in canonical order.
    pub const ALL: [ParamKind; 6] = [
        ParamKind::BaseFreq,
        ParamKind::Amp,
        ParamKind::ModFreqRatio,
        ParamKind::ModShape,
        ParamKind::CarrShape,
        ParamKind::FmAmount,
    ];

    /// Snake-case name, matching the serialized label field.
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::BaseFreq => "base_freq",
            ParamKind::Amp => "amp",
            ParamKind::ModFreqRatio => "mod_freq_ratio",
            ParamKind::ModShape => "mod_shape",
            ParamKind::CarrShape => "carr_shape",
            ParamKind::FmAmount => "fm_amount",
        }
    }

    /// Value used when no control points are supplied.
    pub fn default_value(&self) -> f64 {
        match self {
            ParamKind::BaseFreq => 440.0,
            ParamKind::Amp | ParamKind::ModFreqRatio => 1.0,
            ParamKind::ModShape | ParamKind::CarrShape | ParamKind::FmAmount => 0.0,
        }
    }

    /// Default sampling range.
    ///
    /// The base frequency range is expressed in MIDI notes; see
    /// [`ParamKind::to_native`].
    pub fn default_range(&self) -> ParamRange {
        match self {
            ParamKind::BaseFreq => ParamRange::new(20.0, 100.0, ScaleKind::Logarithmic),
            ParamKind::Amp => ParamRange::new(0.0, 1.0, ScaleKind::Linear),
            ParamKind::ModFreqRatio => ParamRange::new(0.01, 10.0, ScaleKind::Linear),
            ParamKind::ModShape | ParamKind::CarrShape | ParamKind::FmAmount => {
                ParamRange::new(0.0, 1.0, ScaleKind::Linear)
            }
        }
    }

    /// Maps a value from range units into the unit the engine consumes.
    ///
    /// Only the base frequency differs: its range is sampled in MIDI notes
    /// and converted to Hz.
    pub fn to_native(&self, value: f64) -> f64 {
        match self {
            ParamKind::BaseFreq => midi_to_frequency(value),
            _ => value,
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sampling range for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamRange {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
    /// Distribution hint for values between the bounds.
    pub scale: ScaleKind,
}

impl ParamRange {
    /// Creates a new range.
    pub fn new(min: f64, max: f64, scale: ScaleKind) -> Self {
        Self { min, max, scale }
    }

    /// Width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if `value` lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, kind: ParamKind) -> SpecResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(SpecError::invalid_range(kind.name(), "bounds must be finite"));
        }
        if !self.span().is_finite() {
            return Err(SpecError::invalid_range(kind.name(), "span must be finite"));
        }
        if self.min > self.max {
            return Err(SpecError::invalid_range(
                kind.name(),
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Sampling ranges for all six parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamRanges {
    /// Base frequency range in MIDI notes.
    #[serde(default = "default_base_freq")]
    pub base_freq: ParamRange,
    #[serde(default = "default_amp")]
    pub amp: ParamRange,
    #[serde(default = "default_mod_freq_ratio")]
    pub mod_freq_ratio: ParamRange,
    #[serde(default = "default_mod_shape")]
    pub mod_shape: ParamRange,
    #[serde(default = "default_carr_shape")]
    pub carr_shape: ParamRange,
    #[serde(default = "default_fm_amount")]
    pub fm_amount: ParamRange,
}

fn default_base_freq() -> ParamRange {
    ParamKind::BaseFreq.default_range()
}

fn default_amp() -> ParamRange {
    ParamKind::Amp.default_range()
}

fn default_mod_freq_ratio() -> ParamRange {
    ParamKind::ModFreqRatio.default_range()
}

fn default_mod_shape() -> ParamRange {
    ParamKind::ModShape.default_range()
}

fn default_carr_shape() -> ParamRange {
    ParamKind::CarrShape.default_range()
}

fn default_fm_amount() -> ParamRange {
    ParamKind::FmAmount.default_range()
}

impl Default for ParamRanges {
    fn default() -> Self {
        Self {
            base_freq: default_base_freq(),
            amp: default_amp(),
            mod_freq_ratio: default_mod_freq_ratio(),
            mod_shape: default_mod_shape(),
            carr_shape: default_carr_shape(),
            fm_amount: default_fm_amount(),
        }
    }
}

impl ParamRanges {
    /// Returns the range for a parameter.
    pub fn get(&self, kind: ParamKind) -> &ParamRange {
        match kind {
            ParamKind::BaseFreq => &self.base_freq,
            ParamKind::Amp => &self.amp,
            ParamKind::ModFreqRatio => &self.mod_freq_ratio,
            ParamKind::ModShape => &self.mod_shape,
            ParamKind::CarrShape => &self.carr_shape,
            ParamKind::FmAmount => &self.fm_amount,
        }
    }

    /// Checks every range is finite and ordered.
    pub fn validate(&self) -> SpecResult<()> {
        ParamKind::ALL
            .iter()
            .try_for_each(|&kind| self.get(kind).validate(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_midi_to_frequency() {
        assert!((midi_to_frequency(69.0) - 440.0).abs() < 1e-9);
        assert!((midi_to_frequency(81.0) - 880.0).abs() < 1e-9);
        assert!((midi_to_frequency(60.0) - 261.6256).abs() < 1e-3);
        // Fractional notes sit between semitones
        let mid = midi_to_frequency(69.5);
        assert!(mid > 440.0 && mid < midi_to_frequency(70.0));
    }

    #[test]
    fn test_param_names_match_serde() {
        for kind in ParamKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn test_base_freq_is_logarithmic() {
        for kind in ParamKind::ALL {
            let expected = if kind == ParamKind::BaseFreq {
                ScaleKind::Logarithmic
            } else {
                ScaleKind::Linear
            };
            assert_eq!(kind.default_range().scale, expected);
        }
    }

    #[test]
    fn test_to_native() {
        assert!((ParamKind::BaseFreq.to_native(69.0) - 440.0).abs() < 1e-9);
        assert_eq!(ParamKind::FmAmount.to_native(0.25), 0.25);
    }

    #[test]
    fn test_ranges_default_validate() {
        let ranges = ParamRanges::default();
        ranges.validate().unwrap();
        assert_eq!(ranges.get(ParamKind::ModFreqRatio).min, 0.01);
        assert_eq!(ranges.get(ParamKind::ModFreqRatio).max, 10.0);
    }

    #[test]
    fn test_ranges_reject_inverted() {
        let mut ranges = ParamRanges::default();
        ranges.amp = ParamRange::new(1.0, 0.0, ScaleKind::Linear);
        let err = ranges.validate().unwrap_err();
        assert!(err.to_string().contains("amp"));
    }

    #[test]
    fn test_ranges_reject_overflowing_span() {
        let mut ranges = ParamRanges::default();
        ranges.amp = ParamRange::new(-1.0e308, 1.0e308, ScaleKind::Linear);
        let err = ranges.validate().unwrap_err();
        assert_eq!(err.code(), "SPEC_004");
        assert!(err.to_string().contains("span"));
    }

    #[test]
    fn test_ranges_partial_json() {
        let ranges: ParamRanges = serde_json::from_str(
            r#"{"fm_amount": {"min": 0.0, "max": 0.5, "scale": "linear"}}"#,
        )
        .unwrap();
        assert_eq!(ranges.fm_amount.max, 0.5);
        assert_eq!(ranges.amp, ParamKind::Amp.default_range());
    }

    #[test]
    fn test_range_contains() {
        let range = ParamRange::new(0.0, 1.0, ScaleKind::Linear);
        assert!(range.contains(0.0));
        assert!(range.contains(1.0));
        assert!(!range.contains(1.01));
        assert_eq!(range.span(), 1.0);
    }
}
