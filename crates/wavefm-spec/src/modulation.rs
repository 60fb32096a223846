//! Control-point labels for a rendered clip.

use serde::{Deserialize, Serialize};

use crate::error::SpecResult;
use crate::param::ParamKind;

/// Sparse control points for all six parameters.
///
/// This is both the engine's input (each sequence is stretched to a full
/// per-sample curve) and the label persisted next to the rendered audio.
/// Base frequency points are in Hz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Modulations {
    pub base_freq: Vec<f64>,
    pub amp: Vec<f64>,
    pub mod_freq_ratio: Vec<f64>,
    pub mod_shape: Vec<f64>,
    pub carr_shape: Vec<f64>,
    pub fm_amount: Vec<f64>,
}

impl Default for Modulations {
    /// A single-point sequence per parameter: 440 Hz, full amplitude, 1:1
    /// ratio, first wavetable row for both oscillators and no FM.
    fn default() -> Self {
        let point = |kind: ParamKind| vec![kind.default_value()];
        Self {
            base_freq: point(ParamKind::BaseFreq),
            amp: point(ParamKind::Amp),
            mod_freq_ratio: point(ParamKind::ModFreqRatio),
            mod_shape: point(ParamKind::ModShape),
            carr_shape: point(ParamKind::CarrShape),
            fm_amount: point(ParamKind::FmAmount),
        }
    }
}

impl Modulations {
    /// Returns the control points for a parameter.
    pub fn get(&self, kind: ParamKind) -> &[f64] {
        match kind {
            ParamKind::BaseFreq => &self.base_freq,
            ParamKind::Amp => &self.amp,
            ParamKind::ModFreqRatio => &self.mod_freq_ratio,
            ParamKind::ModShape => &self.mod_shape,
            ParamKind::CarrShape => &self.carr_shape,
            ParamKind::FmAmount => &self.fm_amount,
        }
    }

    /// Replaces the control points for a parameter.
    pub fn set(&mut self, kind: ParamKind, points: Vec<f64>) {
        let slot = match kind {
            ParamKind::BaseFreq => &mut self.base_freq,
            ParamKind::Amp => &mut self.amp,
            ParamKind::ModFreqRatio => &mut self.mod_freq_ratio,
            ParamKind::ModShape => &mut self.mod_shape,
            ParamKind::CarrShape => &mut self.carr_shape,
            ParamKind::FmAmount => &mut self.fm_amount,
        };
        *slot = points;
    }

    /// Builder-style variant of [`Modulations::set`].
    pub fn with(mut self, kind: ParamKind, points: Vec<f64>) -> Self {
        self.set(kind, points);
        self
    }

    /// Iterates parameters in canonical order with their control points.
    pub fn iter(&self) -> impl Iterator<Item = (ParamKind, &[f64])> + '_ {
        ParamKind::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }

    /// Parses labels from JSON.
    pub fn from_json(json: &str) -> SpecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes labels to compact JSON.
    pub fn to_json(&self) -> SpecResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
