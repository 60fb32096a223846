//! The wavetable FM engine.
//!
//! One render runs the modulator oscillator, turns its output into the
//! carrier's instantaneous frequency, runs the carrier, applies the
//! amplitude curve and finally the zero-phase antialiasing filter:
//!
//! ```text
//! mod     = osc(base_freq * mod_freq_ratio, mod_shape)
//! carrier = osc(mod * fm_amount * base_freq + base_freq, carr_shape)
//! output  = antialias(carrier * amp)
//! ```
//!
//! FM depth is relative to the base frequency, so the same `fm_amount`
//! gives the same timbre at every pitch.

use std::fmt;

use tracing::debug;
use wavefm_spec::{Modulations, ParamKind, RenderConfig};

use crate::curve::expand_curve;
use crate::error::{SynthError, SynthResult};
use crate::filter::AntialiasFilter;
use crate::oscillator::WavetableOscillator;
use crate::wavetable::WavetableBank;

/// Per-sample curves for all six parameters.
///
/// Every curve must hold exactly one value per rendered sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCurves {
    /// Base frequency in Hz.
    pub base_freq: Vec<f64>,
    /// Amplitude, 0.0 to 1.0.
    pub amp: Vec<f64>,
    /// Modulator frequency as a multiple of the base frequency.
    pub mod_freq_ratio: Vec<f64>,
    /// Modulator row position, 0.0 to 1.0.
    pub mod_shape: Vec<f64>,
    /// Carrier row position, 0.0 to 1.0.
    pub carr_shape: Vec<f64>,
    /// FM depth, 0.0 to 1.0.
    pub fm_amount: Vec<f64>,
}

impl ParameterCurves {
    /// Expands every control-point sequence of `modulations` to `len` samples.
    pub fn from_modulations(modulations: &Modulations, len: usize) -> SynthResult<Self> {
        let expand = |kind: ParamKind| expand_curve(modulations.get(kind), len);
        Ok(Self {
            base_freq: expand(ParamKind::BaseFreq)?,
            amp: expand(ParamKind::Amp)?,
            mod_freq_ratio: expand(ParamKind::ModFreqRatio)?,
            mod_shape: expand(ParamKind::ModShape)?,
            carr_shape: expand(ParamKind::CarrShape)?,
            fm_amount: expand(ParamKind::FmAmount)?,
        })
    }

    /// Returns the curve for a parameter.
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

    /// Checks every curve holds exactly `len` samples.
    pub fn validate(&self, len: usize) -> SynthResult<()> {
        for kind in ParamKind::ALL {
            let found = self.get(kind).len();
            if found != len {
                return Err(SynthError::length_mismatch(kind.name(), len, found));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ParameterCurves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParameterCurves(")?;
        for (i, kind) in ParamKind::ALL.iter().enumerate() {
            let curve = self.get(*kind);
            let min = curve.iter().copied().fold(f64::INFINITY, f64::min);
            let max = curve.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{kind}=[{min:.3}, {max:.3}]")?;
        }
        write!(f, "; {} samples)", self.base_freq.len())
    }
}

/// A rendered clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl AudioBuffer {
    /// Wraps rendered samples.
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// The samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |acc, s| acc.max(s.abs()))
    }

    /// BLAKE3 hash of the samples as little-endian f64 bytes.
    ///
    /// Bit-identical renders hash identically.
    pub fn pcm_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for sample in &self.samples {
            hasher.update(&sample.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Common trait for offline renderers driven by [`ParameterCurves`].
pub trait Synthesizer {
    /// Number of samples every render produces.
    fn sample_count(&self) -> usize;

    /// Renders one clip from fully expanded curves.
    fn render(&self, curves: &ParameterCurves) -> SynthResult<AudioBuffer>;

    /// Expands control points to curves and renders them.
    fn render_modulations(&self, modulations: &Modulations) -> SynthResult<AudioBuffer> {
        let curves = ParameterCurves::from_modulations(modulations, self.sample_count())?;
        self.render(&curves)
    }
}

/// Wavetable FM synthesizer: one modulator driving one carrier.
///
/// Holds only immutable state, so one engine can be shared across threads
/// and every render is independent.
#[derive(Debug, Clone)]
pub struct FmSynthEngine {
    config: RenderConfig,
    bank: WavetableBank,
    sample_count: usize,
    antialias: AntialiasFilter,
}

impl FmSynthEngine {
    /// Creates an engine rendering `config.duration_seconds` of audio from `bank`.
    ///
    /// # Errors
    /// * [`SynthError::Config`] if the configuration is invalid
    /// * [`SynthError::SignalTooShort`] if the render is shorter than the
    ///   antialiasing filter accepts
    pub fn new(config: RenderConfig, bank: WavetableBank) -> SynthResult<Self> {
        let sample_count = config.sample_count()?;
        if sample_count < AntialiasFilter::MIN_LEN {
            return Err(SynthError::SignalTooShort {
                len: sample_count,
                min: AntialiasFilter::MIN_LEN,
            });
        }
        let antialias = AntialiasFilter::new(config.sample_rate)?;

        Ok(Self {
            config,
            bank,
            sample_count,
            antialias,
        })
    }

    /// The render configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn oscillator(&self) -> SynthResult<WavetableOscillator<'_>> {
        WavetableOscillator::new(&self.bank, self.config.sample_rate)
    }
}

impl Synthesizer for FmSynthEngine {
    fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Renders one clip.
    ///
    /// Base frequencies and ratios are expected to be positive; other values
    /// are rendered as-is and are the caller's responsibility.
    ///
    /// # Errors
    /// [`SynthError::LengthMismatch`] if any curve length differs from
    /// [`Synthesizer::sample_count`].
    fn render(&self, curves: &ParameterCurves) -> SynthResult<AudioBuffer> {
        curves.validate(self.sample_count)?;
        debug!(samples = self.sample_count, "rendering fm clip");

        let osc = self.oscillator()?;

        let mod_freq: Vec<f64> = curves
            .base_freq
            .iter()
            .zip(&curves.mod_freq_ratio)
            .map(|(base, ratio)| base * ratio)
            .collect();
        let mod_audio = osc.render(&mod_freq, &curves.mod_shape)?;

        let carrier_freq: Vec<f64> = mod_audio
            .iter()
            .zip(&curves.fm_amount)
            .zip(&curves.base_freq)
            .map(|((m, amount), base)| m * amount * base + base)
            .collect();
        let carrier_audio = osc.render(&carrier_freq, &curves.carr_shape)?;

        let scaled: Vec<f64> = carrier_audio
            .iter()
            .zip(&curves.amp)
            .map(|(s, amp)| amp * s)
            .collect();

        let output = self.antialias.apply(&scaled)?;
        debug!(samples = output.len(), "fm clip rendered");

        Ok(AudioBuffer::new(output, self.config.sample_rate))
    }
}

impl fmt::Display for FmSynthEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FmSynthEngine(sample_rate={}, duration={}, samples={}, wavetable={}x{})",
            self.config.sample_rate,
            self.config.duration_seconds,
            self.sample_count,
            self.bank.num_tables(),
            self.bank.table_len()
        )
    }
}
