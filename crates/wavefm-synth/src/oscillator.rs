//! Wavetable oscillator with per-sample frequency and shape.
//!
//! Phase is the running sum of `frequency / sample_rate`, so frequency may
//! change arbitrarily from one sample to the next; this is what lets one
//! oscillator frequency-modulate another. Within a row the phase is
//! truncated to the nearest preceding table column (no interpolation); the
//! resulting high-frequency artifacts are removed by the antialiasing
//! filter after rendering. Across rows, the shape curve selects a fractional
//! row index and the two neighbouring rows are linearly blended.

use tracing::trace;

use crate::error::{SynthError, SynthResult};
use crate::wavetable::WavetableBank;

/// Accumulates phase in cycles from per-sample frequencies.
///
/// The first call already includes the first frequency, so the first output
/// phase is `frequency[0] / sample_rate`, not zero.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    sum: f64,
    sample_rate: f64,
}

impl PhaseAccumulator {
    /// Creates an accumulator at phase zero.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sum: 0.0,
            sample_rate,
        }
    }

    /// Adds one sample at `frequency` Hz and returns the phase in cycles.
    ///
    /// The phase is unwrapped; callers take it modulo 1.0.
    #[inline]
    pub fn advance(&mut self, frequency: f64) -> f64 {
        self.sum += frequency;
        self.sum / self.sample_rate
    }
}

/// Reads a [`WavetableBank`] driven by frequency and shape curves.
#[derive(Debug, Clone, Copy)]
pub struct WavetableOscillator<'a> {
    bank: &'a WavetableBank,
    sample_rate: f64,
}

impl<'a> WavetableOscillator<'a> {
    /// Creates an oscillator over `bank`.
    ///
    /// # Errors
    /// [`SynthError::InvalidSampleRate`] if `sample_rate` is not positive and finite.
    pub fn new(bank: &'a WavetableBank, sample_rate: f64) -> SynthResult<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(SynthError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self { bank, sample_rate })
    }

    /// Renders one sample per entry of `frequency` (Hz) and `shape` (0.0-1.0).
    ///
    /// Shape values outside [0.0, 1.0] read the nearest boundary row.
    /// Non-positive frequencies are accepted and run the phase backwards or
    /// hold it still.
    ///
    /// # Errors
    /// [`SynthError::LengthMismatch`] if the curves differ in length.
    pub fn render(&self, frequency: &[f64], shape: &[f64]) -> SynthResult<Vec<f64>> {
        if shape.len() != frequency.len() {
            return Err(SynthError::length_mismatch(
                "shape",
                frequency.len(),
                shape.len(),
            ));
        }
        trace!(
            samples = frequency.len(),
            tables = self.bank.num_tables(),
            "rendering wavetable oscillator"
        );

        let mut phase_acc = PhaseAccumulator::new(self.sample_rate);
        let output = frequency
            .iter()
            .zip(shape)
            .map(|(&freq, &shape)| {
                let phase = phase_acc.advance(freq);
                self.sample_at(phase, shape)
            })
            .collect();

        Ok(output)
    }

    /// Samples the bank at `phase` (cycles) and `shape` (row position).
    #[inline]
    fn sample_at(&self, phase: f64, shape: f64) -> f64 {
        let table_len = self.bank.table_len();
        let last_table = self.bank.num_tables() - 1;

        let position = (phase.rem_euclid(1.0) * table_len as f64) as usize % table_len;

        let table_pos = (shape * last_table as f64).clamp(0.0, last_table as f64);
        // NaN shapes fall through the clamp; read row 0 for them
        let table_pos = if table_pos.is_nan() { 0.0 } else { table_pos };
        let lower = table_pos as usize;
        let upper = (lower + 1).min(last_table);
        let blend = table_pos - lower as f64;

        let a = self.bank.sample(lower, position);
        let b = self.bank.sample(upper, position);
        a * (1.0 - blend) + b * blend
    }
}
