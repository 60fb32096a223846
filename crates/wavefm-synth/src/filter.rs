//! Butterworth low-pass filtering and zero-phase application.
//!
//! The antialiasing stage is a 4th-order Butterworth low-pass built as a
//! cascade of two biquad sections (Audio EQ Cookbook low-pass, which is the
//! bilinear transform with pre-warping at the cutoff). It is run forward and
//! then backward over the signal so the result has no phase delay and stays
//! sample-aligned with the control curves that produced it.

use std::f64::consts::PI;

use crate::error::{SynthError, SynthResult};

/// Biquad filter coefficients, normalized so `a0 == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Creates lowpass filter coefficients.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor (resonance), 0.707 is a 2nd-order Butterworth
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn lowpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        // Clamp Q to minimum safe value to prevent division by zero
        let q = q.max(0.5);
        let omega = 2.0 * PI * cutoff / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 - cos_omega) / 2.0;
        let b1 = 1.0 - cos_omega;
        let b2 = (1.0 - cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Gain at 0 Hz.
    pub fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }

    /// Magnitude response at `frequency` Hz.
    pub fn magnitude_at(&self, frequency: f64, sample_rate: f64) -> f64 {
        let w = 2.0 * PI * frequency / sample_rate;
        let (s1, c1) = w.sin_cos();
        let (s2, c2) = (2.0 * w).sin_cos();

        // H(e^jw) = (b0 + b1 e^-jw + b2 e^-2jw) / (1 + a1 e^-jw + a2 e^-2jw)
        let num_re = self.b0 + self.b1 * c1 + self.b2 * c2;
        let num_im = -(self.b1 * s1 + self.b2 * s2);
        let den_re = 1.0 + self.a1 * c1 + self.a2 * c2;
        let den_im = -(self.a1 * s1 + self.a2 * s2);

        (num_re.hypot(num_im)) / (den_re.hypot(den_im))
    }
}

/// Biquad filter state.
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    // Delay line for input samples
    x1: f64,
    x2: f64,
    // Delay line for output samples
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    /// Creates a new biquad filter with the given coefficients.
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Sets the state to the steady response of a constant `input`.
    ///
    /// A signal starting at `input` then passes through without a start-up
    /// transient.
    pub fn prime(&mut self, input: f64) {
        let output = input * self.coeffs.dc_gain();
        self.x1 = input;
        self.x2 = input;
        self.y1 = output;
        self.y2 = output;
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.coeffs.b0 * input + self.coeffs.b1 * self.x1 + self.coeffs.b2 * self.x2
            - self.coeffs.a1 * self.y1
            - self.coeffs.a2 * self.y2;

        // Update delay lines
        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Processes a buffer of samples in place.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

/// Even-order Butterworth low-pass as cascaded biquad sections.
#[derive(Debug, Clone, PartialEq)]
pub struct ButterworthLowpass {
    sections: Vec<BiquadCoeffs>,
}

impl ButterworthLowpass {
    /// Designs the filter.
    ///
    /// # Arguments
    /// * `order` - Filter order, even and at least 2
    /// * `cutoff` - -3 dB frequency in Hz, below Nyquist
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn new(order: usize, cutoff: f64, sample_rate: f64) -> SynthResult<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(SynthError::InvalidSampleRate { rate: sample_rate });
        }
        if order < 2 || order % 2 != 0 {
            return Err(SynthError::invalid_param(
                "order",
                format!("must be even and at least 2, got {order}"),
            ));
        }
        if !(cutoff > 0.0 && cutoff < sample_rate / 2.0) {
            return Err(SynthError::invalid_param(
                "cutoff",
                format!("{cutoff} Hz is outside (0, {}) Hz", sample_rate / 2.0),
            ));
        }

        // Pole pair k of an order-n Butterworth has Q = 1 / (2 sin((2k+1)pi / 2n))
        let sections = (0..order / 2)
            .map(|k| {
                let angle = (2 * k + 1) as f64 * PI / (2 * order) as f64;
                let q = 1.0 / (2.0 * angle.sin());
                BiquadCoeffs::lowpass(cutoff, q, sample_rate)
            })
            .collect();

        Ok(Self { sections })
    }

    /// The biquad sections in processing order.
    pub fn sections(&self) -> &[BiquadCoeffs] {
        &self.sections
    }

    /// Filter order.
    pub fn order(&self) -> usize {
        self.sections.len() * 2
    }

    /// Magnitude response of the whole cascade at `frequency` Hz.
    pub fn magnitude_at(&self, frequency: f64, sample_rate: f64) -> f64 {
        self.sections
            .iter()
            .map(|s| s.magnitude_at(frequency, sample_rate))
            .product()
    }

    /// Runs the cascade forward over `buffer` in place.
    ///
    /// Each section starts in the steady state of a constant input equal to
    /// `buffer[0]` (scaled by the gain of the sections before it).
    pub fn process_primed(&self, buffer: &mut [f64]) {
        let Some(&first) = buffer.first() else {
            return;
        };

        let mut level = first;
        for coeffs in &self.sections {
            let mut section = BiquadFilter::new(*coeffs);
            section.prime(level);
            section.process_buffer(buffer);
            level *= coeffs.dc_gain();
        }
    }

    /// Applies the filter forward and backward for zero phase delay.
    ///
    /// The signal is extended at both ends by `pad_len` samples of odd
    /// reflection about its end points to suppress edge transients; the
    /// padding is removed before returning.
    ///
    /// # Errors
    /// [`SynthError::SignalTooShort`] unless `signal.len() > pad_len`.
    pub fn filtfilt(&self, signal: &[f64], pad_len: usize) -> SynthResult<Vec<f64>> {
        let len = signal.len();
        if len <= pad_len || len == 0 {
            return Err(SynthError::SignalTooShort {
                len,
                min: pad_len + 1,
            });
        }

        let mut extended = odd_extend(signal, pad_len);

        self.process_primed(&mut extended);
        extended.reverse();
        self.process_primed(&mut extended);
        extended.reverse();

        Ok(extended[pad_len..pad_len + len].to_vec())
    }
}

/// Extends `signal` by `pad_len` samples of odd reflection at each end.
///
/// Requires `signal.len() > pad_len`.
fn odd_extend(signal: &[f64], pad_len: usize) -> Vec<f64> {
    let len = signal.len();
    let first = signal[0];
    let last = signal[len - 1];

    let mut extended = Vec::with_capacity(len + 2 * pad_len);
    extended.extend((1..=pad_len).rev().map(|i| 2.0 * first - signal[i]));
    extended.extend_from_slice(signal);
    extended.extend((1..=pad_len).map(|i| 2.0 * last - signal[len - 1 - i]));
    extended
}

/// The fixed post-render antialiasing stage.
///
/// A 4th-order Butterworth low-pass at `sample_rate / 2.2`, applied with
/// zero phase. Signals must hold at least [`AntialiasFilter::MIN_LEN`]
/// samples.
#[derive(Debug, Clone, PartialEq)]
pub struct AntialiasFilter {
    lowpass: ButterworthLowpass,
    sample_rate: f64,
}

impl AntialiasFilter {
    /// Filter order.
    pub const ORDER: usize = 4;
    /// Cutoff is `sample_rate / CUTOFF_DIVISOR`.
    pub const CUTOFF_DIVISOR: f64 = 2.2;
    /// Odd-reflection padding per side: three times the coefficient count of
    /// the equivalent single 4th-order transfer function.
    pub const PAD_LEN: usize = 3 * (Self::ORDER + 1);
    /// Shortest signal accepted by [`AntialiasFilter::apply`].
    pub const MIN_LEN: usize = Self::PAD_LEN + 1;

    /// Designs the filter for `sample_rate`.
    ///
    /// # Errors
    /// [`SynthError::InvalidSampleRate`] if `sample_rate` is not positive and finite.
    pub fn new(sample_rate: f64) -> SynthResult<Self> {
        let cutoff = sample_rate / Self::CUTOFF_DIVISOR;
        let lowpass = ButterworthLowpass::new(Self::ORDER, cutoff, sample_rate)?;
        Ok(Self {
            lowpass,
            sample_rate,
        })
    }

    /// Cutoff frequency in Hz.
    pub fn cutoff(&self) -> f64 {
        self.sample_rate / Self::CUTOFF_DIVISOR
    }

    /// The underlying low-pass design.
    pub fn lowpass(&self) -> &ButterworthLowpass {
        &self.lowpass
    }

    /// Filters `signal` with zero phase, returning a buffer of equal length.
    ///
    /// # Errors
    /// [`SynthError::SignalTooShort`] for signals under [`AntialiasFilter::MIN_LEN`].
    pub fn apply(&self, signal: &[f64]) -> SynthResult<Vec<f64>> {
        self.lowpass.filtfilt(signal, Self::PAD_LEN)
    }
}
