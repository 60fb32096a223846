//! WaveFM synthesis engine.
//!
//! Renders audio by frequency-modulating one wavetable oscillator with
//! another. Every parameter is a per-sample curve, usually expanded from a
//! handful of control points, so timbre can change continuously over the
//! clip. Rendering is offline and deterministic: the same configuration,
//! wavetable bank and curves always produce bit-identical output.
//!
//! # Pipeline
//!
//! ```text
//! control points -> curve::expand_curve -> ParameterCurves
//!   -> modulator oscillator -> carrier oscillator -> amplitude
//!   -> zero-phase antialiasing filter -> AudioBuffer
//! ```
//!
//! # Example
//!
//! ```
//! use wavefm_spec::{Modulations, ParamKind, RenderConfig};
//! use wavefm_synth::{FmSynthEngine, Synthesizer, WavetableBank};
//!
//! let bank = WavetableBank::basic(16, 256)?;
//! let engine = FmSynthEngine::new(RenderConfig::new(22050.0, 0.25), bank)?;
//!
//! let mods = Modulations::default()
//!     .with(ParamKind::BaseFreq, vec![110.0, 220.0])
//!     .with(ParamKind::FmAmount, vec![0.0, 0.5, 0.0]);
//! let audio = engine.render_modulations(&mods)?;
//! assert_eq!(audio.len(), 5513);
//! # Ok::<(), wavefm_synth::SynthError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`curve`] - Control-point expansion
//! - [`wavetable`] - Wavetable banks
//! - [`oscillator`] - Wavetable oscillator with phase accumulation
//! - [`filter`] - Butterworth low-pass and zero-phase filtering
//! - [`engine`] - The FM engine and its input/output types

pub mod curve;
pub mod engine;
pub mod error;
pub mod filter;
pub mod oscillator;
pub mod wavetable;

// Re-export main types at crate root
pub use curve::expand_curve;
pub use engine::{AudioBuffer, FmSynthEngine, ParameterCurves, Synthesizer};
pub use error::{SynthError, SynthResult};
pub use filter::AntialiasFilter;
pub use oscillator::WavetableOscillator;
pub use wavetable::WavetableBank;
