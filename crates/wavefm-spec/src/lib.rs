//! WaveFM shared types.
//!
//! This crate holds the data model shared by the synthesis engine and the
//! dataset generator:
//!
//! - [`RenderConfig`] - sample rate and duration of one render
//! - [`ParamKind`] - the six modulatable synthesis parameters
//! - [`ParamRange`] / [`ParamRanges`] - sampling ranges with scale hints
//! - [`Modulations`] - sparse control points for every parameter (the label
//!   stored alongside each rendered clip)
//!
//! # Example
//!
//! ```
//! use wavefm_spec::{Modulations, RenderConfig};
//!
//! let config = RenderConfig::new(8000.0, 0.01);
//! assert_eq!(config.sample_count().unwrap(), 80);
//!
//! let mods = Modulations::default();
//! assert_eq!(mods.base_freq, vec![440.0]);
//! ```

pub mod error;
pub mod hash;
pub mod modulation;
pub mod param;
pub mod render;

pub use error::{SpecError, SpecResult};
pub use modulation::Modulations;
pub use param::{midi_to_frequency, ParamKind, ParamRange, ParamRanges, ScaleKind};
pub use render::RenderConfig;
