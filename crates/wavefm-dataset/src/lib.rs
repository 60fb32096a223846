//! WaveFM dataset generation.
//!
//! Pairs randomly sampled modulation curves with the audio the FM engine
//! renders from them. Each example is fully determined by its seed, so a
//! dataset can be regenerated from `(config, base_seed, count)` alone.
//!
//! # Example
//!
//! ```
//! use wavefm_dataset::{DatasetConfig, DatasetGenerator};
//! use wavefm_spec::RenderConfig;
//! use wavefm_synth::WavetableBank;
//!
//! let config = DatasetConfig {
//!     render: RenderConfig::new(8000.0, 0.1),
//!     num_active_mods: 3,
//!     ..DatasetConfig::default()
//! };
//! let generator = DatasetGenerator::new(config, WavetableBank::basic(8, 128)?)?;
//!
//! let batch = generator.batch(1234, 4)?;
//! assert_eq!(batch.len(), 4);
//! assert!(batch.iter().all(|example| example.audio.len() == 800));
//! # Ok::<(), wavefm_dataset::DatasetError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`config`] - Dataset configuration
//! - [`rng`] - Seed derivation and PCG32 construction
//! - [`points`] - Random control point generation
//! - [`modulations`] - Per-parameter sampling of active and fixed curves
//! - [`example`] - Labeled example and batch generation

pub mod config;
pub mod error;
pub mod example;
pub mod modulations;
pub mod points;
pub mod rng;

pub use config::DatasetConfig;
pub use error::{DatasetError, DatasetResult};
pub use example::{generate_batch, generate_example, DatasetExample, DatasetGenerator};
pub use modulations::generate_modulations;
pub use points::{ControlPointGenerator, RandomPointGenerator};
