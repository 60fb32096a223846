//! BLAKE3 hashing for labels.
//!
//! Field order of [`Modulations`] is fixed by its definition and
//! `serde_json` formats floats deterministically, so the compact JSON form
//! is already canonical.

use crate::error::SpecResult;
use crate::modulation::Modulations;

/// Computes the BLAKE3 hash of a label's compact JSON form.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
pub fn label_hash(modulations: &Modulations) -> SpecResult<String> {
    let json = modulations.to_json()?;
    Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
}
