//! Wavetable banks.
//!
//! A bank is a stack of single-cycle waveforms ("rows") of equal length. The
//! oscillator blends between neighbouring rows, so ordering the rows from
//! soft to bright gives a continuous timbre axis.

use std::f64::consts::PI;

use crate::error::{SynthError, SynthResult};

/// An immutable bank of single-cycle waveforms.
///
/// Rows are normalized to [-1.0, 1.0] by convention; this is not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct WavetableBank {
    tables: Vec<Vec<f64>>,
    table_len: usize,
}

impl WavetableBank {
    /// Creates a bank from rows of equal, non-zero length.
    ///
    /// # Errors
    /// * [`SynthError::EmptyWavetable`] if there are no rows or rows are empty
    /// * [`SynthError::RaggedWavetable`] if rows differ in length
    pub fn new(tables: Vec<Vec<f64>>) -> SynthResult<Self> {
        let table_len = tables.first().map(Vec::len).unwrap_or(0);
        if table_len == 0 {
            return Err(SynthError::EmptyWavetable);
        }

        if let Some((row, table)) = tables
            .iter()
            .enumerate()
            .find(|(_, table)| table.len() != table_len)
        {
            return Err(SynthError::RaggedWavetable {
                row,
                expected: table_len,
                found: table.len(),
            });
        }

        Ok(Self { tables, table_len })
    }

    /// Number of rows.
    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// Samples per row.
    pub fn table_len(&self) -> usize {
        self.table_len
    }

    /// Returns one row, or `None` if out of range.
    pub fn table(&self, index: usize) -> Option<&[f64]> {
        self.tables.get(index).map(Vec::as_slice)
    }

    /// Iterates over all rows.
    pub fn tables(&self) -> impl Iterator<Item = &[f64]> {
        self.tables.iter().map(Vec::as_slice)
    }

    /// Reads one sample without bounds adjustment.
    #[inline]
    pub(crate) fn sample(&self, table: usize, position: usize) -> f64 {
        self.tables[table][position]
    }

    /// A single-row bank holding one sine cycle.
    pub fn sine(table_len: usize) -> SynthResult<Self> {
        let row = (0..table_len)
            .map(|i| (2.0 * PI * i as f64 / table_len as f64).sin())
            .collect();
        Self::new(vec![row])
    }

    /// A morphing bank: sine -> saw -> square -> narrowing pulse.
    ///
    /// # Arguments
    /// * `num_tables` - Number of rows along the morph axis
    /// * `table_len` - Samples per row
    pub fn basic(num_tables: usize, table_len: usize) -> SynthResult<Self> {
        let tables = (0..num_tables)
            .map(|table_idx| {
                let t = if num_tables > 1 {
                    table_idx as f64 / (num_tables - 1) as f64
                } else {
                    0.0
                };
                (0..table_len)
                    .map(|i| basic_sample(t, i as f64 / table_len as f64))
                    .collect()
            })
            .collect();
        Self::new(tables)
    }
}

/// One sample of the basic morph at morph position `t` and cycle position
/// `phase` (both 0.0-1.0).
fn basic_sample(t: f64, phase: f64) -> f64 {
    let sine = (2.0 * PI * phase).sin();
    let saw = 2.0 * phase - 1.0;
    let square = if phase < 0.5 { 1.0 } else { -1.0 };

    if t < 0.33 {
        let mix = t / 0.33;
        sine * (1.0 - mix) + saw * mix
    } else if t < 0.66 {
        let mix = (t - 0.33) / 0.33;
        saw * (1.0 - mix) + square * mix
    } else {
        // Duty cycle narrows from 0.5 to 0.1
        let mix = (t - 0.66) / 0.34;
        let duty = 0.5 - mix * 0.4;
        if phase < duty {
            1.0
        } else {
            -1.0
        }
    }
}
