//! Control-point expansion.
//!
//! Stretches a short sequence of control points into a per-sample curve by
//! piecewise-linear resampling. The points are treated as uniformly spaced
//! positions `0..N-1`; the output samples `L` uniformly spaced positions
//! over the same span, so the first and last output samples equal the first
//! and last control points.

use crate::error::{SynthError, SynthResult};

/// Expands `points` to a curve of `target_len` samples.
///
/// A single control point yields a constant curve.
///
/// # Errors
/// [`SynthError::EmptyInput`] if `points` is empty or `target_len` is zero.
pub fn expand_curve(points: &[f64], target_len: usize) -> SynthResult<Vec<f64>> {
    if points.is_empty() {
        return Err(SynthError::EmptyInput {
            name: "control points",
        });
    }
    if target_len == 0 {
        return Err(SynthError::EmptyInput {
            name: "target length",
        });
    }

    if points.len() == 1 {
        return Ok(vec![points[0]; target_len]);
    }

    let last = points.len() - 1;
    let span = last as f64;
    let divisor = target_len.saturating_sub(1).max(1) as f64;

    let curve = (0..target_len)
        .map(|i| {
            let x = i as f64 * span / divisor;
            // x never exceeds `span`; keep one segment to the right
            let idx = (x.floor() as usize).min(last - 1);
            let t = x - idx as f64;
            lerp(points[idx], points[idx + 1], t)
        })
        .collect();

    Ok(curve)
}

/// Linear interpolation that is exact at both ends.
#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
