//! Control-point generation.
//!
//! A generator produces a short ordered sequence of values for one
//! parameter and remembers it, so the exact sequence that drove a render can
//! be stored as that clip's label.

use rand::Rng;
use wavefm_spec::ScaleKind;

use crate::error::{DatasetError, DatasetResult};

/// A replayable source of control points.
pub trait ControlPointGenerator {
    /// The generated points, in order. Repeated calls return the same sequence.
    fn points(&self) -> &[f64];

    /// Lower bound the points were drawn from.
    fn min(&self) -> f64;

    /// Upper bound the points were drawn from.
    fn max(&self) -> f64;

    /// Distribution used between the bounds.
    fn scale(&self) -> ScaleKind;
}

/// Draws independent random points between two bounds.
///
/// With [`ScaleKind::Logarithmic`] and a positive lower bound, points are
/// uniform in log-value; otherwise they are uniform in value. Equal bounds
/// give a constant sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomPointGenerator {
    num_points: usize,
    min: f64,
    max: f64,
    scale: ScaleKind,
    points: Vec<f64>,
}

impl RandomPointGenerator {
    /// Points per sequence used when not configured.
    pub const DEFAULT_NUM_POINTS: usize = 4;

    /// Creates a generator producing `num_points` points per sequence.
    ///
    /// # Errors
    /// [`DatasetError::InvalidPointCount`] if `num_points` is zero.
    pub fn new(num_points: usize) -> DatasetResult<Self> {
        if num_points == 0 {
            return Err(DatasetError::InvalidPointCount);
        }
        Ok(Self {
            num_points,
            min: 0.0,
            max: 0.0,
            scale: ScaleKind::Linear,
            points: Vec::new(),
        })
    }

    /// Draws a fresh sequence between `min` and `max` (inclusive).
    ///
    /// # Errors
    /// [`DatasetError::InvalidBounds`] if the bounds or their span are not
    /// finite, or `min > max`.
    pub fn init_points_random<R: Rng + ?Sized>(
        &mut self,
        min: f64,
        max: f64,
        scale: ScaleKind,
        rng: &mut R,
    ) -> DatasetResult<&mut Self> {
        if !(min.is_finite() && max.is_finite() && (max - min).is_finite()) || min > max {
            return Err(DatasetError::InvalidBounds { min, max });
        }

        self.min = min;
        self.max = max;
        self.scale = scale;
        self.points = if min == max {
            vec![min; self.num_points]
        } else {
            (0..self.num_points)
                .map(|_| draw(min, max, scale, rng))
                .collect()
        };

        Ok(self)
    }

    /// Consumes the generator, returning its points.
    pub fn into_points(self) -> Vec<f64> {
        self.points
    }
}

fn draw<R: Rng + ?Sized>(min: f64, max: f64, scale: ScaleKind, rng: &mut R) -> f64 {
    let value = match scale {
        ScaleKind::Logarithmic if min > 0.0 => rng.gen_range(min.ln()..=max.ln()).exp(),
        _ => rng.gen_range(min..=max),
    };
    // exp() may round just past either bound
    value.clamp(min, max)
}

impl ControlPointGenerator for RandomPointGenerator {
    fn points(&self) -> &[f64] {
        &self.points
    }

    fn min(&self) -> f64 {
        self.min
    }

    fn max(&self) -> f64 {
        self.max
    }

    fn scale(&self) -> ScaleKind {
        self.scale
    }
}
