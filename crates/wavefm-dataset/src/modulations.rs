//! Random modulation sampling.
//!
//! For each example a number of parameters are picked as "active". Active
//! parameters get a random sub-range of their configured range and vary
//! over the clip; the rest get a single random value and stay constant.
//! Sampling is a pure function of the configuration and the RNG, so the
//! engine never sees randomness.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;
use wavefm_spec::{Modulations, ParamKind, ParamRange, ParamRanges};

use crate::error::{DatasetError, DatasetResult};
use crate::points::{ControlPointGenerator, RandomPointGenerator};

/// Picks `num_active` distinct parameters, returned in canonical order.
///
/// # Errors
/// [`DatasetError::InvalidActiveCount`] if `num_active` exceeds the number of parameters.
pub fn choose_active<R: Rng + ?Sized>(
    num_active: usize,
    rng: &mut R,
) -> DatasetResult<Vec<ParamKind>> {
    if num_active > ParamKind::ALL.len() {
        return Err(DatasetError::InvalidActiveCount {
            count: num_active,
            max: ParamKind::ALL.len(),
        });
    }

    let mut active: Vec<ParamKind> = ParamKind::ALL
        .choose_multiple(rng, num_active)
        .copied()
        .collect();
    active.sort();
    Ok(active)
}

/// Samples the bounds one parameter's control points are drawn from.
///
/// Active parameters get two sorted values from `range`; inactive ones get
/// one value used for both bounds.
pub fn sample_bounds<R: Rng + ?Sized>(range: &ParamRange, active: bool, rng: &mut R) -> (f64, f64) {
    if active {
        let a = rng.gen_range(range.min..=range.max);
        let b = rng.gen_range(range.min..=range.max);
        (a.min(b), a.max(b))
    } else {
        let v = rng.gen_range(range.min..=range.max);
        (v, v)
    }
}

/// Samples control points for all six parameters.
///
/// Ranges are in range units (MIDI notes for the base frequency); bounds are
/// converted to engine units before points are drawn, so the returned
/// modulations are ready to render.
///
/// # Arguments
/// * `num_active` - How many parameters vary over the clip (0-6)
/// * `ranges` - Sampling range per parameter
/// * `num_points` - Control points per parameter
/// * `rng` - Random source
pub fn generate_modulations<R: Rng + ?Sized>(
    num_active: usize,
    ranges: &ParamRanges,
    num_points: usize,
    rng: &mut R,
) -> DatasetResult<Modulations> {
    ranges.validate()?;
    let active = choose_active(num_active, rng)?;
    let mut generator = RandomPointGenerator::new(num_points)?;
    let mut modulations = Modulations::default();

    for kind in ParamKind::ALL {
        let range = ranges.get(kind);
        let (lo, hi) = sample_bounds(range, active.contains(&kind), rng);
        let (lo, hi) = (kind.to_native(lo), kind.to_native(hi));

        let points = generator
            .init_points_random(lo, hi, range.scale, rng)?
            .points()
            .to_vec();
        trace!(param = %kind, min = lo, max = hi, "sampled control points");
        modulations.set(kind, points);
    }

    Ok(modulations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use pretty_assertions::assert_eq;
    use wavefm_spec::{midi_to_frequency, ScaleKind};

    #[test]
    fn test_choose_active_counts() {
        let mut rng = create_rng(42);
        for n in 0..=6 {
            let active = choose_active(n, &mut rng).unwrap();
            assert_eq!(active.len(), n);
            let mut dedup = active.clone();
            dedup.dedup();
            assert_eq!(dedup, active);
        }
        assert_eq!(choose_active(6, &mut rng).unwrap(), ParamKind::ALL.to_vec());
    }

    #[test]
    fn test_choose_active_rejects_too_many() {
        let mut rng = create_rng(42);
        assert!(matches!(
            choose_active(7, &mut rng),
            Err(DatasetError::InvalidActiveCount { count: 7, max: 6 })
        ));
    }

    #[test]
    fn test_sample_bounds() {
        let mut rng = create_rng(5);
        let range = ParamRange::new(0.0, 1.0, ScaleKind::Linear);
        for _ in 0..100 {
            let (lo, hi) = sample_bounds(&range, true, &mut rng);
            assert!(lo <= hi);
            assert!(range.contains(lo) && range.contains(hi));

            let (a, b) = sample_bounds(&range, false, &mut rng);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_no_active_gives_constant_sequences() {
        let mut rng = create_rng(11);
        let mods = generate_modulations(0, &ParamRanges::default(), 4, &mut rng).unwrap();
        for (kind, points) in mods.iter() {
            assert_eq!(points.len(), 4, "{kind}");
            assert!(points.iter().all(|&p| p == points[0]), "{kind}");
        }
    }

    #[test]
    fn test_base_freq_in_hz() {
        let mut rng = create_rng(12);
        let mods = generate_modulations(6, &ParamRanges::default(), 8, &mut rng).unwrap();
        let (lo, hi) = (midi_to_frequency(20.0), midi_to_frequency(100.0));
        assert!(mods
            .base_freq
            .iter()
            .all(|&f| f >= lo - 1e-9 && f <= hi + 1e-9));
    }

    #[test]
    fn test_same_seed_same_modulations() {
        let ranges = ParamRanges::default();
        let a = generate_modulations(3, &ranges, 4, &mut create_rng(99)).unwrap();
        let b = generate_modulations(3, &ranges, 4, &mut create_rng(99)).unwrap();
        assert_eq!(a, b);
    }
}
