//! Wavetable oscillator integration tests.

use pretty_assertions::assert_eq;
use wavefm_synth::{WavetableBank, WavetableOscillator};

fn two_row_bank() -> WavetableBank {
    WavetableBank::new(vec![vec![1.0, 0.0, -1.0, 0.0], vec![0.0, 1.0, 0.0, -1.0]]).unwrap()
}

fn ramp(start: f64, end: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| start + (end - start) * i as f64 / (len - 1) as f64)
        .collect()
}

#[test]
fn test_output_length_matches_input() {
    let bank = WavetableBank::basic(8, 64).unwrap();
    let osc = WavetableOscillator::new(&bank, 44100.0).unwrap();
    let out = osc.render(&vec![220.0; 1234], &vec![0.5; 1234]).unwrap();
    assert_eq!(out.len(), 1234);
}

#[test]
fn test_shape_zero_reads_first_row_only() {
    let bank = two_row_bank();
    let first = WavetableBank::new(vec![bank.table(0).unwrap().to_vec()]).unwrap();

    let freq = ramp(50.0, 900.0, 500);
    let shape = vec![0.0; 500];

    let blended = WavetableOscillator::new(&bank, 8000.0)
        .unwrap()
        .render(&freq, &shape)
        .unwrap();
    let single = WavetableOscillator::new(&first, 8000.0)
        .unwrap()
        .render(&freq, &shape)
        .unwrap();
    assert_eq!(blended, single);
}

#[test]
fn test_shape_one_reads_last_row_only() {
    let bank = WavetableBank::basic(5, 32).unwrap();
    let last = WavetableBank::new(vec![bank.table(4).unwrap().to_vec()]).unwrap();

    let freq = ramp(50.0, 900.0, 500);
    let shape = vec![1.0; 500];

    let blended = WavetableOscillator::new(&bank, 8000.0)
        .unwrap()
        .render(&freq, &shape)
        .unwrap();
    let single = WavetableOscillator::new(&last, 8000.0)
        .unwrap()
        .render(&freq, &shape)
        .unwrap();
    assert_eq!(blended, single);
}

#[test]
fn test_constant_frequency_is_periodic() {
    let bank = WavetableBank::sine(64).unwrap();
    let osc = WavetableOscillator::new(&bank, 8000.0).unwrap();
    // 100 Hz at 8 kHz: one cycle every 80 samples
    let out = osc.render(&[100.0; 400], &[0.0; 400]).unwrap();

    for i in 0..320 {
        assert_eq!(out[i], out[i + 80], "sample {i}");
    }

    let upward_crossings = out
        .windows(2)
        .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
        .count();
    assert_eq!(upward_crossings, 5);
}

#[test]
fn test_frequency_change_keeps_phase_continuous() {
    let bank = WavetableBank::sine(1024).unwrap();
    let osc = WavetableOscillator::new(&bank, 8000.0).unwrap();
    let mut freq = vec![100.0; 200];
    freq.extend(vec![400.0; 200]);
    let out = osc.render(&freq, &vec![0.0; 400]).unwrap();

    // A phase jump would show up as a step larger than one 400 Hz increment
    let max_step = 2.0 * std::f64::consts::PI * 400.0 / 8000.0 + 0.01;
    for pair in out.windows(2) {
        assert!((pair[1] - pair[0]).abs() <= max_step);
    }
}

#[test]
fn test_empty_curves_render_empty() {
    let bank = two_row_bank();
    let osc = WavetableOscillator::new(&bank, 8000.0).unwrap();
    assert!(osc.render(&[], &[]).unwrap().is_empty());
}
