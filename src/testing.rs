//! Testing helpers.

use assert_float_eq::*;

use crate::model::{PriceSet, RoundWeights, SimulationConfig};

pub fn assert_slice_f64_near(expected: &[f64], actual: &[f64], distance: u32) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_f64_near!(expected, actual, distance);
        }
    }
}

pub fn assert_slice_f64_absolute(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        assert_float_absolute_eq!(expected, actual[index], epsilon);
    }
}

pub fn reference_config(seed: i64, enable_draw: bool) -> SimulationConfig {
    SimulationConfig {
        prices: PriceSet::default(),
        round_weights: RoundWeights::default(),
        seed,
        enable_draw,
    }
}
