//! Tests for the dot product kernels.

use crate::kernels::code::*;
use crate::registry::Kernel;
use crate::sanity::dot_tolerance;
use crate::utils::stats::relative_error;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f32 = 1e-5;

fn assert_close(a: f32, b: f32, msg: &str) {
    let diff = (a - b).abs();
    assert!(
        diff < EPSILON,
        "{}: expected {}, got {}, diff = {}",
        msg,
        b,
        a,
        diff
    );
}

fn random_pair(len: usize, seed: u64) -> (Vec<f32>, Vec<f32>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
    let b = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
    (a, b)
}

#[test]
fn test_reference_basic() {
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [5.0, 6.0, 7.0, 8.0];
    // 1*5 + 2*6 + 3*7 + 4*8 = 70
    assert_close(sdot_reference(&a, &b), 70.0, "reference basic");
}

#[test]
fn test_reference_single() {
    assert_close(sdot_reference(&[3.0], &[4.0]), 12.0, "reference single");
}

#[test]
fn test_every_variant_empty() {
    for v in available_variants() {
        assert_eq!(v.dot(0, &[], &[]), 0.0, "variant {}", v.name);
    }
}

#[test]
fn test_every_variant_odd_lengths() {
    // Lengths around the 4- and 8-lane boundaries exercise the tails.
    for len in [1, 3, 4, 5, 7, 8, 9, 15, 17, 1023] {
        let (a, b) = random_pair(len, len as u64);
        let expected = sdot_reference(&a, &b);
        for v in available_variants() {
            let got = v.dot(len, &a, &b);
            assert!(
                (got - expected).abs() <= 1e-4 * expected.abs().max(1.0),
                "variant {} len {}: expected {}, got {}",
                v.name,
                len,
                expected,
                got
            );
        }
    }
}

#[test]
fn test_large_input_within_tolerance() {
    let len = 1 << 20;
    let mut rng = StdRng::seed_from_u64(7);
    // Positive inputs keep the sum away from zero so the relative error is meaningful.
    let a: Vec<f32> = (0..len).map(|_| rng.random_range(0.0..1.0)).collect();
    let b: Vec<f32> = (0..len).map(|_| rng.random_range(0.0..1.0)).collect();

    let expected = sdot_reference(&a, &b) as f64;
    for v in available_variants() {
        let got = v.dot(len, &a, &b) as f64;
        assert!(
            relative_error(got, expected) <= dot_tolerance(len),
            "variant {}: expected {}, got {}",
            v.name,
            expected,
            got
        );
    }
}

#[cfg(target_arch = "x86_64")]
#[test]
fn test_asm_is_bit_identical() {
    for len in [1, 2, 31, 4096] {
        let (a, b) = random_pair(len, 99);
        assert_eq!(
            sdot_x86_64_asm(&a, &b).to_bits(),
            sdot_reference(&a, &b).to_bits(),
            "len {}",
            len
        );
    }
}

#[cfg(target_arch = "x86_64")]
#[test]
fn test_sse2_short_input_uses_tail() {
    let a = [1.0, 2.0, 3.0];
    let b = [1.0, 1.0, 1.0];
    assert_eq!(sdot_x86_64_sse2(&a, &b), 6.0);
}

#[test]
fn test_unrolled_matches_small_exact_case() {
    let a = [1.0, 2.0, 3.0, 4.0, 5.0];
    let b = [1.0, 1.0, 1.0, 1.0, 2.0];
    assert_eq!(sdot_unrolled(&a, &b), 20.0);
}

#[test]
#[should_panic(expected = "same length")]
fn test_length_mismatch_panics() {
    sdot_reference(&[1.0, 2.0], &[1.0]);
}
