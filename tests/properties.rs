//! Property tests for kernels, normalization and statistics.

use proptest::prelude::*;
use sdot_bench::kernels::sdot_reference;
use sdot_bench::prelude::*;
use sdot_bench::sanity::dot_tolerance;
use sdot_bench::utils::stats::relative_error;
use sdot_bench::vector::euclidean_norm;

fn pair(max_len: usize) -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    (0..=max_len).prop_flat_map(|n| {
        (
            prop::collection::vec(0.5f32..1.5, n),
            prop::collection::vec(0.5f32..1.5, n),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_kernel_matches_reference((a, b) in pair(4096)) {
        let registry = build_registry();
        let expected = sdot_reference(&a, &b) as f64;
        for kernel in registry.all() {
            let got = kernel.dot(a.len(), &a, &b) as f64;
            prop_assert!(
                relative_error(got, expected) <= dot_tolerance(a.len()),
                "{}: expected {}, got {}", kernel.name(), expected, got
            );
        }
    }

    #[test]
    fn kernels_only_read_prefix((a, b) in pair(256), cut in 0usize..=256) {
        let n = cut.min(a.len());
        let registry = build_registry();
        let expected = sdot_reference(&a[..n], &b[..n]) as f64;
        for kernel in registry.all() {
            let got = kernel.dot(n, &a, &b) as f64;
            prop_assert!(relative_error(got, expected) <= dot_tolerance(n), "{}", kernel.name());
        }
    }

    #[test]
    fn normalized_vectors_have_unit_norm(
        values in prop::collection::vec(-1.0e3f32..1.0e3, 1..2048)
            .prop_filter("non-zero", |v| v.iter().any(|&x| x != 0.0))
    ) {
        let mut v = Vector::from_values(&values);
        let first = VectorFactory::normalize(&mut v);
        prop_assert!(!first.degenerate);
        prop_assert!((euclidean_norm(&v) - 1.0).abs() < 1e-5);

        let second = VectorFactory::normalize(&mut v);
        prop_assert!((second.norm - 1.0).abs() < 1e-5);
        prop_assert!((euclidean_norm(&v) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn single_sample_has_zero_std_dev(x in 0.0f64..10.0) {
        let stats = reduce(&[x]);
        prop_assert_eq!(stats.mean, x);
        prop_assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn stats_are_bounded(samples in prop::collection::vec(1.0e-9f64..1.0, 2..64)) {
        let stats = reduce(&samples);
        prop_assert!(stats.min <= stats.mean + 1e-12 && stats.mean <= stats.max + 1e-12);
        prop_assert!(stats.std_dev >= 0.0);
        prop_assert!(stats.std_dev <= stats.max - stats.min + 1e-12);
    }
}

#[test]
fn empty_vectors_give_zero_for_every_kernel() {
    for kernel in build_registry().all() {
        assert_eq!(kernel.dot(0, &[], &[]), 0.0, "{}", kernel.name());
    }
}

#[test]
fn orthogonal_unit_vectors() {
    let a = [1.0, 0.0, 0.0];
    let b = [0.0, 1.0, 0.0];
    for kernel in build_registry().all() {
        assert_eq!(kernel.dot(3, &a, &b), 0.0, "{}", kernel.name());
    }
}

#[test]
fn hand_picked_five_elements() {
    let a = [3.2f32, 5.6, 10.0, 2.5, 1.7];
    let b = [6.2f32, -7.9, 2.3, 7.0, 4.6];
    let expected = 3.2 * 6.2 + 5.6 * (-7.9) + 10.0 * 2.3 + 2.5 * 7.0 + 1.7 * 4.6;
    for kernel in build_registry().all() {
        let got = kernel.dot(5, &a, &b) as f64;
        assert!(
            relative_error(got, expected) <= 1e-4,
            "{}: expected {}, got {}",
            kernel.name(),
            expected,
            got
        );
    }
}

#[test]
fn classic_std_dev_dataset() {
    let stats = reduce(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert_eq!(stats.mean, 5.0);
    assert!((stats.std_dev - 2.138).abs() < 1e-3);
}
