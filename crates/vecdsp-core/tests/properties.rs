//! Property-based tests for vecdsp-core arrays.
//!
//! Checks search, in-place transforms, statistics and signal operations
//! against straightforward reference computations, using proptest for
//! randomized input generation.

use proptest::prelude::*;
use vecdsp_core::{ArrayError, DefaultBackend, FloatArray, ScalarBackend};

fn samples(max_len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1000.0f32..1000.0f32, 1..max_len)
}

fn unit_samples(max_len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..=1.0f32, 1..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The reported minimum bounds every element from below, sits at the
    /// reported index, and no earlier element holds the same value.
    #[test]
    fn min_is_first_smallest(mut data in samples(256)) {
        let expected = data.clone();
        let a = FloatArray::new(&mut data);
        let (value, index) = a.min();

        prop_assert_eq!(expected[index], value, "value/index disagree at {}", index);
        for (i, &x) in expected.iter().enumerate() {
            prop_assert!(value <= x, "min {} exceeds element {} at {}", value, x, i);
        }
        prop_assert!(
            expected[..index].iter().all(|&x| x != value),
            "min {} also occurs before index {}", value, index
        );
    }

    /// The reported maximum bounds every element from above, sits at the
    /// reported index, and no earlier element holds the same value.
    #[test]
    fn max_is_first_largest(mut data in samples(256)) {
        let expected = data.clone();
        let a = FloatArray::new(&mut data);
        let (value, index) = a.max();

        prop_assert_eq!(expected[index], value, "value/index disagree at {}", index);
        for (i, &x) in expected.iter().enumerate() {
            prop_assert!(value >= x, "max {} below element {} at {}", value, x, i);
        }
        prop_assert!(
            expected[..index].iter().all(|&x| x != value),
            "max {} also occurs before index {}", value, index
        );
    }

    /// Reversing twice restores the original order; `reverse_into` agrees
    /// with the in-place form.
    #[test]
    fn reverse_is_an_involution(
        mut data in prop::collection::vec(-1000.0f32..1000.0f32, 0..256),
    ) {
        let original = data.clone();
        let mut a = FloatArray::new(&mut data);

        let mut copied = vec![0.0; original.len()];
        a.reverse_into(&mut copied).unwrap();
        a.reverse();
        prop_assert_eq!(a.as_slice(), copied.as_slice());

        a.reverse();
        prop_assert_eq!(a.as_slice(), original.as_slice());
    }

    /// Rectified output is the element-wise absolute value, and rectifying
    /// again changes nothing.
    #[test]
    fn rectify_is_idempotent(mut data in samples(256)) {
        let original = data.clone();
        let mut a = FloatArray::new(&mut data);
        a.rectify();

        for (i, (&got, &x)) in a.iter().zip(&original).enumerate() {
            prop_assert_eq!(got, x.abs(), "element {} not rectified", i);
        }
        let once = a.to_vec();
        a.rectify();
        prop_assert_eq!(a.as_slice(), once.as_slice());
    }

    /// Power matches a plain sum of squares.
    #[test]
    fn power_is_sum_of_squares(mut data in unit_samples(512)) {
        let expected: f32 = data.iter().map(|x| x * x).sum();
        let a = FloatArray::new(&mut data);
        let got = a.power();
        prop_assert!(
            (got - expected).abs() <= 1e-4 * (1.0 + expected),
            "power {} vs reference {}", got, expected
        );
    }

    /// Variance is never negative for two or more finite samples.
    #[test]
    fn variance_is_non_negative(mut data in prop::collection::vec(-1000.0f32..1000.0f32, 2..256)) {
        let a = FloatArray::new(&mut data);
        let variance = a.variance();
        prop_assert!(variance >= 0.0, "variance {} is negative", variance);
        prop_assert!(a.std_dev() >= 0.0);
    }

    /// Any constant signal has exactly zero variance on both backends.
    #[test]
    fn constant_signal_has_no_spread(value in -1000.0f32..1000.0f32, len in 2usize..64) {
        let mut x = vec![value; len];
        let mut y = vec![value; len];
        let s = FloatArray::with_backend(&mut x, ScalarBackend);
        let d = FloatArray::with_backend(&mut y, DefaultBackend::default());
        prop_assert_eq!(s.variance(), 0.0, "scalar variance of {} x {}", len, value);
        prop_assert_eq!(d.variance(), 0.0, "default variance of {} x {}", len, value);
        prop_assert_eq!(s.std_dev(), 0.0);
        prop_assert!(
            (s.mean() - value).abs() <= 1e-5 * (1.0 + value.abs()),
            "mean {} vs {}", s.mean(), value
        );
    }

    /// Convolving with a unit impulse reproduces the signal.
    #[test]
    fn convolve_with_impulse_is_identity(mut data in samples(256)) {
        let original = data.clone();
        let a = FloatArray::new(&mut data);
        let mut out = vec![f32::NAN; original.len()];
        a.convolve(&[1.0], &mut out).unwrap();
        prop_assert_eq!(out, original);
    }

    /// The sum of a full convolution equals the product of the input sums.
    #[test]
    fn convolution_preserves_sum_product(
        mut data in unit_samples(128),
        kernel in unit_samples(32),
    ) {
        let len = data.len() + kernel.len() - 1;
        let sum_a: f32 = data.iter().sum();
        let sum_b: f32 = kernel.iter().sum();
        let bound: f32 = data.iter().map(|x| x.abs()).sum::<f32>()
            * kernel.iter().map(|x| x.abs()).sum::<f32>();

        let a = FloatArray::new(&mut data);
        let mut out = vec![0.0; len];
        a.convolve(&kernel, &mut out).unwrap();
        let total: f32 = out.iter().sum();
        prop_assert!(
            (total - sum_a * sum_b).abs() <= 1e-4 * (1.0 + bound),
            "sum {} vs product {}", total, sum_a * sum_b
        );
    }

    /// Any window of a partial convolution equals the same window of the
    /// full result.
    #[test]
    fn partial_convolution_matches_full_window(
        mut data in unit_samples(128),
        kernel in unit_samples(32),
        start in 0usize..160,
        count in 0usize..64,
    ) {
        let full_len = data.len() + kernel.len() - 1;
        let a = FloatArray::new(&mut data);
        let mut full = vec![0.0; full_len];
        a.convolve(&kernel, &mut full).unwrap();

        let first = start.min(full_len);
        let samples = count.min(full_len - first);
        let mut window = vec![0.0; samples];
        a.convolve_partial(&kernel, &mut window, first, samples).unwrap();
        prop_assert_eq!(window.as_slice(), &full[first..first + samples]);
    }

    /// Correlation needs `2 * max(len) - 1` samples; one fewer is rejected
    /// without touching the destination.
    #[test]
    fn correlation_size_requirement(
        mut data in unit_samples(64),
        other in unit_samples(64),
    ) {
        let required = 2 * data.len().max(other.len()) - 1;
        let a = FloatArray::new(&mut data);

        let mut exact = vec![f32::NAN; required];
        prop_assert!(a.correlate(&other, &mut exact).is_ok());
        prop_assert!(exact.iter().all(|x| x.is_finite()), "padding left unwritten");

        let mut short = vec![7.0; required - 1];
        prop_assert_eq!(
            a.correlate(&other, &mut short),
            Err(ArrayError::size("correlate", required, required - 1))
        );
        prop_assert!(short.iter().all(|&x| x == 7.0));
    }

    /// Peer operations reject a length mismatch and leave the array intact.
    #[test]
    fn elementwise_rejects_mismatch(mut data in samples(64), extra in 1usize..8) {
        let original = data.clone();
        let peer = vec![1.0; original.len() + extra];
        let mut a = FloatArray::new(&mut data);

        prop_assert!(a.add(&peer).is_err());
        prop_assert!(a.subtract(&peer).is_err());
        prop_assert!(a.multiply(&peer).is_err());
        prop_assert_eq!(a.as_slice(), original.as_slice());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The build's default backend returns the same search results and
    /// bit-identical convolution/correlation output as the scalar kernels.
    #[test]
    fn default_backend_matches_scalar(
        data in unit_samples(300),
        kernel in unit_samples(40),
    ) {
        let mut x = data.clone();
        let mut y = data;
        let s = FloatArray::with_backend(&mut x, ScalarBackend);
        let d = FloatArray::with_backend(&mut y, DefaultBackend::default());

        prop_assert_eq!(s.min(), d.min());
        prop_assert_eq!(s.max(), d.max());

        let conv_len = s.len() + kernel.len() - 1;
        let mut conv_s = vec![0.0; conv_len];
        let mut conv_d = vec![0.0; conv_len];
        s.convolve(&kernel, &mut conv_s).unwrap();
        d.convolve(&kernel, &mut conv_d).unwrap();
        prop_assert_eq!(conv_s, conv_d);

        let corr_len = 2 * s.len().max(kernel.len()) - 1;
        let mut corr_s = vec![0.0; corr_len];
        let mut corr_d = vec![0.0; corr_len];
        s.correlate(&kernel, &mut corr_s).unwrap();
        d.correlate(&kernel, &mut corr_d).unwrap();
        prop_assert_eq!(corr_s, corr_d);

        let (ps, pd) = (s.power(), d.power());
        prop_assert!((ps - pd).abs() <= 1e-4 * (1.0 + ps), "power {} vs {}", ps, pd);
    }
}
