//! Numeric backends: the kernels behind every [`FloatArray`](crate::FloatArray) operation.
//!
//! A backend is a stateless, zero-sized `Copy` type implementing
//! [`NumericBackend`]. Two implementations ship with the crate:
//!
//! | Backend | Availability | Strategy |
//! |---------|--------------|----------|
//! | [`ScalarBackend`] | always | straight loops, reference semantics |
//! | [`SimdBackend`] | `simd` feature | `multiversion` runtime dispatch, split accumulators |
//!
//! # Contract
//!
//! Kernels never check lengths against each other beyond what is stated on
//! each method. The array validates sizes first and only then calls in, so a
//! backend can assume its inputs are consistent. Both backends must agree
//! exactly on search results, element-wise ops, convolution and correlation,
//! and within float rounding on reductions (the SIMD backend sums in a
//! different order).

pub mod scalar;
// multiversion dispatch expands to unsafe target-feature calls.
#[cfg(feature = "simd")]
#[allow(unsafe_code)]
pub mod simd;

pub use scalar::ScalarBackend;
#[cfg(feature = "simd")]
pub use simd::SimdBackend;

/// Per-operation kernel contract shared by all backends.
///
/// Reductions over an empty slice follow IEEE float rules instead of
/// panicking: `mean`, `rms` and `variance` of `[]` are `NaN`, and `variance`
/// of a single element is `NaN` (0/0). Searches over `[]` return `(NaN, 0)`.
pub trait NumericBackend: Copy {
    /// Backend identifier for logging and configuration ("scalar", "simd").
    fn name(&self) -> &'static str;

    /// Minimum value and the index of its first occurrence.
    fn min(&self, src: &[f32]) -> (f32, usize);

    /// Maximum value and the index of its first occurrence.
    fn max(&self, src: &[f32]) -> (f32, usize);

    /// `dst[i] = |src[i]|` for `i < min(dst.len(), src.len())`.
    fn abs(&self, dst: &mut [f32], src: &[f32]);

    /// `buf[i] = |buf[i]|`.
    fn abs_in_place(&self, buf: &mut [f32]);

    /// Set every element of `dst` to `value`.
    fn fill(&self, dst: &mut [f32], value: f32);

    /// Copy `src` into the front of `dst`. Requires `dst.len() >= src.len()`.
    fn copy(&self, dst: &mut [f32], src: &[f32]);

    /// `dst[i] += src[i]`.
    fn add(&self, dst: &mut [f32], src: &[f32]);

    /// `dst[i] -= src[i]`.
    fn sub(&self, dst: &mut [f32], src: &[f32]);

    /// `dst[i] *= src[i]`.
    fn mul(&self, dst: &mut [f32], src: &[f32]);

    /// `buf[i] = -buf[i]`.
    fn negate(&self, buf: &mut [f32]);

    /// `buf[i] *= factor`.
    fn scale(&self, buf: &mut [f32], factor: f32);

    /// Sum of all elements.
    fn sum(&self, src: &[f32]) -> f32;

    /// Sum of squares.
    fn power(&self, src: &[f32]) -> f32;

    /// `(Σd, Σd²)` with `d = x - shift`.
    fn shifted_moments(&self, src: &[f32], shift: f32) -> (f32, f32);

    /// Arithmetic mean, `sum / n`.
    fn mean(&self, src: &[f32]) -> f32 {
        self.sum(src) / src.len() as f32
    }

    /// Root mean square, `sqrt(power / n)`.
    fn rms(&self, src: &[f32]) -> f32 {
        libm::sqrtf(self.power(src) / src.len() as f32)
    }

    /// Unbiased sample variance, `(Σd² - (Σd)²/n) / (n - 1)` with `d = x - x[0]`.
    ///
    /// Shifting by the first element makes every term of a constant signal
    /// exactly zero. Negative results from cancellation are clamped to zero.
    fn variance(&self, src: &[f32]) -> f32 {
        let n = src.len() as f32;
        let shift = src.first().copied().unwrap_or(0.0);
        let (sum, sq) = self.shifted_moments(src, shift);
        let v = (sq - sum * sum / n) / (n - 1.0);
        // NaN stays NaN.
        if v < 0.0 { 0.0 } else { v }
    }

    /// Sample standard deviation, `sqrt(variance)`.
    fn std_dev(&self, src: &[f32]) -> f32 {
        libm::sqrtf(self.variance(src))
    }

    /// Full linear convolution of `a` and `b` into `dst[..a.len() + b.len() - 1]`.
    ///
    /// Requires `dst.len() >= a.len() + b.len() - 1`. Writes nothing if either
    /// input is empty.
    fn convolve(&self, dst: &mut [f32], a: &[f32], b: &[f32]);

    /// Points `first..first + dst.len()` of the full convolution, written to `dst`.
    ///
    /// Requires `first + dst.len() <= a.len() + b.len() - 1`.
    fn convolve_partial(&self, dst: &mut [f32], a: &[f32], b: &[f32], first: usize);

    /// Cross-correlation of `a` and `b` into `dst[..2 * max(a.len(), b.len()) - 1]`.
    ///
    /// The sequence `conv(a, reverse(b))` is placed at offset
    /// `a.len() - b.len()` when `a` is the longer input, otherwise at 0; every
    /// other point of the output range is zeroed.
    fn correlate(&self, dst: &mut [f32], a: &[f32], b: &[f32]);
}

/// Length of the full linear convolution of inputs of length `a` and `b`.
#[inline]
pub fn convolution_len(a: usize, b: usize) -> usize {
    if a == 0 || b == 0 { 0 } else { a + b - 1 }
}

/// Length of the correlation output for inputs of length `a` and `b`.
#[inline]
pub fn correlation_len(a: usize, b: usize) -> usize {
    if a == 0 || b == 0 {
        0
    } else {
        2 * a.max(b) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convolution_len_matches_definition() {
        assert_eq!(convolution_len(4, 2), 5);
        assert_eq!(convolution_len(1, 1), 1);
        assert_eq!(convolution_len(0, 3), 0);
        assert_eq!(convolution_len(3, 0), 0);
    }

    #[test]
    fn correlation_len_uses_longer_input() {
        assert_eq!(correlation_len(4, 2), 7);
        assert_eq!(correlation_len(2, 4), 7);
        assert_eq!(correlation_len(3, 3), 5);
        assert_eq!(correlation_len(0, 3), 0);
    }

    #[test]
    fn provided_statistics_on_scalar_backend() {
        let b = ScalarBackend;
        let x = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(b.mean(&x), 2.5);
        assert!((b.rms(&x) - libm::sqrtf(7.5)).abs() < 1e-6);
        // (30 - 100/4) / 3
        assert!((b.variance(&x) - 5.0 / 3.0).abs() < 1e-6);
        assert!((b.std_dev(&x) - libm::sqrtf(5.0 / 3.0)).abs() < 1e-6);
    }

    #[test]
    fn constant_signal_variance_is_exactly_zero() {
        let b = ScalarBackend;
        for len in 2..64 {
            let x = [0.039f32; 64];
            assert_eq!(b.variance(&x[..len]), 0.0, "len={len}");
            assert_eq!(b.std_dev(&x[..len]), 0.0, "len={len}");
        }
    }

    #[test]
    fn shifted_moments_subtract_shift() {
        let b = ScalarBackend;
        assert_eq!(b.shifted_moments(&[1.0, 2.0, 4.0], 1.0), (4.0, 10.0));
        assert_eq!(b.shifted_moments(&[], 3.0), (0.0, 0.0));
    }

    #[test]
    fn degenerate_statistics_are_nan() {
        let b = ScalarBackend;
        assert!(b.mean(&[]).is_nan());
        assert!(b.rms(&[]).is_nan());
        assert!(b.variance(&[]).is_nan());
        assert!(b.variance(&[3.0]).is_nan());
        assert!(b.std_dev(&[3.0]).is_nan());
    }
}
