//! Portable scalar kernels.
//!
//! These are the reference semantics for every [`NumericBackend`] operation:
//! plain loops in index order, single accumulator, no reassociation. Other
//! backends are tested against this one.

use super::{NumericBackend, convolution_len, correlation_len};

/// Portable reference backend. Always available, including on `no_std` targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScalarBackend;

/// Output point `k` of the full convolution of `a` and `b`.
///
/// Terms are accumulated in ascending `m`, which every backend must match.
#[inline]
fn convolution_point(a: &[f32], b: &[f32], k: usize) -> f32 {
    let m_start = (k + 1).saturating_sub(b.len());
    let m_end = k.min(a.len() - 1);
    let mut acc = 0.0f32;
    for m in m_start..=m_end {
        acc += a[m] * b[k - m];
    }
    acc
}

impl NumericBackend for ScalarBackend {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn min(&self, src: &[f32]) -> (f32, usize) {
        let Some((&first, rest)) = src.split_first() else {
            return (f32::NAN, 0);
        };
        let mut value = first;
        let mut index = 0;
        for (i, &x) in rest.iter().enumerate() {
            if x < value {
                value = x;
                index = i + 1;
            }
        }
        (value, index)
    }

    fn max(&self, src: &[f32]) -> (f32, usize) {
        let Some((&first, rest)) = src.split_first() else {
            return (f32::NAN, 0);
        };
        let mut value = first;
        let mut index = 0;
        for (i, &x) in rest.iter().enumerate() {
            if x > value {
                value = x;
                index = i + 1;
            }
        }
        (value, index)
    }

    fn abs(&self, dst: &mut [f32], src: &[f32]) {
        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d = libm::fabsf(s);
        }
    }

    fn abs_in_place(&self, buf: &mut [f32]) {
        for x in buf.iter_mut() {
            *x = libm::fabsf(*x);
        }
    }

    fn fill(&self, dst: &mut [f32], value: f32) {
        dst.fill(value);
    }

    fn copy(&self, dst: &mut [f32], src: &[f32]) {
        dst[..src.len()].copy_from_slice(src);
    }

    fn add(&self, dst: &mut [f32], src: &[f32]) {
        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d += s;
        }
    }

    fn sub(&self, dst: &mut [f32], src: &[f32]) {
        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d -= s;
        }
    }

    fn mul(&self, dst: &mut [f32], src: &[f32]) {
        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d *= s;
        }
    }

    fn negate(&self, buf: &mut [f32]) {
        for x in buf.iter_mut() {
            *x = -*x;
        }
    }

    fn scale(&self, buf: &mut [f32], factor: f32) {
        for x in buf.iter_mut() {
            *x *= factor;
        }
    }

    fn sum(&self, src: &[f32]) -> f32 {
        let mut acc = 0.0f32;
        for &x in src {
            acc += x;
        }
        acc
    }

    fn power(&self, src: &[f32]) -> f32 {
        let mut acc = 0.0f32;
        for &x in src {
            acc += x * x;
        }
        acc
    }

    fn shifted_moments(&self, src: &[f32], shift: f32) -> (f32, f32) {
        let mut sum = 0.0f32;
        let mut sq = 0.0f32;
        for &x in src {
            let d = x - shift;
            sum += d;
            sq += d * d;
        }
        (sum, sq)
    }

    fn convolve(&self, dst: &mut [f32], a: &[f32], b: &[f32]) {
        let len = convolution_len(a.len(), b.len());
        self.convolve_partial(&mut dst[..len], a, b, 0);
    }

    fn convolve_partial(&self, dst: &mut [f32], a: &[f32], b: &[f32], first: usize) {
        if a.is_empty() || b.is_empty() {
            return;
        }
        for (i, d) in dst.iter_mut().enumerate() {
            *d = convolution_point(a, b, first + i);
        }
    }

    fn correlate(&self, dst: &mut [f32], a: &[f32], b: &[f32]) {
        let len = correlation_len(a.len(), b.len());
        if len == 0 {
            return;
        }
        let out = &mut dst[..len];
        out.fill(0.0);

        let offset = a.len().saturating_sub(b.len());
        let lb = b.len();
        for n in 0..convolution_len(a.len(), lb) {
            // conv(a, reverse(b))[n]
            let m_start = (n + 1).saturating_sub(lb);
            let m_end = n.min(a.len() - 1);
            let mut acc = 0.0f32;
            for m in m_start..=m_end {
                // m >= n + 1 - lb, so this index never underflows.
                acc += a[m] * b[lb - 1 + m - n];
            }
            out[offset + n] = acc;
        }
    }
}
