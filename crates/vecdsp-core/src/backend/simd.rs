//! Runtime-dispatched SIMD kernels.
//!
//! Each kernel is compiled for AVX2+FMA, AVX, SSE4.1 and NEON via
//! `multiversion`; the best variant is picked on first call. Loops are shaped
//! for auto-vectorisation:
//!
//! - Reductions keep [`LANES`] independent accumulators and fold them at the end.
//!   This reassociates the sum, so `sum`/`power`/`mean`/`rms`/`variance` agree
//!   with [`ScalarBackend`](super::ScalarBackend) only within rounding.
//! - Searches track a per-lane best value and index, then merge lanes with
//!   first-occurrence tie-breaking. Results match the scalar backend exactly.
//! - Convolution and correlation use the axpy form (`out[m..] += a[m] * b`),
//!   which adds terms to each output point in the same order as the direct form.
//!   Results match the scalar backend exactly.

use multiversion::multiversion;

use super::{NumericBackend, convolution_len, correlation_len};

/// Accumulator width. Eight `f32` lanes fill one AVX register.
pub const LANES: usize = 8;

/// Accelerated backend (`simd` feature).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimdBackend;

#[inline(always)]
fn abs_bits(x: f32) -> f32 {
    f32::from_bits(x.to_bits() & 0x7fff_ffff)
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn min(src: &[f32]) -> (f32, usize) {
    let Some(&first) = src.first() else {
        return (f32::NAN, 0);
    };
    let mut best = [f32::INFINITY; LANES];
    let mut best_idx = [usize::MAX; LANES];
    let chunks = src.chunks_exact(LANES);
    let tail = chunks.remainder();
    for (c, chunk) in chunks.enumerate() {
        let base = c * LANES;
        for l in 0..LANES {
            if chunk[l] < best[l] {
                best[l] = chunk[l];
                best_idx[l] = base + l;
            }
        }
    }

    let mut value = first;
    let mut index = 0;
    for l in 0..LANES {
        if best[l] < value || (best[l] == value && best_idx[l] < index) {
            value = best[l];
            index = best_idx[l];
        }
    }
    let tail_start = src.len() - tail.len();
    for (i, &x) in tail.iter().enumerate() {
        if x < value {
            value = x;
            index = tail_start + i;
        }
    }
    (value, index)
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn max(src: &[f32]) -> (f32, usize) {
    let Some(&first) = src.first() else {
        return (f32::NAN, 0);
    };
    let mut best = [f32::NEG_INFINITY; LANES];
    let mut best_idx = [usize::MAX; LANES];
    let chunks = src.chunks_exact(LANES);
    let tail = chunks.remainder();
    for (c, chunk) in chunks.enumerate() {
        let base = c * LANES;
        for l in 0..LANES {
            if chunk[l] > best[l] {
                best[l] = chunk[l];
                best_idx[l] = base + l;
            }
        }
    }

    let mut value = first;
    let mut index = 0;
    for l in 0..LANES {
        if best[l] > value || (best[l] == value && best_idx[l] < index) {
            value = best[l];
            index = best_idx[l];
        }
    }
    let tail_start = src.len() - tail.len();
    for (i, &x) in tail.iter().enumerate() {
        if x > value {
            value = x;
            index = tail_start + i;
        }
    }
    (value, index)
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn abs(dst: &mut [f32], src: &[f32]) {
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d = abs_bits(s);
    }
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn abs_in_place(buf: &mut [f32]) {
    for x in buf.iter_mut() {
        *x = abs_bits(*x);
    }
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn add(dst: &mut [f32], src: &[f32]) {
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d += s;
    }
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn sub(dst: &mut [f32], src: &[f32]) {
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d -= s;
    }
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn mul(dst: &mut [f32], src: &[f32]) {
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d *= s;
    }
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn negate(buf: &mut [f32]) {
    for x in buf.iter_mut() {
        *x = -*x;
    }
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn scale(buf: &mut [f32], factor: f32) {
    for x in buf.iter_mut() {
        *x *= factor;
    }
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn sum(src: &[f32]) -> f32 {
    let mut acc = [0.0f32; LANES];
    let chunks = src.chunks_exact(LANES);
    let tail = chunks.remainder();
    for chunk in chunks {
        for l in 0..LANES {
            acc[l] += chunk[l];
        }
    }
    let mut total = 0.0f32;
    for l in 0..LANES {
        total += acc[l];
    }
    for &x in tail {
        total += x;
    }
    total
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn power(src: &[f32]) -> f32 {
    let mut acc = [0.0f32; LANES];
    let chunks = src.chunks_exact(LANES);
    let tail = chunks.remainder();
    for chunk in chunks {
        for l in 0..LANES {
            acc[l] += chunk[l] * chunk[l];
        }
    }
    let mut total = 0.0f32;
    for l in 0..LANES {
        total += acc[l];
    }
    for &x in tail {
        total += x * x;
    }
    total
}

#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn shifted_moments(src: &[f32], shift: f32) -> (f32, f32) {
    let mut acc = [0.0f32; LANES];
    let mut acc_sq = [0.0f32; LANES];
    let chunks = src.chunks_exact(LANES);
    let tail = chunks.remainder();
    for chunk in chunks {
        for l in 0..LANES {
            let d = chunk[l] - shift;
            acc[l] += d;
            acc_sq[l] += d * d;
        }
    }
    let mut sum = 0.0f32;
    let mut sq = 0.0f32;
    for l in 0..LANES {
        sum += acc[l];
        sq += acc_sq[l];
    }
    for &x in tail {
        let d = x - shift;
        sum += d;
        sq += d * d;
    }
    (sum, sq)
}

/// Accumulate output points `first..first + dst.len()` of `conv(a, b)`.
///
/// `dst` must be zeroed by the caller.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn convolve_window(dst: &mut [f32], a: &[f32], b: &[f32], first: usize) {
    let end = first + dst.len();
    for (m, &x) in a.iter().enumerate() {
        if m >= end {
            break;
        }
        // Output k = m + j must land in [first, end).
        let j_start = first.saturating_sub(m);
        let j_end = b.len().min(end - m);
        if j_start >= j_end {
            continue;
        }
        let out = &mut dst[m + j_start - first..m + j_end - first];
        for (d, &h) in out.iter_mut().zip(&b[j_start..j_end]) {
            *d += x * h;
        }
    }
}

/// Accumulate `conv(a, reverse(b))` into `out`, which must be zeroed and at
/// least `a.len() + b.len() - 1` long.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
fn correlate_full(out: &mut [f32], a: &[f32], b: &[f32]) {
    let lb = b.len();
    for (m, &x) in a.iter().enumerate() {
        for (d, &h) in out[m..m + lb].iter_mut().zip(b.iter().rev()) {
            *d += x * h;
        }
    }
}

impl NumericBackend for SimdBackend {
    fn name(&self) -> &'static str {
        "simd"
    }

    #[inline]
    fn min(&self, src: &[f32]) -> (f32, usize) {
        min(src)
    }

    #[inline]
    fn max(&self, src: &[f32]) -> (f32, usize) {
        max(src)
    }

    #[inline]
    fn abs(&self, dst: &mut [f32], src: &[f32]) {
        abs(dst, src);
    }

    #[inline]
    fn abs_in_place(&self, buf: &mut [f32]) {
        abs_in_place(buf);
    }

    #[inline]
    fn fill(&self, dst: &mut [f32], value: f32) {
        dst.fill(value);
    }

    #[inline]
    fn copy(&self, dst: &mut [f32], src: &[f32]) {
        dst[..src.len()].copy_from_slice(src);
    }

    #[inline]
    fn add(&self, dst: &mut [f32], src: &[f32]) {
        add(dst, src);
    }

    #[inline]
    fn sub(&self, dst: &mut [f32], src: &[f32]) {
        sub(dst, src);
    }

    #[inline]
    fn mul(&self, dst: &mut [f32], src: &[f32]) {
        mul(dst, src);
    }

    #[inline]
    fn negate(&self, buf: &mut [f32]) {
        negate(buf);
    }

    #[inline]
    fn scale(&self, buf: &mut [f32], factor: f32) {
        scale(buf, factor);
    }

    #[inline]
    fn sum(&self, src: &[f32]) -> f32 {
        sum(src)
    }

    #[inline]
    fn power(&self, src: &[f32]) -> f32 {
        power(src)
    }

    #[inline]
    fn shifted_moments(&self, src: &[f32], shift: f32) -> (f32, f32) {
        shifted_moments(src, shift)
    }

    fn convolve(&self, dst: &mut [f32], a: &[f32], b: &[f32]) {
        let len = convolution_len(a.len(), b.len());
        self.convolve_partial(&mut dst[..len], a, b, 0);
    }

    fn convolve_partial(&self, dst: &mut [f32], a: &[f32], b: &[f32], first: usize) {
        if a.is_empty() || b.is_empty() {
            return;
        }
        dst.fill(0.0);
        convolve_window(dst, a, b, first);
    }

    fn correlate(&self, dst: &mut [f32], a: &[f32], b: &[f32]) {
        let len = correlation_len(a.len(), b.len());
        if len == 0 {
            return;
        }
        let out = &mut dst[..len];
        out.fill(0.0);
        let offset = a.len().saturating_sub(b.len());
        correlate_full(&mut out[offset..], a, b);
    }
}
