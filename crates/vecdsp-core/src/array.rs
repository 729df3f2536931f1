//! Non-owning `f32` array view.
//!
//! [`FloatArray`] wraps caller-owned storage (`&mut [f32]`) and a
//! [`NumericBackend`]. It never allocates or frees; for owned storage see
//! [`FloatBuffer`](crate::FloatBuffer).
//!
//! # Operations
//!
//! | Group | Methods |
//! |-------|---------|
//! | Search | [`min`](FloatArray::min), [`max`](FloatArray::max) and their `_value`/`_index` accessors |
//! | Sign & order | [`rectify`](FloatArray::rectify), [`rectify_into`](FloatArray::rectify_into), [`reverse`](FloatArray::reverse), [`reverse_into`](FloatArray::reverse_into) |
//! | Statistics | [`mean`](FloatArray::mean), [`power`](FloatArray::power), [`rms`](FloatArray::rms), [`variance`](FloatArray::variance), [`std_dev`](FloatArray::std_dev) |
//! | Buffer | [`scale`](FloatArray::scale), [`set_all`](FloatArray::set_all), [`clear`](FloatArray::clear), [`copy_to`](FloatArray::copy_to), [`copy_from`](FloatArray::copy_from) |
//! | Element-wise | [`add`](FloatArray::add), [`subtract`](FloatArray::subtract), [`multiply`](FloatArray::multiply), [`negate`](FloatArray::negate) |
//! | Signal | [`convolve`](FloatArray::convolve), [`convolve_partial`](FloatArray::convolve_partial), [`correlate`](FloatArray::correlate) |
//!
//! Operations that take a peer or destination buffer check its size first and
//! return [`ArrayError::Size`] without touching either buffer when the check
//! fails. Peers and destinations are plain slices, and `FloatArray` derefs to
//! `[f32]`, so arrays, buffers, `Vec`s and fixed arrays all mix freely.
//!
//! # Equality
//!
//! `==` on two views is *identity*: same storage address and same length.
//! Compare contents with `a.as_slice() == b.as_slice()`.

use core::ops::{Deref, DerefMut};

use crate::backend::{NumericBackend, convolution_len, correlation_len};
use crate::config::DefaultBackend;
use crate::error::{ArrayError, Result, require};

/// Fixed-length view over externally managed `f32` storage.
///
/// The length is set at construction and never changes. All numeric work is
/// forwarded to the backend `B`.
///
/// # Example
///
/// ```rust
/// use vecdsp_core::{ArrayError, FloatArray};
///
/// let mut storage = [1.0, 2.0, 3.0];
/// let mut array = FloatArray::new(&mut storage);
///
/// array.add(&[10.0, 20.0, 30.0]).unwrap();
/// assert_eq!(array.as_slice(), &[11.0, 22.0, 33.0]);
///
/// let err = array.add(&[1.0, 2.0]).unwrap_err();
/// assert!(matches!(err, ArrayError::Size { op: "add", .. }));
/// assert_eq!(array.as_slice(), &[11.0, 22.0, 33.0]);
/// ```
#[derive(Debug)]
pub struct FloatArray<'a, B: NumericBackend = DefaultBackend> {
    data: &'a mut [f32],
    backend: B,
}

impl<'a> FloatArray<'a> {
    /// Wrap `data` using the build's [`DefaultBackend`].
    pub fn new(data: &'a mut [f32]) -> Self {
        Self::with_backend(data, DefaultBackend::default())
    }
}

impl<'a> From<&'a mut [f32]> for FloatArray<'a> {
    fn from(data: &'a mut [f32]) -> Self {
        Self::new(data)
    }
}

impl<'a, B: NumericBackend> FloatArray<'a, B> {
    /// Wrap `data` using an explicit backend.
    pub fn with_backend(data: &'a mut [f32], backend: B) -> Self {
        Self { data, backend }
    }

    /// The backend this view delegates to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the view has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The viewed elements.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &*self.data
    }

    /// The viewed elements, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut *self.data
    }

    /// Give the underlying storage back to the caller.
    pub fn into_slice(self) -> &'a mut [f32] {
        self.data
    }

    /// Returns true if `other` is exactly this view's storage (same address and length).
    ///
    /// Contents are not compared.
    #[inline]
    pub fn is_same_storage(&self, other: &[f32]) -> bool {
        core::ptr::eq(self.data.as_ptr(), other.as_ptr()) && self.data.len() == other.len()
    }

    /// Borrow `len` elements starting at `offset` as a new view with the same backend.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Size`] if `offset + len` runs past the end of this view.
    pub fn sub_array(&mut self, offset: usize, len: usize) -> Result<FloatArray<'_, B>> {
        let end = offset.saturating_add(len);
        require(end <= self.len(), || {
            ArrayError::size("sub_array", end, self.data.len())
        })?;
        Ok(FloatArray::with_backend(
            &mut self.data[offset..end],
            self.backend,
        ))
    }

    // --- search ---

    /// Minimum value and the index of its first occurrence.
    ///
    /// An empty view yields `(NaN, 0)`.
    pub fn min(&self) -> (f32, usize) {
        self.backend.min(self.data)
    }

    /// Minimum value. Runs a full scan.
    pub fn min_value(&self) -> f32 {
        self.min().0
    }

    /// Index of the first minimum. Runs a full scan.
    pub fn min_index(&self) -> usize {
        self.min().1
    }

    /// Maximum value and the index of its first occurrence.
    ///
    /// An empty view yields `(NaN, 0)`.
    pub fn max(&self) -> (f32, usize) {
        self.backend.max(self.data)
    }

    /// Maximum value. Runs a full scan.
    pub fn max_value(&self) -> f32 {
        self.max().0
    }

    /// Index of the first maximum. Runs a full scan.
    pub fn max_index(&self) -> usize {
        self.max().1
    }

    // --- sign & order ---

    /// Write `|x|` of each element into `destination`.
    ///
    /// Only the first `min(self.len(), destination.len())` elements are
    /// written; a mismatched destination is truncated rather than rejected.
    pub fn rectify_into(&self, destination: &mut [f32]) {
        self.backend.abs(destination, self.data);
    }

    /// Replace every element with its absolute value.
    pub fn rectify(&mut self) {
        self.backend.abs_in_place(self.data);
    }

    /// Write the elements in reverse order into `destination[..self.len()]`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Size`] if `destination` is shorter than this view.
    pub fn reverse_into(&self, destination: &mut [f32]) -> Result<()> {
        let n = self.len();
        require(destination.len() >= n, || {
            ArrayError::size("reverse_into", n, destination.len())
        })?;
        for (d, &s) in destination[..n].iter_mut().zip(self.data.iter().rev()) {
            *d = s;
        }
        Ok(())
    }

    /// Reverse the elements in place.
    ///
    /// Swaps `len / 2` pairs about the midpoint; the middle element of an
    /// odd-length view stays put.
    pub fn reverse(&mut self) {
        let n = self.len();
        for i in 0..n / 2 {
            self.data.swap(i, n - 1 - i);
        }
    }

    // --- statistics ---

    /// Arithmetic mean. `NaN` for an empty view.
    pub fn mean(&self) -> f32 {
        self.backend.mean(self.data)
    }

    /// Sum of squares.
    pub fn power(&self) -> f32 {
        self.backend.power(self.data)
    }

    /// Root mean square, `sqrt(power / len)`. `NaN` for an empty view.
    pub fn rms(&self) -> f32 {
        self.backend.rms(self.data)
    }

    /// Unbiased sample variance (divides by `len - 1`).
    ///
    /// Needs at least two elements; fewer yields `NaN`.
    pub fn variance(&self) -> f32 {
        self.backend.variance(self.data)
    }

    /// Sample standard deviation, `sqrt(variance)`.
    pub fn std_dev(&self) -> f32 {
        self.backend.std_dev(self.data)
    }

    // --- buffer ---

    /// Multiply every element by `factor`.
    pub fn scale(&mut self, factor: f32) {
        self.backend.scale(self.data, factor);
    }

    /// Set every element to `value`.
    pub fn set_all(&mut self, value: f32) {
        self.backend.fill(self.data, value);
    }

    /// Set every element to zero.
    pub fn clear(&mut self) {
        self.set_all(0.0);
    }

    /// Copy all elements into the front of `other`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Size`] if `other` is shorter than this view.
    pub fn copy_to(&self, other: &mut [f32]) -> Result<()> {
        require(other.len() >= self.len(), || {
            ArrayError::size("copy_to", self.data.len(), other.len())
        })?;
        self.backend.copy(other, self.data);
        Ok(())
    }

    /// Copy all of `other` into the front of this view.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Size`] if `other` is longer than this view.
    pub fn copy_from(&mut self, other: &[f32]) -> Result<()> {
        require(self.len() >= other.len(), || {
            ArrayError::size("copy_from", other.len(), self.data.len())
        })?;
        self.backend.copy(self.data, other);
        Ok(())
    }

    // --- element-wise ---

    fn require_same_len(&self, op: &'static str, other: &[f32]) -> Result<()> {
        require(other.len() == self.len(), || {
            ArrayError::size(op, self.data.len(), other.len())
        })
    }

    /// `self[i] += other[i]`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Size`] unless `other.len() == self.len()`.
    pub fn add(&mut self, other: &[f32]) -> Result<()> {
        self.require_same_len("add", other)?;
        self.backend.add(self.data, other);
        Ok(())
    }

    /// `self[i] -= other[i]`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Size`] unless `other.len() == self.len()`.
    pub fn subtract(&mut self, other: &[f32]) -> Result<()> {
        self.require_same_len("subtract", other)?;
        self.backend.sub(self.data, other);
        Ok(())
    }

    /// `self[i] *= other[i]`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Size`] unless `other.len() == self.len()`.
    pub fn multiply(&mut self, other: &[f32]) -> Result<()> {
        self.require_same_len("multiply", other)?;
        self.backend.mul(self.data, other);
        Ok(())
    }

    /// Flip the sign of every element.
    pub fn negate(&mut self) {
        self.backend.negate(self.data);
    }

    // --- convolution & correlation ---

    /// Full linear convolution with `other`.
    ///
    /// Writes `len + other.len() - 1` points to the front of `destination`;
    /// any extra destination elements are left untouched. Nothing is written
    /// when either input is empty.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Size`] if `destination` is shorter than the full output.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vecdsp_core::FloatArray;
    ///
    /// let mut ones = [1.0, 1.0];
    /// let array = FloatArray::new(&mut ones);
    /// let mut out = [0.0; 3];
    /// array.convolve(&[1.0, 1.0], &mut out).unwrap();
    /// assert_eq!(out, [1.0, 2.0, 1.0]);
    /// ```
    pub fn convolve(&self, other: &[f32], destination: &mut [f32]) -> Result<()> {
        let required = convolution_len(self.len(), other.len());
        require(destination.len() >= required, || {
            ArrayError::size("convolve", required, destination.len())
        })?;
        self.backend.convolve(destination, self.data, other);
        Ok(())
    }

    /// Partial convolution: points `offset..offset + samples` of the full
    /// convolution with `other`, written to `destination[..samples]`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Size`] if `destination` holds fewer than `samples`
    /// points, or if the requested window runs past the end of the full
    /// convolution.
    pub fn convolve_partial(
        &self,
        other: &[f32],
        destination: &mut [f32],
        offset: usize,
        samples: usize,
    ) -> Result<()> {
        require(destination.len() >= samples, || {
            ArrayError::size("convolve_partial", samples, destination.len())
        })?;
        let full = convolution_len(self.len(), other.len());
        let end = offset.saturating_add(samples);
        require(end <= full, || ArrayError::size("convolve_partial", end, full))?;
        if samples == 0 {
            return Ok(());
        }
        self.backend
            .convolve_partial(&mut destination[..samples], self.data, other, offset);
        Ok(())
    }

    /// Cross-correlation with `other`.
    ///
    /// Writes `2 * max(len, other.len()) - 1` points to the front of
    /// `destination`. Zero lag sits at index `max(len, other.len()) - 1`;
    /// points outside the overlap are zero.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Size`] if `destination` is shorter than the full output.
    pub fn correlate(&self, other: &[f32], destination: &mut [f32]) -> Result<()> {
        let required = correlation_len(self.len(), other.len());
        require(destination.len() >= required, || {
            ArrayError::size("correlate", required, destination.len())
        })?;
        self.backend.correlate(destination, self.data, other);
        Ok(())
    }
}

impl<B: NumericBackend> Deref for FloatArray<'_, B> {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &[f32] {
        &*self.data
    }
}

impl<B: NumericBackend> DerefMut for FloatArray<'_, B> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f32] {
        &mut *self.data
    }
}

impl<B: NumericBackend> PartialEq for FloatArray<'_, B> {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_storage(other.data)
    }
}
