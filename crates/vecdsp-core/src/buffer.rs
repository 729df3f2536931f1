//! Owned `f32` storage.
//!
//! [`FloatBuffer`] is the owning counterpart of [`FloatArray`]: it allocates
//! its storage in [`create`](FloatBuffer::create) and releases it when dropped
//! or passed to [`destroy`](FloatBuffer::destroy). Because `destroy` takes the
//! buffer by value, releasing twice or releasing a borrowed view does not
//! compile.
//!
//! ```rust
//! use vecdsp_core::FloatBuffer;
//!
//! let mut buffer = FloatBuffer::create(4).unwrap();
//! buffer.as_array().set_all(0.5);
//! assert_eq!(buffer.as_array().power(), 1.0);
//! buffer.destroy();
//! ```

use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use crate::array::FloatArray;
use crate::backend::NumericBackend;
use crate::config::DefaultBackend;
use crate::error::{ArrayError, Result};

/// Heap-allocated, fixed-length `f32` storage with an attached backend.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatBuffer<B: NumericBackend = DefaultBackend> {
    data: Vec<f32>,
    backend: B,
}

impl FloatBuffer {
    /// Allocate `size` zeroed samples using the build's [`DefaultBackend`].
    ///
    /// # Errors
    ///
    /// [`ArrayError::Allocation`] if the allocator cannot provide the storage.
    pub fn create(size: usize) -> Result<Self> {
        Self::create_with_backend(size, DefaultBackend::default())
    }

    /// Copy `src` into a new buffer using the build's [`DefaultBackend`].
    pub fn from_slice(src: &[f32]) -> Result<Self> {
        let mut buffer = Self::create(src.len())?;
        buffer.data.copy_from_slice(src);
        Ok(buffer)
    }
}

impl From<Vec<f32>> for FloatBuffer {
    fn from(data: Vec<f32>) -> Self {
        Self {
            data,
            backend: DefaultBackend::default(),
        }
    }
}

impl<B: NumericBackend> FloatBuffer<B> {
    /// Allocate `size` zeroed samples using an explicit backend.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Allocation`] if the allocator cannot provide the storage.
    pub fn create_with_backend(size: usize, backend: B) -> Result<Self> {
        let mut data = Vec::new();
        if data.try_reserve_exact(size).is_err() {
            let err = ArrayError::allocation(size);
            #[cfg(feature = "tracing")]
            tracing::warn!("buffer_create: {err}");
            return Err(err);
        }
        data.resize(size, 0.0);
        #[cfg(feature = "tracing")]
        tracing::debug!("buffer_create: {size} samples, backend={}", backend.name());
        Ok(Self { data, backend })
    }

    /// Release the storage.
    ///
    /// Equivalent to dropping the buffer; provided so ownership hand-off reads
    /// explicitly at call sites.
    pub fn destroy(self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("buffer_destroy: {} samples", self.data.len());
        drop(self);
    }

    /// Borrow the whole buffer as a [`FloatArray`] view.
    pub fn as_array(&mut self) -> FloatArray<'_, B> {
        FloatArray::with_backend(&mut self.data, self.backend)
    }

    /// The backend attached to this buffer.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The stored samples.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The stored samples, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Take the storage out of the buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

impl<B: NumericBackend> Deref for FloatBuffer<B> {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &[f32] {
        &self.data
    }
}

impl<B: NumericBackend> DerefMut for FloatBuffer<B> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}
