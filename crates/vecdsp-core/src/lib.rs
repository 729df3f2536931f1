//! vecdsp Core - fixed-length f32 arrays for embedded DSP
//!
//! This crate provides a bounds-aware array abstraction over contiguous `f32`
//! storage with vector arithmetic, descriptive statistics, and linear
//! convolution/correlation. Numeric work is delegated to a pluggable
//! [`NumericBackend`], so an accelerated implementation can stand in for the
//! portable scalar one without changing results beyond float rounding.
//!
//! # Core Abstractions
//!
//! ## Arrays
//!
//! - [`FloatArray`] - Non-owning view over caller storage (`&mut [f32]`)
//! - [`FloatBuffer`] - Owning storage from [`FloatBuffer::create`], released on drop
//!
//! ## Backends
//!
//! - [`NumericBackend`] - Per-operation kernel contract
//! - [`ScalarBackend`] - Portable reference kernels, always available
//! - [`SimdBackend`] - Runtime-dispatched SIMD kernels (`simd` feature)
//! - [`AnyBackend`] / [`BackendKind`] - Runtime backend selection
//!
//! ## Errors
//!
//! - [`ArrayError`] - Size and allocation failures, returned instead of aborting
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc` for [`FloatBuffer`]).
//! Disable the default features in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! vecdsp-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use vecdsp_core::FloatArray;
//!
//! let mut storage = [1.0, 2.0, 3.0, 4.0];
//! let mut array = FloatArray::new(&mut storage);
//!
//! assert_eq!(array.mean(), 2.5);
//! assert_eq!(array.power(), 30.0);
//! assert_eq!(array.max(), (4.0, 3));
//!
//! array.reverse();
//! array.scale(2.0);
//! assert_eq!(array.as_slice(), &[8.0, 6.0, 4.0, 2.0]);
//!
//! let mut out = [0.0; 5];
//! array.convolve(&[1.0, 1.0], &mut out).unwrap();
//! assert_eq!(out, [8.0, 14.0, 10.0, 6.0, 2.0]);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations outside [`FloatBuffer::create`]
//! - **Recoverable preconditions**: Size violations return [`ArrayError`]
//! - **Views vs owners in the type system**: [`FloatArray`] borrows, [`FloatBuffer`] owns
//! - **Static dispatch by default**: Backends are zero-sized `Copy` types

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod array;
pub mod backend;
pub mod buffer;
pub mod config;
pub mod error;

// Re-export main types at crate root
pub use array::FloatArray;
#[cfg(feature = "simd")]
pub use backend::SimdBackend;
pub use backend::{NumericBackend, ScalarBackend};
pub use buffer::FloatBuffer;
pub use config::{AnyBackend, BackendKind, DefaultBackend, ParseBackendError};
pub use error::{ArrayError, Result};
