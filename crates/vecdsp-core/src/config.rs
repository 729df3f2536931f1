//! Backend selection.
//!
//! Two switches choose which [`NumericBackend`] does the work:
//!
//! - **Build time**: [`DefaultBackend`] is [`SimdBackend`](crate::SimdBackend) when the
//!   `simd` feature is enabled (the default) and [`ScalarBackend`] otherwise.
//!   [`FloatArray::new`](crate::FloatArray::new) and
//!   [`FloatBuffer::create`](crate::FloatBuffer::create) use it.
//! - **Runtime**: [`BackendKind`] names a backend and parses from text;
//!   [`AnyBackend`] turns it into a value that can be injected with
//!   [`FloatArray::with_backend`](crate::FloatArray::with_backend).
//!
//! With `std`, [`BackendKind::from_env`] reads the [`BACKEND_ENV_VAR`]
//! environment variable.
//!
//! ```rust
//! use vecdsp_core::{AnyBackend, BackendKind, FloatArray, NumericBackend};
//!
//! let kind: BackendKind = "scalar".parse().unwrap();
//! let mut storage = [3.0, -1.0, 2.0];
//! let array = FloatArray::with_backend(&mut storage, AnyBackend::from(kind));
//! assert_eq!(array.backend().name(), "scalar");
//! assert_eq!(array.min(), (-1.0, 1));
//! ```

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::backend::{NumericBackend, ScalarBackend};
#[cfg(feature = "simd")]
use crate::backend::SimdBackend;

/// Backend used when none is given explicitly.
#[cfg(feature = "simd")]
pub type DefaultBackend = SimdBackend;

/// Backend used when none is given explicitly.
#[cfg(not(feature = "simd"))]
pub type DefaultBackend = ScalarBackend;

/// Environment variable consulted by [`BackendKind::from_env`].
pub const BACKEND_ENV_VAR: &str = "VECDSP_BACKEND";

/// Identifies a numeric backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Portable scalar reference kernels.
    Scalar,
    /// Runtime-dispatched SIMD kernels.
    #[cfg(feature = "simd")]
    Simd,
}

/// Errors from parsing a [`BackendKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBackendError {
    /// The name does not match any known backend.
    #[error("unknown backend: '{0}' (expected 'scalar' or 'simd')")]
    Unknown(String),

    /// The backend exists but was not compiled into this build.
    #[error("backend '{0}' is not available in this build (enable the 'simd' feature)")]
    Unavailable(&'static str),
}

impl BackendKind {
    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            #[cfg(feature = "simd")]
            Self::Simd => "simd",
        }
    }

    /// Read the backend from [`BACKEND_ENV_VAR`], falling back to the build default.
    #[cfg(feature = "std")]
    pub fn from_env() -> Result<Self, ParseBackendError> {
        match std::env::var(BACKEND_ENV_VAR) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::default()),
        }
    }
}

#[cfg(feature = "simd")]
impl Default for BackendKind {
    fn default() -> Self {
        Self::Simd
    }
}

#[cfg(not(feature = "simd"))]
impl Default for BackendKind {
    fn default() -> Self {
        Self::Scalar
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(Self::Scalar),
            #[cfg(feature = "simd")]
            "simd" => Ok(Self::Simd),
            #[cfg(not(feature = "simd"))]
            "simd" => Err(ParseBackendError::Unavailable("simd")),
            _ => Err(ParseBackendError::Unknown(s.to_string())),
        }
    }
}

/// Backend chosen at runtime. Delegates every kernel to the selected variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyBackend {
    /// See [`ScalarBackend`].
    Scalar(ScalarBackend),
    /// See [`SimdBackend`].
    #[cfg(feature = "simd")]
    Simd(SimdBackend),
}

impl AnyBackend {
    /// The kind of backend this value dispatches to.
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Scalar(_) => BackendKind::Scalar,
            #[cfg(feature = "simd")]
            Self::Simd(_) => BackendKind::Simd,
        }
    }
}

impl Default for AnyBackend {
    fn default() -> Self {
        Self::from(BackendKind::default())
    }
}

impl From<BackendKind> for AnyBackend {
    fn from(kind: BackendKind) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!("backend_select: {kind}");
        match kind {
            BackendKind::Scalar => Self::Scalar(ScalarBackend),
            #[cfg(feature = "simd")]
            BackendKind::Simd => Self::Simd(SimdBackend),
        }
    }
}

/// Forward a kernel call to whichever backend is selected.
macro_rules! dispatch {
    ($self:ident, $b:ident => $call:expr) => {
        match $self {
            AnyBackend::Scalar($b) => $call,
            #[cfg(feature = "simd")]
            AnyBackend::Simd($b) => $call,
        }
    };
}

impl NumericBackend for AnyBackend {
    fn name(&self) -> &'static str {
        dispatch!(self, b => b.name())
    }

    fn min(&self, src: &[f32]) -> (f32, usize) {
        dispatch!(self, b => b.min(src))
    }

    fn max(&self, src: &[f32]) -> (f32, usize) {
        dispatch!(self, b => b.max(src))
    }

    fn abs(&self, dst: &mut [f32], src: &[f32]) {
        dispatch!(self, b => b.abs(dst, src))
    }

    fn abs_in_place(&self, buf: &mut [f32]) {
        dispatch!(self, b => b.abs_in_place(buf))
    }

    fn fill(&self, dst: &mut [f32], value: f32) {
        dispatch!(self, b => b.fill(dst, value))
    }

    fn copy(&self, dst: &mut [f32], src: &[f32]) {
        dispatch!(self, b => b.copy(dst, src))
    }

    fn add(&self, dst: &mut [f32], src: &[f32]) {
        dispatch!(self, b => b.add(dst, src))
    }

    fn sub(&self, dst: &mut [f32], src: &[f32]) {
        dispatch!(self, b => b.sub(dst, src))
    }

    fn mul(&self, dst: &mut [f32], src: &[f32]) {
        dispatch!(self, b => b.mul(dst, src))
    }

    fn negate(&self, buf: &mut [f32]) {
        dispatch!(self, b => b.negate(buf))
    }

    fn scale(&self, buf: &mut [f32], factor: f32) {
        dispatch!(self, b => b.scale(buf, factor))
    }

    fn sum(&self, src: &[f32]) -> f32 {
        dispatch!(self, b => b.sum(src))
    }

    fn power(&self, src: &[f32]) -> f32 {
        dispatch!(self, b => b.power(src))
    }

    fn shifted_moments(&self, src: &[f32], shift: f32) -> (f32, f32) {
        dispatch!(self, b => b.shifted_moments(src, shift))
    }

    fn mean(&self, src: &[f32]) -> f32 {
        dispatch!(self, b => b.mean(src))
    }

    fn rms(&self, src: &[f32]) -> f32 {
        dispatch!(self, b => b.rms(src))
    }

    fn variance(&self, src: &[f32]) -> f32 {
        dispatch!(self, b => b.variance(src))
    }

    fn std_dev(&self, src: &[f32]) -> f32 {
        dispatch!(self, b => b.std_dev(src))
    }

    fn convolve(&self, dst: &mut [f32], a: &[f32], b: &[f32]) {
        dispatch!(self, k => k.convolve(dst, a, b))
    }

    fn convolve_partial(&self, dst: &mut [f32], a: &[f32], b: &[f32], first: usize) {
        dispatch!(self, k => k.convolve_partial(dst, a, b, first))
    }

    fn correlate(&self, dst: &mut [f32], a: &[f32], b: &[f32]) {
        dispatch!(self, k => k.correlate(dst, a, b))
    }
}
