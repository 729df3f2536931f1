//! Error types for array operations.
//!
//! Every precondition that the array checks before delegating to a backend is
//! reported through [`require`], which turns a failed condition into an
//! [`ArrayError`] the caller can recover from. Nothing here aborts.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ArrayError>;

/// Errors that can occur during array operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// A destination or peer buffer does not satisfy the operation's size requirement.
    #[error("{op}: size mismatch (required {required}, got {actual})")]
    Size {
        /// Name of the operation that rejected the buffer.
        op: &'static str,
        /// Minimum (or exact) length the operation needs.
        required: usize,
        /// Length that was actually supplied.
        actual: usize,
    },

    /// Backing storage could not be obtained.
    #[error("failed to allocate {len} samples")]
    Allocation {
        /// Number of `f32` samples requested.
        len: usize,
    },
}

impl ArrayError {
    /// Create a size error.
    pub fn size(op: &'static str, required: usize, actual: usize) -> Self {
        ArrayError::Size {
            op,
            required,
            actual,
        }
    }

    /// Create an allocation error.
    pub fn allocation(len: usize) -> Self {
        ArrayError::Allocation { len }
    }
}

/// Check a precondition, producing the error from `err` when it does not hold.
///
/// This is the single failure-reporting hook for the crate. With the `tracing`
/// feature enabled, every rejected precondition is also emitted as a `warn`
/// event.
#[inline]
pub fn require(condition: bool, err: impl FnOnce() -> ArrayError) -> Result<()> {
    if condition {
        return Ok(());
    }
    let err = err();
    #[cfg(feature = "tracing")]
    tracing::warn!("precondition failed: {err}");
    Err(err)
}
