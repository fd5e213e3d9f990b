//! Error types for factr
//!
//! Only *call-level* failures live here: malformed arguments, null device
//! pointers, and allocator refusals. Numerical conditions (a non-positive
//! pivot, a singular triangular factor) are per-instance status codes written
//! to the caller's info array and never surface as `Error`.

use thiserror::Error;

/// Result type alias using factr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when launching a batched operation
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument provided to an operation
    #[error("Invalid value for argument '{arg}': {reason}")]
    InvalidValue {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A required device pointer was null
    #[error("Null device pointer for argument '{arg}'")]
    NullPointer {
        /// The argument name
        arg: &'static str,
    },

    /// Out of device memory
    #[error("Out of device memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Create an invalid-value error
    pub fn invalid_value(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a null-pointer error
    pub fn null_pointer(arg: &'static str) -> Self {
        Self::NullPointer { arg }
    }
}
