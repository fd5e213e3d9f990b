//! Data type system for factr
//!
//! This module provides the `DType` enum representing the element types the
//! engine instantiates, the `Element` trait connecting Rust types to `DType`,
//! and the `Scalar` trait carrying the numeric operations the factorization
//! kernels need.

pub mod complex;
mod element;
mod scalar;

pub use complex::{Complex64, Complex128};
pub use element::Element;
pub use scalar::Scalar;

use std::fmt;

/// Data types supported by the engine
///
/// This enum represents an element type at runtime. The factorization and
/// inversion kernels are instantiated for the four LAPACK precisions; `I32`
/// is the type of pivot and status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
    /// Complex number with f32 components
    Complex64,
    /// Complex number with f64 components
    Complex128,
    /// 32-bit signed integer (pivots, status codes)
    I32,
}

impl DType {
    /// Size of one element in bytes
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DType::F32 => 4,
            DType::F64 => 8,
            DType::Complex64 => 8,
            DType::Complex128 => 16,
            DType::I32 => 4,
        }
    }

    /// Whether this is a real or complex floating-point type
    pub fn is_float(&self) -> bool {
        matches!(
            self,
            DType::F32 | DType::F64 | DType::Complex64 | DType::Complex128
        )
    }

    /// Whether this is a complex type
    pub fn is_complex(&self) -> bool {
        matches!(self, DType::Complex64 | DType::Complex128)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
            DType::I32 => "i32",
        };
        write!(f, "{}", name)
    }
}
