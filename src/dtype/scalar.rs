//! Scalar trait: the element contract the factorization kernels need
//!
//! `Scalar` extends `Element` with the handful of operations the Cholesky and
//! inversion kernels use. Real and complex types share one definition so the
//! kernel bodies are written exactly once; for real types conjugation is the
//! identity and the real part is the value itself.

use super::complex::{Complex64, Complex128};
use super::Element;

/// Trait for elements the factorization and inversion kernels operate on.
pub trait Scalar: Element {
    /// Complex conjugate (identity for real types)
    fn conj(self) -> Self;

    /// Real part as f64
    fn re(self) -> f64;

    /// Squared magnitude |x|² as f64
    fn abs_sq(self) -> f64;

    /// Construct a purely real value
    fn from_re(v: f64) -> Self;

    /// Multiplicative inverse
    fn recip(self) -> Self;

    /// Negation
    fn neg(self) -> Self;

    /// Scale by a real factor
    fn scale_re(self, v: f64) -> Self;

    /// Exact-zero test (both components for complex types)
    fn is_zero(self) -> bool;
}

impl Scalar for f32 {
    #[inline]
    fn conj(self) -> Self {
        self
    }

    #[inline]
    fn re(self) -> f64 {
        self as f64
    }

    #[inline]
    fn abs_sq(self) -> f64 {
        let v = self as f64;
        v * v
    }

    #[inline]
    fn from_re(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn recip(self) -> Self {
        1.0 / self
    }

    #[inline]
    fn neg(self) -> Self {
        -self
    }

    #[inline]
    fn scale_re(self, v: f64) -> Self {
        self * v as f32
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == 0.0
    }
}

impl Scalar for f64 {
    #[inline]
    fn conj(self) -> Self {
        self
    }

    #[inline]
    fn re(self) -> f64 {
        self
    }

    #[inline]
    fn abs_sq(self) -> f64 {
        self * self
    }

    #[inline]
    fn from_re(v: f64) -> Self {
        v
    }

    #[inline]
    fn recip(self) -> Self {
        1.0 / self
    }

    #[inline]
    fn neg(self) -> Self {
        -self
    }

    #[inline]
    fn scale_re(self, v: f64) -> Self {
        self * v
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == 0.0
    }
}

impl Scalar for Complex64 {
    #[inline]
    fn conj(self) -> Self {
        Complex64::conj(self)
    }

    #[inline]
    fn re(self) -> f64 {
        self.re as f64
    }

    #[inline]
    fn abs_sq(self) -> f64 {
        self.magnitude_squared() as f64
    }

    #[inline]
    fn from_re(v: f64) -> Self {
        Self::new(v as f32, 0.0)
    }

    #[inline]
    fn recip(self) -> Self {
        Complex64::recip(self)
    }

    #[inline]
    fn neg(self) -> Self {
        -self
    }

    #[inline]
    fn scale_re(self, v: f64) -> Self {
        Self::new(self.re * v as f32, self.im * v as f32)
    }

    #[inline]
    fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }
}

impl Scalar for Complex128 {
    #[inline]
    fn conj(self) -> Self {
        Complex128::conj(self)
    }

    #[inline]
    fn re(self) -> f64 {
        self.re
    }

    #[inline]
    fn abs_sq(self) -> f64 {
        self.magnitude_squared()
    }

    #[inline]
    fn from_re(v: f64) -> Self {
        Self::new(v, 0.0)
    }

    #[inline]
    fn recip(self) -> Self {
        Complex128::recip(self)
    }

    #[inline]
    fn neg(self) -> Self {
        -self
    }

    #[inline]
    fn scale_re(self, v: f64) -> Self {
        Self::new(self.re * v, self.im * v)
    }

    #[inline]
    fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }
}
