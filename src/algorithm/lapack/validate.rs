//! Argument validation for the batched entry points
//!
//! Pure predicates over problem parameters, run before any planning or
//! memory negotiation. n == 0 and batch_count == 0 are valid no-op shapes;
//! required device pointers are only checked when there is work to address
//! with them.

use super::args::{BatchLayout, InfoArgs, MatrixArgs, PivotArgs};
use crate::error::{Error, Result};

/// Check a matrix operand against the shape invariants.
pub fn check_matrix(
    arg: &'static str,
    n: usize,
    a: &MatrixArgs,
    batch_count: usize,
) -> Result<()> {
    if a.ld < std::cmp::max(1, n) {
        return Err(Error::invalid_value(
            arg,
            format!("leading dimension {} < max(1, n) with n = {}", a.ld, n),
        ));
    }

    if matches!(a.layout, BatchLayout::Single) && batch_count > 1 {
        return Err(Error::invalid_value(
            arg,
            format!("single layout with batch_count = {}", batch_count),
        ));
    }

    if n > 0 && batch_count > 0 && a.handle == 0 {
        return Err(Error::null_pointer(arg));
    }

    Ok(())
}

/// Check a pivot operand.
pub fn check_pivots(
    arg: &'static str,
    n: usize,
    ipiv: &PivotArgs,
    batch_count: usize,
) -> Result<()> {
    if n > 0 && batch_count > 0 && ipiv.handle == 0 {
        return Err(Error::null_pointer(arg));
    }
    Ok(())
}

/// Check the status output array.
pub fn check_info(arg: &'static str, info: &InfoArgs, batch_count: usize) -> Result<()> {
    if batch_count > 0 && info.handle == 0 {
        return Err(Error::null_pointer(arg));
    }
    Ok(())
}

/// Validate the Cholesky entry arguments.
pub fn potf2_args(n: usize, a: &MatrixArgs, info: &InfoArgs, batch_count: usize) -> Result<()> {
    check_matrix("a", n, a, batch_count)?;
    check_info("info", info, batch_count)?;
    Ok(())
}

/// Validate the inversion entry arguments.
pub fn getri_args(
    n: usize,
    a: &MatrixArgs,
    ipiv: &PivotArgs,
    info: &InfoArgs,
    batch_count: usize,
) -> Result<()> {
    check_matrix("a", n, a, batch_count)?;
    check_pivots("ipiv", n, ipiv, batch_count)?;
    check_info("info", info, batch_count)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ld_invariant() {
        let a = MatrixArgs::single(8, 2);
        assert!(check_matrix("a", 3, &a, 1).is_err());
        assert!(check_matrix("a", 2, &a, 1).is_ok());
        // ld must be at least 1 even for n = 0
        let bad = MatrixArgs::single(8, 0);
        assert!(check_matrix("a", 0, &bad, 1).is_err());
    }

    #[test]
    fn test_null_checks_only_when_addressed() {
        let a = MatrixArgs::strided(0, 4, 16);
        // no work to address: null is fine
        assert!(check_matrix("a", 0, &a, 7).is_ok());
        assert!(check_matrix("a", 4, &a, 0).is_ok());
        // work present: null is an error
        assert!(matches!(
            check_matrix("a", 4, &a, 7),
            Err(Error::NullPointer { arg: "a" })
        ));
    }

    #[test]
    fn test_single_layout_batch_bound() {
        let a = MatrixArgs::single(8, 4);
        assert!(check_matrix("a", 4, &a, 1).is_ok());
        assert!(check_matrix("a", 4, &a, 2).is_err());
    }
}
