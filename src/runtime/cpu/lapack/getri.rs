//! Inversion of one batch instance from its LU factors
//!
//! The instance holds L strictly below the diagonal (unit diagonal implied)
//! and U on and above it, as produced by an LU factorization with partial
//! pivoting. Three stages: invert U in place, solve X·L = U⁻¹, then undo the
//! row interchanges by swapping columns from last to first. A singular U is
//! detected up front and leaves the instance unmodified.

use super::blas;
use crate::algorithm::lapack::InversionPath;
use crate::dtype::Scalar;

/// Invert one n×n instance in place. Returns the instance status: 0 on
/// success, k (1-indexed) if U's first exactly-zero diagonal is at k.
///
/// # Safety
/// `a` must address an n×n block with row stride `ld`; `ipiv` must address n
/// i32 entries; `solve` must hold n×n elements on the buffered path and n on
/// the in-place path; `invert` must hold n elements. Scratch must not alias
/// the instance.
pub unsafe fn getri<T: Scalar>(
    n: usize,
    a: *mut T,
    ld: usize,
    ipiv: *const i32,
    path: InversionPath,
    solve: *mut T,
    invert: *mut T,
) -> i32 {
    // Singularity scan before anything is modified.
    for k in 0..n {
        if (*a.add(k * ld + k)).is_zero() {
            return (k + 1) as i32;
        }
    }

    // Stage 1: invert U in place (columns left to right; the leading block
    // already holds its inverse when column j is formed).
    for j in 0..n {
        let diag = a.add(j * ld + j);
        let inv_d = (*diag).recip();
        *diag = inv_d;

        if j > 0 {
            blas::copy_into(a.add(j), ld, invert, j);
            blas::trmv_upper(j, a, ld, invert, a.add(j), ld, inv_d.neg());
        }
    }

    // Stage 2: solve X · L = U⁻¹ over the unit-lower factor.
    match path {
        InversionPath::Buffered => {
            blas::copy_lower(n, a, ld, solve, n);
            blas::zero_lower(n, a, ld);
            blas::trsm_right_lower_unit(n, solve, n, a, ld);
        }
        InversionPath::InPlace => {
            // Column-at-a-time from the right: stage column j's L entries,
            // zero them, then fold the already-final columns to the right in.
            for j in (0..n).rev() {
                for i in (j + 1)..n {
                    *solve.add(i) = *a.add(i * ld + j);
                    *a.add(i * ld + j) = T::zero();
                }
                if j + 1 < n {
                    blas::gemv_sub(n, n - j - 1, a.add(j + 1), ld, 1, solve.add(j + 1), a.add(j), ld);
                }
            }
        }
    }

    // Stage 3: undo the row interchanges as column swaps, last pivot first.
    // The final column's pivot is always itself. Out-of-range entries are
    // ignored rather than dereferenced.
    for j in (0..n.saturating_sub(1)).rev() {
        let p = *ipiv.add(j);
        if p >= 0 {
            let jp = p as usize;
            if jp != j && jp < n {
                blas::swap_cols(n, a, ld, j, jp);
            }
        }
    }

    0
}
