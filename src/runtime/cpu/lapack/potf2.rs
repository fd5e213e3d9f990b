//! Unblocked Cholesky factorization of one batch instance
//!
//! Left-looking over the selected triangle of a row-major matrix: at step j
//! the diagonal is formed from the original entry minus the inner product of
//! the already-factored portion with itself, then the remaining unfactored
//! row/column is updated with the staged conjugate of that portion and scaled
//! by the reciprocal diagonal. Entries the step has not reached stay
//! untouched, so a failing instance leaves its trailing submatrix unmodified.

use super::blas;
use crate::algorithm::lapack::Fill;
use crate::dtype::Scalar;

/// Factor one n×n instance in place. Returns the instance status: 0 on
/// success, j+1 if the step-j diagonal was not strictly positive (or NaN).
///
/// # Safety
/// `a` must address an n×n block with row stride `ld`; `work` must hold n
/// elements and not alias `a`.
pub unsafe fn potf2<T: Scalar>(fill: Fill, n: usize, a: *mut T, ld: usize, work: *mut T) -> i32 {
    match fill {
        Fill::Upper => {
            // A = UᴴU; step j finishes row j of U to the right of the diagonal.
            for j in 0..n {
                let diag = a.add(j * ld + j);
                let d = (*diag).re() - blas::sum_abs2(a.add(j), ld, j);
                if !(d > 0.0) {
                    return (j + 1) as i32;
                }
                let djj = d.sqrt();
                *diag = T::from_re(djj);

                if j + 1 < n {
                    // u[j, j+1..] -= Uᴴ-column contributions: stage conj(U[0..j, j])
                    blas::conj_into(a.add(j), ld, work, j);
                    blas::gemv_sub(n - j - 1, j, a.add(j + 1), 1, ld, work, a.add(j * ld + j + 1), 1);
                    blas::scal_re(a.add(j * ld + j + 1), 1, n - j - 1, 1.0 / djj);
                }
            }
        }
        Fill::Lower => {
            // A = LLᴴ; step j finishes column j of L below the diagonal.
            for j in 0..n {
                let diag = a.add(j * ld + j);
                let d = (*diag).re() - blas::sum_abs2(a.add(j * ld), 1, j);
                if !(d > 0.0) {
                    return (j + 1) as i32;
                }
                let djj = d.sqrt();
                *diag = T::from_re(djj);

                if j + 1 < n {
                    // l[j+1.., j] -= row contributions: stage conj(L[j, 0..j])
                    blas::conj_into(a.add(j * ld), 1, work, j);
                    blas::gemv_sub(
                        n - j - 1,
                        j,
                        a.add((j + 1) * ld),
                        ld,
                        1,
                        work,
                        a.add((j + 1) * ld + j),
                        ld,
                    );
                    blas::scal_re(a.add((j + 1) * ld + j), ld, n - j - 1, 1.0 / djj);
                }
            }
        }
    }

    0
}
