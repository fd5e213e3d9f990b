//! Dense linear-algebra primitives for the CPU kernels
//!
//! The small, trusted routine set the factorization and inversion bodies are
//! built from: strided reductions, matrix-vector updates, triangular matvec
//! and solve, and a few copy/fill helpers. Everything operates on raw device
//! pointers with element strides; callers guarantee the addressed ranges are
//! valid and non-overlapping unless a routine says otherwise.

use crate::dtype::Scalar;

/// Σ |x[i·incx]|² over n entries, accumulated in f64.
///
/// # Safety
/// `x` must address n strided elements.
pub unsafe fn sum_abs2<T: Scalar>(x: *const T, incx: usize, n: usize) -> f64 {
    let mut acc = 0.0;
    for i in 0..n {
        acc += (*x.add(i * incx)).abs_sq();
    }
    acc
}

/// Copy n strided elements into a contiguous buffer.
///
/// # Safety
/// `src` must address n strided elements; `dst` must hold n elements.
pub unsafe fn copy_into<T: Scalar>(src: *const T, inc: usize, dst: *mut T, n: usize) {
    for i in 0..n {
        *dst.add(i) = *src.add(i * inc);
    }
}

/// Copy the conjugates of n strided elements into a contiguous buffer.
///
/// # Safety
/// `src` must address n strided elements; `dst` must hold n elements.
pub unsafe fn conj_into<T: Scalar>(src: *const T, inc: usize, dst: *mut T, n: usize) {
    for i in 0..n {
        *dst.add(i) = (*src.add(i * inc)).conj();
    }
}

/// Matrix-vector update: y[i·incy] -= Σ_j A[i·ras + j·cas] · x[j].
///
/// A is addressed with independent row/column element strides so the same
/// routine serves row and column sweeps of a row-major matrix.
///
/// # Safety
/// `a` must address an m×k strided block, `x` k elements, `y` m strided
/// elements; `y` must not alias the addressed block of `a`.
pub unsafe fn gemv_sub<T: Scalar>(
    m: usize,
    k: usize,
    a: *const T,
    ras: usize,
    cas: usize,
    x: *const T,
    y: *mut T,
    incy: usize,
) {
    for i in 0..m {
        let row = a.add(i * ras);
        let mut acc = T::zero();
        for j in 0..k {
            acc = acc + *row.add(j * cas) * *x.add(j);
        }
        let dst = y.add(i * incy);
        *dst = *dst - acc;
    }
}

/// Scale n strided elements by a real factor.
///
/// # Safety
/// `x` must address n strided elements.
pub unsafe fn scal_re<T: Scalar>(x: *mut T, incx: usize, n: usize, alpha: f64) {
    for i in 0..n {
        let p = x.add(i * incx);
        *p = (*p).scale_re(alpha);
    }
}

/// Triangular matvec: y[i·incy] = alpha · Σ_{t=i}^{j-1} U[i,t] · x[t],
/// where U is the leading j×j upper triangle of a row-major matrix.
///
/// Out of place: `x` is a staged copy of the operand column, so `y` may point
/// back into the matrix the triangle lives in.
///
/// # Safety
/// `a` must address the leading j×j block with row stride `ld`, `x` j
/// elements, `y` j strided elements.
pub unsafe fn trmv_upper<T: Scalar>(
    j: usize,
    a: *const T,
    ld: usize,
    x: *const T,
    y: *mut T,
    incy: usize,
    alpha: T,
) {
    for i in 0..j {
        let row = a.add(i * ld);
        let mut acc = T::zero();
        for t in i..j {
            acc = acc + *row.add(t) * *x.add(t);
        }
        *y.add(i * incy) = alpha * acc;
    }
}

/// Right-side unit-lower triangular solve, in place: B := B · L⁻¹.
///
/// L is unit lower triangular (diagonal implied, strict lower read); B is
/// n×n row-major. Columns resolve from last to first, each one using only
/// already-final columns to its right.
///
/// # Safety
/// `l` must address an n×n block with row stride `ldl`, `b` an n×n block
/// with row stride `ldb`; the blocks must not overlap.
pub unsafe fn trsm_right_lower_unit<T: Scalar>(
    n: usize,
    l: *const T,
    ldl: usize,
    b: *mut T,
    ldb: usize,
) {
    for j in (0..n).rev() {
        for i in 0..n {
            let row = b.add(i * ldb);
            let mut acc = T::zero();
            for k in (j + 1)..n {
                acc = acc + *row.add(k) * *l.add(k * ldl + j);
            }
            *row.add(j) = *row.add(j) - acc;
        }
    }
}

/// Copy the strict lower triangle of an n×n matrix; the destination's
/// remaining entries are left as they are.
///
/// # Safety
/// `src` and `dst` must address n×n blocks with the given row strides and
/// must not overlap.
pub unsafe fn copy_lower<T: Scalar>(n: usize, src: *const T, lds: usize, dst: *mut T, ldd: usize) {
    for i in 1..n {
        for j in 0..i {
            *dst.add(i * ldd + j) = *src.add(i * lds + j);
        }
    }
}

/// Zero the strict lower triangle of an n×n matrix.
///
/// # Safety
/// `a` must address an n×n block with row stride `ld`.
pub unsafe fn zero_lower<T: Scalar>(n: usize, a: *mut T, ld: usize) {
    for i in 1..n {
        for j in 0..i {
            *a.add(i * ld + j) = T::zero();
        }
    }
}

/// Swap two columns of a matrix with `rows` rows.
///
/// # Safety
/// `a` must address a block of `rows` rows with row stride `ld`; both column
/// indices must be in range.
pub unsafe fn swap_cols<T: Scalar>(rows: usize, a: *mut T, ld: usize, c1: usize, c2: usize) {
    for i in 0..rows {
        let row = a.add(i * ld);
        let tmp = *row.add(c1);
        *row.add(c1) = *row.add(c2);
        *row.add(c2) = tmp;
    }
}

/// Fill n contiguous i32 entries.
///
/// # Safety
/// `ptr` must address n elements.
pub unsafe fn fill_i32(ptr: *mut i32, n: usize, value: i32) {
    for i in 0..n {
        *ptr.add(i) = value;
    }
}
