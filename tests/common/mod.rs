//! Shared helpers for the integration tests
//!
//! Device upload/readback wrappers, seeded matrix generators, and the host
//! LU collaborator the inversion tests feed from.

#![allow(dead_code)] // not every test binary uses every helper

use bytemuck::{Pod, Zeroable};
use factr::runtime::cpu::{CpuDevice, CpuRuntime};
use factr::runtime::Runtime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn device() -> CpuDevice {
    CpuDevice::new()
}

pub fn upload<T: Pod>(data: &[T]) -> u64 {
    let bytes = bytemuck::cast_slice(data);
    let ptr = CpuRuntime::allocate(bytes.len(), &device()).unwrap();
    CpuRuntime::copy_to_device(bytes, ptr, &device()).unwrap();
    ptr
}

pub fn download<T: Pod>(ptr: u64, len: usize) -> Vec<T> {
    let mut out = vec![T::zeroed(); len];
    CpuRuntime::copy_from_device(ptr, bytemuck::cast_slice_mut(&mut out), &device()).unwrap();
    out
}

pub fn free<T: Pod>(ptr: u64, len: usize) {
    CpuRuntime::deallocate(ptr, len * std::mem::size_of::<T>(), &device());
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random symmetric positive definite matrix: B·Bᵀ + n·I, row-major n×n.
pub fn random_spd(rng: &mut StdRng, n: usize) -> Vec<f64> {
    let b: Vec<f64> = (0..n * n).map(|_| rng.random_range(-1.0..1.0)).collect();
    let mut a = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0;
            for k in 0..n {
                acc += b[i * n + k] * b[j * n + k];
            }
            a[i * n + j] = acc;
        }
        a[i * n + i] += n as f64;
    }
    a
}

/// Random diagonally dominant matrix, comfortably invertible.
pub fn random_well_conditioned(rng: &mut StdRng, n: usize) -> Vec<f64> {
    let mut a: Vec<f64> = (0..n * n).map(|_| rng.random_range(-1.0..1.0)).collect();
    for i in 0..n {
        a[i * n + i] += n as f64;
    }
    a
}

/// Host-side LU factorization with partial pivoting: the external
/// collaborator producing the payload the inversion engine consumes.
///
/// In place over a row-major n×n matrix; returns 0-based pivot rows, one per
/// column. Panics on a zero pivot (callers pass well-conditioned inputs).
pub fn host_lu(a: &mut [f64], n: usize) -> Vec<i32> {
    let mut pivots = vec![0i32; n];

    for col in 0..n {
        let mut pivot_row = col;
        let mut max_val = a[col * n + col].abs();
        for row in (col + 1)..n {
            let val = a[row * n + col].abs();
            if val > max_val {
                max_val = val;
                pivot_row = row;
            }
        }

        pivots[col] = pivot_row as i32;
        if pivot_row != col {
            for j in 0..n {
                a.swap(col * n + j, pivot_row * n + j);
            }
        }

        let pivot = a[col * n + col];
        assert!(pivot != 0.0, "singular input to host_lu");

        for row in (col + 1)..n {
            a[row * n + col] /= pivot;
            let multiplier = a[row * n + col];
            for j in (col + 1)..n {
                a[row * n + j] -= multiplier * a[col * n + j];
            }
        }
    }

    pivots
}

/// Row-major n×n matrix product.
pub fn matmul(a: &[f64], b: &[f64], n: usize) -> Vec<f64> {
    let mut c = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0;
            for k in 0..n {
                acc += a[i * n + k] * b[k * n + j];
            }
            c[i * n + j] = acc;
        }
    }
    c
}

pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

pub fn identity(n: usize) -> Vec<f64> {
    let mut id = vec![0.0; n * n];
    for i in 0..n {
        id[i * n + i] = 1.0;
    }
    id
}

/// Frobenius norm of a row-major matrix.
pub fn fro_norm(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}
