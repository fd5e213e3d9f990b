//! Numerical tests for the batched Cholesky factorization.

#![cfg(feature = "cpu")]

mod common;

use common::{download, free, fro_norm, max_abs_diff, random_spd, rng, upload};
use factr::algorithm::lapack::{BatchedLapack, Fill, InfoArgs, LaunchMode, MatrixArgs};
use factr::dtype::Complex128;
use factr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use factr::runtime::Runtime;

fn client() -> CpuClient {
    CpuRuntime::default_client(&CpuDevice::new())
}

fn factor_single_f64(m: &[f64], n: usize, fill: Fill) -> (Vec<f64>, i32) {
    let a_ptr = upload(m);
    let info_ptr = upload(&[-1i32]);

    client()
        .potf2_batched::<f64>(
            fill,
            n,
            &MatrixArgs::single(a_ptr, n),
            &InfoArgs::new(info_ptr),
            1,
            LaunchMode::Execute,
        )
        .unwrap();

    let out = download::<f64>(a_ptr, n * n);
    let status = download::<i32>(info_ptr, 1)[0];
    free::<f64>(a_ptr, n * n);
    free::<i32>(info_ptr, 1);
    (out, status)
}

#[test]
fn test_round_trip_lower_f64() {
    let n = 8;
    let m = random_spd(&mut rng(42), n);
    let (f, status) = factor_single_f64(&m, n, Fill::Lower);
    assert_eq!(status, 0);

    // reconstruct L·Lᵀ from the factored triangle
    let mut rec = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0;
            for k in 0..=i.min(j) {
                acc += f[i * n + k] * f[j * n + k];
            }
            rec[i * n + j] = acc;
        }
    }

    let tol = 1e-12 * n as f64 * fro_norm(&m);
    assert!(max_abs_diff(&rec, &m) < tol);
}

#[test]
fn test_round_trip_upper_f32() {
    let n = 6;
    let m64 = random_spd(&mut rng(7), n);
    let m: Vec<f32> = m64.iter().map(|&x| x as f32).collect();

    let a_ptr = upload(&m);
    let info_ptr = upload(&[-1i32]);
    client()
        .potf2_batched::<f32>(
            Fill::Upper,
            n,
            &MatrixArgs::single(a_ptr, n),
            &InfoArgs::new(info_ptr),
            1,
            LaunchMode::Execute,
        )
        .unwrap();
    assert_eq!(download::<i32>(info_ptr, 1), vec![0]);
    let f = download::<f32>(a_ptr, n * n);

    // reconstruct Uᵀ·U
    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0f32;
            for k in 0..=i.min(j) {
                acc += f[k * n + i] * f[k * n + j];
            }
            let tol = 1e-4 * n as f32 * m[i * n + i].max(m[j * n + j]);
            assert!((acc - m[i * n + j]).abs() < tol);
        }
    }

    free::<f32>(a_ptr, n * n);
    free::<i32>(info_ptr, 1);
}

#[test]
fn test_round_trip_hermitian_complex128() {
    // Hermitian positive definite: B·Bᴴ + n·I
    let n = 5;
    let mut r = rng(99);
    let b: Vec<Complex128> = (0..n * n)
        .map(|_| {
            Complex128::new(
                rand::Rng::random_range(&mut r, -1.0..1.0),
                rand::Rng::random_range(&mut r, -1.0..1.0),
            )
        })
        .collect();
    let mut m = vec![Complex128::ZERO; n * n];
    for i in 0..n {
        for j in 0..n {
            let mut acc = Complex128::ZERO;
            for k in 0..n {
                acc = acc + b[i * n + k] * b[j * n + k].conj();
            }
            m[i * n + j] = acc;
        }
        m[i * n + i] = m[i * n + i] + Complex128::new(n as f64, 0.0);
    }

    let a_ptr = upload(&m);
    let info_ptr = upload(&[-1i32]);
    client()
        .potf2_batched::<Complex128>(
            Fill::Lower,
            n,
            &MatrixArgs::single(a_ptr, n),
            &InfoArgs::new(info_ptr),
            1,
            LaunchMode::Execute,
        )
        .unwrap();
    assert_eq!(download::<i32>(info_ptr, 1), vec![0]);
    let f = download::<Complex128>(a_ptr, n * n);

    // reconstruct L·Lᴴ over the lower triangle
    for i in 0..n {
        for j in 0..=i {
            let mut acc = Complex128::ZERO;
            for k in 0..=j {
                acc = acc + f[i * n + k] * f[j * n + k].conj();
            }
            let d = acc - m[i * n + j];
            assert!(d.magnitude() < 1e-10 * n as f64, "({i}, {j}): {d}");
        }
    }

    free::<Complex128>(a_ptr, n * n);
    free::<i32>(info_ptr, 1);
}

#[test]
fn test_leading_minor_failure_isolated_in_batch() {
    let n = 3;
    let good = random_spd(&mut rng(3), n);
    // leading 2×2 minor [[1, 1], [1, 1]] is singular → status 2
    #[rustfmt::skip]
    let bad = vec![
        1.0, 1.0, 0.5,
        1.0, 1.0, 0.25,
        0.5, 0.25, 5.0,
    ];

    let mut all = Vec::new();
    all.extend_from_slice(&good);
    all.extend_from_slice(&bad);
    all.extend_from_slice(&good);

    let a_ptr = upload(&all);
    let info_ptr = upload(&[-1i32; 3]);

    client()
        .potf2_batched::<f64>(
            Fill::Lower,
            n,
            &MatrixArgs::strided(a_ptr, n, n * n),
            &InfoArgs::new(info_ptr),
            3,
            LaunchMode::Execute,
        )
        .unwrap();

    // call-level success; statuses report the bad instance only
    assert_eq!(download::<i32>(info_ptr, 3), vec![0, 2, 0]);

    // the failing instance's trailing entry was never touched
    let out = download::<f64>(a_ptr, all.len());
    assert_eq!(out[n * n + 8], 5.0);

    // neighbors factored identically to a lone call
    let (lone, _) = factor_single_f64(&good, n, Fill::Lower);
    assert_eq!(&out[..n * n], &lone[..]);
    assert_eq!(&out[2 * n * n..], &lone[..]);

    free::<f64>(a_ptr, all.len());
    free::<i32>(info_ptr, 3);
}

#[test]
fn test_strided_batch_matches_single_calls() {
    let n = 7;
    let k = 4;
    let mut r = rng(1234);
    let mats: Vec<Vec<f64>> = (0..k).map(|_| random_spd(&mut r, n)).collect();

    let mut all = Vec::new();
    for m in &mats {
        all.extend_from_slice(m);
    }
    let a_ptr = upload(&all);
    let info_ptr = upload(&vec![-1i32; k]);

    client()
        .potf2_batched::<f64>(
            Fill::Lower,
            n,
            &MatrixArgs::strided(a_ptr, n, n * n),
            &InfoArgs::new(info_ptr),
            k,
            LaunchMode::Execute,
        )
        .unwrap();
    assert_eq!(download::<i32>(info_ptr, k), vec![0; k]);
    let batched = download::<f64>(a_ptr, all.len());

    for (i, m) in mats.iter().enumerate() {
        let (lone, status) = factor_single_f64(m, n, Fill::Lower);
        assert_eq!(status, 0);
        // bit-for-bit: one instance of a batch is the same computation
        assert_eq!(&batched[i * n * n..(i + 1) * n * n], &lone[..]);
    }

    free::<f64>(a_ptr, all.len());
    free::<i32>(info_ptr, k);
}

#[test]
fn test_padded_leading_dimension_preserved() {
    // n = 2 stored with ld = 4; the padding columns must come back untouched
    let n = 2;
    let ld = 4;
    #[rustfmt::skip]
    let m = vec![
        4.0, 2.0, 777.0, 888.0,
        2.0, 10.0, 999.0, 111.0,
    ];

    let a_ptr = upload(&m);
    let info_ptr = upload(&[-1i32]);
    client()
        .potf2_batched::<f64>(
            Fill::Lower,
            n,
            &MatrixArgs::single(a_ptr, ld),
            &InfoArgs::new(info_ptr),
            1,
            LaunchMode::Execute,
        )
        .unwrap();
    assert_eq!(download::<i32>(info_ptr, 1), vec![0]);

    let out = download::<f64>(a_ptr, m.len());
    assert_eq!(out[2], 777.0);
    assert_eq!(out[3], 888.0);
    assert_eq!(out[6], 999.0);
    assert_eq!(out[7], 111.0);
    // L = [[2, 0], [1, 3]]
    assert!((out[0] - 2.0).abs() < 1e-12);
    assert!((out[4] - 1.0).abs() < 1e-12);
    assert!((out[5] - 3.0).abs() < 1e-12);

    free::<f64>(a_ptr, m.len());
    free::<i32>(info_ptr, 1);
}

#[test]
fn test_nan_diagonal_fails_that_step() {
    let n = 2;
    let m = vec![f64::NAN, 0.0, 1.0, 2.0];
    let (_, status) = factor_single_f64(&m, n, Fill::Lower);
    assert_eq!(status, 1);
}
