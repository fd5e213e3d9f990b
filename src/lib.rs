//! # factr
//!
//! **Batched dense matrix factorization and inversion with device workspace
//! negotiation.**
//!
//! factr runs LAPACK-equivalent operations (unblocked Cholesky factorization
//! and matrix inversion from LU factors) across thousands of independent
//! small-to-medium matrices submitted as one call, negotiating scratch memory
//! with the execution client's allocator.
//!
//! ## Why factr?
//!
//! - **Two-phase workspace protocol**: scratch sizes are a pure function of
//!   problem shape; plan first, then execute against exactly that much memory
//! - **Three batch layouts**: single matrix, fixed-stride batch, or an array
//!   of per-instance pointers, with one kernel body serving all three
//! - **Per-instance status**: a numerical failure in one matrix never aborts
//!   the call or perturbs its neighbors
//! - **Precision-generic**: one algorithm body instantiated for f32, f64,
//!   and the interleaved complex types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use factr::prelude::*;
//!
//! let device = CpuRuntime::default_device();
//! let client = CpuRuntime::default_client(&device);
//!
//! // Phase 1: ask how much scratch the call needs
//! let a = MatrixArgs::strided(a_ptr, n, n * n);
//! let info = InfoArgs::new(info_ptr);
//! let sizes = match client.potf2_batched::<f64>(
//!     Fill::Lower, n, &a, &info, batch, LaunchMode::WorkspaceQuery,
//! )? {
//!     Launch::WorkspaceSizes(s) => s,
//!     Launch::Enqueued => unreachable!(),
//! };
//!
//! // Phase 2: execute; per-instance statuses land in the info array
//! client.potf2_batched::<f64>(Fill::Lower, n, &a, &info, batch, LaunchMode::Execute)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `cpu` (default): CPU reference backend
//! - `rayon` (default): data-parallel batch execution on the CPU backend

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod dtype;
pub mod error;
pub mod runtime;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::lapack::{
        BatchLayout, BatchedLapack, Fill, InfoArgs, InversionPath, Launch, LaunchMode, MatrixArgs,
        PivotArgs, WorkspaceSizes,
    };
    pub use crate::dtype::{Complex64, Complex128, DType, Element, Scalar};
    pub use crate::error::{Error, Result};
    pub use crate::runtime::{Allocator, Device, Runtime, RuntimeClient};

    #[cfg(feature = "cpu")]
    pub use crate::runtime::cpu::CpuRuntime;
}

/// Default runtime based on enabled features
#[cfg(feature = "cpu")]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
