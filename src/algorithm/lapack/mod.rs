//! Batched LAPACK-style operation contracts
//!
//! This module defines the backend-agnostic surface of the engine: argument
//! descriptors, the workspace protocol, and the [`BatchedLapack`] trait every
//! backend implements. The contract pins down two disjoint failure classes:
//! call-level errors abort the launch with no data mutation, while numerical
//! conditions are recorded per instance in the caller's status array and the
//! call still succeeds.

pub mod args;
pub mod validate;
pub mod workspace;

pub use args::{BatchLayout, InfoArgs, LayoutKind, MatrixArgs, PivotArgs};
pub use workspace::{getri_workspace, potf2_workspace, Workspace, WorkspaceSizes};

use crate::dtype::Scalar;
use crate::error::Result;
use crate::runtime::Runtime;

/// Which triangle of the matrix an operation reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Upper triangle: A = UᴴU, factor stored on and above the diagonal
    Upper,
    /// Lower triangle: A = LLᴴ, factor stored on and below the diagonal
    Lower,
}

/// Workspace/performance trade-off for the inversion's triangular solve.
///
/// Both paths produce identical results; they differ only in scratch
/// footprint and memory-access pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InversionPath {
    /// Stage a full unit-lower copy per instance and solve against it.
    /// Larger footprint, contiguous solve traffic.
    Buffered,
    /// Column-at-a-time substitution with one staged column per instance.
    InPlace,
}

impl Default for InversionPath {
    /// The original engine always provisions the solve-optimal footprint.
    fn default() -> Self {
        InversionPath::Buffered
    }
}

/// Launch mode: one entry point serves both phases of the workspace protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Validate, plan, and report workspace sizes. Touches no matrix, pivot,
    /// or status data and requests no memory.
    WorkspaceQuery,
    /// Validate, plan, acquire scratch, run the kernels, release scratch.
    Execute,
}

/// Outcome of a successful launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// Size-query mode: the workspace the execute phase will consume
    WorkspaceSizes(WorkspaceSizes),
    /// Execute mode: work was enqueued on the execution context
    Enqueued,
}

/// Batched dense factorization and inversion, implemented per backend.
///
/// Both operations behave identically whether invoked with batch_count = 1
/// or as one instance among many: instances are data-parallel and never
/// couple through scratch. The per-instance status array receives one i32
/// per instance (0 for numerical success, a positive step index for a
/// numerical failure), and a numerical failure in one instance neither
/// aborts the call nor perturbs its neighbors.
pub trait BatchedLapack<R: Runtime> {
    /// Unblocked Cholesky factorization of the selected triangle, in place.
    ///
    /// On numerical failure of instance i at step k (the computed diagonal
    /// was not strictly positive), `info[i] = k + 1` and the instance's
    /// trailing submatrix is left unmodified.
    fn potf2_batched<T: Scalar>(
        &self,
        fill: Fill,
        n: usize,
        a: &MatrixArgs,
        info: &InfoArgs,
        batch_count: usize,
        mode: LaunchMode,
    ) -> Result<Launch>;

    /// Matrix inversion from LU factors, in place over the LU payload.
    ///
    /// `a` holds L strictly below the diagonal (unit diagonal implied) and U
    /// on and above it; `ipiv` is read-only. If instance i's U has an exactly
    /// zero diagonal at (0-based) position k - 1, `info[i] = k` and the
    /// instance is left unmodified.
    #[allow(clippy::too_many_arguments)]
    fn getri_batched<T: Scalar>(
        &self,
        n: usize,
        a: &MatrixArgs,
        ipiv: &PivotArgs,
        info: &InfoArgs,
        batch_count: usize,
        path: InversionPath,
        mode: LaunchMode,
    ) -> Result<Launch>;
}
