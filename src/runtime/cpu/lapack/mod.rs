//! CPU implementation of the batched LAPACK contracts
//!
//! The launch path follows the protocol pinned down in [`crate::algorithm`]:
//! validate, plan, short-circuit on a size query or an empty shape, acquire
//! scratch, bind the batch layout once, run the per-instance kernels
//! data-parallel, release scratch. The CPU client executes enqueued work
//! synchronously, so the release after the kernel loop is always sequenced
//! behind the work it protects.

mod blas;
mod getri;
mod potf2;


use super::{CpuClient, CpuRuntime};
use crate::algorithm::lapack::{
    getri_workspace, potf2_workspace, validate, BatchLayout, BatchedLapack, Fill, InfoArgs,
    InversionPath, Launch, LaunchMode, MatrixArgs, PivotArgs, Workspace,
};
use crate::dtype::Scalar;
use crate::error::Result;
use crate::runtime::{Runtime, RuntimeClient};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Run the per-instance closure over the whole batch, data-parallel when the
/// `rayon` feature is on.
fn for_each_instance<F>(batch_count: usize, f: F)
where
    F: Fn(usize) + Send + Sync,
{
    #[cfg(feature = "rayon")]
    (0..batch_count).into_par_iter().for_each(f);

    #[cfg(not(feature = "rayon"))]
    for i in 0..batch_count {
        f(i);
    }
}

/// Per-call resolution of the batch layout: one accessor the kernels use for
/// every instance, chosen once.
#[derive(Clone, Copy)]
enum Instances {
    /// Single and strided layouts: base plus fixed byte stride
    Offset { base: u64, stride_bytes: usize },
    /// Pointer-array layout: bases staged into the workspace pointer region
    Staged { ptrs: u64 },
}

impl Instances {
    /// Resolve the layout, staging the caller's pointer array into the
    /// workspace pointer region when one is in play.
    fn bind<T: Scalar>(
        client: &CpuClient,
        a: &MatrixArgs,
        ws: &Workspace,
        batch_count: usize,
    ) -> Result<Self> {
        match a.layout {
            BatchLayout::Single | BatchLayout::Strided { .. } => Ok(Instances::Offset {
                base: a.handle,
                stride_bytes: a.instance_offset::<T>(1),
            }),
            BatchLayout::PointerArray => {
                let bytes = batch_count * std::mem::size_of::<u64>();
                CpuRuntime::copy_within_device(a.handle, ws.ptrs, bytes, client.device())?;
                Ok(Instances::Staged { ptrs: ws.ptrs })
            }
        }
    }

    /// Base pointer of instance `i`.
    ///
    /// # Safety
    /// `i` must be within the bound batch; staged pointers must address live
    /// instances.
    unsafe fn base<T: Scalar>(&self, i: usize) -> *mut T {
        match *self {
            Instances::Offset { base, stride_bytes } => {
                (base as usize + i * stride_bytes) as *mut T
            }
            Instances::Staged { ptrs } => *(ptrs as *const u64).add(i) as *mut T,
        }
    }
}

impl BatchedLapack<CpuRuntime> for CpuClient {
    fn potf2_batched<T: Scalar>(
        &self,
        fill: Fill,
        n: usize,
        a: &MatrixArgs,
        info: &InfoArgs,
        batch_count: usize,
        mode: LaunchMode,
    ) -> Result<Launch> {
        validate::potf2_args(n, a, info, batch_count)?;

        let sizes = potf2_workspace::<T>(n, batch_count, a.layout.kind());
        if mode == LaunchMode::WorkspaceQuery {
            return Ok(Launch::WorkspaceSizes(sizes));
        }

        // Valid empty shapes complete without requesting scratch.
        if n == 0 || batch_count == 0 {
            if batch_count > 0 {
                unsafe { blas::fill_i32(info.handle as *mut i32, batch_count, 0) };
            }
            return Ok(Launch::Enqueued);
        }

        let ws = Workspace::acquire::<CpuRuntime>(self, sizes)?;

        let run = (|| -> Result<()> {
            let insts = Instances::bind::<T>(self, a, &ws, batch_count)?;
            let ld = a.ld;
            let work_base = ws.copy;
            let work_stride = n * std::mem::size_of::<T>();
            let info_base = info.handle;

            for_each_instance(batch_count, move |i| unsafe {
                let inst = insts.base::<T>(i);
                let work = (work_base as usize + i * work_stride) as *mut T;
                let status = potf2::potf2(fill, n, inst, ld, work);
                *(info_base as *mut i32).add(i) = status;
            });
            Ok(())
        })();

        ws.release::<CpuRuntime>(self);
        run?;

        Ok(Launch::Enqueued)
    }

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
    ) -> Result<Launch> {
        validate::getri_args(n, a, ipiv, info, batch_count)?;

        let sizes = getri_workspace::<T>(n, batch_count, a.layout.kind(), path);
        if mode == LaunchMode::WorkspaceQuery {
            return Ok(Launch::WorkspaceSizes(sizes));
        }

        if n == 0 || batch_count == 0 {
            if batch_count > 0 {
                unsafe { blas::fill_i32(info.handle as *mut i32, batch_count, 0) };
            }
            return Ok(Launch::Enqueued);
        }

        let ws = Workspace::acquire::<CpuRuntime>(self, sizes)?;

        let run = (|| -> Result<()> {
            let insts = Instances::bind::<T>(self, a, &ws, batch_count)?;
            let ld = a.ld;
            let elem = std::mem::size_of::<T>();
            let solve_base = ws.solve;
            let solve_stride = match path {
                InversionPath::Buffered => n * n * elem,
                InversionPath::InPlace => n * elem,
            };
            let invert_base = ws.invert;
            let invert_stride = n * elem;
            let ipiv_args = *ipiv;
            let info_base = info.handle;

            for_each_instance(batch_count, move |i| unsafe {
                let inst = insts.base::<T>(i);
                let piv = (ipiv_args.handle as usize + ipiv_args.instance_offset(i)) as *const i32;
                let solve = (solve_base as usize + i * solve_stride) as *mut T;
                let invert = (invert_base as usize + i * invert_stride) as *mut T;
                let status = getri::getri(n, inst, ld, piv, path, solve, invert);
                *(info_base as *mut i32).add(i) = status;
            });
            Ok(())
        })();

        ws.release::<CpuRuntime>(self);
        run?;

        Ok(Launch::Enqueued)
    }
}
