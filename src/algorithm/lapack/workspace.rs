//! Workspace planning and negotiation
//!
//! Sizes are a pure function of (n, batch_count, variant), never of matrix
//! data, so a caller can plan ahead of execution and provision exactly the
//! reported bytes. The execute path consumes the same planning functions;
//! there is no re-planning at execute time.
//!
//! Regions are planned per instance: instance i's slice of a region starts at
//! `i * (region_size / batch_count)` bytes, so data-parallel instances never
//! share scratch.

use super::args::LayoutKind;
use super::InversionPath;
use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::{Allocator, Runtime, RuntimeClient};

/// Sizes in bytes of the named scratch regions one call may use.
///
/// A region an operation does not need is planned at zero bytes and never
/// allocated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkspaceSizes {
    /// Triangular-solve scratch
    pub solve: usize,
    /// Triangular-inversion scratch
    pub invert: usize,
    /// Staging-copy scratch
    pub copy: usize,
    /// Per-instance pointer staging (pointer-batch layouts only)
    pub ptrs: usize,
}

impl WorkspaceSizes {
    /// Total bytes across all regions
    pub fn total(&self) -> usize {
        self.solve + self.invert + self.copy + self.ptrs
    }

    /// Whether every region is empty
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn ptr_region(batch_count: usize, layout: LayoutKind) -> usize {
    match layout {
        LayoutKind::PointerArray => batch_count * std::mem::size_of::<u64>(),
        _ => 0,
    }
}

/// Workspace plan for the unblocked Cholesky factorization.
///
/// One staged row/column of up to n conjugated factor entries per instance,
/// plus pointer staging when the layout requires it.
pub fn potf2_workspace<T: Element>(
    n: usize,
    batch_count: usize,
    layout: LayoutKind,
) -> WorkspaceSizes {
    if n == 0 || batch_count == 0 {
        return WorkspaceSizes::default();
    }

    WorkspaceSizes {
        solve: 0,
        invert: 0,
        copy: n * std::mem::size_of::<T>() * batch_count,
        ptrs: ptr_region(batch_count, layout),
    }
}

/// Workspace plan for inversion from LU factors.
///
/// The triangular-inversion stage needs one column of up to n entries per
/// instance. The solve stage needs a full n×n unit-lower copy per instance on
/// the buffered path, or a single column per instance on the minimal path.
pub fn getri_workspace<T: Element>(
    n: usize,
    batch_count: usize,
    layout: LayoutKind,
    path: InversionPath,
) -> WorkspaceSizes {
    if n == 0 || batch_count == 0 {
        return WorkspaceSizes::default();
    }

    let elem = std::mem::size_of::<T>();
    let solve_per_instance = match path {
        InversionPath::Buffered => n * n * elem,
        InversionPath::InPlace => n * elem,
    };

    WorkspaceSizes {
        solve: solve_per_instance * batch_count,
        invert: n * elem * batch_count,
        copy: 0,
        ptrs: ptr_region(batch_count, layout),
    }
}

/// Scratch regions acquired from the client's allocator for one call.
///
/// Acquisition is all-or-nothing: a refusal on any region rolls back the ones
/// already held and surfaces as the call's memory error. Release is explicit
/// (there is no Drop), and the launch path hands every region back on every
/// exit, after the execution context has sequenced the kernel work.
#[derive(Debug)]
pub struct Workspace {
    /// Triangular-solve scratch handle
    pub solve: u64,
    /// Triangular-inversion scratch handle
    pub invert: u64,
    /// Staging-copy scratch handle
    pub copy: u64,
    /// Pointer-staging handle
    pub ptrs: u64,
    sizes: WorkspaceSizes,
}

impl Workspace {
    /// Acquire every planned region from the client's allocator.
    pub fn acquire<R: Runtime>(client: &R::Client, sizes: WorkspaceSizes) -> Result<Self> {
        let alloc = client.allocator();
        let requests = [sizes.solve, sizes.invert, sizes.copy, sizes.ptrs];
        let mut held = [0u64; 4];

        for (idx, &size) in requests.iter().enumerate() {
            match alloc.allocate(size) {
                Ok(ptr) => held[idx] = ptr,
                Err(e) => {
                    // roll back the regions already held
                    for prev in 0..idx {
                        if requests[prev] > 0 {
                            alloc.deallocate(held[prev], requests[prev]);
                        }
                    }
                    return Err(e);
                }
            }
        }

        Ok(Self {
            solve: held[0],
            invert: held[1],
            copy: held[2],
            ptrs: held[3],
            sizes,
        })
    }

    /// The sizes this workspace was acquired with
    pub fn sizes(&self) -> WorkspaceSizes {
        self.sizes
    }

    /// Hand every region back to the client's allocator.
    pub fn release<R: Runtime>(self, client: &R::Client) {
        let alloc = client.allocator();
        alloc.deallocate(self.solve, self.sizes.solve);
        alloc.deallocate(self.invert, self.sizes.invert);
        alloc.deallocate(self.copy, self.sizes.copy);
        alloc.deallocate(self.ptrs, self.sizes.ptrs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_is_shape_only() {
        let a = potf2_workspace::<f64>(16, 8, LayoutKind::Strided);
        let b = potf2_workspace::<f64>(16, 8, LayoutKind::Strided);
        assert_eq!(a, b);
        assert_eq!(a.copy, 16 * 8 * 8);
        assert_eq!(a.ptrs, 0);
        assert_eq!(a.solve + a.invert, 0);
    }

    #[test]
    fn test_pointer_layout_adds_staging() {
        let s = potf2_workspace::<f32>(4, 10, LayoutKind::PointerArray);
        assert_eq!(s.ptrs, 10 * 8);
    }

    #[test]
    fn test_zero_shapes_plan_empty() {
        assert!(potf2_workspace::<f64>(0, 5, LayoutKind::Strided).is_empty());
        assert!(getri_workspace::<f64>(7, 0, LayoutKind::Single, InversionPath::Buffered).is_empty());
    }

    #[test]
    fn test_getri_paths_differ_in_solve_only() {
        let big = getri_workspace::<f64>(6, 3, LayoutKind::Strided, InversionPath::Buffered);
        let small = getri_workspace::<f64>(6, 3, LayoutKind::Strided, InversionPath::InPlace);
        assert_eq!(big.solve, 6 * 6 * 8 * 3);
        assert_eq!(small.solve, 6 * 8 * 3);
        assert_eq!(big.invert, small.invert);
        assert_eq!(big.ptrs, small.ptrs);
    }
}
