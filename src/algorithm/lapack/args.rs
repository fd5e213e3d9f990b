//! Argument descriptors and the batch-layout adapter
//!
//! A batched call addresses its instances in one of three ways; the layout is
//! resolved once per call and the kernel body is agnostic to which mode is
//! active. All addresses are device handles owned by the caller for the
//! duration of the call.

use crate::dtype::Element;

/// How the instances of a batched call are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchLayout {
    /// One matrix; batch_count is fixed at 1.
    Single,
    /// Instance i's base = handle + i * stride elements.
    Strided {
        /// Inter-instance stride in elements
        stride: usize,
    },
    /// The descriptor handle addresses a device array of `batch_count`
    /// per-instance base addresses (u64 each).
    PointerArray,
}

/// Layout tag consumed by the workspace planner.
///
/// The planner needs to know whether pointer staging is required, but not the
/// concrete stride or pointer values; sizes stay a pure function of shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Single-instance call
    Single,
    /// Fixed inter-instance stride
    Strided,
    /// Per-instance pointer array
    PointerArray,
}

impl BatchLayout {
    /// The shape-only tag for this layout
    pub fn kind(&self) -> LayoutKind {
        match self {
            BatchLayout::Single => LayoutKind::Single,
            BatchLayout::Strided { .. } => LayoutKind::Strided,
            BatchLayout::PointerArray => LayoutKind::PointerArray,
        }
    }
}

/// Descriptor for one matrix operand (possibly batched).
///
/// Row-major storage: element (i, j) of an instance lives at
/// `base + i * ld + j` elements. Invariant: `ld >= max(1, n)`.
#[derive(Debug, Clone, Copy)]
pub struct MatrixArgs {
    /// Device address of the first instance, or of the pointer array for
    /// `BatchLayout::PointerArray`
    pub handle: u64,
    /// Leading dimension: row-to-row element stride within one instance
    pub ld: usize,
    /// Instance addressing mode
    pub layout: BatchLayout,
}

impl MatrixArgs {
    /// Descriptor for a single matrix
    pub fn single(handle: u64, ld: usize) -> Self {
        Self {
            handle,
            ld,
            layout: BatchLayout::Single,
        }
    }

    /// Descriptor for a strided batch
    pub fn strided(handle: u64, ld: usize, stride: usize) -> Self {
        Self {
            handle,
            ld,
            layout: BatchLayout::Strided { stride },
        }
    }

    /// Descriptor for a pointer-array batch
    ///
    /// `handle` addresses a device array of per-instance base addresses.
    pub fn pointer_array(handle: u64, ld: usize) -> Self {
        Self {
            handle,
            ld,
            layout: BatchLayout::PointerArray,
        }
    }

    /// Byte offset of instance `i`'s base for the contiguous layouts.
    ///
    /// Pointer-array instances are resolved by the backend from the staged
    /// pointer region instead.
    pub fn instance_offset<T: Element>(&self, i: usize) -> usize {
        match self.layout {
            BatchLayout::Single => 0,
            BatchLayout::Strided { stride } => i * stride * std::mem::size_of::<T>(),
            BatchLayout::PointerArray => 0,
        }
    }
}

/// Descriptor for the pivot vectors consumed by inversion.
///
/// Instance i's pivots are `n` i32 values at `handle + i * stride` elements.
/// Pivot entries are 0-based row indices, one per column, and are read-only
/// to the engine.
#[derive(Debug, Clone, Copy)]
pub struct PivotArgs {
    /// Device address of the first instance's pivot vector
    pub handle: u64,
    /// Inter-instance stride in elements
    pub stride: usize,
}

impl PivotArgs {
    /// Create a pivot descriptor
    pub fn new(handle: u64, stride: usize) -> Self {
        Self { handle, stride }
    }

    /// Byte offset of instance `i`'s pivot vector
    pub fn instance_offset(&self, i: usize) -> usize {
        i * self.stride * std::mem::size_of::<i32>()
    }
}

/// Descriptor for the per-instance status output array.
///
/// One i32 per instance, contiguous. 0 = numerical success; a positive value
/// k marks the step at which the instance's factorization or inversion
/// stopped. Written by every execute-mode call with batch_count > 0.
#[derive(Debug, Clone, Copy)]
pub struct InfoArgs {
    /// Device address of the status array
    pub handle: u64,
}

impl InfoArgs {
    /// Create a status-array descriptor
    pub fn new(handle: u64) -> Self {
        Self { handle }
    }
}
