//! Memory allocator traits and default implementation
//!
//! The allocator is the external shared resource the workspace negotiator
//! draws scratch from. It is owned by the client, not by any one call; a call
//! acquires disjoint regions, uses them, and hands every one of them back
//! before returning.

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Memory allocator trait for runtime backends
///
/// Allocation is fallible: a pool-backed device allocator refuses requests
/// that exceed its remaining capacity, and the refusal surfaces as the
/// call-level memory error.
pub trait Allocator: Clone + Send + Sync {
    /// Allocate memory of the given size
    ///
    /// Returns a device handle, or `Err(OutOfMemory)` if the request cannot
    /// be satisfied. Zero-size requests succeed and return handle 0.
    fn allocate(&self, size_bytes: usize) -> Result<u64>;

    /// Deallocate memory
    fn deallocate(&self, ptr: u64, size_bytes: usize);

    /// Bytes currently handed out by this allocator
    fn allocated_bytes(&self) -> usize {
        0 // Default: tracking not supported
    }
}

/// Default allocator that delegates to backend allocation functions
///
/// Tracks outstanding bytes and optionally enforces a byte budget, so a
/// caller can model a fixed device pool: plan workspace sizes first, then
/// hand the engine an allocator holding exactly that much.
#[derive(Clone, Debug)]
pub struct DefaultAllocator<D> {
    device: D,
    allocate_fn: fn(usize, &D) -> Result<u64>,
    deallocate_fn: fn(u64, usize, &D),
    in_use: Arc<AtomicUsize>,
    limit: Option<usize>,
}

impl<D: Clone + Send + Sync> DefaultAllocator<D> {
    /// Create a new default allocator with no byte budget
    pub fn new(
        device: D,
        allocate_fn: fn(usize, &D) -> Result<u64>,
        deallocate_fn: fn(u64, usize, &D),
    ) -> Self {
        Self {
            device,
            allocate_fn,
            deallocate_fn,
            in_use: Arc::new(AtomicUsize::new(0)),
            limit: None,
        }
    }

    /// Cap the total outstanding bytes this allocator will hand out
    pub fn with_limit(mut self, limit_bytes: usize) -> Self {
        self.limit = Some(limit_bytes);
        self
    }

    /// Get the device this allocator is associated with
    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: Clone + Send + Sync> Allocator for DefaultAllocator<D> {
    fn allocate(&self, size_bytes: usize) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        if let Some(limit) = self.limit {
            let used = self.in_use.load(Ordering::Acquire);
            if used + size_bytes > limit {
                return Err(Error::OutOfMemory { size: size_bytes });
            }
        }

        let ptr = (self.allocate_fn)(size_bytes, &self.device)?;
        self.in_use.fetch_add(size_bytes, Ordering::AcqRel);
        Ok(ptr)
    }

    fn deallocate(&self, ptr: u64, size_bytes: usize) {
        if ptr == 0 || size_bytes == 0 {
            return;
        }
        (self.deallocate_fn)(ptr, size_bytes, &self.device);
        self.in_use.fetch_sub(size_bytes, Ordering::AcqRel);
    }

    fn allocated_bytes(&self) -> usize {
        self.in_use.load(Ordering::Acquire)
    }
}
