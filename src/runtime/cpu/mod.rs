//! CPU runtime implementation
//!
//! The CPU runtime uses standard heap allocation and serves as the reference
//! backend for the batched kernels. Device handles are heap addresses; the
//! client executes enqueued work synchronously, so `synchronize` is a no-op
//! and scratch release after a kernel call is always safely sequenced.

mod client;
mod device;
mod lapack;
mod runtime;

pub use client::{CpuAllocator, CpuClient};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
