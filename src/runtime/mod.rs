//! Runtime backends for batched device execution
//!
//! This module defines the execution-context abstraction the engine runs
//! against and provides the CPU reference backend.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific compute unit)
//! ├── Client (dispatches operations, owns stream/queue)
//! └── Allocator (device memory pool the workspace negotiator draws from)
//! ```

mod allocator;
mod traits;

#[cfg(feature = "cpu")]
pub mod cpu;

pub use allocator::{Allocator, DefaultAllocator};
pub use traits::{Device, Runtime, RuntimeClient};
