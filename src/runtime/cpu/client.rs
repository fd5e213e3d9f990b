//! CPU client and allocator implementation

use super::device::CpuDevice;
use super::runtime::{cpu_alloc, cpu_dealloc, CpuRuntime};
use crate::runtime::{DefaultAllocator, RuntimeClient};

/// CPU client for operation dispatch
#[derive(Clone, Debug)]
pub struct CpuClient {
    pub(crate) device: CpuDevice,
    allocator: CpuAllocator,
}

impl CpuClient {
    /// Create a new CPU client with an unbounded allocator
    pub fn new(device: CpuDevice) -> Self {
        let allocator = create_cpu_allocator(device.clone());
        Self { device, allocator }
    }

    /// Create a CPU client whose allocator holds at most `pool_bytes`
    ///
    /// Models a fixed device pool: a caller that plans workspace sizes ahead
    /// of time can hand the engine exactly that much scratch capacity.
    pub fn with_memory_limit(device: CpuDevice, pool_bytes: usize) -> Self {
        let allocator = create_cpu_allocator(device.clone()).with_limit(pool_bytes);
        Self { device, allocator }
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn synchronize(&self) {
        // CPU operations are synchronous, nothing to do
    }

    fn allocator(&self) -> &CpuAllocator {
        &self.allocator
    }
}

/// CPU-specific allocator type alias
pub type CpuAllocator = DefaultAllocator<CpuDevice>;

/// Create a CPU allocator for the given device
fn create_cpu_allocator(device: CpuDevice) -> CpuAllocator {
    DefaultAllocator::new(
        device,
        |size, _dev| cpu_alloc(size),
        |ptr, size, _dev| cpu_dealloc(ptr, size),
    )
}
