//! Boot page pool seam used by the virtual map builder.
//!
//! Pre-MMU boot allocation is a bump pool: whole pages, zero-filled, never
//! reclaimed. Anything handed out stays live until the OS hand-off.

use leo_plat_constants::PAGE_SIZE;

use crate::virt_map::MemoryRegionDescriptor;

/// Number of whole boot pages needed to hold `entries` descriptors.
pub fn pages_for(entries: usize) -> usize {
    let bytes = entries * core::mem::size_of::<MemoryRegionDescriptor>();
    bytes.div_ceil(PAGE_SIZE as usize)
}

/// Page-granular boot allocator.
///
/// `allocate_table` returns `None` when the pool is exhausted; the caller
/// treats that as a fatal boot condition. There is no free operation.
pub trait BootPagePool {
    /// Allocate page-aligned, zero-initialized storage for `entries`
    /// descriptor table slots.
    fn allocate_table(&mut self, entries: usize) -> Option<Box<[MemoryRegionDescriptor]>>;
}

/// Fixed-budget bump pool.
#[derive(Debug)]
pub struct BumpPagePool {
    pages_left: usize,
}

impl BumpPagePool {
    pub fn new(pages: usize) -> Self {
        Self { pages_left: pages }
    }

    pub fn pages_left(&self) -> usize {
        self.pages_left
    }
}

impl BootPagePool for BumpPagePool {
    fn allocate_table(&mut self, entries: usize) -> Option<Box<[MemoryRegionDescriptor]>> {
        let pages = pages_for(entries);
        if pages > self.pages_left {
            return None;
        }
        self.pages_left -= pages;
        Some(vec![MemoryRegionDescriptor::SENTINEL; entries].into_boxed_slice())
    }
}
