#![forbid(unsafe_code)]

//! Boot-time memory map construction for the Leo platform.
//!
//! Two jobs, each run exactly once per boot, before the MMU is enabled:
//!
//! - carve the statically configured reserved ranges out of the system-memory
//!   records on the boot record chain ([`reserved`]), and
//! - build the fixed-capacity virtual region table the MMU setup stage
//!   programs from ([`virt_map`]).
//!
//! Everything here is single-threaded by construction: it runs before any
//! scheduler or secondary core exists, and it is the only mutator of the
//! record chain during its execution window.

pub mod pool;
pub mod reserved;
pub mod virt_map;

pub use pool::{pages_for, BootPagePool, BumpPagePool};
pub use reserved::{
    apply_reserved_ranges, register_system_memory, MemoryConfig, ReservationOutcome,
    ReservedRange, LEO_RESERVED_MEMORY,
};
pub use virt_map::{
    build_virtual_memory_map, fill_virtual_memory_map, MemoryMapError, MemoryRegionAttributes,
    MemoryRegionDescriptor, VirtualMemoryMap, LEO_MEMORY_MAP, MAX_VIRTUAL_MEMORY_MAP_DESCRIPTORS,
};

use leo_boot_hob::HobChain;

/// Everything the boot caller gets back from [`platform_get_virtual_memory_map`].
#[derive(Debug)]
pub struct PlatformMemoryMap {
    pub virtual_memory_map: VirtualMemoryMap,
    pub reservations: ReservationOutcome,
}

/// The single boot-time entry point.
///
/// Registers the base system-memory record, carves out `reserved`, then
/// allocates and fills the virtual region table. Errors are fatal boot
/// conditions; unmatched reservations are not errors and are reported via
/// [`ReservationOutcome`].
pub fn platform_get_virtual_memory_map(
    chain: &mut HobChain,
    pool: &mut dyn BootPagePool,
    config: &MemoryConfig,
    reserved: &[ReservedRange],
) -> Result<PlatformMemoryMap, MemoryMapError> {
    register_system_memory(chain, config);
    let reservations = apply_reserved_ranges(chain, reserved);
    let virtual_memory_map = build_virtual_memory_map(pool, MAX_VIRTUAL_MEMORY_MAP_DESCRIPTORS)?;
    Ok(PlatformMemoryMap {
        virtual_memory_map,
        reservations,
    })
}
