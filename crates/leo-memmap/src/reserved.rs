//! Carving statically configured reservations out of system memory.
//!
//! The boot record chain starts with a single record spanning all of system
//! memory. Each configured reservation that lies fully inside a system-memory
//! record splits that record: the reservation becomes its own record, marked
//! present-only so nothing allocates from it, and any memory above the
//! reservation becomes a fresh system-memory record with the original
//! attributes.

use leo_boot_hob::{HobChain, ResourceAttributes, ResourceDescriptor, ResourceType};
use leo_plat_constants as plat;

/// Statically configured carveout inside system memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedRange {
    pub offset: u64,
    pub size: u64,
}

/// Shipped reservation list.
pub const LEO_RESERVED_MEMORY: &[ReservedRange] = &[
    // ReservedRange { offset: 0xBF70_0000, size: 0x00F0_0000 }, // tz_apps_region
];

/// Boot-time memory configuration, normally read from the platform config
/// store before this stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    pub system_memory_base: u64,
    pub system_memory_size: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            system_memory_base: plat::SYSTEM_MEMORY_BASE,
            system_memory_size: plat::SYSTEM_MEMORY_SIZE,
        }
    }
}

/// Attributes of freshly registered system memory.
const SYSTEM_MEMORY_ATTRIBUTES: ResourceAttributes = ResourceAttributes::PRESENT
    .union(ResourceAttributes::INITIALIZED)
    .union(ResourceAttributes::WRITE_COMBINEABLE)
    .union(ResourceAttributes::WRITE_THROUGH_CACHEABLE)
    .union(ResourceAttributes::WRITE_BACK_CACHEABLE)
    .union(ResourceAttributes::TESTED);

/// How many configured reservations were actually carved out of the chain.
///
/// A shortfall is not an error: a reservation that falls outside every
/// system-memory record is skipped, and the report is how callers observe
/// the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationOutcome {
    pub applied: usize,
    pub configured: usize,
}

impl ReservationOutcome {
    pub fn fully_applied(&self) -> bool {
        self.applied == self.configured
    }
}

/// Register the record covering all of configured system memory.
///
/// Runs exactly once per boot, before any splitting, whether or not any
/// reservations are configured.
pub fn register_system_memory(chain: &mut HobChain, config: &MemoryConfig) {
    chain.push(ResourceDescriptor::new(
        ResourceType::SystemMemory,
        SYSTEM_MEMORY_ATTRIBUTES,
        config.system_memory_base,
        config.system_memory_size,
    ));
}

/// Split every matched reservation out of the chain, in list order.
///
/// One forward scan over the chain; each reservation is matched at most once,
/// against the first system-memory record that fully contains it. Records
/// appended during splitting sit past the scan position, so a later
/// reservation can land in the leftover of an earlier split.
pub fn apply_reserved_ranges(chain: &mut HobChain, reserved: &[ReservedRange]) -> ReservationOutcome {
    let configured = reserved.len();
    let mut applied = 0;
    let mut pos = 0;

    while let Some(index) = chain.next_of_type(pos, ResourceType::SystemMemory) {
        let Some(range) = reserved.get(applied) else {
            break;
        };
        let Some(record) = chain.get(index).copied() else {
            break;
        };

        if record.contains_range(range.offset, range.size) {
            let resource_top = record.end();
            let reserved_top = range.offset.saturating_add(range.size);

            chain.push(ResourceDescriptor::new(
                ResourceType::MemoryReserved,
                ResourceAttributes::PRESENT,
                range.offset,
                range.size,
            ));

            // Shrink the matched record so it ends where the reservation begins.
            if let Some(matched) = chain.get_mut(index) {
                matched.length = range.offset - matched.physical_start;
            }

            // Memory above the reservation stays system memory.
            if reserved_top < resource_top {
                chain.push(ResourceDescriptor::new(
                    ResourceType::SystemMemory,
                    record.attributes,
                    reserved_top,
                    resource_top - reserved_top,
                ));
            }

            log::debug!(
                "reserved 0x{:x}+0x{:x} split out of system memory 0x{:x}+0x{:x}",
                range.offset,
                range.size,
                record.physical_start,
                record.length,
            );
            applied += 1;
        }
        pos = index + 1;
    }

    if applied < configured {
        log::warn!(
            "{} of {} reserved ranges matched no system-memory record",
            configured - applied,
            configured,
        );
    }
    ReservationOutcome { applied, configured }
}
