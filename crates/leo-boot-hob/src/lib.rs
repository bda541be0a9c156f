#![forbid(unsafe_code)]

//! Boot-time resource descriptor records and the chain that holds them.
//!
//! Early boot stages describe discovered and declared memory regions as an
//! ordered, append-only chain of resource descriptors (the firmware hand-off
//! block list). Records are appended as regions are discovered and may later
//! be split in place when reservations are carved out; they are never freed,
//! because the chain stays live until the OS hand-off.

use bitflags::bitflags;

bitflags! {
    /// Capability flags of a physical memory resource.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResourceAttributes: u32 {
        const PRESENT = 1 << 0;
        const INITIALIZED = 1 << 1;
        const TESTED = 1 << 2;
        const UNCACHEABLE = 1 << 3;
        const WRITE_COMBINEABLE = 1 << 4;
        const WRITE_THROUGH_CACHEABLE = 1 << 5;
        const WRITE_BACK_CACHEABLE = 1 << 6;
    }
}

/// Kind of physical resource a descriptor covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// Memory usable for general allocation.
    SystemMemory,
    /// Memory explicitly excluded from general allocation.
    MemoryReserved,
    /// Memory-mapped device registers.
    MemoryMappedIo,
    /// Firmware storage device window.
    FirmwareDevice,
}

/// One record on the boot chain: a typed physical address range with
/// capability attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub resource_type: ResourceType,
    pub attributes: ResourceAttributes,
    pub physical_start: u64,
    pub length: u64,
}

impl ResourceDescriptor {
    pub fn new(
        resource_type: ResourceType,
        attributes: ResourceAttributes,
        physical_start: u64,
        length: u64,
    ) -> Self {
        Self {
            resource_type,
            attributes,
            physical_start,
            length,
        }
    }

    /// Physical address immediately past the last byte of the resource.
    pub fn end(&self) -> u64 {
        self.physical_start.saturating_add(self.length)
    }

    /// Whether `[offset, offset + size)` lies fully inside this record.
    pub fn contains_range(&self, offset: u64, size: u64) -> bool {
        match offset.checked_add(size) {
            Some(top) => offset >= self.physical_start && top <= self.end(),
            None => false,
        }
    }
}

/// The boot record chain: ordered, append-only, split-in-place.
///
/// The chain is passed explicitly to everything that reads or mutates it, so
/// callers (and tests) never depend on hidden global state.
#[derive(Debug, Default, Clone)]
pub struct HobChain {
    records: Vec<ResourceDescriptor>,
}

impl HobChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record and return its chain index.
    pub fn push(&mut self, record: ResourceDescriptor) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&ResourceDescriptor> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ResourceDescriptor> {
        self.records.get_mut(index)
    }

    /// Index of the next record of `resource_type` at or after `start`.
    pub fn next_of_type(&self, start: usize, resource_type: ResourceType) -> Option<usize> {
        self.records[start.min(self.records.len())..]
            .iter()
            .position(|record| record.resource_type == resource_type)
            .map(|offset| start + offset)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ResourceDescriptor] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system_memory(start: u64, length: u64) -> ResourceDescriptor {
        ResourceDescriptor::new(
            ResourceType::SystemMemory,
            ResourceAttributes::PRESENT | ResourceAttributes::TESTED,
            start,
            length,
        )
    }

    #[test]
    fn push_returns_ascending_indices() {
        let mut chain = HobChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.push(system_memory(0x8000_0000, 0x1000)), 0);
        assert_eq!(chain.push(system_memory(0x9000_0000, 0x1000)), 1);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn next_of_type_skips_other_record_kinds() {
        let mut chain = HobChain::new();
        chain.push(system_memory(0x8000_0000, 0x1000));
        chain.push(ResourceDescriptor::new(
            ResourceType::MemoryReserved,
            ResourceAttributes::PRESENT,
            0x9000_0000,
            0x1000,
        ));
        chain.push(system_memory(0xA000_0000, 0x1000));

        assert_eq!(chain.next_of_type(0, ResourceType::SystemMemory), Some(0));
        assert_eq!(chain.next_of_type(1, ResourceType::SystemMemory), Some(2));
        assert_eq!(chain.next_of_type(3, ResourceType::SystemMemory), None);
        assert_eq!(chain.next_of_type(0, ResourceType::MemoryMappedIo), None);
        // Starting past the end is a graceful miss, not a panic.
        assert_eq!(chain.next_of_type(17, ResourceType::SystemMemory), None);
    }

    #[test]
    fn contains_range_checks_both_bounds() {
        let record = system_memory(0x8000_0000, 0x1000_0000);
        assert!(record.contains_range(0x8000_0000, 0x1000_0000));
        assert!(record.contains_range(0x8F00_0000, 0x0100_0000));
        assert!(!record.contains_range(0x7FFF_F000, 0x1000));
        assert!(!record.contains_range(0x8FFF_F000, 0x2000));
        assert!(!record.contains_range(0x8000_0000, u64::MAX));
    }

    #[test]
    fn end_saturates_instead_of_wrapping() {
        let record = system_memory(u64::MAX - 0x10, 0x100);
        assert_eq!(record.end(), u64::MAX);
    }
}
