//! The fixed-capacity virtual memory region table.
//!
//! The MMU setup stage walks this table to build page tables and cacheability
//! attributes. The platform layout itself is pure data ([`LEO_MEMORY_MAP`]);
//! the builder only copies it into allocated storage and appends the
//! end-of-table sentinel.

use thiserror::Error;

use leo_plat_constants as plat;

use crate::pool::BootPagePool;

/// Total descriptor capacity of the platform table, final sentinel included.
pub const MAX_VIRTUAL_MEMORY_MAP_DESCRIPTORS: usize = 12;

/// Cacheability class of a mapped region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MemoryRegionAttributes {
    /// Attribute of the end-of-table sentinel; never used for a real region.
    Unmapped = 0,
    Device = 1,
    WriteBackCached = 2,
    WriteThroughCached = 3,
    Uncached = 4,
}

/// One virtual-to-physical region mapping handed to the MMU setup stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegionDescriptor {
    pub physical_base: u64,
    pub virtual_base: u64,
    pub length: u64,
    pub attributes: MemoryRegionAttributes,
}

impl MemoryRegionDescriptor {
    /// All-zero entry marking the end of a table.
    pub const SENTINEL: Self = Self {
        physical_base: 0,
        virtual_base: 0,
        length: 0,
        attributes: MemoryRegionAttributes::Unmapped,
    };

    /// Identity-mapped region: virtual base equals physical base.
    pub const fn identity(base: u64, length: u64, attributes: MemoryRegionAttributes) -> Self {
        Self {
            physical_base: base,
            virtual_base: base,
            length,
            attributes,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

/// The Leo physical address-space layout, in the order the MMU stage programs
/// it. Every region is identity-mapped.
pub const LEO_MEMORY_MAP: [MemoryRegionDescriptor; 6] = [
    // On-SoC SRAM / boot ROM.
    MemoryRegionDescriptor::identity(
        plat::SRAM_BASE,
        plat::SRAM_SIZE,
        MemoryRegionAttributes::Device,
    ),
    // SoC peripheral registers.
    MemoryRegionDescriptor::identity(
        plat::SOC_REGISTERS_BASE,
        plat::SOC_REGISTERS_SIZE,
        MemoryRegionAttributes::Device,
    ),
    // SMI aperture (GPU / co-processor firmware).
    MemoryRegionDescriptor::identity(
        plat::SMI_APERTURE_BASE,
        plat::SMI_APERTURE_SIZE,
        MemoryRegionAttributes::Device,
    ),
    // Firmware volume.
    MemoryRegionDescriptor::identity(
        plat::FIRMWARE_VOLUME_BASE,
        plat::FIRMWARE_VOLUME_SIZE,
        MemoryRegionAttributes::WriteBackCached,
    ),
    // DDR free memory.
    MemoryRegionDescriptor::identity(
        plat::FREE_MEMORY_BASE,
        plat::FREE_MEMORY_SIZE,
        MemoryRegionAttributes::WriteBackCached,
    ),
    // Display framebuffer carveout.
    MemoryRegionDescriptor::identity(
        plat::DISPLAY_RESERVED_BASE,
        plat::DISPLAY_RESERVED_SIZE,
        MemoryRegionAttributes::WriteThroughCached,
    ),
];

/// Errors building the virtual memory map. Both variants are fatal boot
/// conditions for the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryMapError {
    #[error("boot page pool exhausted allocating a {requested}-entry descriptor table")]
    OutOfPages { requested: usize },
    #[error("memory map needs {required} entries but the table holds {capacity}")]
    TableOverflow { required: usize, capacity: usize },
}

/// Copy the platform layout into `table` and append the end-of-table
/// sentinel. Returns the populated entry count, sentinel included.
pub fn fill_virtual_memory_map(
    table: &mut [MemoryRegionDescriptor],
) -> Result<usize, MemoryMapError> {
    let required = LEO_MEMORY_MAP.len() + 1;
    if table.len() < required {
        return Err(MemoryMapError::TableOverflow {
            required,
            capacity: table.len(),
        });
    }
    table[..LEO_MEMORY_MAP.len()].copy_from_slice(&LEO_MEMORY_MAP);
    table[LEO_MEMORY_MAP.len()] = MemoryRegionDescriptor::SENTINEL;
    Ok(required)
}

/// Sentinel-terminated region table, owned by the boot stage that requested
/// it for the rest of firmware execution.
#[derive(Debug)]
pub struct VirtualMemoryMap {
    table: Box<[MemoryRegionDescriptor]>,
    populated: usize,
}

impl VirtualMemoryMap {
    /// Populated entries, sentinel included.
    pub fn entries(&self) -> &[MemoryRegionDescriptor] {
        &self.table[..self.populated]
    }

    /// Mapped regions only (sentinel excluded).
    pub fn regions(&self) -> &[MemoryRegionDescriptor] {
        &self.table[..self.populated - 1]
    }

    pub fn capacity(&self) -> usize {
        self.table.len()
    }
}

/// Allocate a `capacity`-entry table from the boot page pool and populate it
/// with the platform layout.
pub fn build_virtual_memory_map(
    pool: &mut dyn BootPagePool,
    capacity: usize,
) -> Result<VirtualMemoryMap, MemoryMapError> {
    let mut table = pool
        .allocate_table(capacity)
        .ok_or(MemoryMapError::OutOfPages { requested: capacity })?;
    let populated = fill_virtual_memory_map(&mut table)?;
    log::debug!("virtual memory map: {populated} of {capacity} entries populated");
    Ok(VirtualMemoryMap { table, populated })
}
