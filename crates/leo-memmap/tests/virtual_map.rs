use leo_memmap::{
    build_virtual_memory_map, fill_virtual_memory_map, pages_for, BumpPagePool, MemoryMapError,
    MemoryRegionAttributes, MemoryRegionDescriptor, LEO_MEMORY_MAP,
    MAX_VIRTUAL_MEMORY_MAP_DESCRIPTORS,
};
use leo_plat_constants as plat;

fn built_map() -> leo_memmap::VirtualMemoryMap {
    let mut pool = BumpPagePool::new(4);
    build_virtual_memory_map(&mut pool, MAX_VIRTUAL_MEMORY_MAP_DESCRIPTORS).unwrap()
}

#[test]
fn map_has_exactly_seven_entries_in_documented_order() {
    let map = built_map();
    let entries = map.entries();
    assert_eq!(entries.len(), 7);

    let expected = [
        (plat::SRAM_BASE, plat::SRAM_SIZE, MemoryRegionAttributes::Device),
        (
            plat::SOC_REGISTERS_BASE,
            plat::SOC_REGISTERS_SIZE,
            MemoryRegionAttributes::Device,
        ),
        (
            plat::SMI_APERTURE_BASE,
            plat::SMI_APERTURE_SIZE,
            MemoryRegionAttributes::Device,
        ),
        (
            plat::FIRMWARE_VOLUME_BASE,
            plat::FIRMWARE_VOLUME_SIZE,
            MemoryRegionAttributes::WriteBackCached,
        ),
        (
            plat::FREE_MEMORY_BASE,
            plat::FREE_MEMORY_SIZE,
            MemoryRegionAttributes::WriteBackCached,
        ),
        (
            plat::DISPLAY_RESERVED_BASE,
            plat::DISPLAY_RESERVED_SIZE,
            MemoryRegionAttributes::WriteThroughCached,
        ),
    ];
    for (entry, (base, length, attributes)) in entries.iter().zip(expected) {
        assert_eq!(entry.physical_base, base);
        assert_eq!(entry.length, length);
        assert_eq!(entry.attributes, attributes);
    }
    assert!(entries[6].is_sentinel());
}

#[test]
fn every_region_is_identity_mapped() {
    let map = built_map();
    for region in map.regions() {
        assert_eq!(region.physical_base, region.virtual_base);
    }
}

#[test]
fn table_is_sentinel_terminated_within_capacity() {
    let map = built_map();
    assert!(map.entries().len() <= map.capacity());
    assert_eq!(map.capacity(), MAX_VIRTUAL_MEMORY_MAP_DESCRIPTORS);

    let last = map.entries().last().unwrap();
    assert_eq!(*last, MemoryRegionDescriptor::SENTINEL);
    assert_eq!(last.physical_base, 0);
    assert_eq!(last.virtual_base, 0);
    assert_eq!(last.length, 0);
    assert_eq!(last.attributes, MemoryRegionAttributes::Unmapped);
}

#[test]
fn layout_regions_are_ascending_and_non_overlapping() {
    for pair in LEO_MEMORY_MAP.windows(2) {
        assert!(pair[0].physical_base + pair[0].length <= pair[1].physical_base);
    }
}

#[test]
fn undersized_table_reports_overflow() {
    let mut table = [MemoryRegionDescriptor::SENTINEL; 3];
    assert_eq!(
        fill_virtual_memory_map(&mut table),
        Err(MemoryMapError::TableOverflow {
            required: 7,
            capacity: 3,
        })
    );
}

#[test]
fn exhausted_pool_reports_out_of_pages() {
    let mut pool = BumpPagePool::new(0);
    let err = build_virtual_memory_map(&mut pool, MAX_VIRTUAL_MEMORY_MAP_DESCRIPTORS).unwrap_err();
    assert_eq!(
        err,
        MemoryMapError::OutOfPages {
            requested: MAX_VIRTUAL_MEMORY_MAP_DESCRIPTORS,
        }
    );
}

#[test]
fn pool_accounting_matches_pages_for() {
    let mut pool = BumpPagePool::new(3);
    let _map = build_virtual_memory_map(&mut pool, MAX_VIRTUAL_MEMORY_MAP_DESCRIPTORS).unwrap();
    assert_eq!(
        pool.pages_left(),
        3 - pages_for(MAX_VIRTUAL_MEMORY_MAP_DESCRIPTORS)
    );
}
