#![forbid(unsafe_code)]
#![no_std]

//! Shared physical address constants for the Leo (QSD8250) platform.
//!
//! This crate exists so the boot-time memory map builder (`leo-memmap`) and the
//! MMU setup stage agree on addresses that must match exactly at runtime.

/// Size in bytes of one boot-allocator page.
pub const PAGE_SIZE: u64 = 0x1000;

/// Base of the on-SoC SRAM / boot ROM window (device-mapped).
pub const SRAM_BASE: u64 = 0x1000_0000;

/// Size of the SRAM / boot ROM window.
pub const SRAM_SIZE: u64 = 0x0010_0000;

/// Base of the SoC peripheral register block (device-mapped).
pub const SOC_REGISTERS_BASE: u64 = 0x3000_0000;

/// Size of the SoC peripheral register block.
pub const SOC_REGISTERS_SIZE: u64 = 0x1000_0000;

/// Base of the SMI aperture claimed by the GPU / co-processor firmware
/// (device-mapped; never handed to the general allocator).
pub const SMI_APERTURE_BASE: u64 = 0x8000_0000;

/// Size of the SMI aperture.
pub const SMI_APERTURE_SIZE: u64 = 0x0400_0000;

/// Base of the firmware volume staging window (write-back cacheable DDR).
pub const FIRMWARE_VOLUME_BASE: u64 = 0x8400_0000;

/// Size of the firmware volume staging window.
pub const FIRMWARE_VOLUME_SIZE: u64 = 0x0010_0000;

/// Base of the general-purpose DDR free-memory window (write-back cacheable).
pub const FREE_MEMORY_BASE: u64 = 0x8500_0000;

/// Size of the DDR free-memory window.
pub const FREE_MEMORY_SIZE: u64 = 0x0B00_0000;

/// Base of the display controller framebuffer carveout (write-through
/// cacheable so scanout sees CPU writes without explicit cache maintenance).
pub const DISPLAY_RESERVED_BASE: u64 = 0xAF70_0000;

/// Size of the display framebuffer carveout.
pub const DISPLAY_RESERVED_SIZE: u64 = 0x00F0_0000;

/// Base of system memory as registered with the boot record chain.
///
/// The registered window is exactly the DDR free-memory region: the firmware
/// volume and display carveout are mapped but never offered to the allocator.
pub const SYSTEM_MEMORY_BASE: u64 = FREE_MEMORY_BASE;

/// Size of the registered system-memory window.
pub const SYSTEM_MEMORY_SIZE: u64 = FREE_MEMORY_SIZE;
