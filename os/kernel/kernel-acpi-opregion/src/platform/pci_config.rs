//! PCI configuration mechanism #1.
//!
//! A function's configuration space is reached by writing a
//! [`ConfigAddress`] to port `0xCF8` and then transferring data through the
//! four ports starting at `0xCFC`. Only the first 256 bytes of segment
//! group 0 are reachable this way.

use super::ports::{inb, inl, inw, outb, outl, outw};
use bitfield_struct::bitfield;
use kernel_acpi::{AccessWidth, PciAddress, RegionError};

/// `CONFIG_ADDRESS` port.
pub const CONFIG_ADDRESS: u16 = 0xCF8;

/// First `CONFIG_DATA` port.
pub const CONFIG_DATA: u16 = 0xCFC;

/// Bytes of configuration space reachable per function.
pub const LEGACY_CONFIG_SPACE_SIZE: u64 = 0x100;

/// Value written to `CONFIG_ADDRESS` to select a dword of configuration space.
#[bitfield(u32, order = Lsb)]
#[derive(PartialEq, Eq)]
pub struct ConfigAddress {
    /// Bits 0–7: register offset. Bits 0–1 must be zero.
    pub register: u8,

    /// Bits 8–10: function number.
    #[bits(3)]
    pub function: u8,

    /// Bits 11–15: device number.
    #[bits(5)]
    pub device: u8,

    /// Bits 16–23: bus number.
    pub bus: u8,

    // Bits 24–30: reserved.
    #[bits(7)]
    __: u8,

    /// Bit 31: enable configuration space mapping.
    pub enable: bool,
}

impl ConfigAddress {
    /// Select the dword containing `register` of the function at `address`.
    ///
    /// Device and function are masked to their 5 and 3 architectural bits.
    #[must_use]
    pub const fn select(address: PciAddress, register: u8) -> Self {
        Self::new()
            .with_register(register & 0xFC)
            .with_function(address.function & 0x07)
            .with_device(address.device & 0x1F)
            .with_bus(address.bus)
            .with_enable(true)
    }
}

/// Validate an access and return the register offset it starts at.
///
/// # Errors
/// [`RegionError::Platform`] if the access is outside segment 0, unaligned,
/// or extends past the legacy configuration space.
pub fn check_access(
    address: PciAddress,
    offset: u64,
    width: AccessWidth,
) -> Result<u8, RegionError> {
    if address.segment != 0 {
        return Err(RegionError::Platform("PCI segment not reachable through CF8/CFC"));
    }

    let bytes = u64::from(width.bytes());
    if !offset.is_multiple_of(bytes) {
        return Err(RegionError::Platform("unaligned PCI config access"));
    }

    if offset.checked_add(bytes).is_none_or(|end| end > LEGACY_CONFIG_SPACE_SIZE) {
        return Err(RegionError::Platform("PCI config offset outside legacy config space"));
    }

    u8::try_from(offset)
        .map_err(|_| RegionError::Platform("PCI config offset outside legacy config space"))
}

/// Select `register` of `address` and return the data port for its low bits.
unsafe fn select(address: PciAddress, register: u8) -> u16 {
    unsafe { outl(CONFIG_ADDRESS, ConfigAddress::select(address, register).into_bits()) };
    CONFIG_DATA + u16::from(register & 0x03)
}

/// Read configuration space. 64-bit reads are performed as two dword reads.
///
/// # Errors
/// See [`check_access`].
///
/// # Safety
/// Must run at CPL0, and no other code may use `0xCF8`/`0xCFC` concurrently.
pub unsafe fn read(
    address: PciAddress,
    offset: u64,
    width: AccessWidth,
) -> Result<u64, RegionError> {
    let register = check_access(address, offset, width)?;
    let value = unsafe {
        match width {
            AccessWidth::Byte => u64::from(inb(select(address, register))),
            AccessWidth::Word => u64::from(inw(select(address, register))),
            AccessWidth::DWord => u64::from(inl(select(address, register))),
            AccessWidth::QWord => {
                let low = u64::from(inl(select(address, register)));
                let high = u64::from(inl(select(address, register + 4)));
                low | (high << 32)
            }
        }
    };
    Ok(value)
}

/// Write configuration space. 64-bit writes are performed as two dword writes,
/// low dword first.
///
/// # Errors
/// See [`check_access`].
///
/// # Safety
/// Must run at CPL0, and no other code may use `0xCF8`/`0xCFC` concurrently.
#[allow(clippy::cast_possible_truncation)]
pub unsafe fn write(
    address: PciAddress,
    offset: u64,
    width: AccessWidth,
    value: u64,
) -> Result<(), RegionError> {
    let register = check_access(address, offset, width)?;
    unsafe {
        match width {
            AccessWidth::Byte => outb(select(address, register), value as u8),
            AccessWidth::Word => outw(select(address, register), value as u16),
            AccessWidth::DWord => outl(select(address, register), value as u32),
            AccessWidth::QWord => {
                outl(select(address, register), value as u32);
                outl(select(address, register + 4), (value >> 32) as u32);
            }
        }
    }
    Ok(())
}
