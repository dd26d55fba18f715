use bitfield_struct::bitfield;
use core::fmt;

/// Location of a PCI function: segment group, bus, device and function.
///
/// `device` and `function` are kept one byte wide. Architecturally only five
/// and three bits are meaningful; the wider fields carry whatever `_ADR`
/// delivered (see [`DeviceAddress`]).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PciAddress {
    pub segment: u16,
    pub bus: u8,
    pub device: u8,
    pub function: u8,
}

impl PciAddress {
    #[must_use]
    pub const fn new(segment: u16, bus: u8, device: u8, function: u8) -> Self {
        Self {
            segment,
            bus,
            device,
            function,
        }
    }
}

impl fmt::Display for PciAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04X}:{:02X}:{:02X}.{:X}",
            self.segment, self.bus, self.device, self.function
        )
    }
}

/// `_ADR` of a device on a PCI bus.
///
/// The high word holds the device number and the low word the function
/// number (`0xFFFF` meaning "all functions"). Each is taken as a full byte,
/// which is wider than the 5-bit device / 3-bit function fields of a PCI
/// address; the bits are passed on as-is.
#[bitfield(u64, order = Lsb)]
#[derive(PartialEq, Eq)]
pub struct DeviceAddress {
    /// Bits 0–7: function number.
    pub function: u8,

    // Bits 8–15: ignored.
    #[bits(8)]
    __: u8,

    /// Bits 16–23: device number.
    pub device: u8,

    // Bits 24–63: ignored.
    #[bits(40)]
    __: u64,
}
