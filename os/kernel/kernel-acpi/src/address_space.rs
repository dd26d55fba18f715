use core::fmt;

/// ACPI address space identifier of an `OperationRegion`.
///
/// The numbering follows the `RegionSpace` byte encoded in the AML
/// `DefOpRegion` term. `0x0C..=0x7E` are reserved by ACPI and
/// `0x80..=0xFF` belong to OEMs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressSpace {
    /// `0x00`: physical memory, including MMIO.
    SystemMemory,
    /// `0x01`: the x86 I/O port space.
    SystemIo,
    /// `0x02`: PCI configuration space of the enclosing device.
    PciConfig,
    /// `0x03`: embedded controller.
    EmbeddedControl,
    /// `0x04`: `SMBus`.
    SmBus,
    /// `0x05`: CMOS / RTC RAM.
    SystemCmos,
    /// `0x06`: memory or I/O behind a PCI BAR.
    PciBarTarget,
    /// `0x07`: IPMI.
    Ipmi,
    /// `0x08`: general purpose I/O.
    GeneralPurposeIo,
    /// `0x09`: generic serial bus (I²C, SPI, UART).
    GenericSerialBus,
    /// `0x0A`: platform communications channel.
    Pcc,
    /// `0x0B`: platform runtime mechanism.
    Prm,
    /// `0x7F`: functional fixed hardware.
    FixedHardware,
    /// `0x0C..=0x7E`.
    Reserved(u8),
    /// `0x80..=0xFF`.
    Oem(u8),
}

impl AddressSpace {
    #[must_use]
    pub const fn from_id(id: u8) -> Self {
        match id {
            0x00 => Self::SystemMemory,
            0x01 => Self::SystemIo,
            0x02 => Self::PciConfig,
            0x03 => Self::EmbeddedControl,
            0x04 => Self::SmBus,
            0x05 => Self::SystemCmos,
            0x06 => Self::PciBarTarget,
            0x07 => Self::Ipmi,
            0x08 => Self::GeneralPurposeIo,
            0x09 => Self::GenericSerialBus,
            0x0A => Self::Pcc,
            0x0B => Self::Prm,
            0x7F => Self::FixedHardware,
            0x80..=0xFF => Self::Oem(id),
            _ => Self::Reserved(id),
        }
    }

    /// The raw identifier as it appears in AML.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::SystemMemory => 0x00,
            Self::SystemIo => 0x01,
            Self::PciConfig => 0x02,
            Self::EmbeddedControl => 0x03,
            Self::SmBus => 0x04,
            Self::SystemCmos => 0x05,
            Self::PciBarTarget => 0x06,
            Self::Ipmi => 0x07,
            Self::GeneralPurposeIo => 0x08,
            Self::GenericSerialBus => 0x09,
            Self::Pcc => 0x0A,
            Self::Prm => 0x0B,
            Self::FixedHardware => 0x7F,
            Self::Reserved(id) | Self::Oem(id) => id,
        }
    }
}

impl From<u8> for AddressSpace {
    #[inline]
    fn from(value: u8) -> Self {
        Self::from_id(value)
    }
}

impl From<AddressSpace> for u8 {
    #[inline]
    fn from(value: AddressSpace) -> Self {
        value.id()
    }
}

impl fmt::Display for AddressSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SystemMemory => f.write_str("SystemMemory"),
            Self::SystemIo => f.write_str("SystemIO"),
            Self::PciConfig => f.write_str("PCI_Config"),
            Self::EmbeddedControl => f.write_str("EmbeddedControl"),
            Self::SmBus => f.write_str("SMBus"),
            Self::SystemCmos => f.write_str("SystemCMOS"),
            Self::PciBarTarget => f.write_str("PciBarTarget"),
            Self::Ipmi => f.write_str("IPMI"),
            Self::GeneralPurposeIo => f.write_str("GeneralPurposeIO"),
            Self::GenericSerialBus => f.write_str("GenericSerialBus"),
            Self::Pcc => f.write_str("PCC"),
            Self::Prm => f.write_str("PRM"),
            Self::FixedHardware => f.write_str("FFixedHW"),
            Self::Reserved(id) => write!(f, "Reserved(0x{id:02X})"),
            Self::Oem(id) => write!(f, "OEM(0x{id:02X})"),
        }
    }
}
