use super::{pci_config, ports};
use core::ptr::NonNull;
use kernel_acpi::{AccessWidth, PciAddress, Platform, RegionError};

/// Start of the higher-half direct map in the kernel's address space layout.
pub const DEFAULT_HHDM_BASE: u64 = 0xffff_8880_0000_0000;

/// Size of the x86 I/O port space.
const IO_SPACE_SIZE: u64 = 0x1_0000;

/// A range of I/O ports handed out for a `SystemIO` region.
///
/// Every access is checked against the range before a port is touched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PortWindow {
    base: u16,
    len: u32,
}

impl PortWindow {
    /// # Errors
    /// [`RegionError::Platform`] if `[base, base + len)` leaves the port space.
    pub fn new(base: u64, len: u64) -> Result<Self, RegionError> {
        const OUTSIDE: RegionError = RegionError::Platform("port range outside I/O space");

        if base.checked_add(len).is_none_or(|end| end > IO_SPACE_SIZE) {
            return Err(OUTSIDE);
        }
        Ok(Self {
            base: u16::try_from(base).map_err(|_| OUTSIDE)?,
            len: u32::try_from(len).map_err(|_| OUTSIDE)?,
        })
    }

    #[inline]
    #[must_use]
    pub const fn base(&self) -> u16 {
        self.base
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Port for an access of `width` bytes at `offset` into the window.
    ///
    /// # Errors
    /// [`RegionError::Platform`] if the access does not fit into the window.
    pub fn port_for(&self, offset: u64, width: AccessWidth) -> Result<u16, RegionError> {
        const OUTSIDE: RegionError = RegionError::Platform("port access outside mapped range");

        let end = offset.checked_add(u64::from(width.bytes()));
        if end.is_none_or(|end| end > u64::from(self.len)) {
            return Err(OUTSIDE);
        }
        let offset = u16::try_from(offset).map_err(|_| OUTSIDE)?;
        self.base.checked_add(offset).ok_or(OUTSIDE)
    }
}

/// Host platform for kernels with a higher-half direct map (HHDM).
///
/// Physical memory is already mapped at `hhdm_base + pa`, so mapping a
/// region is address arithmetic and unmapping is a no-op.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HhdmPlatform {
    hhdm_base: u64,
}

impl HhdmPlatform {
    #[must_use]
    pub const fn new(hhdm_base: u64) -> Self {
        Self { hhdm_base }
    }

    #[inline]
    #[must_use]
    pub const fn hhdm_base(&self) -> u64 {
        self.hhdm_base
    }
}

impl Default for HhdmPlatform {
    fn default() -> Self {
        Self::new(DEFAULT_HHDM_BASE)
    }
}

impl Platform for HhdmPlatform {
    type IoHandle = PortWindow;

    fn map(&self, phys: u64, len: usize) -> Option<NonNull<u8>> {
        let end = phys.checked_add(u64::try_from(len).ok()?)?;
        self.hhdm_base.checked_add(end)?;
        let va = self.hhdm_base + phys;
        NonNull::new(va as *mut u8)
    }

    unsafe fn unmap(&self, _virt: NonNull<u8>, _len: usize) {
        // The direct map is permanent.
    }

    fn io_map(&self, base: u64, len: u64) -> Result<Self::IoHandle, RegionError> {
        PortWindow::new(base, len)
    }

    fn io_unmap(&self, _handle: Self::IoHandle) {}

    fn io_read(
        &self,
        handle: &Self::IoHandle,
        offset: u64,
        width: AccessWidth,
    ) -> Result<u64, RegionError> {
        let port = handle.port_for(offset, width)?;
        // SAFETY: the port lies inside a range firmware declared as SystemIO.
        unsafe {
            match width {
                AccessWidth::Byte => Ok(u64::from(ports::inb(port))),
                AccessWidth::Word => Ok(u64::from(ports::inw(port))),
                AccessWidth::DWord => Ok(u64::from(ports::inl(port))),
                AccessWidth::QWord => Err(RegionError::InvalidArgument),
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn io_write(
        &self,
        handle: &Self::IoHandle,
        offset: u64,
        width: AccessWidth,
        value: u64,
    ) -> Result<(), RegionError> {
        let port = handle.port_for(offset, width)?;
        // SAFETY: the port lies inside a range firmware declared as SystemIO.
        unsafe {
            match width {
                AccessWidth::Byte => ports::outb(port, value as u8),
                AccessWidth::Word => ports::outw(port, value as u16),
                AccessWidth::DWord => ports::outl(port, value as u32),
                AccessWidth::QWord => return Err(RegionError::InvalidArgument),
            }
        }
        Ok(())
    }

    fn pci_read(
        &self,
        address: PciAddress,
        offset: u64,
        width: AccessWidth,
    ) -> Result<u64, RegionError> {
        // SAFETY: region handlers run at CPL0 with AML execution serialized.
        unsafe { pci_config::read(address, offset, width) }
    }

    fn pci_write(
        &self,
        address: PciAddress,
        offset: u64,
        width: AccessWidth,
        value: u64,
    ) -> Result<(), RegionError> {
        // SAFETY: region handlers run at CPL0 with AML execution serialized.
        unsafe { pci_config::write(address, offset, width, value) }
    }
}
