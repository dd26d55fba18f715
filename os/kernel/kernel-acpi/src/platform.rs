//! Host primitives used by the default region handlers.
//!
//! The kernel supplies these: how physical memory becomes addressable, how
//! the I/O port space is reached, and how PCI configuration space is accessed.
//! Diagnostics go through the `log` facade and context storage through the
//! global allocator, so neither appears here.

use crate::{AccessWidth, PciAddress, RegionError};
use core::ptr::NonNull;

/// Hardware access primitives provided by the host kernel.
///
/// All calls are synchronous. A failing primitive reports its own
/// [`RegionError`]; handlers return it to the interpreter unchanged.
pub trait Platform {
    /// Handle to a mapped range of the I/O port space.
    type IoHandle;

    /// Make `len` bytes of physical memory starting at `phys` addressable.
    ///
    /// Returns `None` if the range cannot be mapped.
    fn map(&self, phys: u64, len: usize) -> Option<NonNull<u8>>;

    /// Release a mapping obtained from [`Platform::map`].
    ///
    /// # Safety
    /// `virt` and `len` must be exactly what a previous `map` call returned
    /// and was asked for, and nothing may access the range afterwards.
    unsafe fn unmap(&self, virt: NonNull<u8>, len: usize);

    /// Obtain a handle for the ports `[base, base + len)`.
    ///
    /// # Errors
    /// Any [`RegionError`] describing why the range is unavailable.
    fn io_map(&self, base: u64, len: u64) -> Result<Self::IoHandle, RegionError>;

    /// Release a handle obtained from [`Platform::io_map`].
    fn io_unmap(&self, handle: Self::IoHandle);

    /// Read `width` bytes at `offset` into the mapped port range.
    ///
    /// # Errors
    /// Any [`RegionError`] raised by the port access.
    fn io_read(
        &self,
        handle: &Self::IoHandle,
        offset: u64,
        width: AccessWidth,
    ) -> Result<u64, RegionError>;

    /// Write the low `width` bytes of `value` at `offset` into the mapped port range.
    ///
    /// # Errors
    /// Any [`RegionError`] raised by the port access.
    fn io_write(
        &self,
        handle: &Self::IoHandle,
        offset: u64,
        width: AccessWidth,
        value: u64,
    ) -> Result<(), RegionError>;

    /// Read `width` bytes at `offset` in the configuration space of `address`.
    ///
    /// # Errors
    /// Any [`RegionError`] raised by the config-space access.
    fn pci_read(
        &self,
        address: PciAddress,
        offset: u64,
        width: AccessWidth,
    ) -> Result<u64, RegionError>;

    /// Write the low `width` bytes of `value` at `offset` in the configuration
    /// space of `address`.
    ///
    /// # Errors
    /// Any [`RegionError`] raised by the config-space access.
    fn pci_write(
        &self,
        address: PciAddress,
        offset: u64,
        width: AccessWidth,
        value: u64,
    ) -> Result<(), RegionError>;
}

impl<P: Platform + ?Sized> Platform for &P {
    type IoHandle = P::IoHandle;

    #[inline]
    fn map(&self, phys: u64, len: usize) -> Option<NonNull<u8>> {
        (**self).map(phys, len)
    }

    #[inline]
    unsafe fn unmap(&self, virt: NonNull<u8>, len: usize) {
        unsafe { (**self).unmap(virt, len) }
    }

    #[inline]
    fn io_map(&self, base: u64, len: u64) -> Result<Self::IoHandle, RegionError> {
        (**self).io_map(base, len)
    }

    #[inline]
    fn io_unmap(&self, handle: Self::IoHandle) {
        (**self).io_unmap(handle);
    }

    #[inline]
    fn io_read(
        &self,
        handle: &Self::IoHandle,
        offset: u64,
        width: AccessWidth,
    ) -> Result<u64, RegionError> {
        (**self).io_read(handle, offset, width)
    }

    #[inline]
    fn io_write(
        &self,
        handle: &Self::IoHandle,
        offset: u64,
        width: AccessWidth,
        value: u64,
    ) -> Result<(), RegionError> {
        (**self).io_write(handle, offset, width, value)
    }

    #[inline]
    fn pci_read(
        &self,
        address: PciAddress,
        offset: u64,
        width: AccessWidth,
    ) -> Result<u64, RegionError> {
        (**self).pci_read(address, offset, width)
    }

    #[inline]
    fn pci_write(
        &self,
        address: PciAddress,
        offset: u64,
        width: AccessWidth,
        value: u64,
    ) -> Result<(), RegionError> {
        (**self).pci_write(address, offset, width, value)
    }
}
