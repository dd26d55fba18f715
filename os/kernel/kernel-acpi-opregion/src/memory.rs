//! `SystemMemory` operation regions.
//!
//! The whole region is mapped once on attach and every access goes through a
//! volatile load or store into that mapping.

use crate::access;
use crate::context::try_box_uninit;
use crate::dispatch::RegionHandler;
use crate::region::{operation_region, trace_region_error};
use alloc::boxed::Box;
use core::ptr::NonNull;
use kernel_acpi::{AccessWidth, Namespace, Platform, RegionError};
use log::trace;

/// Per-region state of a mapped `SystemMemory` region.
#[derive(Debug, PartialEq, Eq)]
pub struct MemoryRegionContext {
    phys: u64,
    virt: NonNull<u8>,
    size: usize,
}

impl MemoryRegionContext {
    /// Physical base address of the region.
    #[inline]
    #[must_use]
    pub const fn phys(&self) -> u64 {
        self.phys
    }

    /// Where the region is mapped.
    #[inline]
    #[must_use]
    pub const fn virt(&self) -> NonNull<u8> {
        self.virt
    }

    /// Length of the mapping in bytes.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Pointer to `address` inside the mapping, provided the whole access
    /// of `width` bytes lies within `[phys, phys + size)`.
    fn ptr_for(&self, address: u64, width: AccessWidth) -> Result<*mut u8, RegionError> {
        let offset = address
            .checked_sub(self.phys)
            .and_then(|offset| usize::try_from(offset).ok())
            .filter(|&offset| {
                offset
                    .checked_add(usize::from(width.bytes()))
                    .is_some_and(|end| end <= self.size)
            })
            .ok_or(RegionError::InvalidArgument)?;
        Ok(self.virt.as_ptr().wrapping_add(offset))
    }
}

/// Default handler for [`AddressSpace::SystemMemory`](kernel_acpi::AddressSpace::SystemMemory).
///
/// `address` in reads and writes is the absolute physical address. Accesses
/// that do not lie entirely within the region are rejected with
/// [`RegionError::InvalidArgument`] before memory is touched.
#[derive(Debug, Clone)]
pub struct SystemMemoryHandler<P> {
    platform: P,
}

impl<P> SystemMemoryHandler<P> {
    #[must_use]
    pub const fn new(platform: P) -> Self {
        Self { platform }
    }
}

impl<P: Platform> RegionHandler for SystemMemoryHandler<P> {
    type Context = Box<MemoryRegionContext>;

    fn attach<N: Namespace>(
        &self,
        namespace: &N,
        region: N::Node,
    ) -> Result<Self::Context, RegionError> {
        let slot = try_box_uninit::<MemoryRegionContext>()?;
        let op_region = operation_region(namespace, region)?;

        let phys = op_region.offset();
        let mapped = usize::try_from(op_region.length())
            .ok()
            .and_then(|size| Some((self.platform.map(phys, size)?, size)));

        let Some((virt, size)) = mapped else {
            let error = RegionError::MappingFailed;
            trace_region_error(namespace, region, "unable to map", error);
            return Err(error);
        };

        trace!(
            "mapped region {} [{phys:#x}..{:#x}) at {virt:p}",
            namespace.name(region),
            op_region.end()
        );
        Ok(Box::write(slot, MemoryRegionContext { phys, virt, size }))
    }

    fn detach(&self, context: Self::Context) {
        // SAFETY: the mapping was created in `attach` with exactly this size
        // and the context is consumed, so no access can follow.
        unsafe { self.platform.unmap(context.virt, context.size) };
    }

    fn read(&self, context: &Self::Context, address: u64, width: u8) -> Result<u64, RegionError> {
        let width = AccessWidth::try_from(width)?;
        let ptr = context.ptr_for(address, width)?;
        // SAFETY: the access lies within the mapping created by `attach`,
        // which stays live until the context is consumed by `detach`.
        unsafe { access::read(ptr, width) }
    }

    fn write(
        &self,
        context: &Self::Context,
        address: u64,
        width: u8,
        value: u64,
    ) -> Result<(), RegionError> {
        let width = AccessWidth::try_from(width)?;
        let ptr = context.ptr_for(address, width)?;
        // SAFETY: see `read`.
        unsafe { access::write(ptr, width, value) }
    }
}
