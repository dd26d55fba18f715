//! `SystemIO` operation regions.

use crate::context::try_box_uninit;
use crate::dispatch::RegionHandler;
use crate::region::{operation_region, trace_region_error};
use alloc::boxed::Box;
use kernel_acpi::{AccessWidth, Namespace, Platform, RegionError};
use log::trace;

/// Per-region state of a `SystemIO` region: the first port and the host's
/// handle for the mapped port range.
#[derive(Debug, PartialEq, Eq)]
pub struct IoRegionContext<H> {
    base: u64,
    handle: H,
}

impl<H> IoRegionContext<H> {
    #[inline]
    #[must_use]
    pub const fn base(&self) -> u64 {
        self.base
    }

    #[inline]
    #[must_use]
    pub const fn handle(&self) -> &H {
        &self.handle
    }
}

/// Default handler for [`AddressSpace::SystemIo`](kernel_acpi::AddressSpace::SystemIo).
///
/// `address` in reads and writes is the absolute port number; the host sees
/// it relative to the region's first port.
#[derive(Debug, Clone)]
pub struct SystemIoHandler<P> {
    platform: P,
}

impl<P> SystemIoHandler<P> {
    #[must_use]
    pub const fn new(platform: P) -> Self {
        Self { platform }
    }
}

impl<P: Platform> RegionHandler for SystemIoHandler<P> {
    type Context = Box<IoRegionContext<P::IoHandle>>;

    fn attach<N: Namespace>(
        &self,
        namespace: &N,
        region: N::Node,
    ) -> Result<Self::Context, RegionError> {
        let slot = try_box_uninit::<IoRegionContext<P::IoHandle>>()?;
        let op_region = operation_region(namespace, region)?;

        let base = op_region.offset();
        let handle = self
            .platform
            .io_map(base, op_region.length())
            .inspect_err(|&error| {
                trace_region_error(namespace, region, "unable to map an IO", error);
            })?;

        trace!(
            "mapped IO region {} [{base:#x}..{:#x})",
            namespace.name(region),
            op_region.end()
        );
        Ok(Box::write(slot, IoRegionContext { base, handle }))
    }

    fn detach(&self, context: Self::Context) {
        let IoRegionContext { handle, .. } = *context;
        self.platform.io_unmap(handle);
    }

    fn read(&self, context: &Self::Context, address: u64, width: u8) -> Result<u64, RegionError> {
        let width = AccessWidth::try_from(width)?;
        self.platform
            .io_read(&context.handle, address.wrapping_sub(context.base), width)
    }

    fn write(
        &self,
        context: &Self::Context,
        address: u64,
        width: u8,
        value: u64,
    ) -> Result<(), RegionError> {
        let width = AccessWidth::try_from(width)?;
        self.platform
            .io_write(&context.handle, address.wrapping_sub(context.base), width, value)
    }
}
