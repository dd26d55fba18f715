//! `PCI_Config` operation regions.
//!
//! Attaching resolves the PCI address of the device owning the region:
//!
//! 1. find the host bridge above the region ([`find_pci_root`]),
//! 2. find the closest enclosing `Device` ([`find_device`]),
//! 3. take device and function from the device's `_ADR`,
//! 4. take segment and bus from the bridge's `_SEG` and `_BBN`.
//!
//! Only a missing `Device` is fatal. Firmware frequently omits `_ADR`,
//! `_SEG` or `_BBN`; each missing value is left at zero.

use crate::context::try_box_uninit;
use crate::dispatch::RegionHandler;
use crate::pci_root::{find_device, find_pci_root};
use crate::region::trace_region_error;
use alloc::boxed::Box;
use kernel_acpi::{
    AccessWidth, DeviceAddress, Lookup, NameSeg, Namespace, PciAddress, Platform, RegionError,
};
use log::{debug, trace};

/// Per-region state of a `PCI_Config` region.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PciRegionContext {
    address: PciAddress,
}

impl PciRegionContext {
    #[inline]
    #[must_use]
    pub const fn address(&self) -> PciAddress {
        self.address
    }
}

/// Default handler for [`AddressSpace::PciConfig`](kernel_acpi::AddressSpace::PciConfig).
///
/// `address` in reads and writes is the config-space offset supplied by the
/// interpreter and is forwarded to the host unchanged.
#[derive(Debug, Clone)]
pub struct PciConfigHandler<P> {
    platform: P,
}

impl<P> PciConfigHandler<P> {
    #[must_use]
    pub const fn new(platform: P) -> Self {
        Self { platform }
    }
}

/// Evaluate an optional integer, treating absence and failure as zero.
fn integer_or_zero<N: Namespace>(namespace: &N, node: N::Node, name: NameSeg) -> u64 {
    match namespace.evaluate_integer(node, name) {
        Lookup::Found(value) => value,
        Lookup::NotPresent => 0,
        Lookup::Failed(error) => {
            debug!("{}.{name} failed, assuming 0: {error}", namespace.name(node));
            0
        }
    }
}

/// Build the PCI address of `device` below the host bridge `bridge`.
#[allow(clippy::cast_possible_truncation)]
pub fn resolve_pci_address<N: Namespace>(
    namespace: &N,
    device: N::Node,
    bridge: N::Node,
) -> PciAddress {
    let adr = DeviceAddress::from_bits(integer_or_zero(namespace, device, NameSeg::ADR));

    // Segment groups are 16 bits and bus numbers 8 bits wide; higher bits
    // of the evaluated integers are dropped.
    PciAddress {
        segment: integer_or_zero(namespace, bridge, NameSeg::SEG) as u16,
        bus: integer_or_zero(namespace, bridge, NameSeg::BBN) as u8,
        device: adr.device(),
        function: adr.function(),
    }
}

impl<P: Platform> RegionHandler for PciConfigHandler<P> {
    type Context = Box<PciRegionContext>;

    fn attach<N: Namespace>(
        &self,
        namespace: &N,
        region: N::Node,
    ) -> Result<Self::Context, RegionError> {
        let slot = try_box_uninit::<PciRegionContext>()?;

        let pci_root = find_pci_root(namespace, region);

        let Some(device) = find_device(namespace, region) else {
            let error = RegionError::NotFound;
            trace_region_error(namespace, region, "unable to find device responsible for", error);
            return Err(error);
        };

        let address = resolve_pci_address(namespace, device, pci_root.node());
        trace!(
            "detected PCI device {}@{address} for region {}",
            namespace.name(device),
            namespace.name(region)
        );

        Ok(Box::write(slot, PciRegionContext { address }))
    }

    fn detach(&self, context: Self::Context) {
        drop(context);
    }

    fn read(&self, context: &Self::Context, address: u64, width: u8) -> Result<u64, RegionError> {
        let width = AccessWidth::try_from(width)?;
        self.platform.pci_read(context.address, address, width)
    }

    fn write(
        &self,
        context: &Self::Context,
        address: u64,
        width: u8,
        value: u64,
    ) -> Result<(), RegionError> {
        let width = AccessWidth::try_from(width)?;
        self.platform.pci_write(context.address, address, width, value)
    }
}
