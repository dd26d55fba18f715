//! Registration of the default handlers at the namespace root.

use crate::dispatch::RegionHandler;
use crate::io::SystemIoHandler;
use crate::memory::SystemMemoryHandler;
use crate::pci::PciConfigHandler;
use kernel_acpi::{AddressSpace, Namespace, Platform};
use log::{debug, warn};

/// What a registration did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Installation {
    /// No handler was registered for that node and address space before.
    Fresh,
    /// An existing registration was replaced.
    Replaced,
}

/// The interpreter's registry of address-space handlers.
///
/// Regions look up the handler registered closest to them, so handlers
/// installed at the root act as defaults for the whole namespace.
pub trait HandlerRegistry<N: Namespace> {
    /// Register `handler` for regions of `space` at or below `node`,
    /// replacing any handler already registered there.
    fn install<H>(&mut self, node: N::Node, space: AddressSpace, handler: H) -> Installation
    where
        H: RegionHandler + 'static;
}

fn install_at_root<N, R, H>(namespace: &N, registry: &mut R, space: AddressSpace, handler: H)
where
    N: Namespace,
    R: HandlerRegistry<N>,
    H: RegionHandler + 'static,
{
    match registry.install(namespace.root(), space, handler) {
        Installation::Fresh => debug!("installed default {space} handler"),
        Installation::Replaced => warn!("replaced existing {space} handler at the namespace root"),
    }
}

/// Install the `SystemMemory`, `SystemIO` and `PCI_Config` handlers at the
/// namespace root.
///
/// Must run once during initialization, before any region of these kinds is
/// accessed. Installing again replaces the earlier registrations.
pub fn install_default_handlers<N, R, P>(namespace: &N, registry: &mut R, platform: P)
where
    N: Namespace,
    R: HandlerRegistry<N>,
    P: Platform + Clone + 'static,
{
    install_at_root(
        namespace,
        registry,
        AddressSpace::SystemMemory,
        SystemMemoryHandler::new(platform.clone()),
    );
    install_at_root(
        namespace,
        registry,
        AddressSpace::SystemIo,
        SystemIoHandler::new(platform.clone()),
    );
    install_at_root(
        namespace,
        registry,
        AddressSpace::PciConfig,
        PciConfigHandler::new(platform),
    );
}
