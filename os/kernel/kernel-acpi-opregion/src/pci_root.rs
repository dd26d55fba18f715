//! Discovery of the PCI host bridge that owns a `PCI_Config` region.
//!
//! The bridge is the closest ancestor of the region whose `_HID` or one of
//! whose `_CID`s is a PCI or PCI Express root bridge identifier (see
//! [`PCI_ROOT_BRIDGE_IDS`](kernel_acpi::PCI_ROOT_BRIDGE_IDS)). The walk stops
//! below the namespace root.

use crate::region::trace_region_error;
use kernel_acpi::{Namespace, RegionError};
use log::trace;

/// Outcome of [`find_pci_root`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PciRoot<Node> {
    /// An ancestor identified as a host bridge.
    Bridge(Node),
    /// No ancestor matched; the region's parent stands in for the bridge.
    Fallback(Node),
}

impl<Node: Copy> PciRoot<Node> {
    /// The node to evaluate `_SEG` and `_BBN` on.
    #[inline]
    #[must_use]
    pub const fn node(&self) -> Node {
        match *self {
            Self::Bridge(node) | Self::Fallback(node) => node,
        }
    }
}

/// Whether `node` identifies itself as a PCI host bridge.
///
/// `_HID` is consulted first; `_CID` only if `_HID` is absent or does not
/// match. Evaluation failures count as "no match".
pub fn is_pci_root<N: Namespace>(namespace: &N, node: N::Node) -> bool {
    if namespace
        .evaluate_hid(node)
        .found()
        .is_some_and(|id| id.is_pci_root_bridge())
    {
        return true;
    }

    namespace
        .evaluate_cid(node)
        .found()
        .is_some_and(|ids| ids.contains_pci_root_bridge())
}

/// Find the host bridge controlling the region at `region`.
///
/// Not finding one is not an error: the region's parent (or the region node
/// itself if it has none) is returned as [`PciRoot::Fallback`] and the
/// condition is traced.
pub fn find_pci_root<N: Namespace>(namespace: &N, region: N::Node) -> PciRoot<N::Node> {
    let root = namespace.root();
    let mut current = namespace.parent(region);

    while let Some(node) = current {
        if node == root {
            break;
        }

        if is_pci_root(namespace, node) {
            trace!(
                "found a PCI root node {} controlling region {}",
                namespace.name(node),
                namespace.name(region)
            );
            return PciRoot::Bridge(node);
        }

        current = namespace.parent(node);
    }

    trace_region_error(
        namespace,
        region,
        "unable to find PCI root controlling",
        RegionError::NotFound,
    );
    PciRoot::Fallback(namespace.parent(region).unwrap_or(region))
}

/// Closest node at or above `region` that holds a `Device` object.
pub fn find_device<N: Namespace>(namespace: &N, region: N::Node) -> Option<N::Node> {
    let mut current = Some(region);
    while let Some(node) = current {
        if namespace.is_device(node) {
            return Some(node);
        }
        current = namespace.parent(node);
    }
    None
}
