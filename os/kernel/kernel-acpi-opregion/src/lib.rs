//! # ACPI Operation Region Handlers
//!
//! This crate turns AML `OperationRegion`s into real hardware accesses. It
//! provides the default handlers for the three system address spaces and
//! the glue to register them with the interpreter.
//!
//! ## Overview
//!
//! Firmware describes hardware resources declaratively: an `OperationRegion`
//! names an address space, a base and a length, and `Field`s carve it into
//! registers. The interpreter turns each field access into a byte-width read
//! or write against the region and hands it to the handler registered for
//! the region's address space:
//!
//! ```text
//!   AML field access
//!         │
//!         ▼
//!   interpreter ──► handler registry (closest scope wins)
//!                         │
//!        ┌────────────────┼─────────────────┐
//!        ▼                ▼                 ▼
//!  SystemMemoryHandler  SystemIoHandler  PciConfigHandler
//!   map + volatile       port window      root bridge + _ADR
//!   load/store           in/out           config space
//! ```
//!
//! ## Region Lifecycle
//!
//! Every handler implements [`RegionHandler`]:
//! * **Attach** on the first access: acquire the mapping or resolve the PCI
//!   address, yielding an owned context
//! * **Read / Write** with that context for every access
//! * **Detach** when the region goes away: consume the context and release
//!   what attach acquired
//!
//! The interpreter owns the context for the lifetime of the region and must
//! detach explicitly; contexts do not release resources on drop.
//!
//! ## Core Components
//!
//! ### Width-Generic Accessor ([`access`])
//! Single loads and stores of 1, 2, 4 or 8 bytes, volatile when aligned and
//! one full-width `mov` when not. Any other width is rejected before memory
//! is touched, and so is any `SystemMemory` access outside its region.
//!
//! ### Default Handlers
//! * [`SystemMemoryHandler`]: maps the physical range once on attach
//! * [`SystemIoHandler`]: obtains a port-range handle from the host
//! * [`PciConfigHandler`]: discovers the owning host bridge and the device's
//!   segment/bus/device/function on attach ([`pci_root`])
//!
//! ### Installation ([`install_default_handlers`])
//! Registers the three handlers at the namespace root so they serve every
//! region without a more specific handler.
//!
//! ### Reference Platform (`platform`, feature `x86-platform`)
//! A ready-made host platform for x86-64 kernels with a higher-half direct map.
//!
//! ## Error Handling
//!
//! Attach fails only on allocation failure, on mapping failure, or when a
//! PCI region has no enclosing device. Missing `_ADR`, `_SEG`, `_BBN` or a
//! missing host bridge fall back to zero or to the region's parent and are
//! only traced. Failures of host primitives are returned unchanged.
//!
//! ## Diagnostics
//!
//! Everything is reported through the `log` facade: `trace!` for resolved
//! topology and mappings, `warn!` for failures naming the region.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

extern crate alloc;

pub mod access;
mod context;
mod dispatch;
mod install;
mod io;
mod memory;
mod pci;
pub mod pci_root;
#[cfg(all(feature = "x86-platform", target_arch = "x86_64"))]
pub mod platform;
mod region;

pub use dispatch::{
    RegionHandler, RegionOp, RegionOpKind, RegionOutcome, RegionPayload, RejectedOp,
};
pub use install::{HandlerRegistry, Installation, install_default_handlers};
pub use io::{IoRegionContext, SystemIoHandler};
pub use memory::{MemoryRegionContext, SystemMemoryHandler};
pub use pci::{PciConfigHandler, PciRegionContext, resolve_pci_address};
