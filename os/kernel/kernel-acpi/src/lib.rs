//! # ACPI Object Model and Host Interfaces
//!
//! This crate describes the slice of the ACPI world that operation-region
//! handlers need to see: the address-space kinds an `OperationRegion` can
//! target, the region descriptor itself, the names and identifiers of
//! namespace nodes, and the two collaborator traits through which the
//! interpreter's namespace and the host kernel are reached.
//!
//! ## Overview
//!
//! An AML `OperationRegion` is an abstract window onto a hardware resource.
//! Turning it into real loads and stores requires two very different
//! collaborators:
//!
//! ```text
//!            AML interpreter
//!                  │  attach / detach / read / write
//!                  ▼
//!        ┌─────────────────────┐
//!        │  region handlers    │   (kernel-acpi-opregion)
//!        └──────┬───────┬──────┘
//!               │       │
//!   Namespace ◄─┘       └─► Platform
//!   (tree walk,             (map/unmap, port I/O,
//!    _HID/_CID/_ADR/...)     PCI config space)
//! ```
//!
//! ## Key Components
//!
//! ### Object Model
//! * [`AddressSpace`]: every ACPI address-space identifier
//! * [`OperationRegion`]: validated `(space, offset, length)` triple
//! * [`NameSeg`]: the four-character name of a namespace node
//! * [`NodeObject`]: what a node holds, as far as handlers care
//!
//! ### Identifiers and Lookups
//! * [`PnpId`] / [`PnpIdList`]: `_HID` and `_CID` results, including EISA
//!   compressed identifiers
//! * [`Lookup`]: the outcome of evaluating an optional firmware object,
//!   keeping "absent" and "failed" apart from "found"
//!
//! ### Hardware Addressing
//! * [`PciAddress`]: segment/bus/device/function of a PCI function
//! * [`DeviceAddress`]: bit layout of a packed `_ADR` value
//! * [`AccessWidth`]: the only access sizes a region may use
//!
//! ### Collaborators
//! * [`Namespace`]: parent links, node objects, typed evaluation
//! * [`Platform`]: host primitives for memory, port I/O and PCI config space
//!
//! ## Memory Management
//!
//! Handler contexts are allocated from the kernel's global allocator, so the
//! crate depends on `alloc`. Identifier lists are owned values and are
//! released when dropped.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

extern crate alloc;

mod address_space;
mod error;
mod lookup;
mod name;
mod namespace;
mod pci;
mod platform;
mod pnp;
mod region;
mod width;

pub use address_space::AddressSpace;
pub use error::RegionError;
pub use lookup::{EvaluationError, Lookup};
pub use name::{InvalidNameSeg, NameSeg};
pub use namespace::{Namespace, NodeObject};
pub use pci::{DeviceAddress, PciAddress};
pub use platform::Platform;
pub use pnp::{PCI_ROOT_BRIDGE_IDS, PnpId, PnpIdList};
pub use region::OperationRegion;
pub use width::AccessWidth;
