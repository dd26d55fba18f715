//! # Reference x86-64 Host Platform
//!
//! A [`Platform`](kernel_acpi::Platform) implementation for kernels that
//! keep all physical memory in a higher-half direct map (HHDM), reach the
//! I/O port space with `in`/`out`, and access PCI configuration space through
//! the legacy configuration mechanism #1 (ports `0xCF8`/`0xCFC`).
//!
//! ## Components
//!
//! * [`ports`]: 8/16/32-bit port I/O instructions
//! * [`pci_config`]: `CONFIG_ADDRESS` encoding and config-space accesses
//! * [`HhdmPlatform`]: the combined host platform
//! * [`PortWindow`]: the I/O "mapping" handed out for `SystemIO` regions
//!
//! ## Limitations
//!
//! * Only segment group 0 is reachable through `0xCF8`/`0xCFC`, and only the
//!   first 256 bytes of each function's configuration space.
//! * The `CONFIG_ADDRESS`/`CONFIG_DATA` pair is shared state; callers must
//!   serialize AML execution, as the interpreter does.

mod hhdm;
pub mod pci_config;
pub mod ports;

pub use hhdm::{DEFAULT_HHDM_BASE, HhdmPlatform, PortWindow};
