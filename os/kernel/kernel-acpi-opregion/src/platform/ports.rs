//! # x86 I/O Port Access
//!
//! Thin wrappers around the `in` and `out` instructions for byte, word and
//! double-word transfers. The I/O port space is 16 bits wide and separate
//! from physical memory; there are no 64-bit port transfers.
//!
//! # Safety
//!
//! Every function here talks to hardware directly. Callers must uphold:
//! - **Privilege:** execute at CPL0 or hold I/O permission for the port,
//!   otherwise the CPU raises `#GP`.
//! - **Correct port:** the port must belong to the intended device. Firmware
//!   declares these ranges in `SystemIO` regions.
//! - **Ordering:** port I/O is ordered against other port I/O but is not a
//!   general memory fence.

/// Write one byte to an I/O port. Uses `out dx, al`.
///
/// # Safety
/// See the [module documentation](self).
#[inline]
pub unsafe fn outb(port: u16, val: u8) {
    unsafe {
        core::arch::asm!("out dx, al", in("dx") port, in("al") val, options(nomem, nostack, preserves_flags));
    }
}

/// Write one word to an I/O port. Uses `out dx, ax`.
///
/// # Safety
/// See the [module documentation](self).
#[inline]
pub unsafe fn outw(port: u16, val: u16) {
    unsafe {
        core::arch::asm!("out dx, ax", in("dx") port, in("ax") val, options(nomem, nostack, preserves_flags));
    }
}

/// Write one double word to an I/O port. Uses `out dx, eax`.
///
/// # Safety
/// See the [module documentation](self).
#[inline]
pub unsafe fn outl(port: u16, val: u32) {
    unsafe {
        core::arch::asm!("out dx, eax", in("dx") port, in("eax") val, options(nomem, nostack, preserves_flags));
    }
}

/// Read one byte from an I/O port. Uses `in al, dx`.
///
/// # Safety
/// See the [module documentation](self).
#[inline]
#[must_use]
pub unsafe fn inb(port: u16) -> u8 {
    let mut v: u8;
    unsafe {
        core::arch::asm!("in al, dx", in("dx") port, out("al") v, options(nomem, nostack, preserves_flags));
    }
    v
}

/// Read one word from an I/O port. Uses `in ax, dx`.
///
/// # Safety
/// See the [module documentation](self).
#[inline]
#[must_use]
pub unsafe fn inw(port: u16) -> u16 {
    let mut v: u16;
    unsafe {
        core::arch::asm!("in ax, dx", in("dx") port, out("ax") v, options(nomem, nostack, preserves_flags));
    }
    v
}

/// Read one double word from an I/O port. Uses `in eax, dx`.
///
/// # Safety
/// See the [module documentation](self).
#[inline]
#[must_use]
pub unsafe fn inl(port: u16) -> u32 {
    let mut v: u32;
    unsafe {
        core::arch::asm!("in eax, dx", in("dx") port, out("eax") v, options(nomem, nostack, preserves_flags));
    }
    v
}
