//! Width-generic volatile memory access.
//!
//! Every access is performed as a single load or store of exactly the
//! requested width, so one AML field access becomes one bus transaction.
//!
//! Firmware may place a `SystemMemory` region at any byte address, so the
//! target of a 2, 4 or 8 byte access is not necessarily aligned to its width.
//! Aligned accesses use [`read_volatile`](core::ptr::read_volatile) and
//! [`write_volatile`](core::ptr::write_volatile). Unaligned ones are issued
//! as a single `mov` of the full width on `x86_64` and are rejected with
//! [`RegionError::InvalidArgument`] on targets without unaligned loads.

use kernel_acpi::{AccessWidth, RegionError};

#[inline]
fn is_aligned(ptr: *const u8, width: AccessWidth) -> bool {
    ptr.addr().is_multiple_of(usize::from(width.bytes()))
}

/// Load `width` bytes from `ptr`.
///
/// # Errors
/// [`RegionError::InvalidArgument`] for an unaligned access on a target that
/// cannot perform it in one instruction. No memory is touched in that case.
///
/// # Safety
/// `ptr` must be valid for a read of `width` bytes.
pub unsafe fn read(ptr: *const u8, width: AccessWidth) -> Result<u64, RegionError> {
    if is_aligned(ptr, width) {
        Ok(unsafe { read_aligned(ptr, width) })
    } else {
        unsafe { read_unaligned(ptr, width) }
    }
}

/// Store the low `width` bytes of `value` at `ptr`.
///
/// # Errors
/// [`RegionError::InvalidArgument`] for an unaligned access on a target that
/// cannot perform it in one instruction. No memory is touched in that case.
///
/// # Safety
/// `ptr` must be valid for a write of `width` bytes.
pub unsafe fn write(ptr: *mut u8, width: AccessWidth, value: u64) -> Result<(), RegionError> {
    if is_aligned(ptr, width) {
        unsafe { write_aligned(ptr, width, value) };
        Ok(())
    } else {
        unsafe { write_unaligned(ptr, width, value) }
    }
}

/// # Safety
/// `ptr` must be valid for a read of `width` bytes and aligned to `width`.
#[inline]
#[allow(clippy::cast_ptr_alignment)]
unsafe fn read_aligned(ptr: *const u8, width: AccessWidth) -> u64 {
    unsafe {
        match width {
            AccessWidth::Byte => u64::from(ptr.read_volatile()),
            AccessWidth::Word => u64::from(ptr.cast::<u16>().read_volatile()),
            AccessWidth::DWord => u64::from(ptr.cast::<u32>().read_volatile()),
            AccessWidth::QWord => ptr.cast::<u64>().read_volatile(),
        }
    }
}

/// # Safety
/// `ptr` must be valid for a write of `width` bytes and aligned to `width`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_ptr_alignment)]
unsafe fn write_aligned(ptr: *mut u8, width: AccessWidth, value: u64) {
    unsafe {
        match width {
            AccessWidth::Byte => ptr.write_volatile(value as u8),
            AccessWidth::Word => ptr.cast::<u16>().write_volatile(value as u16),
            AccessWidth::DWord => ptr.cast::<u32>().write_volatile(value as u32),
            AccessWidth::QWord => ptr.cast::<u64>().write_volatile(value),
        }
    }
}

/// # Safety
/// `ptr` must be valid for a read of `width` bytes.
#[cfg(target_arch = "x86_64")]
#[allow(clippy::unnecessary_wraps)]
unsafe fn read_unaligned(ptr: *const u8, width: AccessWidth) -> Result<u64, RegionError> {
    let value = unsafe {
        match width {
            AccessWidth::Byte => u64::from(ptr.read_volatile()),
            AccessWidth::Word => {
                let v: u16;
                core::arch::asm!("mov {v:x}, word ptr [{ptr}]", ptr = in(reg) ptr, v = out(reg) v, options(nostack, preserves_flags, readonly));
                u64::from(v)
            }
            AccessWidth::DWord => {
                let v: u32;
                core::arch::asm!("mov {v:e}, dword ptr [{ptr}]", ptr = in(reg) ptr, v = out(reg) v, options(nostack, preserves_flags, readonly));
                u64::from(v)
            }
            AccessWidth::QWord => {
                let v: u64;
                core::arch::asm!("mov {v:r}, qword ptr [{ptr}]", ptr = in(reg) ptr, v = out(reg) v, options(nostack, preserves_flags, readonly));
                v
            }
        }
    };
    Ok(value)
}

/// # Safety
/// `ptr` must be valid for a write of `width` bytes.
#[cfg(target_arch = "x86_64")]
#[allow(clippy::cast_possible_truncation, clippy::unnecessary_wraps)]
unsafe fn write_unaligned(ptr: *mut u8, width: AccessWidth, value: u64) -> Result<(), RegionError> {
    unsafe {
        match width {
            AccessWidth::Byte => ptr.write_volatile(value as u8),
            AccessWidth::Word => {
                core::arch::asm!("mov word ptr [{ptr}], {v:x}", ptr = in(reg) ptr, v = in(reg) value as u16, options(nostack, preserves_flags));
            }
            AccessWidth::DWord => {
                core::arch::asm!("mov dword ptr [{ptr}], {v:e}", ptr = in(reg) ptr, v = in(reg) value as u32, options(nostack, preserves_flags));
            }
            AccessWidth::QWord => {
                core::arch::asm!("mov qword ptr [{ptr}], {v:r}", ptr = in(reg) ptr, v = in(reg) value, options(nostack, preserves_flags));
            }
        }
    }
    Ok(())
}

#[cfg(not(target_arch = "x86_64"))]
const unsafe fn read_unaligned(_ptr: *const u8, _width: AccessWidth) -> Result<u64, RegionError> {
    Err(RegionError::InvalidArgument)
}

#[cfg(not(target_arch = "x86_64"))]
const unsafe fn write_unaligned(
    _ptr: *mut u8,
    _width: AccessWidth,
    _value: u64,
) -> Result<(), RegionError> {
    Err(RegionError::InvalidArgument)
}
