use alloc::boxed::Box;
use core::alloc::Layout;
use core::mem::MaybeUninit;
use kernel_acpi::RegionError;

/// Allocate storage for a region context without aborting on exhaustion.
///
/// Attach paths reserve their context first and fill it in once the
/// hardware resource has been acquired. Dropping the returned box on an
/// error path frees the storage without running any destructor.
pub(crate) fn try_box_uninit<T>() -> Result<Box<MaybeUninit<T>>, RegionError> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(Box::new_uninit());
    }

    // SAFETY: `layout` has a non-zero size.
    let ptr = unsafe { alloc::alloc::alloc(layout) }.cast::<MaybeUninit<T>>();
    if ptr.is_null() {
        return Err(RegionError::OutOfMemory);
    }

    // SAFETY: `ptr` was allocated by the global allocator with the layout of
    // `T`, which `MaybeUninit<T>` shares.
    Ok(unsafe { Box::from_raw(ptr) })
}
