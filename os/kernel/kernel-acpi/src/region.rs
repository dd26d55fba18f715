use crate::{AddressSpace, RegionError};

/// An `OperationRegion` as evaluated by the interpreter.
///
/// `offset` is the already resolved base of the region inside its address
/// space (a physical address, a port number or a config-space offset) and
/// `length` its size in bytes.
///
/// ### Invariants
/// - `length > 0`
/// - `offset + length` does not overflow.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OperationRegion {
    space: AddressSpace,
    offset: u64,
    length: u64,
}

impl OperationRegion {
    /// # Errors
    /// [`RegionError::InvalidArgument`] if the region is empty or its end
    /// does not fit into 64 bits.
    pub const fn new(space: AddressSpace, offset: u64, length: u64) -> Result<Self, RegionError> {
        if length == 0 || offset.checked_add(length).is_none() {
            return Err(RegionError::InvalidArgument);
        }
        Ok(Self {
            space,
            offset,
            length,
        })
    }

    #[inline]
    #[must_use]
    pub const fn space(&self) -> AddressSpace {
        self.space
    }

    #[inline]
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub const fn length(&self) -> u64 {
        self.length
    }

    /// First address past the region.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.offset + self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_regions() {
        assert_eq!(
            OperationRegion::new(AddressSpace::SystemMemory, 0x1000, 0),
            Err(RegionError::InvalidArgument)
        );
    }

    #[test]
    fn rejects_overflowing_regions() {
        assert_eq!(
            OperationRegion::new(AddressSpace::SystemIo, u64::MAX - 1, 2),
            Err(RegionError::InvalidArgument)
        );
        assert!(OperationRegion::new(AddressSpace::SystemIo, u64::MAX - 1, 1).is_ok());
    }

    #[test]
    fn bounds() {
        let region = OperationRegion::new(AddressSpace::SystemMemory, 0x1000, 0x10).unwrap();
        assert_eq!(region.end(), 0x1010);
    }
}
