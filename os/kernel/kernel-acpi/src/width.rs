use crate::RegionError;

/// Size of a single region access.
///
/// Each width maps to exactly one bus transaction of that size; a wider
/// request is never split into smaller ones.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessWidth {
    Byte = 1,
    Word = 2,
    DWord = 4,
    QWord = 8,
}

impl AccessWidth {
    /// Number of bytes covered by one access.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AccessWidth {
    type Error = RegionError;

    /// # Errors
    /// [`RegionError::InvalidArgument`] for anything but 1, 2, 4 or 8.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Byte),
            2 => Ok(Self::Word),
            4 => Ok(Self::DWord),
            8 => Ok(Self::QWord),
            _ => Err(RegionError::InvalidArgument),
        }
    }
}
