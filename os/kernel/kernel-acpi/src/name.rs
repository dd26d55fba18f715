use core::fmt;

/// Four-character name of a namespace node (`NameSeg` in the AML grammar).
///
/// Names shorter than four characters are padded with `_`, exactly as the
/// compiler does, so `"PCI0"` and `"EC"` become `PCI0` and `EC__`.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NameSeg([u8; 4]);

/// Error returned when a string is not a valid [`NameSeg`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid name segment")]
pub struct InvalidNameSeg;

impl NameSeg {
    /// The namespace root, `\`.
    pub const ROOT: Self = Self(*b"\\___");
    /// `_HID`, the hardware identifier of a device.
    pub const HID: Self = Self(*b"_HID");
    /// `_CID`, the compatible identifiers of a device.
    pub const CID: Self = Self(*b"_CID");
    /// `_ADR`, the bus address of a device on its parent bus.
    pub const ADR: Self = Self(*b"_ADR");
    /// `_SEG`, the PCI segment group of a host bridge.
    pub const SEG: Self = Self(*b"_SEG");
    /// `_BBN`, the base bus number of a host bridge.
    pub const BBN: Self = Self(*b"_BBN");

    /// The name as text. Names are ASCII by construction; anything else
    /// renders as `????`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0).unwrap_or("????")
    }

    const fn is_lead_char(c: u8) -> bool {
        c.is_ascii_uppercase() || c == b'_'
    }

    const fn is_name_char(c: u8) -> bool {
        Self::is_lead_char(c) || c.is_ascii_digit()
    }
}

impl TryFrom<&str> for NameSeg {
    type Error = InvalidNameSeg;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let bytes = value.as_bytes();
        let Some(&lead) = bytes.first() else {
            return Err(InvalidNameSeg);
        };
        if bytes.len() > 4 || !Self::is_lead_char(lead) {
            return Err(InvalidNameSeg);
        }

        let mut seg = [b'_'; 4];
        for (slot, &c) in seg.iter_mut().zip(bytes) {
            if !Self::is_name_char(c) {
                return Err(InvalidNameSeg);
            }
            *slot = c;
        }
        Ok(Self(seg))
    }
}

impl fmt::Debug for NameSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameSeg({})", self.as_str())
    }
}

impl fmt::Display for NameSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
