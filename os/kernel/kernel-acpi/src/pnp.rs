//! Plug-and-play identifiers returned by `_HID` and `_CID`.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Hardware identifiers of PCI host bridges: conventional PCI and PCI Express.
pub const PCI_ROOT_BRIDGE_IDS: [&str; 2] = ["PNP0A03", "PNP0A08"];

/// A single hardware or compatible identifier such as `PNP0A08` or `ACPI0003`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PnpId(String);

impl PnpId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Decode a compressed EISA identifier as produced by the ASL `EISAID()`
    /// macro, e.g. `0x030A_D041` → `PNP0A03`.
    ///
    /// The value is stored byte-swapped: after swapping, bits 30..26, 25..21
    /// and 20..16 hold the three letters (`'A'` = 1) and the low 16 bits hold
    /// the product number as four hex digits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_eisa_id(id: u32) -> Self {
        const HEX: &[u8; 16] = b"0123456789ABCDEF";

        let swapped = id.swap_bytes();
        let letter = |shift: u32| char::from(b'@' + ((swapped >> shift) & 0x1F) as u8);
        let digit = |shift: u32| char::from(HEX[((swapped >> shift) & 0xF) as usize]);

        let mut text = String::with_capacity(7);
        text.extend([letter(26), letter(21), letter(16)]);
        text.extend([digit(12), digit(8), digit(4), digit(0)]);
        Self(text)
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier names a PCI or PCI Express host bridge.
    #[must_use]
    pub fn is_pci_root_bridge(&self) -> bool {
        PCI_ROOT_BRIDGE_IDS.contains(&self.as_str())
    }
}

impl From<&str> for PnpId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for PnpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PnpId({})", self.0)
    }
}

impl fmt::Display for PnpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The identifiers of a `_CID` package (or a single `_HID`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PnpIdList(Vec<PnpId>);

impl PnpIdList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> core::slice::Iter<'_, PnpId> {
        self.0.iter()
    }

    /// Whether any identifier in the list names a PCI host bridge.
    #[must_use]
    pub fn contains_pci_root_bridge(&self) -> bool {
        self.iter().any(PnpId::is_pci_root_bridge)
    }
}

impl FromIterator<PnpId> for PnpIdList {
    fn from_iter<I: IntoIterator<Item = PnpId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<PnpId> for PnpIdList {
    fn from(value: PnpId) -> Self {
        Self(alloc::vec![value])
    }
}

impl IntoIterator for PnpIdList {
    type Item = PnpId;
    type IntoIter = alloc::vec::IntoIter<PnpId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PnpIdList {
    type Item = &'a PnpId;
    type IntoIter = core::slice::Iter<'a, PnpId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_eisa_ids() {
        assert_eq!(PnpId::from_eisa_id(0x030A_D041).as_str(), "PNP0A03");
        assert_eq!(PnpId::from_eisa_id(0x080A_D041).as_str(), "PNP0A08");
        assert_eq!(PnpId::from_eisa_id(0x090C_D041).as_str(), "PNP0C09");
    }

    #[test]
    fn recognizes_root_bridges() {
        assert!(PnpId::from("PNP0A03").is_pci_root_bridge());
        assert!(PnpId::from("PNP0A08").is_pci_root_bridge());
        assert!(!PnpId::from("PNP0A05").is_pci_root_bridge());
        assert!(!PnpId::from("pnp0a03").is_pci_root_bridge());
    }

    #[test]
    fn list_matches_any_entry() {
        let list: PnpIdList = ["ACPI0003", "PNP0A03"].into_iter().map(PnpId::from).collect();
        assert!(list.contains_pci_root_bridge());
        assert!(!PnpIdList::new().contains_pci_root_bridge());
    }
}
