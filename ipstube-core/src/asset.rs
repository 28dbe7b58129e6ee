//! Asset identifiers and storage layout
//!
//! Digit images live at `/<set * 10 + digit>.<ext>`; set 1 is `/10.bmp`
//! through `/19.bmp`. Identifier 255 is never a valid asset.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::{AssetFormat, MAX_GRAPHIC_SETS};
use crate::traits::AssetStore;

/// Longest asset path, `"/255.bmp"` plus slack
pub const MAX_ASSET_PATH_LEN: usize = 12;

/// Identifier of one stored image
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AssetId(u8);

impl AssetId {
    /// Raw value reserved for "nothing resident"
    pub const RESERVED: u8 = 255;

    /// Create an identifier; `None` for the reserved value
    pub const fn new(raw: u8) -> Option<Self> {
        if raw == Self::RESERVED {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Identifier of `digit` in graphic `set`
    ///
    /// Returns `None` if `digit > 9` or the result would not fit.
    pub fn for_digit(set: u8, digit: u8) -> Option<Self> {
        if digit > 9 {
            return None;
        }
        set.checked_mul(10)
            .and_then(|base| base.checked_add(digit))
            .and_then(Self::new)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Storage path for this asset in `format`
    pub fn path(self, format: AssetFormat) -> String<MAX_ASSET_PATH_LEN> {
        let mut path = String::new();
        // Cannot overflow: at most "/254.bmp"
        let _ = write!(path, "/{}.{}", self.0, format.extension());
        path
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Count the consecutive graphic sets present in `store`
///
/// Checks digit 0 of sets 1, 2, ... and stops at the first gap or after
/// [`MAX_GRAPHIC_SETS`]. An unavailable store has no sets.
pub fn probe_graphic_sets<S: AssetStore>(store: &mut S, format: AssetFormat) -> u8 {
    if !store.is_available() {
        error!("Asset storage unavailable, digit rendering disabled");
        return 0;
    }

    let mut found = 0;
    for set in 1..=MAX_GRAPHIC_SETS {
        let present = AssetId::for_digit(set, 0)
            .map(|id| store.exists(&id.path(format)))
            .unwrap_or(false);
        if !present {
            break;
        }
        found = set;
    }

    info!("{} graphic sets found", found);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockStore;

    #[test]
    fn test_for_digit() {
        assert_eq!(AssetId::for_digit(1, 7).map(AssetId::raw), Some(17));
        assert_eq!(AssetId::for_digit(0, 0).map(AssetId::raw), Some(0));
        assert_eq!(AssetId::for_digit(1, 10), None);
        // 25 * 10 + 5 is the reserved sentinel
        assert_eq!(AssetId::for_digit(25, 5), None);
        assert_eq!(AssetId::for_digit(26, 0), None);
    }

    #[test]
    fn test_reserved_value() {
        assert!(AssetId::new(255).is_none());
        assert!(AssetId::new(254).is_some());
    }

    #[test]
    fn test_path() {
        let id = AssetId::for_digit(2, 3).unwrap();
        assert_eq!(id.path(AssetFormat::Bmp).as_str(), "/23.bmp");
        assert_eq!(id.path(AssetFormat::Clk).as_str(), "/23.clk");
        assert_eq!(AssetId::new(254).unwrap().path(AssetFormat::Bmp).as_str(), "/254.bmp");
    }

    #[test]
    fn test_probe_stops_at_gap() {
        let mut store = MockStore::new();
        store.insert("/10.bmp", vec![0]);
        store.insert("/20.bmp", vec![0]);
        store.insert("/40.bmp", vec![0]);
        assert_eq!(probe_graphic_sets(&mut store, AssetFormat::Bmp), 2);
    }

    #[test]
    fn test_probe_uses_format_extension() {
        let mut store = MockStore::new();
        store.insert("/10.bmp", vec![0]);
        assert_eq!(probe_graphic_sets(&mut store, AssetFormat::Clk), 0);
    }

    #[test]
    fn test_probe_caps_at_nine() {
        let mut store = MockStore::new();
        for set in 1..=12u32 {
            store.insert(&format!("/{}.bmp", set * 10), vec![0]);
        }
        assert_eq!(probe_graphic_sets(&mut store, AssetFormat::Bmp), 9);
    }

    #[test]
    fn test_probe_unavailable_store() {
        let mut store = MockStore::new();
        store.insert("/10.bmp", vec![0]);
        store.available = false;
        assert_eq!(probe_graphic_sets(&mut store, AssetFormat::Bmp), 0);
    }
}
