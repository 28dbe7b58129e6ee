//! Panel selection trait
//!
//! All panels share one display bus; the selector decides which chip-select
//! lines are asserted for the next drawing primitive.

use crate::config::PANEL_COUNT;

/// Chip-select mask with every panel asserted
pub const ALL_PANELS_MASK: u8 = (1 << PANEL_COUNT) - 1;

/// Hardware index of one panel (chip-select line), `0..PANEL_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelIndex(u8);

impl PanelIndex {
    /// Create a panel index
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`PANEL_COUNT`]. Addressing a panel
    /// that does not exist is a wiring bug, not a runtime condition.
    pub fn new(index: u8) -> Self {
        assert!(
            (index as usize) < PANEL_COUNT,
            "panel index {} out of range",
            index
        );
        Self(index)
    }

    /// Create a panel index, returning `None` if out of range
    pub fn try_new(index: u8) -> Option<Self> {
        ((index as usize) < PANEL_COUNT).then_some(Self(index))
    }

    /// Raw index
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Chip-select bit for this panel
    pub const fn mask(self) -> u8 {
        1 << self.0
    }
}

/// Current addressing state of the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Selection {
    /// Exactly one panel receives drawing primitives
    Panel(PanelIndex),
    /// Every panel receives drawing primitives
    All,
}

impl Selection {
    /// Chip-select mask with a bit set for every addressed panel
    pub const fn mask(self) -> u8 {
        match self {
            Selection::Panel(panel) => panel.mask(),
            Selection::All => ALL_PANELS_MASK,
        }
    }
}

/// Trait for panel chip-select drivers
///
/// Selection is a pure state change with no failure mode; drivers swallow
/// GPIO errors the same way the bus itself would.
pub trait PanelSelect {
    /// Put the bus into a known state with every panel addressed
    fn init(&mut self);

    /// Address exactly one panel
    fn select(&mut self, panel: PanelIndex);

    /// Address every panel for broadcast primitives
    fn select_all(&mut self);

    /// Current addressing state
    fn selection(&self) -> Selection;

    /// Re-apply the current selection after a draw
    ///
    /// Boards that need the chip-select outputs re-latched after every
    /// transfer override this; the default does nothing.
    fn commit(&mut self) {}
}
