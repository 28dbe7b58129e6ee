//! One GPIO per panel chip select
//!
//! Used on boards without a shift register (IPSTUBE H401 and similar),
//! where each chip-select line is driven directly.

use embedded_hal::digital::OutputPin;
use ipstube_core::config::PANEL_COUNT;
use ipstube_core::traits::{PanelIndex, PanelSelect, Selection};

use super::drive;

/// Direct-pin panel selector
pub struct DirectPinSelect<P> {
    pins: [P; PANEL_COUNT],
    active_low: bool,
    selection: Selection,
}

impl<P: OutputPin> DirectPinSelect<P> {
    /// Create a new selector
    ///
    /// # Arguments
    ///
    /// * `pins` - Chip-select pins indexed by panel
    /// * `active_low` - Panels are selected when their pin is low
    pub fn new(pins: [P; PANEL_COUNT], active_low: bool) -> Self {
        Self {
            pins,
            active_low,
            selection: Selection::All,
        }
    }

    fn update(&mut self) {
        let mask = self.selection.mask();
        for (i, pin) in self.pins.iter_mut().enumerate() {
            let selected = mask & (1 << i) != 0;
            drive(pin, selected != self.active_low);
        }
    }

    pub fn release(self) -> [P; PANEL_COUNT] {
        self.pins
    }
}

impl<P: OutputPin> PanelSelect for DirectPinSelect<P> {
    fn init(&mut self) {
        self.selection = Selection::All;
        self.update();
    }

    fn select(&mut self, panel: PanelIndex) {
        self.selection = Selection::Panel(panel);
        self.update();
    }

    fn select_all(&mut self) {
        self.selection = Selection::All;
        self.update();
    }

    fn selection(&self) -> Selection {
        self.selection
    }
}
