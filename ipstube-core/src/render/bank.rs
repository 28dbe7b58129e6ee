//! The physical panel bank
//!
//! Groups the chip-select driver, the shared power line and the draw
//! surface, and applies the slot-to-panel wiring and board quirks from
//! [`ClockConfig`].

use crate::config::{ClockConfig, HardwareQuirks, PanelGeometry, PANEL_COUNT};
use crate::traits::{DrawSurface, PanelIndex, PanelPower, PanelSelect, SurfaceError};

use super::slot::DigitSlot;

/// Six panels sharing one bus and one power line
pub struct PanelBank<P, W, D> {
    selector: P,
    power: W,
    surface: D,
    geometry: PanelGeometry,
    quirks: HardwareQuirks,
    slot_panels: [PanelIndex; PANEL_COUNT],
}

impl<P, W, D> PanelBank<P, W, D>
where
    P: PanelSelect,
    W: PanelPower,
    D: DrawSurface,
{
    /// Create a bank wired as described by `config`
    ///
    /// # Panics
    ///
    /// Panics if `config.slot_panels` names a panel that does not exist.
    pub fn new(config: &ClockConfig, selector: P, power: W, surface: D) -> Self {
        Self {
            selector,
            power,
            surface,
            geometry: config.panel,
            quirks: config.quirks,
            slot_panels: config.slot_panels.map(PanelIndex::new),
        }
    }

    /// Reset the bus with every panel addressed
    pub fn init(&mut self) {
        self.selector.init();
        self.selector.select_all();
    }

    /// Address the panel showing `slot`
    pub fn select_slot(&mut self, slot: DigitSlot) {
        self.selector.select(self.slot_panels[slot.index()]);
    }

    /// Address the panel at `position`, counting left to right from 0
    pub fn select_position(&mut self, position: usize) {
        self.select_slot(DigitSlot::from_position(position));
    }

    /// Address every panel
    pub fn select_all(&mut self) {
        self.selector.select_all();
    }

    /// Fill every panel with `color`
    pub fn clear_all(&mut self, color: u16) -> Result<(), SurfaceError> {
        self.selector.select_all();
        self.surface.fill_screen(color)
    }

    /// Called after every complete panel draw
    pub fn finish_draw(&mut self) {
        if self.quirks.latch_after_draw {
            self.selector.commit();
        }
    }

    /// Switch the panels on
    ///
    /// Returns true if they were off. Boards with the reinit quirk get a
    /// fresh bus initialisation when waking up.
    pub fn power_on(&mut self) -> bool {
        if self.power.is_powered() {
            return false;
        }
        if self.quirks.reinit_on_power_on {
            debug!("Re-initialising panel bus after power-up");
            self.init();
        }
        self.power.set_powered(true);
        true
    }

    /// Switch the panels off
    pub fn power_off(&mut self) {
        self.power.set_powered(false);
    }

    /// Assert the power line without the wake-up handling
    pub fn force_power_on(&mut self) {
        self.power.set_powered(true);
    }

    pub fn is_powered(&self) -> bool {
        self.power.is_powered()
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    pub fn selector(&self) -> &P {
        &self.selector
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }
}
