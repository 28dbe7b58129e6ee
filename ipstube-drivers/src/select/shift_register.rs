//! 74HC595 chip-select driver
//!
//! The EleksTube IPS board routes the six panel chip-select lines
//! through a shift register. Chip selects are active low and start at
//! output Q2, so the byte shifted out is the inverted panel mask moved up
//! two bits, least significant bit first.

use embedded_hal::digital::OutputPin;
use ipstube_core::traits::{PanelIndex, PanelSelect, Selection};

use super::drive;

/// Outputs below the first chip-select line
const FIRST_CS_OUTPUT: u8 = 2;

/// Shift-register panel selector
pub struct ShiftRegisterSelect<D, C, L> {
    data: D,
    clock: C,
    latch: L,
    selection: Selection,
}

impl<D, C, L> ShiftRegisterSelect<D, C, L>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
{
    /// Create a new selector
    ///
    /// # Arguments
    ///
    /// * `data` - Serial data input (DS)
    /// * `clock` - Shift clock (SHCP)
    /// * `latch` - Storage register clock (STCP)
    pub fn new(data: D, clock: C, latch: L) -> Self {
        Self {
            data,
            clock,
            latch,
            selection: Selection::All,
        }
    }

    /// Byte shifted out for a chip-select mask
    pub fn shift_byte(mask: u8) -> u8 {
        (!mask) << FIRST_CS_OUTPUT
    }

    fn shift_out(&mut self, byte: u8) {
        for bit in 0..8 {
            drive(&mut self.data, byte & (1 << bit) != 0);
            drive(&mut self.clock, true);
            drive(&mut self.clock, false);
        }
    }

    /// Push the current selection to the outputs
    fn update(&mut self) {
        let byte = Self::shift_byte(self.selection.mask());
        drive(&mut self.latch, false);
        self.shift_out(byte);
        drive(&mut self.latch, true);
    }

    /// Release the pins
    pub fn release(self) -> (D, C, L) {
        (self.data, self.clock, self.latch)
    }
}

impl<D, C, L> PanelSelect for ShiftRegisterSelect<D, C, L>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
{
    fn init(&mut self) {
        drive(&mut self.clock, false);
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

    fn commit(&mut self) {
        self.update();
    }
}
