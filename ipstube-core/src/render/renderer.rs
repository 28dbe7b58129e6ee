//! Digit renderer
//!
//! Draws one digit image per panel through the frame cache and keeps track
//! of what every panel last showed, so unchanged digits cost nothing.

use crate::asset::{probe_graphic_sets, AssetId};
use crate::cache::FrameCache;
use crate::config::PANEL_COUNT;
use crate::image::color::BLACK;
use crate::traits::{AssetStore, DrawSurface, PanelPower, PanelSelect, SurfaceError};

use super::bank::PanelBank;
use super::slot::{DigitSlot, DigitValue, DrawMode};
use super::status::{StatusInputs, TemperatureReading};

/// Clock face renderer
///
/// Owns the panel bank and the frame cache for the lifetime of the
/// application.
pub struct DigitRenderer<'b, S, P, W, D>
where
    S: AssetStore,
{
    pub(super) bank: PanelBank<P, W, D>,
    pub(super) cache: FrameCache<'b, S>,
    last: [Option<DigitValue>; PANEL_COUNT],
    graphic_set: u8,
    faces: u8,
    next_required: Option<AssetId>,
    pub(super) status: StatusInputs,
}

impl<'b, S, P, W, D> DigitRenderer<'b, S, P, W, D>
where
    S: AssetStore,
    P: PanelSelect,
    W: PanelPower,
    D: DrawSurface,
{
    pub fn new(bank: PanelBank<P, W, D>, cache: FrameCache<'b, S>) -> Self {
        Self {
            bank,
            cache,
            last: [None; PANEL_COUNT],
            graphic_set: 1,
            faces: 0,
            next_required: None,
            status: StatusInputs::default(),
        }
    }

    /// Bring up the bank and count the available graphic sets
    ///
    /// With no sets (or no storage) digit rendering becomes a no-op; the
    /// rest of the system keeps running.
    pub fn begin(&mut self) -> u8 {
        self.bank.init();
        self.bank.force_power_on();
        self.cache.invalidate();

        let format = self.cache.format();
        self.faces = probe_graphic_sets(self.cache.store_mut(), format);
        if self.graphic_set > self.faces {
            self.graphic_set = 1;
        }
        self.faces
    }

    /// Record a new value for `slot` and draw it according to `mode`
    ///
    /// Returns true if the panel was drawn.
    pub fn set_digit(&mut self, slot: DigitSlot, value: DigitValue, mode: DrawMode) -> bool {
        let old = self.last[slot.index()].replace(value);

        let draw = match mode {
            DrawMode::NoDraw => false,
            DrawMode::IfChanged => old != Some(value),
            DrawMode::Force => true,
        };
        if !draw || self.faces == 0 {
            return false;
        }

        self.bank.select_slot(slot);
        self.draw_value(value);
        self.draw_overlays(slot);
        self.bank.finish_draw();
        true
    }

    fn draw_value(&mut self, value: DigitValue) {
        let digit = match value {
            DigitValue::Blanked => {
                log_draw(self.bank.surface_mut().fill_screen(BLACK));
                return;
            }
            DigitValue::Value(digit) => digit,
        };

        let id = match AssetId::for_digit(self.graphic_set, digit) {
            Some(id) => id,
            None => {
                warn!("No asset for set {} digit {}", self.graphic_set, digit);
                return;
            }
        };
        // Missing or broken assets were logged by the cache; the panel keeps
        // its previous contents and the prediction stands.
        if self.cache.ensure_loaded(id).is_err() {
            return;
        }
        log_draw(self.bank.surface_mut().push_buffer(self.cache.buffer()));

        // Seconds change most often and are drawn first, so their next
        // value is the best guess for the next decode.
        let next = self.last[DigitSlot::SecondsOnes.index()].map_or(0, DigitValue::next);
        self.next_required = AssetId::for_digit(self.graphic_set, next);
    }

    /// Redraw every slot that has a value
    pub fn redraw_all(&mut self) {
        for slot in DigitSlot::DRAW_ORDER {
            if let Some(value) = self.last[slot.index()] {
                self.set_digit(slot, value, DrawMode::Force);
            }
        }
    }

    /// Decode the predicted next asset if it is not already resident
    ///
    /// Only meant to be called from loop slack time. Returns true if a
    /// decode happened.
    pub fn prefetch(&mut self) -> bool {
        if self.faces == 0 {
            return false;
        }
        match self.next_required {
            Some(id) => self.cache.prefetch(id),
            None => false,
        }
    }

    /// Change the dimming level
    ///
    /// Returns true if it changed; the cache then re-decodes on next use.
    pub fn set_dimming(&mut self, level: u8) -> bool {
        let changed = self.cache.set_dimming(level);
        if changed {
            info!("Dimming level set to {}", level);
        }
        changed
    }

    pub fn dimming(&self) -> u8 {
        self.cache.dimming()
    }

    /// Select the graphic set used for digits, clamped to `1..=faces`
    ///
    /// Returns the set now in effect.
    pub fn set_graphic_set(&mut self, set: u8) -> u8 {
        let clamped = set.clamp(1, self.faces.max(1));
        if clamped != self.graphic_set {
            info!("Graphic set changed to {}", clamped);
            self.graphic_set = clamped;
        }
        self.graphic_set
    }

    pub fn graphic_set(&self) -> u8 {
        self.graphic_set
    }

    /// Number of graphic sets found at startup
    pub fn faces(&self) -> u8 {
        self.faces
    }

    /// Last value recorded for `slot`, `None` before the first `set_digit`
    pub fn last_value(&self, slot: DigitSlot) -> Option<DigitValue> {
        self.last[slot.index()]
    }

    /// Asset the next prefetch will load
    pub fn next_required(&self) -> Option<AssetId> {
        self.next_required
    }

    /// Switch the panels on
    ///
    /// Waking from off clears every panel; returns true in that case so the
    /// caller can schedule a full redraw.
    pub fn power_on(&mut self) -> bool {
        let woke = self.bank.power_on();
        if woke {
            info!("Panels powered on");
            log_draw(self.bank.clear_all(BLACK));
        }
        woke
    }

    pub fn power_off(&mut self) {
        info!("Panels powered off");
        self.bank.power_off();
    }

    /// Flip the power state; returns true if the panels are now on
    pub fn toggle_power(&mut self) -> bool {
        if self.bank.is_powered() {
            self.power_off();
            false
        } else {
            self.power_on();
            true
        }
    }

    pub fn is_powered(&self) -> bool {
        self.bank.is_powered()
    }

    pub fn set_network_connected(&mut self, connected: bool) {
        self.status.network_connected = connected;
    }

    pub fn set_broker_connected(&mut self, connected: bool) {
        self.status.broker_connected = connected;
    }

    pub fn set_temperature(&mut self, reading: Option<TemperatureReading>) {
        self.status.temperature = reading;
    }

    pub fn status(&self) -> &StatusInputs {
        &self.status
    }

    pub fn bank(&self) -> &PanelBank<P, W, D> {
        &self.bank
    }

    pub fn cache(&self) -> &FrameCache<'b, S> {
        &self.cache
    }
}

/// Surface failures are logged and the draw is skipped
pub(super) fn log_draw(result: Result<(), SurfaceError>) {
    if let Err(e) = result {
        warn!("Panel draw failed: {:?}", e);
    }
}
