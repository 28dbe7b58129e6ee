//! Status overlays drawn into the bottom strip of a digit panel

use core::fmt::Write;

use heapless::String;

use crate::image::color::{BLACK, CYAN, RED};
use crate::traits::{AssetStore, DrawSurface, FontSize, PanelPower, PanelSelect, TextStyle};

use super::renderer::{log_draw, DigitRenderer};
use super::slot::DigitSlot;

/// Height of the strip holding the connectivity warnings
const WARNING_STRIP: u16 = 27;
/// Height of the strip holding the temperature
const TEMPERATURE_STRIP: u16 = 17;
const TEXT_INSET: u16 = 5;

impl<'b, S, P, W, D> DigitRenderer<'b, S, P, W, D>
where
    S: AssetStore,
    P: PanelSelect,
    W: PanelPower,
    D: DrawSurface,
{
    /// Draw whatever overlay belongs to `slot` onto the selected panel
    pub(super) fn draw_overlays(&mut self, slot: DigitSlot) {
        match slot {
            DigitSlot::SecondsOnes if !self.status.network_connected => {
                self.draw_warning("NO WIFI !");
            }
            DigitSlot::MinutesOnes if !self.status.broker_connected => {
                self.draw_warning("NO MQTT !");
            }
            DigitSlot::HoursOnes => self.draw_temperature(),
            _ => {}
        }
    }

    fn draw_warning(&mut self, text: &str) {
        let geometry = self.bank.geometry();
        let y = geometry.height.saturating_sub(WARNING_STRIP);
        let surface = self.bank.surface_mut();
        log_draw(surface.fill_rect(0, y, geometry.width, WARNING_STRIP, BLACK));
        log_draw(surface.draw_text(
            TEXT_INSET,
            y,
            text,
            TextStyle {
                color: RED,
                background: Some(BLACK),
                size: FontSize::Large,
            },
        ));
    }

    fn draw_temperature(&mut self) {
        let Some(reading) = self.status.valid_temperature() else {
            return;
        };

        let mut text: String<16> = String::new();
        if write!(text, "T: {} C", reading.text.as_str()).is_err() {
            return;
        }

        let geometry = self.bank.geometry();
        let y = geometry.height.saturating_sub(TEMPERATURE_STRIP);
        let surface = self.bank.surface_mut();
        log_draw(surface.fill_rect(0, y, geometry.width, TEMPERATURE_STRIP, BLACK));
        log_draw(surface.draw_text(
            TEXT_INSET,
            y,
            &text,
            TextStyle {
                color: CYAN,
                background: Some(BLACK),
                size: FontSize::Small,
            },
        ));
    }
}
