//! Host command dispatch
//!
//! Applies parsed serial and broker commands to the renderer and the
//! display mode.

use ipstube_protocol::{
    status_state, BrokerCommand, ButtonPress, CommandError, SensorReading, SerialCommand,
};

use crate::render::{CustomImageError, DigitSlot, DigitValue, DrawMode};
use crate::state::DisplayEvent;
use crate::traits::{AssetStore, DrawSurface, PanelPower, PanelSelect};

use super::control::ControlLoop;

/// Largest value shown by a sensor readout
const MAX_SENSOR_VALUE: i32 = 99;

/// Errors from [`ControlLoop::handle_serial`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Line is not a known command
    Command(CommandError),
    /// Image payload was rejected
    Image(CustomImageError),
}

impl From<CommandError> for DispatchError {
    fn from(e: CommandError) -> Self {
        DispatchError::Command(e)
    }
}

impl From<CustomImageError> for DispatchError {
    fn from(e: CustomImageError) -> Self {
        DispatchError::Image(e)
    }
}

impl<'b, S, P, W, D> ControlLoop<'b, S, P, W, D>
where
    S: AssetStore,
    P: PanelSelect,
    W: PanelPower,
    D: DrawSurface,
{
    /// Handle one complete serial line
    ///
    /// # Arguments
    ///
    /// * `line` - Line without its terminator
    /// * `scratch` - Space for decoding image payloads
    ///
    /// Rejected lines leave the display and the mode untouched.
    pub fn handle_serial(&mut self, line: &str, scratch: &mut [u8]) -> Result<(), DispatchError> {
        let command = SerialCommand::parse(line).map_err(|e| {
            warn!("Ignoring serial line: {:?}", e);
            e
        })?;
        let event = if command.is_external_content() {
            DisplayEvent::ExternalContent
        } else {
            DisplayEvent::ClockRequested
        };

        match command {
            SerialCommand::Sensors(readings) => self.show_sensors(&readings),
            SerialCommand::Clock => {
                info!("Returning to clock display");
                self.last_lyric.clear();
                self.force_redraw = true;
            }
            SerialCommand::Text(text) => self.renderer.show_long_text(text),
            SerialCommand::Image(payload) => {
                self.renderer
                    .show_custom_image(payload, scratch)
                    .map_err(|e| {
                        warn!("Rejected custom image: {:?}", e);
                        e
                    })?;
            }
            SerialCommand::Spectrum { bands, lyric } => {
                self.renderer.show_spectrogram(bands);
                if let Some(lyric) = lyric {
                    self.show_lyric(lyric);
                }
            }
        }

        self.mode = self.mode.transition(event);
        Ok(())
    }

    /// Two-digit readouts on the hours, minutes and seconds panel pairs
    fn show_sensors(&mut self, readings: &[SensorReading<'_>; 3]) {
        let previous = self.renderer.graphic_set();

        for (pair, reading) in readings.iter().enumerate() {
            self.renderer.set_graphic_set(self.sensor_sets[pair]);
            let value = reading.value.clamp(0, MAX_SENSOR_VALUE) as u8;
            let left = DigitSlot::from_position(pair * 2);
            let right = DigitSlot::from_position(pair * 2 + 1);
            self.renderer
                .set_digit(left, DigitValue::digit(value / 10), DrawMode::Force);
            self.renderer
                .set_digit(right, DigitValue::digit(value % 10), DrawMode::Force);
            self.renderer.show_text_label(reading.label, pair * 2);
        }

        self.renderer.set_graphic_set(previous);
    }

    /// Show a lyric line unless it is already on screen
    fn show_lyric(&mut self, lyric: &str) {
        if self.last_lyric.as_str() == lyric {
            return;
        }
        self.renderer.show_long_text(lyric);

        self.last_lyric.clear();
        for c in lyric.chars() {
            if self.last_lyric.push(c).is_err() {
                break;
            }
        }
    }

    /// Handle a broker state value
    ///
    /// Graphic selections are applied here. Button presses are returned
    /// for the menu to handle.
    pub fn handle_broker_state(&mut self, state: u16) -> Option<ButtonPress> {
        match BrokerCommand::from_state(state) {
            BrokerCommand::SelectGraphic(requested) => {
                let faces = self.renderer.faces();
                let Some(set) = self.clamp.apply(requested, faces) else {
                    warn!("No graphic sets available for request {}", requested);
                    return None;
                };
                if i16::from(set) != requested {
                    warn!("Graphic set {} out of range, using {}", requested, set);
                }
                self.renderer.set_graphic_set(set);
                self.force_redraw = true;
                None
            }
            BrokerCommand::Button(button) => Some(button),
            BrokerCommand::Unknown(value) => {
                warn!("Unknown broker state {}", value);
                None
            }
        }
    }

    /// Handle a broker power command
    pub fn handle_broker_power(&mut self, on: bool) {
        if on {
            if self.renderer.power_on() {
                self.force_redraw = true;
            }
        } else {
            self.renderer.power_off();
        }
    }

    /// Flip panel power; returns true if the panels are now on
    pub fn toggle_power(&mut self) -> bool {
        let on = self.renderer.toggle_power();
        if on {
            self.force_redraw = true;
        }
        on
    }

    /// State value to publish for the active graphic set
    pub fn graphic_status_state(&self) -> u16 {
        status_state(self.renderer.graphic_set())
    }
}
