//! State commands received from the message broker.
//!
//! The broker delivers a single integer. Values below 100 select a clock
//! face in steps of five (10 = face 1, 15 = face 2, ...); the 100-120 range
//! emulates the front panel buttons.

/// Front panel button emulated by a broker command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonPress {
    Mode,
    Left,
    Power,
    Right,
}

/// A decoded broker state value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrokerCommand {
    /// Select a graphic set; may be out of range and must be validated
    SelectGraphic(i16),
    /// Emulated button press
    Button(ButtonPress),
    /// Value with no meaning
    Unknown(u16),
}

// Wire format values
const STATE_GRAPHIC_LIMIT: u16 = 100;
const STATE_GRAPHIC_STEP: u16 = 5;
const STATE_BUTTON_MODE: u16 = 100;
const STATE_BUTTON_LEFT: u16 = 110;
const STATE_BUTTON_POWER: u16 = 115;
const STATE_BUTTON_RIGHT: u16 = 120;

impl BrokerCommand {
    /// Decode a state value
    pub fn from_state(state: u16) -> Self {
        match state {
            s if s < STATE_GRAPHIC_LIMIT => {
                BrokerCommand::SelectGraphic((s / STATE_GRAPHIC_STEP) as i16 - 1)
            }
            STATE_BUTTON_MODE => BrokerCommand::Button(ButtonPress::Mode),
            STATE_BUTTON_LEFT => BrokerCommand::Button(ButtonPress::Left),
            STATE_BUTTON_POWER => BrokerCommand::Button(ButtonPress::Power),
            STATE_BUTTON_RIGHT => BrokerCommand::Button(ButtonPress::Right),
            other => BrokerCommand::Unknown(other),
        }
    }
}

impl ButtonPress {
    /// Convert to the wire state value
    pub fn to_state(self) -> u16 {
        match self {
            ButtonPress::Mode => STATE_BUTTON_MODE,
            ButtonPress::Left => STATE_BUTTON_LEFT,
            ButtonPress::Power => STATE_BUTTON_POWER,
            ButtonPress::Right => STATE_BUTTON_RIGHT,
        }
    }
}

/// State value to publish for the active graphic set
pub fn status_state(graphic_set: u8) -> u16 {
    (u16::from(graphic_set) + 1) * STATE_GRAPHIC_STEP
}
