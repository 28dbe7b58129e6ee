//! Digit slots and clock digits

use crate::config::PANEL_COUNT;

/// Logical digit position on the clock face
///
/// Discriminants follow the chip-select wiring of the reference board,
/// seconds ones first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitSlot {
    SecondsOnes = 0,
    SecondsTens = 1,
    MinutesOnes = 2,
    MinutesTens = 3,
    HoursOnes = 4,
    HoursTens = 5,
}

impl DigitSlot {
    /// Refresh order within one loop iteration, most volatile digit first
    pub const DRAW_ORDER: [DigitSlot; PANEL_COUNT] = [
        DigitSlot::SecondsOnes,
        DigitSlot::SecondsTens,
        DigitSlot::MinutesOnes,
        DigitSlot::MinutesTens,
        DigitSlot::HoursOnes,
        DigitSlot::HoursTens,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Slot shown at `position`, counting panels left to right from 0
    ///
    /// # Panics
    ///
    /// Panics if `position` is not below [`PANEL_COUNT`].
    pub fn from_position(position: usize) -> Self {
        assert!(position < PANEL_COUNT, "panel position {} out of range", position);
        Self::DRAW_ORDER[PANEL_COUNT - 1 - position]
    }

    /// Left-to-right position of this slot
    pub const fn position(self) -> usize {
        PANEL_COUNT - 1 - self.index()
    }
}

/// Value shown by one digit slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitValue {
    /// Panel cleared to black
    Blanked,
    /// Decimal digit 0-9
    Value(u8),
}

impl DigitValue {
    /// Digit value; anything above 9 blanks the panel
    pub fn digit(value: u8) -> Self {
        if value <= 9 {
            DigitValue::Value(value)
        } else {
            DigitValue::Blanked
        }
    }

    /// Value after this one when counting up, wrapping 9 to 0
    ///
    /// A blanked digit counts as rolling over to 0.
    pub fn next(self) -> u8 {
        match self {
            DigitValue::Value(v) if v < 9 => v + 1,
            _ => 0,
        }
    }
}

/// When [`set_digit`](super::DigitRenderer::set_digit) draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawMode {
    /// Remember the value only
    NoDraw,
    /// Draw if the value differs from the last one stored
    IfChanged,
    /// Always draw
    Force,
}

/// 12/24-hour presentation of the hours digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockFormat {
    /// Show 1-12 instead of 0-23
    pub twelve_hour: bool,
    /// Blank the hours tens digit when it is zero
    pub blank_hours_zero: bool,
}

/// Six digit values indexed by [`DigitSlot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockDigits {
    values: [DigitValue; PANEL_COUNT],
}

impl ClockDigits {
    /// Digits for a wall-clock time
    ///
    /// # Arguments
    ///
    /// * `hour` - Hour in 24-hour form (0-23)
    /// * `minute` - Minute (0-59)
    /// * `second` - Second (0-59)
    /// * `format` - 12/24-hour and leading-zero options
    pub fn from_time(hour: u8, minute: u8, second: u8, format: ClockFormat) -> Self {
        let hour = if format.twelve_hour {
            match hour % 12 {
                0 => 12,
                h => h,
            }
        } else {
            hour
        };

        let hours_tens = if format.blank_hours_zero && hour / 10 == 0 {
            DigitValue::Blanked
        } else {
            DigitValue::digit(hour / 10)
        };

        let mut values = [DigitValue::Blanked; PANEL_COUNT];
        values[DigitSlot::SecondsOnes.index()] = DigitValue::digit(second % 10);
        values[DigitSlot::SecondsTens.index()] = DigitValue::digit(second / 10);
        values[DigitSlot::MinutesOnes.index()] = DigitValue::digit(minute % 10);
        values[DigitSlot::MinutesTens.index()] = DigitValue::digit(minute / 10);
        values[DigitSlot::HoursOnes.index()] = DigitValue::digit(hour % 10);
        values[DigitSlot::HoursTens.index()] = hours_tens;
        Self { values }
    }

    /// Explicit digit values indexed by slot
    pub const fn from_values(values: [DigitValue; PANEL_COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, slot: DigitSlot) -> DigitValue {
        self.values[slot.index()]
    }
}
