//! Connectivity and sensor inputs for the status overlays

use heapless::String;

/// Readings at or below this are treated as a missing sensor
const MIN_VALID_CELSIUS_X10: i16 = -300;

/// Longest preformatted temperature text
pub const TEMPERATURE_TEXT_LEN: usize = 8;

/// Temperature supplied by the sensor collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureReading {
    /// Fixed-point value with 0.1 degC resolution (21.5 degC is 215)
    pub celsius_x10: i16,
    /// Text shown on the panel, e.g. `"21.5"`
    pub text: String<TEMPERATURE_TEXT_LEN>,
}

impl TemperatureReading {
    /// Check if the reading should be displayed
    pub fn is_valid(&self) -> bool {
        self.celsius_x10 > MIN_VALID_CELSIUS_X10
    }
}

/// Inputs from the network, broker and sensor collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusInputs {
    pub network_connected: bool,
    pub broker_connected: bool,
    pub temperature: Option<TemperatureReading>,
}

impl Default for StatusInputs {
    fn default() -> Self {
        Self {
            network_connected: true,
            broker_connected: true,
            temperature: None,
        }
    }
}

impl StatusInputs {
    /// Temperature to overlay, if a valid one exists
    pub fn valid_temperature(&self) -> Option<&TemperatureReading> {
        self.temperature.as_ref().filter(|t| t.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(celsius_x10: i16) -> TemperatureReading {
        let mut text = String::new();
        text.push_str("x").unwrap();
        TemperatureReading { celsius_x10, text }
    }

    #[test]
    fn test_validity_threshold() {
        assert!(reading(215).is_valid());
        assert!(reading(-299).is_valid());
        assert!(!reading(-300).is_valid());
        assert!(!reading(-1270).is_valid());
    }

    #[test]
    fn test_valid_temperature_filters() {
        let mut status = StatusInputs::default();
        assert!(status.valid_temperature().is_none());
        status.temperature = Some(reading(-500));
        assert!(status.valid_temperature().is_none());
        status.temperature = Some(reading(200));
        assert_eq!(status.valid_temperature().map(|t| t.celsius_x10), Some(200));
    }
}
