//! Hardware configuration types
//!
//! These types describe how the panel bank is wired on a particular board:
//! panel geometry, chip-select bus, power line and per-board quirks. One
//! [`ClockConfig`] is selected at startup and passed to the drivers and the
//! renderer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{
    AssetFormat, DimmingConfig, GraphicClampPolicy, LoopTiming, CONFIG_VERSION, PANEL_COUNT,
};

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Size of the panel bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelGeometry {
    /// Number of panels (at most six)
    pub count: u8,
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            count: PANEL_COUNT as u8,
            width: 135,
            height: 240,
        }
    }
}

impl PanelGeometry {
    /// Pixels in one full-panel buffer
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// How panels are addressed on the shared bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BusTopology {
    /// 74HC595 shift register driving the chip-select lines
    ShiftRegister {
        data: PinConfig,
        clock: PinConfig,
        latch: PinConfig,
    },
    /// One chip-select GPIO per panel
    DirectPins { pins: [PinConfig; PANEL_COUNT] },
}

/// Shared power-enable line for all panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerLineConfig {
    /// Enable pin; active-high unless inverted
    pub pin: PinConfig,
}

/// Board-specific behaviour tweaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HardwareQuirks {
    /// Re-latch the chip-select outputs after every panel draw
    pub latch_after_draw: bool,
    /// Re-initialise the bus when panels are powered back on
    pub reinit_on_power_on: bool,
}

/// Complete clock configuration
///
/// This is the top-level configuration structure; it replaces per-board
/// compile-time switches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// Panel bank geometry
    pub panel: PanelGeometry,
    /// Chip-select wiring
    pub bus: BusTopology,
    /// Power line, `None` when panels are always on
    pub power: Option<PowerLineConfig>,
    /// Board quirks
    pub quirks: HardwareQuirks,
    /// Panel index for each digit slot, indexed seconds-ones first
    pub slot_panels: [u8; PANEL_COUNT],
    /// Asset container stored in flash
    pub asset_format: AssetFormat,
    /// Day/night brightness
    pub dimming: DimmingConfig,
    /// Control loop timing
    pub timing: LoopTiming,
    /// Handling of out-of-range remote graphic selections
    pub graphic_clamp: GraphicClampPolicy,
    /// Graphic sets used for the three `SENSORS:` readouts
    pub sensor_graphic_sets: [u8; 3],
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::elekstube()
    }
}

impl ClockConfig {
    /// Original EleksTube IPS: shift-register chip select, switched power
    pub fn elekstube() -> Self {
        Self {
            version: CONFIG_VERSION,
            panel: PanelGeometry::default(),
            bus: BusTopology::ShiftRegister {
                data: PinConfig::new(14),
                clock: PinConfig::new(16),
                latch: PinConfig::new(17),
            },
            power: Some(PowerLineConfig {
                pin: PinConfig::new(27),
            }),
            quirks: HardwareQuirks {
                latch_after_draw: false,
                reinit_on_power_on: true,
            },
            slot_panels: [0, 1, 2, 3, 4, 5],
            asset_format: AssetFormat::Bmp,
            dimming: DimmingConfig::default(),
            timing: LoopTiming::default(),
            graphic_clamp: GraphicClampPolicy::default(),
            sensor_graphic_sets: [1, 2, 4],
        }
    }

    /// IPSTUBE H401: direct chip-select pins, panels permanently powered
    pub fn ipstube_h401() -> Self {
        Self {
            bus: BusTopology::DirectPins {
                pins: [
                    PinConfig::inverted(15),
                    PinConfig::inverted(2),
                    PinConfig::inverted(27),
                    PinConfig::inverted(14),
                    PinConfig::inverted(12),
                    PinConfig::inverted(13),
                ],
            },
            power: None,
            quirks: HardwareQuirks {
                latch_after_draw: true,
                reinit_on_power_on: false,
            },
            asset_format: AssetFormat::Clk,
            ..Self::elekstube()
        }
    }
}
