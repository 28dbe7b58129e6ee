//! Configuration type definitions
//!
//! Display-behaviour settings that are independent of the board wiring.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of panels in the bank
pub const PANEL_COUNT: usize = 6;

/// Highest graphic set probed at startup (assets 10..=99)
pub const MAX_GRAPHIC_SETS: u8 = 9;

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Full brightness; dimming is skipped at this level
pub const FULL_BRIGHTNESS: u8 = 255;

/// Asset container stored in flash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssetFormat {
    /// Windows bitmap, 1/4/8/24 bits per pixel
    #[default]
    Bmp,
    /// Pre-converted RGB565 container with a "CK" signature
    Clk,
}

impl AssetFormat {
    /// File extension without the dot
    pub const fn extension(self) -> &'static str {
        match self {
            AssetFormat::Bmp => "bmp",
            AssetFormat::Clk => "clk",
        }
    }
}

/// Day/night brightness schedule
///
/// The night window runs from `night_start_hour` (inclusive) to
/// `night_end_hour` (exclusive) and may wrap past midnight. Equal start and
/// end hours disable night mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DimmingConfig {
    /// Brightness outside the night window
    ///
    /// Defaults to [`FULL_BRIGHTNESS`], at which decoding skips the blend
    /// toward black entirely and daytime pixels are the asset's own colors.
    pub day_level: u8,
    /// Brightness inside the night window
    pub night_level: u8,
    /// Hour (0-23) at which night starts
    pub night_start_hour: u8,
    /// Hour (0-23) at which day resumes
    pub night_end_hour: u8,
}

impl Default for DimmingConfig {
    fn default() -> Self {
        Self {
            day_level: FULL_BRIGHTNESS,
            night_level: 20,
            night_start_hour: 22,
            night_end_hour: 7,
        }
    }
}

impl DimmingConfig {
    /// Check whether `hour` (0-23) falls into the night window
    pub fn is_night(&self, hour: u8) -> bool {
        let (start, end) = (self.night_start_hour, self.night_end_hour);
        if start == end {
            false
        } else if start > end {
            // Window wraps past midnight
            hour >= start || hour < end
        } else {
            hour >= start && hour < end
        }
    }

    /// Brightness level to use during `hour`
    pub fn level_for_hour(&self, hour: u8) -> u8 {
        if self.is_night(hour) {
            self.night_level
        } else {
            self.day_level
        }
    }
}

/// Control loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoopTiming {
    /// Target duration of one iteration
    pub budget_ms: u32,
    /// Opportunistic work only runs while more than this remains
    pub min_slack_ms: u32,
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self {
            budget_ms: 20,
            min_slack_ms: 0,
        }
    }
}

/// What to do with a remotely requested graphic set that does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GraphicClampPolicy {
    /// Fall back to the first set (behaviour of deployed firmware)
    #[default]
    ResetToFirst,
    /// Use the nearest valid set
    ClampToLast,
}

impl GraphicClampPolicy {
    /// Map a requested set onto `1..=available`
    ///
    /// Returns `None` when no sets are available at all.
    pub fn apply(self, requested: i16, available: u8) -> Option<u8> {
        if available == 0 {
            return None;
        }
        if requested >= 1 && requested <= i16::from(available) {
            return Some(requested as u8);
        }
        match self {
            GraphicClampPolicy::ResetToFirst => Some(1),
            GraphicClampPolicy::ClampToLast if requested < 1 => Some(1),
            GraphicClampPolicy::ClampToLast => Some(available),
        }
    }
}
