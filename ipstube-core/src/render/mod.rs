//! Digit rendering
//!
//! Maps clock digits onto panels, decides when a panel needs redrawing,
//! and draws the status overlays and host-supplied content.

pub mod auxiliary;
pub mod bank;
mod overlay;
pub mod renderer;
pub mod slot;
pub mod status;

pub use auxiliary::CustomImageError;
pub use bank::PanelBank;
pub use renderer::DigitRenderer;
pub use slot::{ClockDigits, ClockFormat, DigitSlot, DigitValue, DrawMode};
pub use status::{StatusInputs, TemperatureReading};
