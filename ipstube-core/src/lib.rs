//! Board-agnostic core logic for the ipstube six-panel clock
//!
//! This crate contains all display logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (panel select, power, draw surface, storage)
//! - Image decoding for the BMP and CLK asset containers
//! - Single-slot frame cache with prefetch
//! - Digit renderer and status overlays
//! - Cooperative control-loop scheduler
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod asset;
pub mod cache;
pub mod config;
pub mod image;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod traits;

#[cfg(test)]
mod testing;

pub use asset::AssetId;
pub use cache::{CacheError, FrameCache};
pub use image::{decode, DecodeError, PixelBuffer};
pub use render::{DigitRenderer, DigitSlot, DigitValue, DrawMode};
pub use scheduler::ControlLoop;
