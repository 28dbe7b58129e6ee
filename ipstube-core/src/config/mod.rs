//! Configuration types
//!
//! Board-agnostic configuration structures stored as postcard binary data.

pub mod hardware;
#[cfg(feature = "serde")]
pub mod loader;
pub mod types;

pub use hardware::*;
#[cfg(feature = "serde")]
pub use loader::{load_config, load_or_default, store_config, ConfigError};
pub use types::*;
