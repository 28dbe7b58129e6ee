//! Hardware abstraction traits
//!
//! These traits define the interface between the display logic
//! and board-specific implementations.

pub mod background;
pub mod clock;
pub mod display;
pub mod power;
pub mod select;
pub mod storage;

pub use background::{BackgroundOutcome, BackgroundWork};
pub use clock::Monotonic;
pub use display::{DrawSurface, FontSize, SurfaceError, TextStyle};
pub use power::PanelPower;
pub use select::{PanelIndex, PanelSelect, Selection, ALL_PANELS_MASK};
pub use storage::{AssetStore, StorageError};
