//! Display mode state machine
//!
//! Decides whether the panels show the clock or content pushed by an
//! external controller. The state machine is explicit, finite, and
//! deterministic.

pub mod events;
pub mod machine;

pub use events::DisplayEvent;
pub use machine::DisplayMode;
