//! Cooperative control loop
//!
//! One iteration refreshes the clock digits, then spends whatever is left
//! of the time budget on prefetch and background polling. Host commands
//! from the serial line and the message broker are dispatched between
//! iterations.

pub mod budget;
pub mod control;
pub mod dispatch;

pub use budget::IterationBudget;
pub use control::{ControlLoop, IterationReport, MAX_LYRIC_LEN};
pub use dispatch::DispatchError;
