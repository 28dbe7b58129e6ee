//! Low-priority work run in loop slack time

use crate::render::TemperatureReading;

/// Results handed back to the control loop by background work
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackgroundOutcome {
    /// Fresh temperature reading; redraws the hours-ones overlay
    pub temperature: Option<TemperatureReading>,
}

/// Peripheral polling that may be skipped when an iteration runs late
pub trait BackgroundWork {
    fn run(&mut self) -> BackgroundOutcome;
}

/// No background work
impl BackgroundWork for () {
    fn run(&mut self) -> BackgroundOutcome {
        BackgroundOutcome::default()
    }
}
