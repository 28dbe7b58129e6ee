//! Events that trigger display mode transitions

/// Events that can change what the panels show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayEvent {
    /// Sensor readout, text, image or spectrum was drawn
    ExternalContent,
    /// Host asked for the clock back
    ClockRequested,
}
