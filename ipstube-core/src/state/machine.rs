//! Display mode definition

use super::events::DisplayEvent;

/// What the panels are currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Clock digits, refreshed every loop iteration
    #[default]
    Clock,
    /// Externally supplied content; clock refresh is suppressed
    External,
}

impl DisplayMode {
    /// Check if the control loop should refresh clock digits
    pub fn shows_clock(&self) -> bool {
        matches!(self, DisplayMode::Clock)
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: DisplayEvent) -> Self {
        match (self, event) {
            (_, DisplayEvent::ExternalContent) => DisplayMode::External,
            (_, DisplayEvent::ClockRequested) => DisplayMode::Clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode_shows_clock() {
        assert!(DisplayMode::default().shows_clock());
    }

    #[test]
    fn test_external_content_suppresses_clock() {
        let mode = DisplayMode::Clock.transition(DisplayEvent::ExternalContent);
        assert_eq!(mode, DisplayMode::External);
        assert!(!mode.shows_clock());
        // Further external content keeps the mode
        assert_eq!(
            mode.transition(DisplayEvent::ExternalContent),
            DisplayMode::External
        );
    }

    #[test]
    fn test_clock_request_restores_clock() {
        assert_eq!(
            DisplayMode::External.transition(DisplayEvent::ClockRequested),
            DisplayMode::Clock
        );
        assert_eq!(
            DisplayMode::Clock.transition(DisplayEvent::ClockRequested),
            DisplayMode::Clock
        );
    }
}
