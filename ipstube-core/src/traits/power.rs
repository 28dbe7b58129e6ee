//! Panel power trait

/// Trait for the shared panel power-enable line
///
/// Boards without a switchable line implement this as a no-op that always
/// reports powered.
pub trait PanelPower {
    /// Switch every panel on or off
    fn set_powered(&mut self, on: bool);

    /// Check if the panels are currently powered
    fn is_powered(&self) -> bool;
}
