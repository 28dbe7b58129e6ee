//! Time source trait

/// Monotonic millisecond clock used for loop budgeting
///
/// The counter may wrap; consumers only ever look at differences.
pub trait Monotonic {
    /// Milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u32;
}
