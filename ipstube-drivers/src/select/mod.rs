//! Panel chip-select drivers

pub mod direct;
pub mod shift_register;

pub use direct::DirectPinSelect;
pub use shift_register::ShiftRegisterSelect;

use embedded_hal::digital::OutputPin;

/// Drive `pin` to `high`, logging failures
///
/// Selection has no error path; a failed write leaves the previous level.
pub(crate) fn drive<P: OutputPin>(pin: &mut P, high: bool) {
    let result = if high { pin.set_high() } else { pin.set_low() };
    if result.is_err() {
        warn!("Chip-select pin write failed");
    }
}
