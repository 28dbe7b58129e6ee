//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in ipstube-core:
//!
//! - Panel selectors (74HC595 shift register, direct chip-select pins)
//! - Panel power line (GPIO, always-on)
//! - Draw surface over any `embedded-graphics` RGB565 target
//! - Asset store backed by data embedded in flash

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod power;
pub mod select;
pub mod store;
pub mod surface;

pub use power::{AlwaysOn, GpioPowerLine};
pub use select::{DirectPinSelect, ShiftRegisterSelect};
pub use store::StaticAssetStore;
pub use surface::GraphicsSurface;

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;
    use std::vec::Vec;

    use embedded_hal::digital::{ErrorType, OutputPin};

    /// Pin level changes as `(pin id, high)`
    pub type PinLog = Rc<RefCell<Vec<(u8, bool)>>>;

    pub struct MockPin {
        pub id: u8,
        pub log: PinLog,
    }

    impl MockPin {
        pub fn new(id: u8, log: &PinLog) -> Self {
            Self {
                id,
                log: log.clone(),
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push((self.id, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push((self.id, true));
            Ok(())
        }
    }

    /// Last level written to pin `id`
    pub fn level(log: &PinLog, id: u8) -> Option<bool> {
        log.borrow()
            .iter()
            .rev()
            .find(|(pin, _)| *pin == id)
            .map(|(_, high)| *high)
    }
}
