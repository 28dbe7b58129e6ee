//! Panel power line
//!
//! All six panels share one power enable. Boards without a switchable
//! line use [`AlwaysOn`].

use embedded_hal::digital::OutputPin;
use ipstube_core::traits::PanelPower;

/// Power enable driven by a GPIO
pub struct GpioPowerLine<P> {
    pin: P,
    /// If true, panels are powered when the pin is LOW
    inverted: bool,
    on: bool,
}

impl<P: OutputPin> GpioPowerLine<P> {
    /// Create a power line, initially off
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut line = Self {
            pin,
            inverted,
            on: true,
        };
        line.set_powered(false);
        line
    }

    /// Create a power line that is on when the pin is high
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a power line that is on when the pin is low
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> PanelPower for GpioPowerLine<P> {
    fn set_powered(&mut self, on: bool) {
        let result = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match result {
            Ok(()) => self.on = on,
            Err(_) => warn!("Panel power pin write failed"),
        }
    }

    fn is_powered(&self) -> bool {
        self.on
    }
}

/// Panels wired straight to the supply
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysOn;

impl PanelPower for AlwaysOn {
    fn set_powered(&mut self, on: bool) {
        if !on {
            debug!("Panel power is not switchable");
        }
    }

    fn is_powered(&self) -> bool {
        true
    }
}
