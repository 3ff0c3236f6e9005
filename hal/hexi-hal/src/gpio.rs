//! GPIO pin abstractions
//!
//! The Hexiwear uses plain GPIO for the vibration motor, the RGB LED
//! (active-low), the charger status line and the sensor power rails.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Output pin whose asserted state is logic low
///
/// Wraps an [`OutputPin`] so callers can think in "on/off" rather than
/// electrical levels. The onboard RGB LED channels are wired this way.
#[derive(Debug)]
pub struct ActiveLow<P>(pub P);

impl<P: OutputPin> ActiveLow<P> {
    /// Assert the output (drive low)
    pub fn assert(&mut self) {
        self.0.set_low();
    }

    /// Release the output (drive high)
    pub fn release(&mut self) {
        self.0.set_high();
    }

    /// Set the logical state
    pub fn set_asserted(&mut self, on: bool) {
        self.0.set_state(!on);
    }

    /// Whether the output is currently asserted
    pub fn is_asserted(&self) -> bool {
        self.0.is_set_low()
    }

    /// Give back the wrapped pin
    pub fn into_inner(self) -> P {
        self.0
    }
}
