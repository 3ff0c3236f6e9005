//! Vibration motor
//!
//! The motor driver transistor is switched by one GPIO. A pulse blocks
//! for its whole duration.

use embedded_hal::delay::DelayNs;
use hexi_hal::OutputPin;

pub struct VibrationMotor<P, D> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> VibrationMotor<P, D> {
    /// Take the pin and make sure the motor is off
    pub fn new(mut pin: P, delay: D) -> Self {
        pin.set_low();
        Self { pin, delay }
    }

    /// Run the motor for `ms` milliseconds
    pub fn vibrate(&mut self, ms: u32) {
        trace!("vibration: {} ms", ms);
        self.pin.set_high();
        self.delay.delay_ms(ms);
        self.pin.set_low();
    }

    pub fn is_running(&self) -> bool {
        self.pin.is_set_high()
    }

    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}
