//! Actuator drivers
//!
//! - Vibration motor: single GPIO, blocking pulse
//! - RGB LED: three active-low GPIO channels

pub mod rgb_led;
pub mod vibration;

pub use rgb_led::RgbLed;
pub use vibration::VibrationMotor;
