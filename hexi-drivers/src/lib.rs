//! Hardware driver implementations
//!
//! This crate provides the drivers that sit directly on the HAL traits:
//!
//! - KW40Z co-processor link (BLE services, touch electrodes, pairing)
//! - Battery gauge (ADC + charger status line)
//! - Heart rate beat detector for the optical sensor
//! - Actuators (vibration motor, RGB LED)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod actuator;
pub mod kw40z;
pub mod sensor;

pub use actuator::{RgbLed, VibrationMotor};
pub use kw40z::{Kw40z, Kw40zError, Kw40zStatus};
pub use sensor::{BatteryGauge, BatteryStatus, HeartRateMonitor};
