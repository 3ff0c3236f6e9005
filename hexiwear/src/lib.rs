//! Hexiwear aggregation layer
//!
//! [`Hexiwear`] owns the peripherals of one board and exposes them as a
//! single object: sensor readings, the OLED, the actuators and the KW40Z
//! BLE link. Features switched off at construction answer every call with
//! [`Error::Disabled`].
//!
//! The board is described by a [`Board`] implementation, which names the
//! concrete driver type of each part, and handed over as [`Parts`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod board;
pub mod device;
pub mod error;
pub mod text;

#[cfg(test)]
mod mock;

pub use board::{BatteryParts, Board, HeartRateParts, LedParts, Parts};
pub use device::Hexiwear;
pub use error::Error;
pub use hexi_core::{Color, Feature, Features, HexiwearConfig};
pub use text::TextStyle;
