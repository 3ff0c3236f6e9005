//! Board-agnostic core types for the Hexiwear
//!
//! This crate contains everything that does not depend on a specific
//! peripheral implementation:
//!
//! - Peripheral traits (motion, weather, optical sensors and the OLED)
//! - Physical reading types
//! - 24-bit to RGB565 color handling
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod reading;
pub mod traits;

pub use color::Color;
pub use config::{Feature, Features, HexiwearConfig};
pub use reading::Vector3;
