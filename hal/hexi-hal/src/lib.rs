//! Hexiwear Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the Hexiwear driver crates are
//! written against. A board support crate for the MK64F (or a host-side
//! mock in tests) implements them; the drivers never touch registers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  hexiwear (aggregation layer)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hexi-drivers (KW40Z, battery, LEDs)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hexi-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial link to the KW40Z
//! - [`adc::AdcChannel`] - Single analog input (battery sense)

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::AdcChannel;
pub use gpio::{InputPin, OutputPin};
pub use uart::{Uart, UartConfig, UartRx, UartTx};
