//! KW40Z Host Interface Protocol
//!
//! This crate defines the UART protocol spoken between the Hexiwear's main
//! MCU (host) and the KW40Z radio co-processor running the stock
//! `HEXIWEAR_KW40.bin` application. The KW40Z owns the BLE stack and the
//! capacitive touch electrodes; the host pushes sensor values and receives
//! touch and pairing events.
//!
//! # Protocol Overview
//!
//! All packets use the same binary frame:
//! ```text
//! ┌──────┬────────────┬──────┬────────┬─────────────┬─────────┐
//! │ 0x55 │ 0xAA|flags │ TYPE │ LENGTH │ PAYLOAD     │ 0x45    │
//! │ 1B   │ 1B         │ 1B   │ 1B     │ 0–23B       │ 1B      │
//! └──────┴────────────┴──────┴────────┴─────────────┴─────────┘
//! ```
//!
//! A sender that sets the confirm flag expects an `OK` packet in return.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod packet;

pub use frame::{
    Frame, FrameError, FrameParser, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, RX_CONFIRM_MASK,
    START_BYTE_1, START_BYTE_2, TRAILER_BYTE,
};
pub use messages::{HostCommand, Kw40zEvent};
pub use packet::{
    AlertKind, AppMode, Button, OtapState, PacketType, ALERT_IN_TYPE_NOTIFICATION,
    ALERT_IN_TYPE_SETTINGS, ALERT_IN_TYPE_TIME_UPDATE,
};
