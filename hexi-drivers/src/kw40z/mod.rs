//! KW40Z co-processor link
//!
//! The KW40Z runs the BLE stack and the capacitive touch controller. The
//! host pushes sensor values into its GATT services and receives touch,
//! alert and pairing events over the UART.

mod callbacks;
mod driver;
mod error;

pub use callbacks::{CallbackRegistry, EventHandler, EventKind};
pub use driver::Kw40z;
pub use error::{Field, Kw40zError};
pub use kw40z_protocol::{AlertKind, AppMode, Button, Kw40zEvent};

use hexi_core::reading::RawAxes;

/// Outcome of a send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delivery {
    /// The KW40Z answered with OK
    Confirmed,
    /// Retransmits exhausted without an OK
    Unconfirmed,
    /// Sent without asking for confirmation
    Sent,
}

/// Status reported by the KW40Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Kw40zStatus {
    /// 1 when advertising
    pub adv_mode: u8,
    /// 1 when the right electrode pair is active, 0 for the left one
    pub tsi_group: u8,
    /// 1 when a central is connected
    pub link_state: u8,
}

impl Kw40zStatus {
    pub fn is_advertising(&self) -> bool {
        self.adv_mode != 0
    }

    pub fn right_pair_active(&self) -> bool {
        self.tsi_group != 0
    }

    pub fn is_connected(&self) -> bool {
        self.link_state != 0
    }
}

/// Sensor values for the motion and weather services
///
/// `None` fields are left untouched on the KW40Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorUpdate {
    /// Battery level (0-100 %)
    pub battery: Option<u8>,
    pub accel: Option<RawAxes>,
    pub gyro: Option<RawAxes>,
    pub magnet: Option<RawAxes>,
    pub ambient_light: Option<u8>,
    pub temperature: Option<u16>,
    pub humidity: Option<u16>,
    pub pressure: Option<u16>,
}

/// Values for the health service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppDataUpdate {
    pub heart_rate: Option<u8>,
    pub steps: Option<u16>,
    pub calories: Option<u16>,
}
