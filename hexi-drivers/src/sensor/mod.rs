//! Sensor drivers
//!
//! - Battery gauge: ADC divider plus charger status line
//! - Heart rate: beat detection over raw optical samples

pub mod battery;
pub mod heart_rate;

pub use battery::{BatteryError, BatteryGauge, BatteryStatus};
pub use heart_rate::HeartRateMonitor;
