//! Link and timing configuration
//!
//! Defaults match the stock KW40Z firmware and the reference Hexiwear
//! application.

use hexi_hal::UartConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::Features;

/// KW40Z host interface settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Kw40zConfig {
    /// UART line settings
    pub uart: UartConfig,
    /// Maximum transmissions of a packet awaiting confirmation
    pub retransmit_count: u8,
    /// Time to wait for an OK packet before retransmitting (ms)
    pub retransmit_timeout_ms: u16,
    /// Ask the KW40Z to confirm data/command packets
    pub tx_confirmation: bool,
    /// Answer KW40Z packets that request confirmation
    pub rx_confirmation: bool,
}

impl Default for Kw40zConfig {
    fn default() -> Self {
        Self {
            uart: UartConfig::KW40Z,
            retransmit_count: 3,
            retransmit_timeout_ms: 100,
            tx_confirmation: true,
            rx_confirmation: true,
        }
    }
}

/// Heart rate beat detector settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeartRateConfig {
    /// Optical sample period (ms)
    pub sample_period_ms: u16,
    /// Silence after which the detector resets (ms)
    pub reset_after_ms: u16,
}

impl Default for HeartRateConfig {
    fn default() -> Self {
        Self {
            sample_period_ms: 50,
            reset_after_ms: 3000,
        }
    }
}

/// Periodic push of sensor values to the KW40Z
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSyncConfig {
    /// Interval between pushes (ms)
    pub period_ms: u32,
}

impl Default for SensorSyncConfig {
    fn default() -> Self {
        Self { period_ms: 5000 }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HexiwearConfig {
    pub features: Features,
    pub kw40z: Kw40zConfig,
    pub heart_rate: HeartRateConfig,
    pub sensor_sync: SensorSyncConfig,
}

/// Errors from loading or storing a configuration blob
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output buffer too small
    BufferTooSmall,
    /// Blob is not a valid configuration
    Deserialize,
}

#[cfg(feature = "serde")]
impl HexiwearConfig {
    /// Serialize to postcard binary, returning the used part of `buf`
    pub fn to_postcard<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::BufferTooSmall)
    }

    /// Deserialize from postcard binary
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)
    }
}
