//! Error type of the aggregation layer

use hexi_core::traits::{DisplayError, SensorError};
use hexi_core::Feature;
use hexi_drivers::kw40z::Kw40zError;
use hexi_drivers::sensor::BatteryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Feature was switched off at construction
    Disabled(Feature),
    /// Feature enabled but the board supplied no part for it
    MissingPeripheral(Feature),
    /// Sensor driver failure
    Sensor(SensorError),
    /// OLED driver failure
    Display(DisplayError),
    /// KW40Z link failure
    Bluetooth(Kw40zError),
    /// Battery sense conversion failed
    Adc,
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Error::Sensor(e)
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Display(e)
    }
}

impl From<Kw40zError> for Error {
    fn from(e: Kw40zError) -> Self {
        Error::Bluetooth(e)
    }
}

impl From<BatteryError> for Error {
    fn from(e: BatteryError) -> Self {
        match e {
            BatteryError::Adc => Error::Adc,
        }
    }
}
