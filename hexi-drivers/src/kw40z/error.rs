//! KW40Z driver errors

use kw40z_protocol::FrameError;

/// Field rejected before anything reached the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Battery percentage above 100
    BatteryLevel,
    /// Alert payload longer than one frame
    AlertLength,
}

/// Errors from the KW40Z driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Kw40zError {
    /// UART read or write failed
    Serial,
    /// Frame could not be built
    Frame(FrameError),
    /// Argument outside its wire range
    OutOfRange(Field),
    /// Only Idle and SensorTag can be selected from the host
    UnsupportedAppMode,
}

impl From<FrameError> for Kw40zError {
    fn from(e: FrameError) -> Self {
        Kw40zError::Frame(e)
    }
}
