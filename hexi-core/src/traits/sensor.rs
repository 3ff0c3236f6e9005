//! Sensor traits
//!
//! One trait per onboard sensor package. Implementations own the bus
//! handle and the chip-specific register and calibration handling; the
//! aggregation layer only ever sees physical units (or, for the BLE
//! sensor push, the raw register words).

use crate::reading::{RawAxes, Vector3};

/// Errors that can occur while talking to a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed (NACK, arbitration loss, ...)
    Bus,
    /// Chip did not answer with the expected identity
    WrongDevice,
    /// Measurement not ready yet
    NotReady,
    /// Reading outside the sensor's physical range
    OutOfRange,
    /// Sensor used before `init`
    NotInitialized,
}

/// FXOS8700CQ-style combined accelerometer and magnetometer
pub trait AccelMagnetometer {
    /// Configure the chip and start measuring
    fn init(&mut self) -> Result<(), SensorError>;

    /// Acceleration in m/s²
    fn acceleration(&mut self) -> Result<Vector3, SensorError>;

    /// Magnetic field in µT
    fn magnetic_field(&mut self) -> Result<Vector3, SensorError>;

    /// Raw accelerometer registers
    fn raw_acceleration(&mut self) -> Result<RawAxes, SensorError>;

    /// Raw magnetometer registers
    fn raw_magnetic_field(&mut self) -> Result<RawAxes, SensorError>;
}

/// FXAS21002C-style three-axis gyroscope
pub trait Gyroscope {
    /// Configure the chip and start measuring
    fn init(&mut self) -> Result<(), SensorError>;

    /// Angular rate in degrees per second
    fn angular_rate(&mut self) -> Result<Vector3, SensorError>;

    /// Raw rate registers
    fn raw_angular_rate(&mut self) -> Result<RawAxes, SensorError>;
}

/// MPL3115A2-style barometer/altimeter
pub trait Barometer {
    /// Configure the chip and start measuring
    fn init(&mut self) -> Result<(), SensorError>;

    /// Calibrated pressure in Pa
    fn pressure_pa(&mut self) -> Result<f32, SensorError>;

    /// Altitude derived from pressure, in m
    fn altitude_m(&mut self) -> Result<f32, SensorError>;

    /// Raw 20-bit pressure word (Q18.2, right aligned)
    fn raw_pressure(&mut self) -> Result<u32, SensorError>;
}

/// HTU21D-style temperature and relative humidity sensor
pub trait Hygrometer {
    /// Reset the chip and apply the default resolution
    fn init(&mut self) -> Result<(), SensorError>;

    /// Temperature in °C
    fn temperature_c(&mut self) -> Result<f32, SensorError>;

    /// Relative humidity in %RH
    fn relative_humidity(&mut self) -> Result<f32, SensorError>;

    /// Raw temperature word
    fn raw_temperature(&mut self) -> Result<u16, SensorError>;

    /// Raw humidity word
    fn raw_humidity(&mut self) -> Result<u16, SensorError>;
}

/// TSL2561-style ambient light sensor
pub trait AmbientLightSensor {
    /// Power up the chip
    fn init(&mut self) -> Result<(), SensorError>;

    /// Illuminance in lux
    fn lux(&mut self) -> Result<f32, SensorError>;
}

/// MAX30101-style optical (PPG) front end
///
/// The heart rate itself is computed on the host from the stream of
/// samples; see the beat detector in `hexi-drivers`.
pub trait OpticalSensor {
    /// Power up the chip and configure the LED current/sample rate
    fn init(&mut self) -> Result<(), SensorError>;

    /// Read the latest 18-bit sample of the channel used for pulse detection
    fn read_sample(&mut self) -> Result<u32, SensorError>;

    /// Drop everything queued in the chip's FIFO
    fn clear_fifo(&mut self) -> Result<(), SensorError>;
}
