//! Peripheral abstraction traits
//!
//! These traits define the interface between the aggregation layer and
//! the chip drivers supplied by the board integration.

pub mod display;
pub mod sensor;

pub use display::{Align, DisplayError, OledDisplay, TextBox};
pub use sensor::{
    AccelMagnetometer, AmbientLightSensor, Barometer, Gyroscope, Hygrometer, OpticalSensor,
    SensorError,
};
