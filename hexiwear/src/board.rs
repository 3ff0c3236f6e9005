//! Board integration
//!
//! A [`Board`] names the concrete peripheral types of one platform; a
//! [`Parts`] carries the instances. Every part is optional so that a
//! board can leave out what it does not have, as long as the matching
//! feature is disabled.

use embedded_hal::delay::DelayNs;
use hexi_core::traits::{
    AccelMagnetometer, AmbientLightSensor, Barometer, Gyroscope, Hygrometer, OledDisplay,
    OpticalSensor,
};
use hexi_hal::{AdcChannel, InputPin, OutputPin, Uart};

/// Peripheral types of a Hexiwear platform
pub trait Board {
    /// UART wired to the KW40Z
    type Uart: Uart;
    /// Blocking delay; cloned into every driver that waits
    type Delay: DelayNs + Clone;

    /// Battery sense ADC channel
    type BatteryAdc: AdcChannel;
    /// Charger status line (low while charging)
    type ChargerPin: InputPin;
    /// Battery sense divider enable (active low)
    type BatterySenseEnable: OutputPin;

    /// SSD1351 OLED
    type Display: OledDisplay;
    /// TSL2561
    type AmbientLight: AmbientLightSensor;
    /// MAX30101
    type HeartRate: OpticalSensor;
    /// MAX30101 supply switch
    type HeartRatePower: OutputPin;
    /// HTU21D
    type TempHumid: Hygrometer;
    /// FXAS21002C
    type Gyro: Gyroscope;
    /// FXOS8700CQ
    type AccMagn: AccelMagnetometer;
    /// MPL3115A2
    type Pressure: Barometer;

    type VibrationPin: OutputPin;
    type LedRed: OutputPin;
    type LedGreen: OutputPin;
    type LedBlue: OutputPin;
}

/// Battery gauge inputs and the sense divider switch
pub struct BatteryParts<B: Board> {
    pub adc: B::BatteryAdc,
    pub charger: B::ChargerPin,
    pub sense_enable: B::BatterySenseEnable,
}

/// Optical sensor and its supply switch
pub struct HeartRateParts<B: Board> {
    pub sensor: B::HeartRate,
    pub power: B::HeartRatePower,
}

/// The three RGB LED channels, each active low
pub struct LedParts<B: Board> {
    pub red: B::LedRed,
    pub green: B::LedGreen,
    pub blue: B::LedBlue,
}

/// Peripheral instances handed to [`crate::Hexiwear::new`]
pub struct Parts<B: Board> {
    pub delay: B::Delay,
    pub kw40z: Option<B::Uart>,
    pub battery: Option<BatteryParts<B>>,
    pub oled: Option<B::Display>,
    pub ambient_light: Option<B::AmbientLight>,
    pub heart_rate: Option<HeartRateParts<B>>,
    pub temp_humid: Option<B::TempHumid>,
    pub gyro: Option<B::Gyro>,
    pub acc_magn: Option<B::AccMagn>,
    pub pressure: Option<B::Pressure>,
    pub vibration: Option<B::VibrationPin>,
    pub rgb_led: Option<LedParts<B>>,
}

impl<B: Board> Parts<B> {
    /// No peripherals yet; fill in the fields the board has
    pub fn new(delay: B::Delay) -> Self {
        Self {
            delay,
            kw40z: None,
            battery: None,
            oled: None,
            ambient_light: None,
            heart_rate: None,
            temp_humid: None,
            gyro: None,
            acc_magn: None,
            pressure: None,
            vibration: None,
            rgb_led: None,
        }
    }
}
