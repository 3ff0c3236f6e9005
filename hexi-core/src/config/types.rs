//! Feature selection
//!
//! Each onboard peripheral is enabled or disabled once, when the board is
//! brought up. Disabled peripherals are never initialised and every
//! accessor for them reports the feature as disabled.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One switchable board feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Feature {
    /// Battery level/charger sensing
    Battery,
    /// 96x96 color OLED
    Oled,
    /// Ambient light sensor
    AmbientLight,
    /// Optical heart rate sensor
    HeartRate,
    /// Temperature and humidity sensor
    TempHumid,
    /// Gyroscope
    Gyro,
    /// Accelerometer and magnetometer
    AccMagn,
    /// Pressure sensor/altimeter
    Pressure,
    /// KW40Z Bluetooth co-processor link
    Bluetooth,
    /// Vibration motor
    Vibration,
    /// RGB status LED
    RgbLed,
}

impl Feature {
    /// Every feature, in bring-up order
    pub const ALL: [Feature; 11] = [
        Feature::Battery,
        Feature::Oled,
        Feature::AmbientLight,
        Feature::TempHumid,
        Feature::Gyro,
        Feature::AccMagn,
        Feature::Pressure,
        Feature::Bluetooth,
        Feature::HeartRate,
        Feature::Vibration,
        Feature::RgbLed,
    ];
}

/// Construction-time enable flags, one per feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Features {
    pub battery: bool,
    pub oled: bool,
    pub ambient_light: bool,
    pub heart_rate: bool,
    pub temp_humid: bool,
    pub gyro: bool,
    pub acc_magn: bool,
    pub pressure: bool,
    pub bluetooth: bool,
    pub vibration: bool,
    pub rgb_led: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self::all()
    }
}

impl Features {
    /// Everything enabled
    pub const fn all() -> Self {
        Self {
            battery: true,
            oled: true,
            ambient_light: true,
            heart_rate: true,
            temp_humid: true,
            gyro: true,
            acc_magn: true,
            pressure: true,
            bluetooth: true,
            vibration: true,
            rgb_led: true,
        }
    }

    /// Everything disabled
    pub const fn none() -> Self {
        Self {
            battery: false,
            oled: false,
            ambient_light: false,
            heart_rate: false,
            temp_humid: false,
            gyro: false,
            acc_magn: false,
            pressure: false,
            bluetooth: false,
            vibration: false,
            rgb_led: false,
        }
    }

    /// Only the listed features enabled
    pub fn only(features: &[Feature]) -> Self {
        let mut flags = Self::none();
        for &feature in features {
            flags.set(feature, true);
        }
        flags
    }

    /// Builder-style toggle of one feature
    pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
        self.set(feature, enabled);
        self
    }

    /// Check whether a feature is enabled
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Battery => self.battery,
            Feature::Oled => self.oled,
            Feature::AmbientLight => self.ambient_light,
            Feature::HeartRate => self.heart_rate,
            Feature::TempHumid => self.temp_humid,
            Feature::Gyro => self.gyro,
            Feature::AccMagn => self.acc_magn,
            Feature::Pressure => self.pressure,
            Feature::Bluetooth => self.bluetooth,
            Feature::Vibration => self.vibration,
            Feature::RgbLed => self.rgb_led,
        }
    }

    /// Enable or disable a feature
    pub fn set(&mut self, feature: Feature, enabled: bool) {
        let flag = match feature {
            Feature::Battery => &mut self.battery,
            Feature::Oled => &mut self.oled,
            Feature::AmbientLight => &mut self.ambient_light,
            Feature::HeartRate => &mut self.heart_rate,
            Feature::TempHumid => &mut self.temp_humid,
            Feature::Gyro => &mut self.gyro,
            Feature::AccMagn => &mut self.acc_magn,
            Feature::Pressure => &mut self.pressure,
            Feature::Bluetooth => &mut self.bluetooth,
            Feature::Vibration => &mut self.vibration,
            Feature::RgbLed => &mut self.rgb_led,
        };
        *flag = enabled;
    }
}
