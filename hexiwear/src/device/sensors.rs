//! Sensor accessors and the periodic KW40Z push

use hexi_core::traits::{AccelMagnetometer, AmbientLightSensor, Barometer, Gyroscope, Hygrometer};
use hexi_core::{Feature, Vector3};
use hexi_drivers::kw40z::SensorUpdate;
use hexi_drivers::sensor::BatteryStatus;

use super::Hexiwear;
use crate::board::Board;
use crate::error::Error;

/// Borrow an optional part or report its feature as disabled
fn part<T>(part: &mut Option<T>, feature: Feature) -> Result<&mut T, Error> {
    part.as_mut().ok_or(Error::Disabled(feature))
}

impl<B: Board> Hexiwear<B> {
    /// Battery charge in percent
    pub fn get_battery_level(&mut self) -> Result<u8, Error> {
        let battery = part(&mut self.battery, Feature::Battery)?;
        Ok(battery.gauge.level()?)
    }

    /// Battery charge together with the charger state
    pub fn get_battery_status(&mut self) -> Result<BatteryStatus, Error> {
        let battery = part(&mut self.battery, Feature::Battery)?;
        Ok(battery.gauge.status()?)
    }

    /// Barometric pressure in Pa
    pub fn get_pressure(&mut self) -> Result<f32, Error> {
        Ok(part(&mut self.pressure, Feature::Pressure)?.pressure_pa()?)
    }

    /// Altitude in m, derived from pressure
    pub fn get_altitude(&mut self) -> Result<f32, Error> {
        Ok(part(&mut self.pressure, Feature::Pressure)?.altitude_m()?)
    }

    /// Temperature in °C
    pub fn get_temperature(&mut self) -> Result<f32, Error> {
        Ok(part(&mut self.temp_humid, Feature::TempHumid)?.temperature_c()?)
    }

    /// Relative humidity in %
    pub fn get_humidity(&mut self) -> Result<f32, Error> {
        Ok(part(&mut self.temp_humid, Feature::TempHumid)?.relative_humidity()?)
    }

    /// Acceleration in m/s²
    pub fn get_accelerometer_data(&mut self) -> Result<Vector3, Error> {
        Ok(part(&mut self.acc_magn, Feature::AccMagn)?.acceleration()?)
    }

    /// Magnetic field in µT
    pub fn get_magnetometer_data(&mut self) -> Result<Vector3, Error> {
        Ok(part(&mut self.acc_magn, Feature::AccMagn)?.magnetic_field()?)
    }

    /// Angular rate in °/s
    pub fn get_gyroscope_data(&mut self) -> Result<Vector3, Error> {
        Ok(part(&mut self.gyro, Feature::Gyro)?.angular_rate()?)
    }

    /// Illuminance in lux
    pub fn get_ambient_light(&mut self) -> Result<f32, Error> {
        Ok(part(&mut self.ambient_light, Feature::AmbientLight)?.lux()?)
    }

    /// Averaged heart rate in bpm, 0 until beats have been seen
    pub fn get_heart_rate(&mut self) -> Result<u8, Error> {
        let hr = part(&mut self.heart_rate, Feature::HeartRate)?;
        Ok(hr.monitor.average_bpm())
    }

    /// Read every enabled sensor and push the raw values to the KW40Z
    pub(super) fn push_sensors(&mut self) -> Result<(), Error> {
        let mut update = SensorUpdate::default();

        if let Some(battery) = self.battery.as_mut() {
            update.battery = Some(battery.gauge.level()?);
        }
        if let Some(sensor) = self.temp_humid.as_mut() {
            update.temperature = Some(sensor.raw_temperature()?);
            update.humidity = Some(sensor.raw_humidity()?);
        }
        if let Some(sensor) = self.gyro.as_mut() {
            update.gyro = Some(sensor.raw_angular_rate()?);
        }
        if let Some(sensor) = self.acc_magn.as_mut() {
            update.accel = Some(sensor.raw_acceleration()?);
            update.magnet = Some(sensor.raw_magnetic_field()?);
        }
        if let Some(sensor) = self.ambient_light.as_mut() {
            // The light characteristic holds one byte
            update.ambient_light = Some((sensor.lux()? as u32 & 0xFF) as u8);
        }
        if let Some(sensor) = self.pressure.as_mut() {
            update.pressure = Some((sensor.raw_pressure()? >> 4) as u16);
        }

        let kw40z = part(&mut self.kw40z, Feature::Bluetooth)?;
        trace!("hexiwear: pushing sensor values");
        kw40z.upd_sensors(&update)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{full_parts, MockBoard, Shared};
    use hexi_core::{Features, HexiwearConfig};

    fn all_off_but(feature: Feature) -> Features {
        Features::only(&[feature])
    }

    #[test]
    fn test_enabled_accessors() {
        let shared = Shared::default();
        let mut hexiwear =
            Hexiwear::<MockBoard>::new(full_parts(&shared), HexiwearConfig::default()).unwrap();

        assert_eq!(hexiwear.get_pressure(), Ok(101_325.0));
        assert_eq!(hexiwear.get_altitude(), Ok(12.5));
        assert_eq!(hexiwear.get_temperature(), Ok(23.5));
        assert_eq!(hexiwear.get_humidity(), Ok(45.0));
        assert_eq!(
            hexiwear.get_accelerometer_data(),
            Ok(Vector3::new(0.0, 0.0, 9.81))
        );
        assert_eq!(
            hexiwear.get_magnetometer_data(),
            Ok(Vector3::new(20.0, -5.0, 40.0))
        );
        assert_eq!(
            hexiwear.get_gyroscope_data(),
            Ok(Vector3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(hexiwear.get_ambient_light(), Ok(300.0));
        assert_eq!(hexiwear.get_heart_rate(), Ok(0));
        assert_eq!(hexiwear.get_battery_level(), Ok(100));

        shared.borrow_mut().charging = true;
        let status = hexiwear.get_battery_status().unwrap();
        assert!(status.charging);
        assert_eq!(status.level, 100);
    }

    #[test]
    fn test_disabled_accessors_always_report_disabled() {
        let shared = Shared::default();
        let mut hexiwear =
            Hexiwear::<MockBoard>::with_features(full_parts(&shared), Features::none()).unwrap();

        for _ in 0..3 {
            assert_eq!(
                hexiwear.get_battery_level(),
                Err(Error::Disabled(Feature::Battery))
            );
            assert_eq!(
                hexiwear.get_battery_status(),
                Err(Error::Disabled(Feature::Battery))
            );
            assert_eq!(
                hexiwear.get_pressure(),
                Err(Error::Disabled(Feature::Pressure))
            );
            assert_eq!(
                hexiwear.get_altitude(),
                Err(Error::Disabled(Feature::Pressure))
            );
            assert_eq!(
                hexiwear.get_temperature(),
                Err(Error::Disabled(Feature::TempHumid))
            );
            assert_eq!(
                hexiwear.get_humidity(),
                Err(Error::Disabled(Feature::TempHumid))
            );
            assert_eq!(
                hexiwear.get_accelerometer_data(),
                Err(Error::Disabled(Feature::AccMagn))
            );
            assert_eq!(
                hexiwear.get_magnetometer_data(),
                Err(Error::Disabled(Feature::AccMagn))
            );
            assert_eq!(
                hexiwear.get_gyroscope_data(),
                Err(Error::Disabled(Feature::Gyro))
            );
            assert_eq!(
                hexiwear.get_ambient_light(),
                Err(Error::Disabled(Feature::AmbientLight))
            );
            assert_eq!(
                hexiwear.get_heart_rate(),
                Err(Error::Disabled(Feature::HeartRate))
            );
        }
    }

    #[test]
    fn test_single_feature_leaves_others_disabled() {
        let shared = Shared::default();
        let mut hexiwear = Hexiwear::<MockBoard>::with_features(
            full_parts(&shared),
            all_off_but(Feature::Gyro),
        )
        .unwrap();

        assert!(hexiwear.get_gyroscope_data().is_ok());
        assert_eq!(
            hexiwear.get_temperature(),
            Err(Error::Disabled(Feature::TempHumid))
        );
    }

    #[test]
    fn test_sensor_error_is_propagated() {
        let shared = Shared::default();
        let mut hexiwear =
            Hexiwear::<MockBoard>::new(full_parts(&shared), HexiwearConfig::default()).unwrap();

        shared.borrow_mut().sensor_fault = true;
        assert!(matches!(hexiwear.get_pressure(), Err(Error::Sensor(_))));

        shared.borrow_mut().adc_fault = true;
        assert_eq!(hexiwear.get_battery_level(), Err(Error::Adc));
    }
}
