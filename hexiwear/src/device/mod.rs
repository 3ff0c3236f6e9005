//! The Hexiwear device object
//!
//! [`Hexiwear`] owns every enabled peripheral. Bring-up happens once in
//! [`Hexiwear::new`]; afterwards the application calls the accessors it
//! needs and [`Hexiwear::tick`] from its main loop.
//!
//! ```ignore
//! let config = HexiwearConfig::default();
//! let mut hexiwear = Hexiwear::<MyBoard>::new(parts, config)?;
//! hexiwear.attach_button_up(on_up)?;
//! hexiwear.enable_bt_upd_sensors()?;
//!
//! loop {
//!     hexiwear.tick(10)?;
//!     delay.delay_ms(10);
//! }
//! ```

mod bluetooth;
mod display;
mod sensors;

use hexi_core::traits::{
    AccelMagnetometer, AmbientLightSensor, Barometer, Gyroscope, Hygrometer, OledDisplay,
    OpticalSensor,
};
use hexi_core::{Feature, Features, HexiwearConfig};
use hexi_drivers::kw40z::Kw40z;
use hexi_drivers::sensor::{BatteryGauge, HeartRateMonitor};
use hexi_drivers::{RgbLed, VibrationMotor};
use hexi_hal::OutputPin;

use crate::board::{BatteryParts, Board, HeartRateParts, LedParts, Parts};
use crate::error::Error;

/// OLED panel size in pixels
pub const DISPLAY_WIDTH: u16 = 96;
pub const DISPLAY_HEIGHT: u16 = 96;

/// Heart rate sensor and its supply switch
struct HeartRate<B: Board> {
    sensor: B::HeartRate,
    power: B::HeartRatePower,
    monitor: HeartRateMonitor,
}

struct Battery<B: Board> {
    gauge: BatteryGauge<B::BatteryAdc, B::ChargerPin>,
    sense_enable: B::BatterySenseEnable,
}

/// Periodic push of sensor values to the KW40Z
struct SensorSync {
    enabled: bool,
    elapsed_ms: u32,
}

/// Every onboard peripheral behind one object
pub struct Hexiwear<B: Board> {
    config: HexiwearConfig,
    delay: B::Delay,
    battery: Option<Battery<B>>,
    oled: Option<B::Display>,
    ambient_light: Option<B::AmbientLight>,
    heart_rate: Option<HeartRate<B>>,
    temp_humid: Option<B::TempHumid>,
    gyro: Option<B::Gyro>,
    acc_magn: Option<B::AccMagn>,
    pressure: Option<B::Pressure>,
    kw40z: Option<Kw40z<B::Uart, B::Delay>>,
    vibration: Option<VibrationMotor<B::VibrationPin, B::Delay>>,
    rgb_led: Option<RgbLed<B::LedRed, B::LedGreen, B::LedBlue>>,
    sync: SensorSync,
}

/// Take the part for an enabled feature, drop it for a disabled one
fn claim<T>(features: &Features, feature: Feature, part: Option<T>) -> Result<Option<T>, Error> {
    if !features.is_enabled(feature) {
        return Ok(None);
    }
    part.map(Some).ok_or(Error::MissingPeripheral(feature))
}

impl<B: Board> Hexiwear<B> {
    /// Bring up every enabled feature
    ///
    /// Parts of disabled features are dropped without being touched.
    pub fn new(parts: Parts<B>, config: HexiwearConfig) -> Result<Self, Error> {
        let features = config.features;

        let battery = claim(&features, Feature::Battery, parts.battery)?;
        let oled = claim(&features, Feature::Oled, parts.oled)?;
        let ambient_light = claim(&features, Feature::AmbientLight, parts.ambient_light)?;
        let heart_rate = claim(&features, Feature::HeartRate, parts.heart_rate)?;
        let temp_humid = claim(&features, Feature::TempHumid, parts.temp_humid)?;
        let gyro = claim(&features, Feature::Gyro, parts.gyro)?;
        let acc_magn = claim(&features, Feature::AccMagn, parts.acc_magn)?;
        let pressure = claim(&features, Feature::Pressure, parts.pressure)?;
        let kw40z = claim(&features, Feature::Bluetooth, parts.kw40z)?;
        let vibration = claim(&features, Feature::Vibration, parts.vibration)?;
        let rgb_led = claim(&features, Feature::RgbLed, parts.rgb_led)?;

        let delay = parts.delay;
        let mut hexiwear = Self {
            config,
            delay: delay.clone(),
            battery: battery.map(Battery::new),
            oled,
            ambient_light,
            heart_rate: heart_rate.map(|hr| HeartRate::new(hr, config)),
            temp_humid,
            gyro,
            acc_magn,
            pressure,
            kw40z: kw40z.map(|uart| Kw40z::new(uart, delay.clone(), config.kw40z)),
            vibration: vibration.map(|pin| VibrationMotor::new(pin, delay.clone())),
            rgb_led: rgb_led.map(|led| RgbLed::new(led.red, led.green, led.blue)),
            sync: SensorSync {
                enabled: false,
                elapsed_ms: 0,
            },
        };
        hexiwear.init()?;

        info!("hexiwear: up with {:?}", features);
        Ok(hexiwear)
    }

    /// Defaults for everything but the feature flags
    pub fn with_features(parts: Parts<B>, features: Features) -> Result<Self, Error> {
        Self::new(
            parts,
            HexiwearConfig {
                features,
                ..Default::default()
            },
        )
    }

    fn init(&mut self) -> Result<(), Error> {
        if let Some(oled) = self.oled.as_mut() {
            oled.init(DISPLAY_WIDTH, DISPLAY_HEIGHT)?;
            oled.on()?;
            oled.clear()?;
        }
        if let Some(sensor) = self.ambient_light.as_mut() {
            sensor.init()?;
        }
        if let Some(hr) = self.heart_rate.as_mut() {
            hr.power.set_high();
            hr.sensor.init()?;
        }
        if let Some(sensor) = self.temp_humid.as_mut() {
            sensor.init()?;
        }
        if let Some(sensor) = self.gyro.as_mut() {
            sensor.init()?;
        }
        if let Some(sensor) = self.acc_magn.as_mut() {
            sensor.init()?;
        }
        if let Some(sensor) = self.pressure.as_mut() {
            sensor.init()?;
        }
        if let Some(kw40z) = self.kw40z.as_mut() {
            kw40z.start()?;
        }
        Ok(())
    }

    /// Feature flags given at construction
    pub fn features(&self) -> Features {
        self.config.features
    }

    pub fn config(&self) -> &HexiwearConfig {
        &self.config
    }

    /// Service the board after `delta_ms` milliseconds
    ///
    /// Handles pending KW40Z frames (running attached handlers), takes the
    /// heart rate samples that fell due and pushes sensor values to the
    /// KW40Z when the periodic update is enabled. The three steps run
    /// independently: a failing step is logged, the others still run, and
    /// the first error is returned afterwards.
    pub fn tick(&mut self, delta_ms: u32) -> Result<(), Error> {
        let mut first_error = None;

        let result = self.poll_bluetooth();
        keep_first(&mut first_error, result, "bluetooth poll");
        let result = self.sample_heart_rate(delta_ms);
        keep_first(&mut first_error, result, "heart rate sampling");
        let result = self.sync_sensors(delta_ms);
        keep_first(&mut first_error, result, "sensor push");

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn poll_bluetooth(&mut self) -> Result<(), Error> {
        if let Some(kw40z) = self.kw40z.as_mut() {
            kw40z.poll()?;
        }
        Ok(())
    }

    fn sample_heart_rate(&mut self, delta_ms: u32) -> Result<(), Error> {
        if let Some(hr) = self.heart_rate.as_mut() {
            for _ in 0..hr.monitor.update_with_delta(delta_ms) {
                let sample = hr.sensor.read_sample()?;
                hr.monitor.process_sample(sample);
                hr.sensor.clear_fifo()?;
            }
        }
        Ok(())
    }

    fn sync_sensors(&mut self, delta_ms: u32) -> Result<(), Error> {
        if !self.sync.enabled {
            return Ok(());
        }
        self.sync.elapsed_ms = self.sync.elapsed_ms.saturating_add(delta_ms);
        if self.sync.elapsed_ms >= self.config.sensor_sync.period_ms {
            self.sync.elapsed_ms = 0;
            self.push_sensors()?;
        }
        Ok(())
    }

    /// Run the vibration motor for `ms` milliseconds (blocking)
    pub fn vibration(&mut self, ms: u32) -> Result<(), Error> {
        let motor = self
            .vibration
            .as_mut()
            .ok_or(Error::Disabled(Feature::Vibration))?;
        motor.vibrate(ms);
        Ok(())
    }

    /// Light the RGB LED white
    pub fn leds_on(&mut self) -> Result<(), Error> {
        self.led()?.on();
        Ok(())
    }

    pub fn leds_off(&mut self) -> Result<(), Error> {
        self.led()?.off();
        Ok(())
    }

    /// Light any combination of the LED channels
    pub fn set_leds(&mut self, red: bool, green: bool, blue: bool) -> Result<(), Error> {
        self.led()?.set(red, green, blue);
        Ok(())
    }

    fn led(&mut self) -> Result<&mut RgbLed<B::LedRed, B::LedGreen, B::LedBlue>, Error> {
        self.rgb_led.as_mut().ok_or(Error::Disabled(Feature::RgbLed))
    }

    /// Tear down and give the parts back
    ///
    /// The heart rate sensor supply is switched off; parts of disabled
    /// features come back as `None`.
    pub fn release(self) -> Parts<B> {
        let mut parts = Parts::new(self.delay);
        parts.battery = self.battery.map(Battery::release);
        parts.oled = self.oled;
        parts.ambient_light = self.ambient_light;
        parts.heart_rate = self.heart_rate.map(HeartRate::release);
        parts.temp_humid = self.temp_humid;
        parts.gyro = self.gyro;
        parts.acc_magn = self.acc_magn;
        parts.pressure = self.pressure;
        parts.kw40z = self.kw40z.map(|kw40z| kw40z.release().0);
        parts.vibration = self.vibration.map(|motor| motor.release().0);
        parts.rgb_led = self.rgb_led.map(|led| {
            let (red, green, blue) = led.release();
            LedParts { red, green, blue }
        });
        parts
    }
}

/// Log a failed tick step and remember the first failure
fn keep_first(slot: &mut Option<Error>, result: Result<(), Error>, step: &str) {
    if let Err(e) = result {
        warn!("hexiwear: {} failed: {:?}", step, e);
        if slot.is_none() {
            *slot = Some(e);
        }
    }
}

impl<B: Board> Battery<B> {
    fn new(parts: BatteryParts<B>) -> Self {
        let mut sense_enable = parts.sense_enable;
        sense_enable.set_low();
        Self {
            gauge: BatteryGauge::new(parts.adc, parts.charger),
            sense_enable,
        }
    }

    fn release(self) -> BatteryParts<B> {
        let (adc, charger) = self.gauge.release();
        BatteryParts {
            adc,
            charger,
            sense_enable: self.sense_enable,
        }
    }
}

impl<B: Board> HeartRate<B> {
    fn new(parts: HeartRateParts<B>, config: HexiwearConfig) -> Self {
        Self {
            sensor: parts.sensor,
            power: parts.power,
            monitor: HeartRateMonitor::new(config.heart_rate),
        }
    }

    fn release(self) -> HeartRateParts<B> {
        let mut power = self.power;
        power.set_low();
        HeartRateParts {
            sensor: self.sensor,
            power,
        }
    }
}
