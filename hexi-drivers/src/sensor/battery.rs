//! Battery gauge
//!
//! The cell voltage is sampled through a divider on a 16-bit ADC channel
//! referenced to 3.3 V. The charger pulls its status line low while
//! charging.
//!
//! The percentage curve is piecewise linear over the usable range of the
//! divided voltage. Calculations are done in microvolts so the integer
//! result matches truncating the exact value.

use hexi_hal::adc::sample_to_microvolts;
use hexi_hal::{AdcChannel, InputPin};

/// ADC reference voltage in microvolts
const VREF_UV: u32 = 3_300_000;

/// Curve breakpoints: (lower bound µV, level at bound, span µV, level gain)
const CURVE: &[(u32, u32, u32, u32)] = &[
    (2_500_000, 50, 170_000, 50),
    (2_430_000, 30, 70_000, 20),
    (2_370_000, 10, 60_000, 20),
];

/// Above this the battery reads full
const FULL_UV: u32 = 2_670_000;

/// Errors from the battery gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryError {
    /// ADC conversion failed
    Adc,
}

/// Level and charger state read together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryStatus {
    /// Charge level (0-100 %)
    pub level: u8,
    /// Charger is active
    pub charging: bool,
}

/// Battery sense ADC and charger status input
pub struct BatteryGauge<A, P> {
    adc: A,
    charger: P,
}

impl<A: AdcChannel, P: InputPin> BatteryGauge<A, P> {
    pub fn new(adc: A, charger: P) -> Self {
        Self { adc, charger }
    }

    /// Divided cell voltage in microvolts
    pub fn microvolts(&mut self) -> Result<u32, BatteryError> {
        let raw = self.adc.read().map_err(|_| BatteryError::Adc)?;
        Ok(Self::sample_to_microvolts(raw))
    }

    /// Charge level in percent
    pub fn level(&mut self) -> Result<u8, BatteryError> {
        let uv = self.microvolts()?;
        Ok(Self::level_from_microvolts(uv))
    }

    /// Charger status line is asserted (low)
    pub fn is_charging(&self) -> bool {
        self.charger.is_low()
    }

    pub fn status(&mut self) -> Result<BatteryStatus, BatteryError> {
        let charging = self.is_charging();
        let level = self.level()?;
        Ok(BatteryStatus { level, charging })
    }

    pub fn sample_to_microvolts(raw: u16) -> u32 {
        sample_to_microvolts(raw, VREF_UV)
    }

    /// Map a divided cell voltage onto the discharge curve
    pub fn level_from_microvolts(uv: u32) -> u8 {
        if uv > FULL_UV {
            return 100;
        }

        for &(floor, base, span, gain) in CURVE {
            if uv > floor {
                let offset = (uv - floor) as u64;
                return (base as u64 + gain as u64 * offset / span as u64) as u8;
            }
        }

        0
    }

    pub fn release(self) -> (A, P) {
        (self.adc, self.charger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct FixedAdc(Result<u16, ()>);

    impl AdcChannel for FixedAdc {
        type Error = ();

        fn read(&mut self) -> Result<u16, ()> {
            self.0
        }
    }

    struct Pin(bool);

    impl InputPin for Pin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    type Gauge = BatteryGauge<FixedAdc, Pin>;

    /// ADC code for a divided voltage in millivolts
    fn code(mv: u64) -> u16 {
        (mv * 65_535 / 3_300) as u16
    }

    #[test]
    fn test_curve_breakpoints() {
        assert_eq!(Gauge::level_from_microvolts(2_700_000), 100);
        assert_eq!(Gauge::level_from_microvolts(2_670_000), 100);
        assert_eq!(Gauge::level_from_microvolts(2_669_000), 99);
        assert_eq!(Gauge::level_from_microvolts(2_585_000), 75);
        assert_eq!(Gauge::level_from_microvolts(2_500_000), 50);
        assert_eq!(Gauge::level_from_microvolts(2_465_000), 40);
        assert_eq!(Gauge::level_from_microvolts(2_400_000), 20);
        assert_eq!(Gauge::level_from_microvolts(2_370_000), 0);
        assert_eq!(Gauge::level_from_microvolts(0), 0);
    }

    #[test]
    fn test_full_scale() {
        assert_eq!(Gauge::sample_to_microvolts(65_535), 3_300_000);
        assert_eq!(Gauge::sample_to_microvolts(0), 0);
    }

    #[test]
    fn test_status() {
        let mut gauge = BatteryGauge::new(FixedAdc(Ok(code(3_000))), Pin(false));
        let status = gauge.status().unwrap();
        assert_eq!(status.level, 100);
        assert!(status.charging);

        let mut gauge = BatteryGauge::new(FixedAdc(Ok(code(2_000))), Pin(true));
        assert_eq!(
            gauge.status().unwrap(),
            BatteryStatus {
                level: 0,
                charging: false
            }
        );
    }

    #[test]
    fn test_adc_error() {
        let mut gauge = BatteryGauge::new(FixedAdc(Err(())), Pin(true));
        assert_eq!(gauge.level(), Err(BatteryError::Adc));
    }

    proptest! {
        #[test]
        fn level_is_bounded_and_monotonic(a in 0u32..4_000_000, b in 0u32..4_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo_level = BatteryGauge::<FixedAdc, Pin>::level_from_microvolts(lo);
            let hi_level = BatteryGauge::<FixedAdc, Pin>::level_from_microvolts(hi);
            prop_assert!(hi_level <= 100);
            prop_assert!(lo_level <= hi_level);
        }
    }
}
