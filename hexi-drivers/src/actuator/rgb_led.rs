//! Onboard RGB LED
//!
//! Each channel is a GPIO sinking the LED current, so a channel is lit
//! while its pin is low.

use hexi_hal::gpio::ActiveLow;
use hexi_hal::OutputPin;

pub struct RgbLed<R, G, B> {
    red: ActiveLow<R>,
    green: ActiveLow<G>,
    blue: ActiveLow<B>,
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> RgbLed<R, G, B> {
    /// Take the three channel pins, starting dark
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut led = Self {
            red: ActiveLow(red),
            green: ActiveLow(green),
            blue: ActiveLow(blue),
        };
        led.off();
        led
    }

    /// All channels lit (white)
    pub fn on(&mut self) {
        self.set(true, true, true);
    }

    pub fn off(&mut self) {
        self.set(false, false, false);
    }

    /// Light the selected channels
    pub fn set(&mut self, red: bool, green: bool, blue: bool) {
        self.red.set_asserted(red);
        self.green.set_asserted(green);
        self.blue.set_asserted(blue);
    }

    /// Lit state of (red, green, blue)
    pub fn state(&self) -> (bool, bool, bool) {
        (
            self.red.is_asserted(),
            self.green.is_asserted(),
            self.blue.is_asserted(),
        )
    }

    pub fn release(self) -> (R, G, B) {
        (
            self.red.into_inner(),
            self.green.into_inner(),
            self.blue.into_inner(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Pin {
        high: bool,
    }

    impl OutputPin for Pin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_starts_dark() {
        let led = RgbLed::new(Pin::default(), Pin::default(), Pin::default());
        assert_eq!(led.state(), (false, false, false));
        let (r, g, b) = led.release();
        assert!(r.high && g.high && b.high);
    }

    #[test]
    fn test_on_drives_pins_low() {
        let mut led = RgbLed::new(Pin::default(), Pin::default(), Pin::default());
        led.on();
        assert_eq!(led.state(), (true, true, true));
        let (r, g, b) = led.release();
        assert!(!r.high && !g.high && !b.high);
    }

    #[test]
    fn test_single_channel() {
        let mut led = RgbLed::new(Pin::default(), Pin::default(), Pin::default());
        led.set(false, true, false);
        assert_eq!(led.state(), (false, true, false));
        led.off();
        assert_eq!(led.state(), (false, false, false));
    }
}
