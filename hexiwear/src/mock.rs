//! Host-side mock board shared by the unit tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use hexi_core::reading::RawAxes;
use hexi_core::traits::{
    AccelMagnetometer, AmbientLightSensor, Barometer, DisplayError, Gyroscope, Hygrometer,
    OledDisplay, OpticalSensor, SensorError, TextBox,
};
use hexi_core::Vector3;
use hexi_hal::{AdcChannel, InputPin, OutputPin, UartRx, UartTx};
use kw40z_protocol::{Frame, FrameParser, PacketType};

use crate::board::{BatteryParts, Board, HeartRateParts, LedParts, Parts};

pub const GLYPH_WIDTH: u16 = 6;
pub const GLYPH_HEIGHT: u16 = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayOp {
    Init(u16, u16),
    On,
    Off,
    Clear,
    FillScreen(u16),
    FillRect(u16, u16, u16, u16, u16),
    Pixel(u16, u16, u16),
    Image {
        len: usize,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
    },
    Text(String, TextBox),
}

/// Everything the mocks observe or simulate
#[derive(Default)]
pub struct MockState {
    pub delay_ns: u64,

    // KW40Z side of the UART
    pub uart_tx: Vec<u8>,
    pub uart_rx: VecDeque<u8>,
    pub sent: Vec<Frame>,
    parser: FrameParser,
    pub adv_mode: u8,
    pub tsi_group: u8,
    pub link_state: u8,

    pub display_log: Vec<DisplayOp>,

    pub inits: u32,
    pub sensor_fault: bool,
    pub adc_fault: bool,
    pub charging: bool,
    pub optical_reads: u32,
    pub fifo_clears: u32,

    pub battery_sense_high: bool,
    pub heart_rate_powered: bool,
    pub vibration_high: bool,
    pub vibration_pulses: u32,
    /// Pin levels of red, green, blue
    pub led_levels: [bool; 3],
}

pub type Shared = Rc<RefCell<MockState>>;

impl MockState {
    /// Queue a frame from the KW40Z
    pub fn inject(&mut self, packet: PacketType, payload: &[u8], confirm: bool) {
        let frame = Frame::new(packet.to_byte(), payload)
            .unwrap()
            .with_confirm(confirm);
        self.queue(&frame);
    }

    pub fn clear_sent(&mut self) {
        self.sent.clear();
        self.uart_tx.clear();
    }

    /// Packet types written by the host, in order
    pub fn sent_types(&self) -> Vec<u8> {
        self.sent.iter().map(|f| f.packet_type).collect()
    }

    /// Payload of the first frame of `packet_type` written by the host
    pub fn sent_payload(&self, packet_type: u8) -> Vec<u8> {
        self.sent
            .iter()
            .find(|f| f.packet_type == packet_type)
            .map(|f| f.payload.to_vec())
            .unwrap_or_default()
    }

    fn queue(&mut self, frame: &Frame) {
        let bytes = frame.encode_to_vec().unwrap();
        self.uart_rx.extend(bytes.iter().copied());
    }

    fn reply(&mut self, packet: PacketType, value: u8) {
        let frame = Frame::new(packet.to_byte(), &[value]).unwrap();
        self.queue(&frame);
    }

    /// Behave like the KW40Z application for one host frame
    fn respond(&mut self, frame: &Frame) {
        if frame.confirm {
            self.queue(&Frame::empty(PacketType::Ok.to_byte()));
        }
        match PacketType::from_byte(frame.packet_type) {
            Some(PacketType::AdvModeToggle) => self.adv_mode ^= 1,
            Some(PacketType::TsiGroupToggleActive) => self.tsi_group ^= 1,
            Some(PacketType::AdvModeGet) => self.reply(PacketType::AdvModeSend, self.adv_mode),
            Some(PacketType::TsiGroupGetActive) => {
                self.reply(PacketType::TsiGroupSendActive, self.tsi_group)
            }
            Some(PacketType::LinkStateGet) => {
                self.reply(PacketType::LinkStateSend, self.link_state)
            }
            _ => {}
        }
    }

    fn set_pin(&mut self, pin: PinId, high: bool) {
        match pin {
            PinId::SenseEnable => self.battery_sense_high = high,
            PinId::HeartRatePower => self.heart_rate_powered = high,
            PinId::Vibration => {
                if high && !self.vibration_high {
                    self.vibration_pulses += 1;
                }
                self.vibration_high = high;
            }
            PinId::Red => self.led_levels[0] = high,
            PinId::Green => self.led_levels[1] = high,
            PinId::Blue => self.led_levels[2] = high,
        }
    }

    fn pin(&self, pin: PinId) -> bool {
        match pin {
            PinId::SenseEnable => self.battery_sense_high,
            PinId::HeartRatePower => self.heart_rate_powered,
            PinId::Vibration => self.vibration_high,
            PinId::Red => self.led_levels[0],
            PinId::Green => self.led_levels[1],
            PinId::Blue => self.led_levels[2],
        }
    }

    fn sensor(&mut self) -> Result<(), SensorError> {
        if self.sensor_fault {
            Err(SensorError::Bus)
        } else {
            Ok(())
        }
    }
}

pub struct MockUart(Shared);

impl UartTx for MockUart {
    type Error = ();

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
        let mut state = self.0.borrow_mut();
        state.uart_tx.extend_from_slice(data);
        for &byte in data {
            if let Ok(Some(frame)) = state.parser.feed(byte) {
                state.respond(&frame);
                state.sent.push(frame);
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

impl UartRx for MockUart {
    type Error = ();

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        let mut state = self.0.borrow_mut();
        let count = buf.len().min(state.uart_rx.len());
        for slot in buf.iter_mut().take(count) {
            *slot = state.uart_rx.pop_front().unwrap_or(0);
        }
        Ok(count)
    }
}

#[derive(Clone)]
pub struct MockDelay(Shared);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().delay_ns += ns as u64;
    }
}

pub struct MockAdc(Shared);

impl AdcChannel for MockAdc {
    type Error = ();

    fn read(&mut self) -> Result<u16, ()> {
        if self.0.borrow().adc_fault {
            Err(())
        } else {
            // ~3.0 V at the divider
            Ok(60_000)
        }
    }
}

pub struct MockCharger(Shared);

impl InputPin for MockCharger {
    fn is_high(&self) -> bool {
        !self.0.borrow().charging
    }
}

#[derive(Debug, Clone, Copy)]
enum PinId {
    SenseEnable,
    HeartRatePower,
    Vibration,
    Red,
    Green,
    Blue,
}

pub struct MockPin(Shared, PinId);

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.0.borrow_mut().set_pin(self.1, true);
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().set_pin(self.1, false);
    }

    fn is_set_high(&self) -> bool {
        self.0.borrow().pin(self.1)
    }
}

pub struct MockDisplay(Shared);

impl MockDisplay {
    fn log(&mut self, op: DisplayOp) -> Result<(), DisplayError> {
        self.0.borrow_mut().display_log.push(op);
        Ok(())
    }
}

impl OledDisplay for MockDisplay {
    fn init(&mut self, width: u16, height: u16) -> Result<(), DisplayError> {
        self.log(DisplayOp::Init(width, height))
    }

    fn on(&mut self) -> Result<(), DisplayError> {
        self.log(DisplayOp::On)
    }

    fn off(&mut self) -> Result<(), DisplayError> {
        self.log(DisplayOp::Off)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.log(DisplayOp::Clear)
    }

    fn fill_screen(&mut self, color: u16) -> Result<(), DisplayError> {
        self.log(DisplayOp::FillScreen(color))
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) -> Result<(), DisplayError> {
        self.log(DisplayOp::FillRect(x, y, w, h, color))
    }

    fn draw_pixel(&mut self, x: u16, y: u16, color: u16) -> Result<(), DisplayError> {
        self.log(DisplayOp::Pixel(x, y, color))
    }

    fn draw_image(&mut self, image: &[u8], x: u16, y: u16, w: u16, h: u16) -> Result<(), DisplayError> {
        self.log(DisplayOp::Image {
            len: image.len(),
            x,
            y,
            w,
            h,
        })
    }

    fn draw_text(&mut self, text: &str, text_box: &TextBox) -> Result<(), DisplayError> {
        self.log(DisplayOp::Text(text.into(), *text_box))
    }

    fn text_width(&self, text: &str) -> u16 {
        text.chars().count() as u16 * GLYPH_WIDTH
    }

    fn font_height(&self) -> u16 {
        GLYPH_HEIGHT
    }
}

/// Stands in for every I2C sensor on the board
pub struct MockSensor(Shared);

impl MockSensor {
    fn count_init(&mut self) -> Result<(), SensorError> {
        self.0.borrow_mut().inits += 1;
        Ok(())
    }

    fn check(&mut self) -> Result<(), SensorError> {
        self.0.borrow_mut().sensor()
    }
}

impl AccelMagnetometer for MockSensor {
    fn init(&mut self) -> Result<(), SensorError> {
        self.count_init()
    }

    fn acceleration(&mut self) -> Result<Vector3, SensorError> {
        self.check()?;
        Ok(Vector3::new(0.0, 0.0, 9.81))
    }

    fn magnetic_field(&mut self) -> Result<Vector3, SensorError> {
        self.check()?;
        Ok(Vector3::new(20.0, -5.0, 40.0))
    }

    fn raw_acceleration(&mut self) -> Result<RawAxes, SensorError> {
        self.check()?;
        Ok([0, 0, 4096])
    }

    fn raw_magnetic_field(&mut self) -> Result<RawAxes, SensorError> {
        self.check()?;
        Ok([200, 0xFFCE, 400])
    }
}

impl Gyroscope for MockSensor {
    fn init(&mut self) -> Result<(), SensorError> {
        self.count_init()
    }

    fn angular_rate(&mut self) -> Result<Vector3, SensorError> {
        self.check()?;
        Ok(Vector3::new(1.0, 2.0, 3.0))
    }

    fn raw_angular_rate(&mut self) -> Result<RawAxes, SensorError> {
        self.check()?;
        Ok([1, 2, 3])
    }
}

impl Barometer for MockSensor {
    fn init(&mut self) -> Result<(), SensorError> {
        self.count_init()
    }

    fn pressure_pa(&mut self) -> Result<f32, SensorError> {
        self.check()?;
        Ok(101_325.0)
    }

    fn altitude_m(&mut self) -> Result<f32, SensorError> {
        self.check()?;
        Ok(12.5)
    }

    fn raw_pressure(&mut self) -> Result<u32, SensorError> {
        self.check()?;
        Ok(0xABC0)
    }
}

impl Hygrometer for MockSensor {
    fn init(&mut self) -> Result<(), SensorError> {
        self.count_init()
    }

    fn temperature_c(&mut self) -> Result<f32, SensorError> {
        self.check()?;
        Ok(23.5)
    }

    fn relative_humidity(&mut self) -> Result<f32, SensorError> {
        self.check()?;
        Ok(45.0)
    }

    fn raw_temperature(&mut self) -> Result<u16, SensorError> {
        self.check()?;
        Ok(0x1234)
    }

    fn raw_humidity(&mut self) -> Result<u16, SensorError> {
        self.check()?;
        Ok(0x5678)
    }
}

impl AmbientLightSensor for MockSensor {
    fn init(&mut self) -> Result<(), SensorError> {
        self.count_init()
    }

    fn lux(&mut self) -> Result<f32, SensorError> {
        self.check()?;
        Ok(300.0)
    }
}

impl OpticalSensor for MockSensor {
    fn init(&mut self) -> Result<(), SensorError> {
        self.count_init()
    }

    fn read_sample(&mut self) -> Result<u32, SensorError> {
        self.check()?;
        self.0.borrow_mut().optical_reads += 1;
        Ok(100_000)
    }

    fn clear_fifo(&mut self) -> Result<(), SensorError> {
        self.0.borrow_mut().fifo_clears += 1;
        Ok(())
    }
}

pub struct MockBoard;

impl Board for MockBoard {
    type Uart = MockUart;
    type Delay = MockDelay;
    type BatteryAdc = MockAdc;
    type ChargerPin = MockCharger;
    type BatterySenseEnable = MockPin;
    type Display = MockDisplay;
    type AmbientLight = MockSensor;
    type HeartRate = MockSensor;
    type HeartRatePower = MockPin;
    type TempHumid = MockSensor;
    type Gyro = MockSensor;
    type AccMagn = MockSensor;
    type Pressure = MockSensor;
    type VibrationPin = MockPin;
    type LedRed = MockPin;
    type LedGreen = MockPin;
    type LedBlue = MockPin;
}

/// A board with every part present
pub fn full_parts(shared: &Shared) -> Parts<MockBoard> {
    let s = || shared.clone();
    let mut parts = Parts::new(MockDelay(s()));
    parts.kw40z = Some(MockUart(s()));
    parts.battery = Some(BatteryParts {
        adc: MockAdc(s()),
        charger: MockCharger(s()),
        sense_enable: MockPin(s(), PinId::SenseEnable),
    });
    parts.oled = Some(MockDisplay(s()));
    parts.ambient_light = Some(MockSensor(s()));
    parts.heart_rate = Some(HeartRateParts {
        sensor: MockSensor(s()),
        power: MockPin(s(), PinId::HeartRatePower),
    });
    parts.temp_humid = Some(MockSensor(s()));
    parts.gyro = Some(MockSensor(s()));
    parts.acc_magn = Some(MockSensor(s()));
    parts.pressure = Some(MockSensor(s()));
    parts.vibration = Some(MockPin(s(), PinId::Vibration));
    parts.rgb_led = Some(LedParts {
        red: MockPin(s(), PinId::Red),
        green: MockPin(s(), PinId::Green),
        blue: MockPin(s(), PinId::Blue),
    });
    parts
}
