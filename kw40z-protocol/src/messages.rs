//! Typed messages for the KW40Z host interface
//!
//! Messages are divided into two directions:
//! - Host → KW40Z: sensor pushes, alerts, mode changes, status queries
//! - KW40Z → Host: touch events, pairing codes, status reports

use heapless::Vec;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::packet::{AlertKind, AppMode, Button, OtapState, PacketType};

/// Commands sent from the host MCU to the KW40Z
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand<'a> {
    /// Battery level in percent (0-100)
    BatteryLevel(u8),
    /// Raw accelerometer x/y/z
    Accel([u16; 3]),
    /// Raw gyroscope x/y/z
    Gyro([u16; 3]),
    /// Raw magnetometer x/y/z
    Magnet([u16; 3]),
    /// Ambient light level
    AmbientLight(u8),
    /// Raw temperature
    Temperature(u16),
    /// Raw humidity
    Humidity(u16),
    /// Raw pressure
    Pressure(u16),
    /// Heart rate in bpm
    HeartRate(u8),
    /// Step count
    Steps(u16),
    /// Calorie count
    Calories(u16),
    /// Alert forwarded to the connected central
    AlertOut(&'a [u8]),
    /// Select the BLE application
    AppMode(AppMode),
    /// Switch advertising on/off
    AdvModeToggle,
    /// Swap the active electrode pair
    TsiGroupToggle,
    /// Ask for the advertising state
    AdvModeGet,
    /// Ask for the active electrode pair
    TsiGroupGet,
    /// Ask for the link state
    LinkStateGet,
    /// Acknowledge a received packet
    Ok,
}

/// Encode a 16-bit value MSB first
fn be16(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Encode an x/y/z triple MSB first per axis
fn be16x3(values: &[u16; 3]) -> [u8; 6] {
    let [x, y, z] = *values;
    let (x, y, z) = (be16(x), be16(y), be16(z));
    [x[0], x[1], y[0], y[1], z[0], z[1]]
}

impl<'a> HostCommand<'a> {
    /// Packet type carrying this command
    pub fn packet_type(&self) -> PacketType {
        match self {
            HostCommand::BatteryLevel(_) => PacketType::BatteryLevel,
            HostCommand::Accel(_) => PacketType::Accel,
            HostCommand::Gyro(_) => PacketType::Gyro,
            HostCommand::Magnet(_) => PacketType::Magnet,
            HostCommand::AmbientLight(_) => PacketType::AmbientLight,
            HostCommand::Temperature(_) => PacketType::Temperature,
            HostCommand::Humidity(_) => PacketType::Humidity,
            HostCommand::Pressure(_) => PacketType::Pressure,
            HostCommand::HeartRate(_) => PacketType::HeartRate,
            HostCommand::Steps(_) => PacketType::Steps,
            HostCommand::Calories(_) => PacketType::Calories,
            HostCommand::AlertOut(_) => PacketType::AlertOut,
            HostCommand::AppMode(_) => PacketType::AppMode,
            HostCommand::AdvModeToggle => PacketType::AdvModeToggle,
            HostCommand::TsiGroupToggle => PacketType::TsiGroupToggleActive,
            HostCommand::AdvModeGet => PacketType::AdvModeGet,
            HostCommand::TsiGroupGet => PacketType::TsiGroupGetActive,
            HostCommand::LinkStateGet => PacketType::LinkStateGet,
            HostCommand::Ok => PacketType::Ok,
        }
    }

    /// Whether the KW40Z must answer this command with an OK packet
    ///
    /// Status queries and acknowledgements are answered by data (or not
    /// at all), everything else asks for confirmation.
    pub fn requires_confirmation(&self) -> bool {
        !matches!(
            self,
            HostCommand::AdvModeGet
                | HostCommand::TsiGroupGet
                | HostCommand::LinkStateGet
                | HostCommand::Ok
        )
    }

    /// Encode this command into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let packet = self.packet_type().to_byte();
        let frame = match self {
            HostCommand::BatteryLevel(level) => {
                if *level > 100 {
                    return Err(FrameError::InvalidFrame);
                }
                Frame::new(packet, &[*level])?
            }
            HostCommand::Accel(axes) | HostCommand::Gyro(axes) | HostCommand::Magnet(axes) => {
                Frame::new(packet, &be16x3(axes))?
            }
            HostCommand::AmbientLight(value) | HostCommand::HeartRate(value) => {
                Frame::new(packet, &[*value])?
            }
            HostCommand::Temperature(value)
            | HostCommand::Humidity(value)
            | HostCommand::Pressure(value)
            | HostCommand::Steps(value)
            | HostCommand::Calories(value) => Frame::new(packet, &be16(*value))?,
            HostCommand::AlertOut(data) => Frame::new(packet, data)?,
            HostCommand::AppMode(mode) => Frame::new(packet, &[mode.to_byte()])?,
            HostCommand::AdvModeToggle
            | HostCommand::TsiGroupToggle
            | HostCommand::AdvModeGet
            | HostCommand::TsiGroupGet
            | HostCommand::LinkStateGet
            | HostCommand::Ok => Frame::empty(packet),
        };

        Ok(frame.with_confirm(self.requires_confirmation()))
    }
}

/// Events parsed from KW40Z-originated frames
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Kw40zEvent {
    /// Capacitive button pressed
    Button(Button),
    /// Slide gesture on the electrodes
    Slide,
    /// Alert pushed from the connected central
    AlertIn(Vec<u8, MAX_PAYLOAD_SIZE>),
    /// Pairing requested; show this code to the user
    PassDisplay { passkey: u32 },
    /// Active electrode pair (0 = left, 1 = right)
    TsiGroup(u8),
    /// Advertising state (0 = off, 1 = on)
    AdvMode(u8),
    /// Link state (0 = disconnected, 1 = connected)
    LinkState(u8),
    /// Notification counter update
    Notification { kind: u8, value: u8 },
    /// Acknowledgement of a host packet
    Ok,
    /// Over-the-air update progress
    Otap(OtapState),
    /// Firmware build version bytes
    BuildVersion(Vec<u8, MAX_PAYLOAD_SIZE>),
}

impl Kw40zEvent {
    /// Parse an event from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let packet = PacketType::from_byte(frame.packet_type)
            .ok_or(FrameError::UnknownPacket(frame.packet_type))?;
        let payload = &frame.payload;

        let first = || payload.first().copied().ok_or(FrameError::InvalidFrame);

        let event = match packet {
            PacketType::PressUp
            | PacketType::PressDown
            | PacketType::PressLeft
            | PacketType::PressRight => {
                Kw40zEvent::Button(Button::from_packet(packet).ok_or(FrameError::InvalidFrame)?)
            }
            PacketType::Slide => Kw40zEvent::Slide,
            PacketType::AlertIn => Kw40zEvent::AlertIn(payload.clone()),
            PacketType::PassDisplay => {
                if payload.len() < 3 {
                    return Err(FrameError::InvalidFrame);
                }
                let passkey =
                    payload[0] as u32 | (payload[1] as u32) << 8 | (payload[2] as u32) << 16;
                Kw40zEvent::PassDisplay { passkey }
            }
            PacketType::TsiGroupSendActive => Kw40zEvent::TsiGroup(first()?),
            PacketType::AdvModeSend => Kw40zEvent::AdvMode(first()?),
            PacketType::LinkStateSend => Kw40zEvent::LinkState(first()?),
            PacketType::Notification => {
                if payload.len() < 2 {
                    return Err(FrameError::InvalidFrame);
                }
                Kw40zEvent::Notification {
                    kind: payload[0],
                    value: payload[1],
                }
            }
            PacketType::Ok => Kw40zEvent::Ok,
            PacketType::OtapKw40Started => Kw40zEvent::Otap(OtapState::Kw40Started),
            PacketType::OtapMk64Started => Kw40zEvent::Otap(OtapState::Mk64Started),
            PacketType::OtapCompleted => Kw40zEvent::Otap(OtapState::Completed),
            PacketType::OtapFailed => Kw40zEvent::Otap(OtapState::Failed),
            PacketType::BuildVersion => Kw40zEvent::BuildVersion(payload.clone()),
            // Host-to-device packet types never arrive from the KW40Z
            _ => return Err(FrameError::UnknownPacket(frame.packet_type)),
        };

        Ok(event)
    }

    /// Kind of an `AlertIn` event, from its first payload byte
    ///
    /// `None` for other events and for unknown or empty alerts.
    pub fn alert_kind(&self) -> Option<AlertKind> {
        match self {
            Kw40zEvent::AlertIn(payload) => {
                payload.first().copied().and_then(AlertKind::from_byte)
            }
            _ => None,
        }
    }
}
