//! Packet type identifiers understood by the KW40Z Hexiwear application

/// Every packet type byte the host sends or receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PacketType {
    /// Touch electrode: up
    PressUp = 0,
    /// Touch electrode: down
    PressDown = 1,
    /// Touch electrode: left
    PressLeft = 2,
    /// Touch electrode: right
    PressRight = 3,
    /// Touch slide gesture
    Slide = 4,
    /// Battery service
    BatteryLevel = 5,
    /// Motion service: accelerometer
    Accel = 6,
    /// Weather service: ambient light
    AmbientLight = 7,
    /// Weather service: pressure
    Pressure = 8,
    /// Motion service: gyroscope
    Gyro = 9,
    /// Weather service: temperature
    Temperature = 10,
    /// Weather service: humidity
    Humidity = 11,
    /// Motion service: magnetometer
    Magnet = 12,
    /// Health service: heart rate
    HeartRate = 13,
    /// Health service: pedometer
    Steps = 14,
    /// Health service: calorie counter
    Calories = 15,
    /// Alert service input (phone → watch)
    AlertIn = 16,
    /// Alert service output (watch → phone)
    AlertOut = 17,
    /// Pairing code to display
    PassDisplay = 18,
    /// Over-the-air update of the KW40Z started
    OtapKw40Started = 19,
    /// Over-the-air update of the MK64 started
    OtapMk64Started = 20,
    /// Over-the-air update finished
    OtapCompleted = 21,
    /// Over-the-air update failed
    OtapFailed = 22,
    /// Swap the active electrode pair
    TsiGroupToggleActive = 23,
    /// Ask for the active electrode pair
    TsiGroupGetActive = 24,
    /// Report of the active electrode pair
    TsiGroupSendActive = 25,
    /// Ask for the advertising state
    AdvModeGet = 26,
    /// Report of the advertising state
    AdvModeSend = 27,
    /// Switch advertising on/off
    AdvModeToggle = 28,
    /// Select the application exposed over BLE
    AppMode = 29,
    /// Ask for the link state
    LinkStateGet = 30,
    /// Report of the link state
    LinkStateSend = 31,
    /// Notification counters from the phone
    Notification = 32,
    /// Firmware build version
    BuildVersion = 33,
    /// Acknowledgement
    Ok = 255,
}

impl PacketType {
    /// Parse a packet type from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        use PacketType::*;
        let packet = match byte {
            0 => PressUp,
            1 => PressDown,
            2 => PressLeft,
            3 => PressRight,
            4 => Slide,
            5 => BatteryLevel,
            6 => Accel,
            7 => AmbientLight,
            8 => Pressure,
            9 => Gyro,
            10 => Temperature,
            11 => Humidity,
            12 => Magnet,
            13 => HeartRate,
            14 => Steps,
            15 => Calories,
            16 => AlertIn,
            17 => AlertOut,
            18 => PassDisplay,
            19 => OtapKw40Started,
            20 => OtapMk64Started,
            21 => OtapCompleted,
            22 => OtapFailed,
            23 => TsiGroupToggleActive,
            24 => TsiGroupGetActive,
            25 => TsiGroupSendActive,
            26 => AdvModeGet,
            27 => AdvModeSend,
            28 => AdvModeToggle,
            29 => AppMode,
            30 => LinkStateGet,
            31 => LinkStateSend,
            32 => Notification,
            33 => BuildVersion,
            255 => Ok,
            _ => return None,
        };
        Some(packet)
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Returns true for the four directional touch packets
    pub fn is_button(&self) -> bool {
        matches!(
            self,
            PacketType::PressUp
                | PacketType::PressDown
                | PacketType::PressLeft
                | PacketType::PressRight
        )
    }
}

/// Capacitive touch button on the Hexiwear front panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// Map a press packet to its button
    pub fn from_packet(packet: PacketType) -> Option<Self> {
        match packet {
            PacketType::PressUp => Some(Button::Up),
            PacketType::PressDown => Some(Button::Down),
            PacketType::PressLeft => Some(Button::Left),
            PacketType::PressRight => Some(Button::Right),
            _ => None,
        }
    }

    /// Packet type reporting a press of this button
    pub fn packet(self) -> PacketType {
        match self {
            Button::Up => PacketType::PressUp,
            Button::Down => PacketType::PressDown,
            Button::Left => PacketType::PressLeft,
            Button::Right => PacketType::PressRight,
        }
    }
}

/// Over-the-air update progress reported by the co-processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OtapState {
    Kw40Started,
    Mk64Started,
    Completed,
    Failed,
}

/// Application the KW40Z exposes to the connected central
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AppMode {
    /// No app active
    Idle = 0,
    /// Sensor tag (motion/weather services)
    SensorTag = 2,
    /// Heart rate app
    HeartRate = 5,
    /// Pedometer app
    Pedometer = 6,
}

impl AppMode {
    /// Parse an app mode from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(AppMode::Idle),
            2 => Some(AppMode::SensorTag),
            5 => Some(AppMode::HeartRate),
            6 => Some(AppMode::Pedometer),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Kind of alert carried in an ALERT_IN packet (first payload byte)
pub const ALERT_IN_TYPE_NOTIFICATION: u8 = 1;
/// Settings change pushed from the phone
pub const ALERT_IN_TYPE_SETTINGS: u8 = 2;
/// Time update pushed from the phone
pub const ALERT_IN_TYPE_TIME_UPDATE: u8 = 3;

/// Classification of an ALERT_IN payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertKind {
    Notification,
    Settings,
    TimeUpdate,
}

impl AlertKind {
    /// Classify by the first payload byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            ALERT_IN_TYPE_NOTIFICATION => Some(AlertKind::Notification),
            ALERT_IN_TYPE_SETTINGS => Some(AlertKind::Settings),
            ALERT_IN_TYPE_TIME_UPDATE => Some(AlertKind::TimeUpdate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_kinds() {
        assert_eq!(AlertKind::from_byte(1), Some(AlertKind::Notification));
        assert_eq!(AlertKind::from_byte(3), Some(AlertKind::TimeUpdate));
        assert_eq!(AlertKind::from_byte(0), None);
    }

    #[test]
    fn test_known_bytes_map_back() {
        for byte in (0u8..=33).chain(core::iter::once(255)) {
            let packet = PacketType::from_byte(byte).unwrap();
            assert_eq!(packet.to_byte(), byte);
        }
    }

    #[test]
    fn test_unknown_packet() {
        assert!(PacketType::from_byte(34).is_none());
        assert!(PacketType::from_byte(0x80).is_none());
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(Button::from_packet(PacketType::PressLeft), Some(Button::Left));
        assert_eq!(Button::from_packet(PacketType::Slide), None);
        assert_eq!(Button::Right.packet(), PacketType::PressRight);
        assert!(PacketType::PressDown.is_button());
        assert!(!PacketType::Slide.is_button());
    }

    #[test]
    fn test_app_mode_values() {
        assert_eq!(AppMode::SensorTag.to_byte(), 2);
        assert_eq!(AppMode::from_byte(6), Some(AppMode::Pedometer));
        assert_eq!(AppMode::from_byte(1), None);
    }
}
