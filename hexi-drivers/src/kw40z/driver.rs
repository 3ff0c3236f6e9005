//! KW40Z host-side driver
//!
//! The driver owns the UART and a frame parser. Nothing runs in the
//! background: inbound bytes are only consumed from [`Kw40z::poll`] or
//! while a send waits for its acknowledgement, and handlers run
//! synchronously from there in arrival order.
//!
//! ```ignore
//! let mut kw40z = Kw40z::new(uart, delay, Kw40zConfig::default());
//! kw40z.attach_button_up(on_up);
//! kw40z.start()?;
//!
//! loop {
//!     kw40z.poll()?;
//!     kw40z.upd_sensors(&SensorUpdate { battery: Some(80), ..Default::default() })?;
//! }
//! ```

use embedded_hal::delay::DelayNs;
use hexi_core::config::Kw40zConfig;
use hexi_hal::Uart;
use kw40z_protocol::{
    AppMode, Frame, FrameParser, HostCommand, Kw40zEvent, PacketType, MAX_PAYLOAD_SIZE,
};

use super::callbacks::{CallbackRegistry, EventHandler, EventKind};
use super::error::{Field, Kw40zError};
use super::{AppDataUpdate, Delivery, Kw40zStatus, SensorUpdate};

/// Bytes pulled from the UART per read
const RX_CHUNK: usize = 32;

/// Granularity of the acknowledgement wait (ms)
const WAIT_STEP_MS: u32 = 1;

/// Driver for the KW40Z running the Hexiwear BLE application
pub struct Kw40z<U, D> {
    serial: U,
    delay: D,
    config: Kw40zConfig,
    parser: FrameParser,
    status: Kw40zStatus,
    passkey: u32,
    callbacks: CallbackRegistry,
}

impl<U: Uart, D: DelayNs> Kw40z<U, D> {
    /// Create a driver; the UART must already be set up per `config.uart`
    pub fn new(serial: U, delay: D, config: Kw40zConfig) -> Self {
        Self {
            serial,
            delay,
            config,
            parser: FrameParser::new(),
            status: Kw40zStatus::default(),
            passkey: 0,
            callbacks: CallbackRegistry::new(),
        }
    }

    /// Open the channel and fetch the initial status
    ///
    /// Sends the touch group, advertising and link state queries and
    /// collects the replies for up to one retransmit timeout.
    pub fn start(&mut self) -> Result<(), Kw40zError> {
        self.parser.reset();
        self.send(HostCommand::TsiGroupGet)?;
        self.send(HostCommand::AdvModeGet)?;
        self.send(HostCommand::LinkStateGet)?;

        let mut replies = 0;
        let complete = self.wait_for(|event| {
            if matches!(
                event,
                Kw40zEvent::TsiGroup(_) | Kw40zEvent::AdvMode(_) | Kw40zEvent::LinkState(_)
            ) {
                replies += 1;
            }
            replies >= 3
        })?;

        if complete {
            info!("kw40z: started {:?}", self.status);
        } else {
            warn!("kw40z: status incomplete after start ({} replies)", replies);
        }
        Ok(())
    }

    /// Cached advertising, touch group and link state
    pub fn info(&self) -> Kw40zStatus {
        self.status
    }

    /// Last pairing code displayed by the KW40Z
    pub fn passkey(&self) -> u32 {
        self.passkey
    }

    /// Link settings given at construction
    pub fn config(&self) -> &Kw40zConfig {
        &self.config
    }

    /// Push sensor values to the BLE services
    ///
    /// Only the fields that are `Some` are sent.
    pub fn upd_sensors(&mut self, update: &SensorUpdate) -> Result<(), Kw40zError> {
        if update.battery.is_some_and(|level| level > 100) {
            return Err(Kw40zError::OutOfRange(Field::BatteryLevel));
        }

        let commands = [
            update.battery.map(HostCommand::BatteryLevel),
            update.accel.map(HostCommand::Accel),
            update.gyro.map(HostCommand::Gyro),
            update.magnet.map(HostCommand::Magnet),
            update.ambient_light.map(HostCommand::AmbientLight),
            update.temperature.map(HostCommand::Temperature),
            update.humidity.map(HostCommand::Humidity),
            update.pressure.map(HostCommand::Pressure),
        ];
        for command in commands.into_iter().flatten() {
            self.send(command)?;
        }
        Ok(())
    }

    /// Push health application values
    pub fn upd_app_data(&mut self, update: &AppDataUpdate) -> Result<(), Kw40zError> {
        let commands = [
            update.heart_rate.map(HostCommand::HeartRate),
            update.steps.map(HostCommand::Steps),
            update.calories.map(HostCommand::Calories),
        ];
        for command in commands.into_iter().flatten() {
            self.send(command)?;
        }
        Ok(())
    }

    /// Forward an alert to the connected central
    pub fn send_alert(&mut self, data: &[u8]) -> Result<Delivery, Kw40zError> {
        if data.len() > MAX_PAYLOAD_SIZE {
            return Err(Kw40zError::OutOfRange(Field::AlertLength));
        }
        self.send(HostCommand::AlertOut(data))
    }

    /// Switch advertising on/off, then refresh the cached state
    pub fn toggle_adv_mode(&mut self) -> Result<Delivery, Kw40zError> {
        let delivery = self.send(HostCommand::AdvModeToggle)?;
        self.send(HostCommand::AdvModeGet)?;
        if !self.wait_for(|event| matches!(event, Kw40zEvent::AdvMode(_)))? {
            debug!("kw40z: no advertising state after toggle");
        }
        Ok(delivery)
    }

    /// Swap the active electrode pair, then refresh the cached state
    pub fn toggle_tsi_group(&mut self) -> Result<Delivery, Kw40zError> {
        let delivery = self.send(HostCommand::TsiGroupToggle)?;
        self.send(HostCommand::TsiGroupGet)?;
        if !self.wait_for(|event| matches!(event, Kw40zEvent::TsiGroup(_)))? {
            debug!("kw40z: no touch group after toggle");
        }
        Ok(delivery)
    }

    /// Select the application exposed over BLE
    pub fn set_app_mode(&mut self, mode: AppMode) -> Result<Delivery, Kw40zError> {
        match mode {
            AppMode::Idle | AppMode::SensorTag => self.send(HostCommand::AppMode(mode)),
            _ => Err(Kw40zError::UnsupportedAppMode),
        }
    }

    /// Handle every frame already waiting on the UART
    ///
    /// Frames asking for confirmation are answered with an OK packet.
    /// Returns the number of events handled; malformed frames are logged
    /// and skipped.
    pub fn poll(&mut self) -> Result<usize, Kw40zError> {
        let mut handled = 0;
        self.drain(|_| {
            handled += 1;
            false
        })?;
        Ok(handled)
    }

    /// Handler for a tap on the up electrode
    pub fn attach_button_up(&mut self, handler: EventHandler) {
        self.callbacks.attach(EventKind::ButtonUp, handler);
    }

    /// Handler for a tap on the down electrode
    pub fn attach_button_down(&mut self, handler: EventHandler) {
        self.callbacks.attach(EventKind::ButtonDown, handler);
    }

    /// Handler for a tap on the left electrode
    pub fn attach_button_left(&mut self, handler: EventHandler) {
        self.callbacks.attach(EventKind::ButtonLeft, handler);
    }

    /// Handler for a tap on the right electrode
    pub fn attach_button_right(&mut self, handler: EventHandler) {
        self.callbacks.attach(EventKind::ButtonRight, handler);
    }

    /// Handler for the slide gesture
    pub fn attach_button_slide(&mut self, handler: EventHandler) {
        self.callbacks.attach(EventKind::Slide, handler);
    }

    /// Handler for alerts sent by the phone
    pub fn attach_alert(&mut self, handler: EventHandler) {
        self.callbacks.attach(EventKind::Alert, handler);
    }

    /// Handler for notification counter updates
    pub fn attach_notification(&mut self, handler: EventHandler) {
        self.callbacks.attach(EventKind::Notification, handler);
    }

    /// Handler for pairing requests; the event carries the passkey
    pub fn attach_passkey(&mut self, handler: EventHandler) {
        self.callbacks.attach(EventKind::Passkey, handler);
    }

    /// Remove the handler for one event kind
    pub fn detach(&mut self, kind: EventKind) {
        self.callbacks.detach(kind);
    }

    /// Give back the UART and delay
    pub fn release(self) -> (U, D) {
        (self.serial, self.delay)
    }

    /// Send a command, retransmitting until acknowledged when required
    ///
    /// OK packets carry no reference to the frame they answer, so any OK
    /// that arrives during the wait counts. Bytes already pending before
    /// the first write are handled first; a late OK for an earlier,
    /// unconfirmed command is consumed there instead of confirming this one.
    pub fn send(&mut self, command: HostCommand<'_>) -> Result<Delivery, Kw40zError> {
        let confirm = command.requires_confirmation() && self.config.tx_confirmation;
        let frame = command.to_frame()?.with_confirm(confirm);

        if !confirm {
            self.write_frame(&frame)?;
            return Ok(Delivery::Sent);
        }

        self.drain(|event| {
            if matches!(event, Kw40zEvent::Ok) {
                debug!("kw40z: stale OK dropped");
            }
            false
        })?;

        let attempts = self.config.retransmit_count.max(1);
        for attempt in 1..=attempts {
            self.write_frame(&frame)?;
            if self.wait_for(|event| matches!(event, Kw40zEvent::Ok))? {
                trace!("kw40z: type {} confirmed", frame.packet_type);
                return Ok(Delivery::Confirmed);
            }
            debug!(
                "kw40z: type {} not confirmed (attempt {}/{})",
                frame.packet_type,
                attempt,
                attempts
            );
        }

        warn!("kw40z: giving up on type {}", frame.packet_type);
        Ok(Delivery::Unconfirmed)
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<(), Kw40zError> {
        let bytes = frame.encode_to_vec()?;
        self.serial
            .write_blocking(&bytes)
            .map_err(|_| Kw40zError::Serial)?;
        self.serial.flush().map_err(|_| Kw40zError::Serial)
    }

    /// Keep draining until `done` accepts an event or the timeout passes
    fn wait_for<F>(&mut self, mut done: F) -> Result<bool, Kw40zError>
    where
        F: FnMut(&Kw40zEvent) -> bool,
    {
        let timeout = self.config.retransmit_timeout_ms as u32;
        let mut waited = 0;
        loop {
            if self.drain(&mut done)? {
                return Ok(true);
            }
            if waited >= timeout {
                return Ok(false);
            }
            self.delay.delay_ms(WAIT_STEP_MS);
            waited += WAIT_STEP_MS;
        }
    }

    /// Consume pending bytes, stopping early once `stop` accepts an event
    fn drain<F>(&mut self, mut stop: F) -> Result<bool, Kw40zError>
    where
        F: FnMut(&Kw40zEvent) -> bool,
    {
        let mut buf = [0u8; RX_CHUNK];
        loop {
            let count = self
                .serial
                .read_available(&mut buf)
                .map_err(|_| Kw40zError::Serial)?;
            if count == 0 {
                return Ok(false);
            }

            let mut stopped = false;
            for &byte in &buf[..count] {
                let frame = match self.parser.feed(byte) {
                    Ok(Some(frame)) => frame,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!("kw40z: dropped malformed frame: {:?}", e);
                        continue;
                    }
                };
                if let Some(event) = self.handle_frame(&frame)? {
                    stopped |= stop(&event);
                }
            }

            // Bytes after the awaited frame were already consumed; finish
            // this chunk so they are not lost, then hand back control.
            if stopped {
                return Ok(true);
            }
        }
    }

    fn handle_frame(&mut self, frame: &Frame) -> Result<Option<Kw40zEvent>, Kw40zError> {
        if frame.confirm
            && self.config.rx_confirmation
            && frame.packet_type != PacketType::Ok.to_byte()
        {
            let ok = HostCommand::Ok.to_frame()?;
            self.write_frame(&ok)?;
        }

        let event = match Kw40zEvent::from_frame(frame) {
            Ok(event) => event,
            Err(e) => {
                warn!("kw40z: ignoring type {}: {:?}", frame.packet_type, e);
                return Ok(None);
            }
        };

        match &event {
            Kw40zEvent::TsiGroup(group) => self.status.tsi_group = *group,
            Kw40zEvent::AdvMode(mode) => self.status.adv_mode = *mode,
            Kw40zEvent::LinkState(state) => self.status.link_state = *state,
            Kw40zEvent::PassDisplay { passkey } => {
                info!("kw40z: pairing code {}", passkey);
                self.passkey = *passkey;
            }
            Kw40zEvent::Otap(state) => info!("kw40z: OTAP {:?}", state),
            _ => {}
        }

        self.callbacks.dispatch(&event);
        Ok(Some(event))
    }
}
