//! KW40Z features: touch buttons, pairing, advertising, sensor push

use hexi_core::Feature;
use hexi_drivers::kw40z::{EventHandler, Kw40z, Kw40zStatus};

use super::Hexiwear;
use crate::board::Board;
use crate::error::Error;

impl<B: Board> Hexiwear<B> {
    /// Direct access to the KW40Z driver (alerts, app data, app mode)
    pub fn bluetooth(&mut self) -> Result<&mut Kw40z<B::Uart, B::Delay>, Error> {
        self.kw40z.as_mut().ok_or(Error::Disabled(Feature::Bluetooth))
    }

    /// Handler for a tap on the up electrode
    pub fn attach_button_up(&mut self, handler: EventHandler) -> Result<(), Error> {
        self.bluetooth()?.attach_button_up(handler);
        Ok(())
    }

    /// Handler for a tap on the down electrode
    pub fn attach_button_down(&mut self, handler: EventHandler) -> Result<(), Error> {
        self.bluetooth()?.attach_button_down(handler);
        Ok(())
    }

    /// Handler for a tap on the left electrode
    pub fn attach_button_left(&mut self, handler: EventHandler) -> Result<(), Error> {
        self.bluetooth()?.attach_button_left(handler);
        Ok(())
    }

    /// Handler for a tap on the right electrode
    pub fn attach_button_right(&mut self, handler: EventHandler) -> Result<(), Error> {
        self.bluetooth()?.attach_button_right(handler);
        Ok(())
    }

    /// Handler for the slide gesture
    pub fn attach_button_slide(&mut self, handler: EventHandler) -> Result<(), Error> {
        self.bluetooth()?.attach_button_slide(handler);
        Ok(())
    }

    /// Handler for pairing requests; read the code from the event or
    /// from [`Hexiwear::passkey`]
    pub fn attach_passkey(&mut self, handler: EventHandler) -> Result<(), Error> {
        self.bluetooth()?.attach_passkey(handler);
        Ok(())
    }

    /// Handler for alerts sent by the phone
    pub fn attach_alert(&mut self, handler: EventHandler) -> Result<(), Error> {
        self.bluetooth()?.attach_alert(handler);
        Ok(())
    }

    /// Handler for notification counter updates
    pub fn attach_notification(&mut self, handler: EventHandler) -> Result<(), Error> {
        self.bluetooth()?.attach_notification(handler);
        Ok(())
    }

    /// Start advertising unless already advertising
    pub fn bluetooth_on(&mut self) -> Result<(), Error> {
        let kw40z = self.bluetooth()?;
        if !kw40z.info().is_advertising() {
            kw40z.toggle_adv_mode()?;
        }
        Ok(())
    }

    /// Stop advertising unless already stopped
    pub fn bluetooth_off(&mut self) -> Result<(), Error> {
        let kw40z = self.bluetooth()?;
        if kw40z.info().is_advertising() {
            kw40z.toggle_adv_mode()?;
        }
        Ok(())
    }

    /// Make the right electrode pair the active one
    pub fn right_capacitive_buttons_active(&mut self) -> Result<(), Error> {
        let kw40z = self.bluetooth()?;
        if !kw40z.info().right_pair_active() {
            kw40z.toggle_tsi_group()?;
        }
        Ok(())
    }

    /// Make the left electrode pair the active one
    pub fn left_capacitive_buttons_active(&mut self) -> Result<(), Error> {
        let kw40z = self.bluetooth()?;
        if kw40z.info().right_pair_active() {
            kw40z.toggle_tsi_group()?;
        }
        Ok(())
    }

    /// Advertising, active electrode pair and link state
    pub fn bluetooth_info(&mut self) -> Result<Kw40zStatus, Error> {
        Ok(self.bluetooth()?.info())
    }

    /// Last pairing code shown by the KW40Z
    pub fn passkey(&mut self) -> Result<u32, Error> {
        Ok(self.bluetooth()?.passkey())
    }

    /// Push sensor values to the KW40Z periodically from [`Hexiwear::tick`]
    ///
    /// The first push happens on the next tick.
    pub fn enable_bt_upd_sensors(&mut self) -> Result<(), Error> {
        self.bluetooth()?;
        self.sync.enabled = true;
        self.sync.elapsed_ms = self.config.sensor_sync.period_ms;
        Ok(())
    }

    pub fn disable_bt_upd_sensors(&mut self) -> Result<(), Error> {
        self.bluetooth()?;
        self.sync.enabled = false;
        Ok(())
    }
}
