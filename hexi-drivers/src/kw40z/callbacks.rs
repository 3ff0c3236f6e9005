//! Event handler registry
//!
//! One handler slot per event kind. Attaching a handler replaces whatever
//! was registered for that kind before; other kinds are untouched.

use kw40z_protocol::{Button, Kw40zEvent};

/// Plain function invoked with the event that triggered it
pub type EventHandler = fn(&Kw40zEvent);

/// Event kinds a handler can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    ButtonUp,
    ButtonDown,
    ButtonLeft,
    ButtonRight,
    Slide,
    Alert,
    Notification,
    Passkey,
}

impl EventKind {
    /// Number of handler slots
    pub const COUNT: usize = 8;

    fn index(self) -> usize {
        self as usize
    }

    /// Kind of an inbound event, if handlers can be attached to it
    pub fn of(event: &Kw40zEvent) -> Option<Self> {
        let kind = match event {
            Kw40zEvent::Button(Button::Up) => EventKind::ButtonUp,
            Kw40zEvent::Button(Button::Down) => EventKind::ButtonDown,
            Kw40zEvent::Button(Button::Left) => EventKind::ButtonLeft,
            Kw40zEvent::Button(Button::Right) => EventKind::ButtonRight,
            Kw40zEvent::Slide => EventKind::Slide,
            Kw40zEvent::AlertIn(_) => EventKind::Alert,
            Kw40zEvent::Notification { .. } => EventKind::Notification,
            Kw40zEvent::PassDisplay { .. } => EventKind::Passkey,
            _ => return None,
        };
        Some(kind)
    }
}

/// Fixed table of optional handlers
#[derive(Debug, Clone, Copy, Default)]
pub struct CallbackRegistry {
    handlers: [Option<EventHandler>; EventKind::COUNT],
}

impl CallbackRegistry {
    pub const fn new() -> Self {
        Self {
            handlers: [None; EventKind::COUNT],
        }
    }

    /// Register `handler` for `kind`, replacing any previous one
    pub fn attach(&mut self, kind: EventKind, handler: EventHandler) {
        self.handlers[kind.index()] = Some(handler);
    }

    /// Remove the handler for `kind`
    pub fn detach(&mut self, kind: EventKind) {
        self.handlers[kind.index()] = None;
    }

    pub fn handler(&self, kind: EventKind) -> Option<EventHandler> {
        self.handlers[kind.index()]
    }

    /// Invoke the handler for `event`, returning whether one ran
    pub fn dispatch(&self, event: &Kw40zEvent) -> bool {
        match EventKind::of(event).and_then(|kind| self.handler(kind)) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}
