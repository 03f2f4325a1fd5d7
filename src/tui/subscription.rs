use crossterm::event::KeyCode;
use std::time::Duration;

use crate::tui::Event;

/// Inputs a screen listens to, re-read after every update.
///
/// Screens only declare what they want; the runtime owns the key map, the
/// timers and the event handlers built from these.
pub enum Subscription<Msg> {
    /// A key press, listed in the help overlay under `description`
    Key {
        key: KeyCode,
        description: &'static str,
        msg: Msg,
    },

    /// Fires every `every` while subscribed
    Tick { every: Duration, msg: Msg },

    /// Maps events emitted by other screens to a message
    Event(fn(&Event) -> Option<Msg>),
}

impl<Msg> Subscription<Msg> {
    pub fn key(key: KeyCode, description: &'static str, msg: Msg) -> Self {
        Subscription::Key { key, description, msg }
    }

    pub fn tick(every: Duration, msg: Msg) -> Self {
        Subscription::Tick { every, msg }
    }

    pub fn on_event(handler: fn(&Event) -> Option<Msg>) -> Self {
        Subscription::Event(handler)
    }
}
