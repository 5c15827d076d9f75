//! Event dispatch between the system and the watchface

use chrono::NaiveDateTime;

use crate::{
    battery::BatteryChargeState,
    services::{Services, WatchfaceHandlers},
};

/// Events delivered by the system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A minute boundary passed
    MinuteTick(NaiveDateTime),
    /// Battery state changed
    BatteryChange(BatteryChargeState),
}

/// Owns the handlers and tracks whether their window is on screen
pub struct App<H> {
    handlers: H,
    pushed: bool,
}

impl<H: WatchfaceHandlers> App<H> {
    pub const fn new(handlers: H) -> Self {
        Self {
            handlers,
            pushed: false,
        }
    }

    /// Show the window, loading its widgets
    pub fn push<S: Services>(&mut self, services: &S) {
        if self.pushed {
            return;
        }
        self.handlers.on_load(services);
        self.pushed = true;
    }

    /// Remove the window, releasing its widgets
    pub fn pop(&mut self) {
        if !self.pushed {
            return;
        }
        self.handlers.on_unload();
        self.pushed = false;
    }

    pub fn is_pushed(&self) -> bool {
        self.pushed
    }

    /// Deliver `event` to the handlers. Events arriving while the window is
    /// not shown are dropped.
    pub fn dispatch<S: Services>(&mut self, event: Event, services: &S) {
        if !self.pushed {
            debug!("event dropped, no window");
            return;
        }
        match event {
            Event::MinuteTick(time) => self.handlers.on_minute_tick(&time, services),
            Event::BatteryChange(state) => self.handlers.on_battery_change(state),
        }
    }

    pub fn handlers(&self) -> &H {
        &self.handlers
    }

    pub fn handlers_mut(&mut self) -> &mut H {
        &mut self.handlers
    }
}
