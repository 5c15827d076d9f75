//! Boundary between the watchface and the system running it

use chrono::NaiveDateTime;

use crate::battery::BatteryChargeState;

/// System services queried by the watchface
pub trait Services {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// User preference for 24 hour clock display
    fn clock_is_24h_style(&self) -> bool;

    /// Latest battery state
    fn battery_state(&self) -> BatteryChargeState;
}

/// Callbacks the system invokes on the watchface.
///
/// `on_load` and `on_unload` bracket the lifetime of every widget; the event
/// callbacks only touch widgets that exist.
pub trait WatchfaceHandlers {
    /// Window pushed: create widgets and show initial state
    fn on_load<S: Services>(&mut self, services: &S);

    /// Window destroyed: release every widget
    fn on_unload(&mut self);

    /// Minute boundary passed
    fn on_minute_tick<S: Services>(&mut self, tick_time: &NaiveDateTime, services: &S);

    /// Battery state changed
    fn on_battery_change(&mut self, state: BatteryChargeState);
}
