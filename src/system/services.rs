//! System services handed to the watchface

use chrono::NaiveDateTime;
use micro_ravez_watchface::{BatteryChargeState, Services};

use super::{config::CLOCK_24H, time::TimeManager};

pub struct DeviceServices<'a> {
    time: &'a TimeManager,
    battery: BatteryChargeState,
}

impl<'a> DeviceServices<'a> {
    pub fn new(time: &'a TimeManager, battery: BatteryChargeState) -> Self {
        Self { time, battery }
    }

    /// Record the latest battery sample
    pub fn set_battery(&mut self, battery: BatteryChargeState) {
        self.battery = battery;
    }
}

impl Services for DeviceServices<'_> {
    fn now(&self) -> NaiveDateTime {
        self.time.get_time()
    }

    fn clock_is_24h_style(&self) -> bool {
        CLOCK_24H
    }

    fn battery_state(&self) -> BatteryChargeState {
        self.battery
    }
}
