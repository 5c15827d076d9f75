//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{
    gpio::Input,
    peripherals::{P0_12, P0_19},
    saadc::Saadc,
};
use micro_ravez_watchface::battery::{charge_step, percent_from_millivolts, BatteryChargeState};

/// Battery API
pub struct Battery<'a> {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'a, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'a, P0_12>,
    /// Power presence pin:
    /// high = battery, low = external power
    pin_power_presence: Input<'a, P0_19>,
    /// Last sampled state
    state: BatteryChargeState,
}

impl<'a> Battery<'a> {
    /// Configure battery settings on boot and take a first sample
    pub async fn init(
        adc: Saadc<'a, 1>,
        charge_pin: Input<'a, P0_12>,
        power_pin: Input<'a, P0_19>,
    ) -> Self {
        let mut battery = Self {
            adc,
            pin_charge_indication: charge_pin,
            pin_power_presence: power_pin,
            state: BatteryChargeState::default(),
        };
        battery.state = battery.read().await;
        battery
    }

    /// Last sampled state. To fetch current data, call `update()` first.
    pub fn state(&self) -> BatteryChargeState {
        self.state
    }

    /// Sample the hardware. Return whether the state changed.
    pub async fn update(&mut self) -> bool {
        let state = self.read().await;
        let changed = state != self.state;
        self.state = state;
        changed
    }

    async fn read(&mut self) -> BatteryChargeState {
        let voltage = self.get_voltage().await;
        BatteryChargeState {
            charge_percent: charge_step(percent_from_millivolts(voltage)),
            is_charging: self.pin_charge_indication.is_low(),
            is_plugged: self.pin_power_presence.is_low(),
        }
    }

    /// Battery voltage in millivolts
    async fn get_voltage(&mut self) -> u16 {
        let mut buf = [0; 1];
        self.adc.sample(&mut buf).await;
        // For detailed explanation of formula check https://wiki.pine64.org/wiki/PineTime
        // Use u32 during calculation to prevent overflow
        (buf[0].max(0) as u32 * 2000 / 1241) as u16
    }
}
