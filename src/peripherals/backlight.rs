//! Backlight control
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/backlight.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_14, P0_22, P0_23},
};

#[allow(unused)]
#[derive(Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Brightness {
    LEVEL0 = 0,
    LEVEL1 = 1,
    LEVEL2 = 2,
    LEVEL3 = 3,
    LEVEL4 = 4,
    LEVEL5 = 5,
    LEVEL6 = 6,
    LEVEL7 = 7,
}

/// Control the backlight.
///
/// There are three active-low backlight pins, each connected to a FET that
/// toggles backlight power through a resistor.
///
/// - Low: 2.2 kΩ
/// - Mid: 100 Ω
/// - High: 30 Ω
///
/// Through combinations of these pins, 7 brightness levels (+ off) can be
/// configured.
pub struct Backlight<'a> {
    low: Output<'a, P0_14>,
    mid: Output<'a, P0_22>,
    high: Output<'a, P0_23>,
}

impl<'a> Backlight<'a> {
    /// Initialize the backlight with the specified level.
    pub fn init(
        low: Output<'a, P0_14>,
        mid: Output<'a, P0_22>,
        high: Output<'a, P0_23>,
        brightness: Brightness,
    ) -> Self {
        let mut backlight = Self { low, mid, high };
        backlight.set(brightness);
        backlight
    }

    /// Set the brightness level.
    pub fn set(&mut self, brightness: Brightness) {
        defmt::debug!("Setting backlight brightness to {}", brightness);

        let level = brightness as u8;
        if level & 0x01 > 0 {
            self.low.set_low();
        } else {
            self.low.set_high();
        }
        if level & 0x02 > 0 {
            self.mid.set_low();
        } else {
            self.mid.set_high();
        }
        if level & 0x04 > 0 {
            self.high.set_low();
        } else {
            self.high.set_high();
        }
    }
}

