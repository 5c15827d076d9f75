//! Board and user configuration

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
};
use micro_ravez_watchface::Platform;

/// Offset of local time from UTC
pub const UTC_OFFSET_SECS: i64 = 3_600;

/// Show the clock in 24 hour format
pub const CLOCK_24H: bool = true;

/// The PineTime has a colour LCD
pub const PLATFORM: Platform = Platform::Basalt;

/// Interrupt priority of the GPIOTE and RTC time driver. Without a SoftDevice
/// no level is reserved; all tasks run on the thread-mode executor, so any
/// level preempts them. P2 leaves P0 and P1 free for drivers added later.
const DRIVER_PRIORITY: Priority = Priority::P2;

/// nRF52832 configuration for the PineTime board
pub fn nrf_config() -> Config {
    let mut config = Config::default();

    // The board carries a 32 MHz and a 32.768 kHz crystal
    config.hfclk_source = HfclkSource::ExternalXtal;
    config.lfclk_source = LfclkSource::ExternalXtal;

    // DC/DC inductor is populated
    config.dcdc.reg1 = true;

    config.gpiote_interrupt_priority = DRIVER_PRIORITY;
    config.time_interrupt_priority = DRIVER_PRIORITY;

    // SWD stays usable for probe-rs and defmt-rtt
    config.debug = Debug::Allowed;

    config
}
