//! MicroRavez watchface
//!
//! Time, date and battery status drawn over the MicroRavez logo. The library
//! is host independent: the firmware binary (or any other host) implements
//! [`Services`] and feeds [`app::Event`]s into an [`app::App`].
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod app;
pub mod battery;
pub mod clock;
pub mod config;
pub mod services;
pub mod ui;

pub use battery::BatteryChargeState;
pub use config::{Compositing, Platform, WatchfaceConfig};
pub use services::{Services, WatchfaceHandlers};
pub use ui::watchface::Watchface;

/// Errors raised while producing display text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Formatted text did not fit the destination buffer
    Format,
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::Format
    }
}
