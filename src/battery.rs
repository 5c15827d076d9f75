//! Battery status text and bar width

use crate::Error;

/// Capacity of the battery status text (`"100% charged"`)
pub const STATUS_LEN: usize = 12;
/// Bar width at 100 %
pub const BAR_MAX_WIDTH: u8 = 130;
/// Bar width added per 10 % of charge
const BAR_STEP: u8 = 13;

/// Battery state as reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryChargeState {
    /// Charge in percent (0–100)
    pub charge_percent: u8,
    /// Battery is currently being charged
    pub is_charging: bool,
    /// External power is connected
    pub is_plugged: bool,
}

/// Text shown when the watch is neither charging nor plugged in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryFallback {
    /// Leave the status empty, the bar shows the charge
    #[default]
    Blank,
    /// `"NN% charged"`
    Percentage,
}

/// Write the status text for `state` into `buf`.
pub fn status_text<'a>(
    buf: &'a mut [u8],
    state: &BatteryChargeState,
    fallback: BatteryFallback,
) -> Result<&'a str, Error> {
    let text = if state.is_charging {
        format_no_std::show(buf, format_args!("charging"))
    } else if state.is_plugged {
        format_no_std::show(buf, format_args!("ready"))
    } else {
        match fallback {
            BatteryFallback::Blank => format_no_std::show(buf, format_args!("")),
            BatteryFallback::Percentage => {
                format_no_std::show(buf, format_args!("{}% charged", state.charge_percent))
            }
        }
    };
    Ok(text?)
}

/// Battery bar width in pixels: one 13 px step per full 10 %.
pub fn bar_width(percent: u8) -> u8 {
    percent.min(100) / 10 * BAR_STEP
}

/// Round `percent` down to the 10 % steps the bar can show. Sampling in
/// steps keeps ADC noise from producing state changes.
pub fn charge_step(percent: u8) -> u8 {
    percent.min(100) / 10 * 10
}

/// Estimate the charge of the LiPo cell from its voltage in millivolts.
///
/// Fixed data points with linear interpolation in between.
pub fn percent_from_millivolts(voltage: u16) -> u8 {
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}
