#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Ticker, Timer};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use micro_ravez_watchface::{
    app::{App, Event},
    clock::MinuteTicker,
    BatteryChargeState, Watchface, WatchfaceConfig,
};
use peripherals::{
    backlight::{Backlight, Brightness},
    battery::Battery,
    display::Display,
};
use system::{
    config::{nrf_config, PLATFORM, UTC_OFFSET_SECS},
    services::DeviceServices,
    time::{TimeManager, TimeReference},
};

// Others
use chrono::{NaiveDateTime, Timelike};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryChargeState> = Signal::new();
static MINUTE: Signal<ThreadModeRawMutex, NaiveDateTime> = Signal::new();

static TIME: StaticCell<TimeManager> = StaticCell::new();

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery<'static>) {
    loop {
        if battery.update().await {
            // Battery status changed
            defmt::info!("Battery status updated");
            BATTERY_STATUS.signal(battery.state());
        }

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Turn the clock into minute ticks.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(time: &'static TimeManager) {
    let mut minutes = MinuteTicker::new();
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        if let Some(now) = minutes.poll(time.get_time()) {
            defmt::info!("Minute tick: {}:{}", now.hour(), now.minute());
            MINUTE.signal(now);
        }

        tick.next().await;
    }
}

/// Own the watchface and redraw it whenever an event changed it.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(
    mut display: Display<SPI2>,
    time: &'static TimeManager,
    battery: BatteryChargeState,
) {
    let mut services = DeviceServices::new(time, battery);
    let mut app = App::new(Watchface::new(WatchfaceConfig::new(PLATFORM)));
    app.push(&services);

    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        if BATTERY_STATUS.signaled() {
            let status = BATTERY_STATUS.wait().await;
            defmt::info!(
                "Battery status: {} ({})",
                status.charge_percent,
                if status.is_charging {
                    "charging"
                } else {
                    "discharging"
                }
            );
            services.set_battery(status);
            app.dispatch(Event::BatteryChange(status), &services);
        }

        if MINUTE.signaled() {
            let now = MINUTE.wait().await;
            app.dispatch(Event::MinuteTick(now), &services);
        }

        if app.handlers().is_dirty() {
            if let Err(e) = display.draw(app.handlers_mut()) {
                defmt::error!("Redraw failed: {}", e);
            }
        }

        // Re-schedule the timer interrupt in 1s
        tick.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(nrf_config());
    defmt::info!("Initializing");

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Backlight
    let backlight = Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        Brightness::LEVEL0,
    );

    // Initalize Battery
    let battery = Battery::init(
        saadc,
        Input::new(p.P0_12, Pull::None),
        Input::new(p.P0_19, Pull::None),
    )
    .await;
    let battery_state = battery.state();

    // Initialize clock from the build time
    let time: &'static TimeManager = TIME.init(TimeManager::init(TimeReference::from_epoch(
        UTC_EPOCH,
        UTC_OFFSET_SECS,
    )));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let mut display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
        backlight,
    ));
    display.set_brightness(Brightness::LEVEL2);

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(update_battery_status(battery)));
    unwrap!(spawner.spawn(update_time(time)));
    unwrap!(spawner.spawn(update_lcd(display, time, battery_state)));
}
