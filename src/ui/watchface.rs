//! MicroRavez watchface

use chrono::NaiveDateTime;
use embedded_graphics::{
    mono_font::ascii::FONT_6X10, pixelcolor::Rgb565, prelude::*, primitives::Rectangle,
    text::Alignment,
};
use profont::{PROFONT_12_POINT, PROFONT_24_POINT};

use super::{
    layer::{BatteryBarLayer, Bitmap, BitmapLayer, Layer, TextLayer},
    layout,
    path::Path,
    window::{LayerId, Window},
    CANVAS,
};
use crate::{
    battery::{self, BatteryChargeState, STATUS_LEN},
    clock::{self, ClockStyle, DATE_FIELD_LEN, TIME_LEN},
    config::WatchfaceConfig,
    services::{Services, WatchfaceHandlers},
};

/// Every widget of the face. Exists only between load and unload.
pub struct Screen {
    background: BitmapLayer,
    time: TextLayer<TIME_LEN>,
    day: TextLayer<DATE_FIELD_LEN>,
    month: TextLayer<DATE_FIELD_LEN>,
    battery: TextLayer<STATUS_LEN>,
    battery_bar: BatteryBarLayer,
}

impl Screen {
    fn new(config: &WatchfaceConfig, bounds: Rectangle) -> Self {
        let palette = config.palette;
        let (data, width) = config.background;

        // Background
        let mut background = BitmapLayer::new(bounds);
        background.set_bitmap(Bitmap::from_resource(data, width));
        background.set_compositing_mode(config.compositing, palette.transparent_key);
        background.set_underlay(Some(palette.background));

        // Time
        let mut time = TextLayer::new(layout::TIME, &PROFONT_24_POINT);
        time.set_background_color(None);
        time.set_text_color(palette.foreground);
        time.set_text("00:00");
        time.set_text_alignment(Alignment::Center);

        // Date
        let mut day = TextLayer::new(layout::DAY, &PROFONT_12_POINT);
        day.set_text_color(palette.foreground);
        let mut month = TextLayer::new(layout::MONTH, &PROFONT_12_POINT);
        month.set_text_color(palette.foreground);
        month.set_text_alignment(Alignment::Right);

        // Battery
        let mut battery = TextLayer::new(layout::BATTERY_TEXT, &FONT_6X10);
        battery.set_text_color(palette.foreground);
        battery.set_text_alignment(Alignment::Center);

        let mut battery_bar = BatteryBarLayer::new(
            layout::BATTERY_BAR,
            layout::BAR_ORIGIN,
            layout::BAR_HEIGHT,
            Path::new(layout::BAR_MASK),
        );
        battery_bar.set_colors(palette.foreground, palette.mask);

        Self {
            background,
            time,
            day,
            month,
            battery,
            battery_bar,
        }
    }

    pub fn time_text(&self) -> &str {
        self.time.text()
    }

    pub fn day_text(&self) -> &str {
        self.day.text()
    }

    pub fn month_text(&self) -> &str {
        self.month.text()
    }

    pub fn battery_text(&self) -> &str {
        self.battery.text()
    }

    pub fn bar_width(&self) -> u8 {
        self.battery_bar.bar_width()
    }

    pub fn background(&self) -> &BitmapLayer {
        &self.background
    }

    fn is_dirty(&self) -> bool {
        self.background.is_dirty()
            || self.time.is_dirty()
            || self.day.is_dirty()
            || self.month.is_dirty()
            || self.battery.is_dirty()
            || self.battery_bar.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.background.mark_clean();
        self.time.mark_clean();
        self.day.mark_clean();
        self.month.mark_clean();
        self.battery.mark_clean();
        self.battery_bar.mark_clean();
    }

    fn draw_layer<D>(&self, id: LayerId, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match id {
            LayerId::Background => self.background.draw(target),
            LayerId::Time => self.time.draw(target),
            LayerId::Day => self.day.draw(target),
            LayerId::Month => self.month.draw(target),
            LayerId::BatteryText => self.battery.draw(target),
            LayerId::BatteryBar => self.battery_bar.draw(target),
        }
    }
}

/// Screen state: window, configuration and the widgets while loaded
pub struct Watchface {
    config: WatchfaceConfig,
    window: Window,
    screen: Option<Screen>,
    /// Set when the window itself needs a full redraw
    dirty: bool,
}

impl Watchface {
    pub fn new(config: WatchfaceConfig) -> Self {
        // The face covers the whole canvas, no status bar
        let mut window = Window::new(CANVAS, config.palette.background);
        window.set_fullscreen(true);
        Self {
            window,
            config,
            screen: None,
            dirty: true,
        }
    }

    pub fn config(&self) -> &WatchfaceConfig {
        &self.config
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn is_loaded(&self) -> bool {
        self.screen.is_some()
    }

    /// Widgets, present only while loaded
    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    /// Something changed since the last [`render`](Self::render)
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.screen.as_ref().is_some_and(Screen::is_dirty)
    }

    /// Draw the window background and every child layer, bottom to top.
    pub fn render<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        // The panel has no framebuffer: clearing first would flash
        let bounds = self.window.bounds();
        let covered = self
            .screen
            .as_ref()
            .is_some_and(|screen| screen.background.covers(&bounds));
        if !covered {
            target.fill_solid(&bounds, self.window.background())?;
        }
        if let Some(screen) = &self.screen {
            for id in self.window.children() {
                screen.draw_layer(*id, target)?;
            }
        }
        if let Some(screen) = &mut self.screen {
            screen.mark_clean();
        }
        self.dirty = false;
        Ok(())
    }

    fn update_time(&mut self, time: &NaiveDateTime, style: ClockStyle) {
        let Some(screen) = &mut self.screen else {
            return;
        };

        let mut buf = [0u8; TIME_LEN];
        match clock::format_time(&mut buf, time, style) {
            Ok(text) => screen.time.set_text(text),
            Err(e) => error!("time text: {}", e),
        }

        let mut buf = [0u8; DATE_FIELD_LEN];
        match clock::format_day(&mut buf, time) {
            Ok(text) => screen.day.set_text(text),
            Err(e) => error!("day text: {}", e),
        }
        let mut buf = [0u8; DATE_FIELD_LEN];
        match clock::format_month(&mut buf, time) {
            Ok(text) => screen.month.set_text(text),
            Err(e) => error!("month text: {}", e),
        }
    }
}

impl WatchfaceHandlers for Watchface {
    fn on_load<S: Services>(&mut self, services: &S) {
        if self.screen.is_some() {
            warn!("watchface already loaded");
            return;
        }

        let screen = Screen::new(&self.config, self.window.bounds());
        for id in [
            LayerId::Background,
            LayerId::Time,
            LayerId::Day,
            LayerId::Month,
            LayerId::BatteryText,
            LayerId::BatteryBar,
        ] {
            self.window.add_child(id);
        }
        self.screen = Some(screen);
        self.dirty = true;

        // Never show the placeholders
        let style = ClockStyle::from_24h_flag(services.clock_is_24h_style());
        self.update_time(&services.now(), style);
        self.on_battery_change(services.battery_state());

        info!("watchface loaded");
    }

    fn on_unload(&mut self) {
        if self.screen.take().is_none() {
            warn!("watchface not loaded");
            return;
        }
        self.window.remove_all_children();
        self.dirty = true;
        info!("watchface unloaded");
    }

    fn on_minute_tick<S: Services>(&mut self, tick_time: &NaiveDateTime, services: &S) {
        let style = ClockStyle::from_24h_flag(services.clock_is_24h_style());
        self.update_time(tick_time, style);
    }

    fn on_battery_change(&mut self, state: BatteryChargeState) {
        let fallback = self.config.battery_fallback;
        let Some(screen) = &mut self.screen else {
            return;
        };

        let mut buf = [0u8; STATUS_LEN];
        match battery::status_text(&mut buf, &state, fallback) {
            Ok(text) => screen.battery.set_text(text),
            Err(e) => error!("battery text: {}", e),
        }
        screen.battery_bar.set_bar_width(battery::bar_width(state.charge_percent));

        debug!(
            "battery {} % charging={} plugged={}",
            state.charge_percent,
            state.is_charging,
            state.is_plugged
        );
    }
}
