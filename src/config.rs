//! Watchface configuration

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

use crate::battery::BatteryFallback;

/// Width of the bundled background image
pub const BACKGROUND_WIDTH: u32 = 144;
/// Bundled MicroRavez logo, raw little-endian RGB565
pub const BACKGROUND_IMAGE: &[u8] = include_bytes!("../assets/background.raw");

/// Display platform the face is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Platform {
    /// Monochrome display without transparency support
    Aplite,
    /// Colour display
    Basalt,
}

impl Platform {
    /// Compositing mode used for the background bitmap on this platform.
    pub const fn compositing(self) -> Compositing {
        match self {
            Platform::Aplite => Compositing::Assign,
            Platform::Basalt => Compositing::Set,
        }
    }
}

/// How bitmap pixels are blended onto the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Compositing {
    /// Copy every source pixel
    Assign,
    /// Skip source pixels matching the transparent key colour
    Set,
}

/// Colours used by the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Text and battery bar colour
    pub foreground: Rgb565,
    /// Battery bar frame colour
    pub mask: Rgb565,
    /// Window background, visible through transparent bitmap pixels
    pub background: Rgb565,
    /// Bitmap colour treated as transparent by [`Compositing::Set`]
    pub transparent_key: Rgb565,
}

impl Palette {
    /// MicroRavez green on black
    pub const MICRO_RAVEZ: Palette = Palette {
        // RGB (19, 168, 73)
        foreground: Rgb565::new(19 >> 3, 168 >> 2, 73 >> 3),
        mask: Rgb565::BLACK,
        background: Rgb565::BLACK,
        transparent_key: Rgb565::MAGENTA,
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::MICRO_RAVEZ
    }
}

/// Configuration resolved once when the face is created
#[derive(Debug, Clone, Copy)]
pub struct WatchfaceConfig {
    pub platform: Platform,
    pub compositing: Compositing,
    pub battery_fallback: BatteryFallback,
    pub palette: Palette,
    /// Background resource and its width in pixels
    pub background: (&'static [u8], u32),
}

impl WatchfaceConfig {
    /// Create the configuration for `platform`
    pub const fn new(platform: Platform) -> Self {
        Self {
            platform,
            compositing: platform.compositing(),
            battery_fallback: BatteryFallback::Blank,
            palette: Palette::MICRO_RAVEZ,
            background: (BACKGROUND_IMAGE, BACKGROUND_WIDTH),
        }
    }

    pub const fn with_compositing(mut self, compositing: Compositing) -> Self {
        self.compositing = compositing;
        self
    }

    pub const fn with_battery_fallback(mut self, fallback: BatteryFallback) -> Self {
        self.battery_fallback = fallback;
        self
    }

    pub const fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub const fn with_background(mut self, data: &'static [u8], width: u32) -> Self {
        self.background = (data, width);
        self
    }
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        Self::new(Platform::Basalt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_selects_compositing() {
        assert_eq!(WatchfaceConfig::new(Platform::Aplite).compositing, Compositing::Assign);
        assert_eq!(WatchfaceConfig::new(Platform::Basalt).compositing, Compositing::Set);
        let config = WatchfaceConfig::new(Platform::Basalt).with_compositing(Compositing::Assign);
        assert_eq!(config.platform, Platform::Basalt);
        assert_eq!(config.compositing, Compositing::Assign);
    }

    #[test]
    fn bundled_background_matches_canvas() {
        let (data, width) = WatchfaceConfig::default().background;
        assert_eq!(width, BACKGROUND_WIDTH);
        assert_eq!(data.len(), 144 * 168 * 2);
    }

    #[test]
    fn config_builds_in_const_context() {
        const APLITE: WatchfaceConfig = WatchfaceConfig::new(Platform::Aplite)
            .with_battery_fallback(BatteryFallback::Percentage);
        assert_eq!(APLITE.compositing, Compositing::Assign);
        assert_eq!(APLITE.background.0.len(), BACKGROUND_IMAGE.len());
    }

    #[test]
    fn default_fallback_is_blank() {
        assert_eq!(WatchfaceConfig::default().battery_fallback, BatteryFallback::Blank);
    }
}
