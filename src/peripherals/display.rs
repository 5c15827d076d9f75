//! Display control module for PineTime

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};

use display_interface_spi::SPIInterface;
use embassy_time::Delay;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use micro_ravez_watchface::{ui::CANVAS, Watchface};
use mipidsi::{models::ST7789, Builder, Orientation};

use super::backlight::{Backlight, Brightness};

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

type Lcd<'a, SPI> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

pub struct Display<SPI>
where
    SPI: spim::Instance,
{
    lcd: Lcd<'static, SPI>,
    backlight: Backlight<'static>,
    /// Where the watchface canvas starts on the panel
    offset: Point,
}

impl<SPI> Display<SPI>
where
    SPI: spim::Instance,
{
    /// Configure display settings on boot
    pub fn init(
        spim: Spim<'static, SPI>,
        cs_pin: Output<'static, P0_25>,
        dc_pin: Output<'static, P0_18>,
        rst_pin: Output<'static, P0_26>,
        backlight: Backlight<'static>,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::Init)?;

        // Centre the canvas on the panel
        let offset = Point::new(
            (LCD_W as i32 - CANVAS.width as i32) / 2,
            (LCD_H as i32 - CANVAS.height as i32) / 2,
        );

        let mut display = Self {
            lcd,
            backlight,
            offset,
        };
        display.clear(Rgb565::BLACK)?;
        Ok(display)
    }

    /// Clear the display
    pub fn clear(&mut self, color: Rgb565) -> Result<(), Error> {
        self.lcd.clear(color).map_err(|_| Error::Draw)
    }

    /// Set the backlight brightness
    pub fn set_brightness(&mut self, level: Brightness) {
        self.backlight.set(level);
    }

    /// Redraw the watchface
    pub fn draw(&mut self, face: &mut Watchface) -> Result<(), Error> {
        face.render(&mut self.lcd.translated(self.offset))
            .map_err(|_| Error::Draw)
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    Init,
    Draw,
}
