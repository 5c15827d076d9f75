//! UI definitions module
//!
//! The face is laid out on a 144×168 canvas; hosts with a larger panel draw
//! it through a translated target.

use embedded_graphics::{geometry::Point, geometry::Size, primitives::Rectangle};

pub mod layer;
pub mod path;
pub mod watchface;
pub mod window;

/// Canvas the face is laid out on
pub const CANVAS: Size = Size::new(144, 168);

/// Widget placement on the canvas
pub(crate) mod layout {
    use super::*;

    pub const TIME: Rectangle = Rectangle::new(Point::new(0, 124), Size::new(144, 30));
    pub const DAY: Rectangle = Rectangle::new(Point::new(4, 2), Size::new(24, 16));
    pub const MONTH: Rectangle = Rectangle::new(Point::new(116, 2), Size::new(24, 16));
    pub const BATTERY_TEXT: Rectangle = Rectangle::new(Point::new(30, 4), Size::new(84, 12));

    /// Battery bar area, frame included
    pub const BATTERY_BAR: Rectangle = Rectangle::new(Point::new(4, 157), Size::new(137, 11));
    /// Top left corner of the bar fill
    pub const BAR_ORIGIN: Point = Point::new(7, 160);
    pub const BAR_HEIGHT: u32 = 5;

    /// Frame drawn over the bar: outer outline, then a slanted inner window.
    pub const BAR_MASK: [Point; 10] = [
        Point::new(4, 157),
        Point::new(140, 157),
        Point::new(140, 168),
        Point::new(4, 168),
        Point::new(4, 157),
        Point::new(10, 160),
        Point::new(137, 160),
        Point::new(134, 165),
        Point::new(7, 165),
        Point::new(10, 160),
    ];
}

#[cfg(test)]
pub(crate) mod testing {
    use core::convert::Infallible;

    use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

    /// In-memory RGB565 target for rendering tests
    pub struct FrameBuffer {
        size: Size,
        pixels: std::vec::Vec<Rgb565>,
        writes: std::vec::Vec<u32>,
    }

    impl FrameBuffer {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                size: Size::new(width, height),
                pixels: std::vec![Rgb565::BLACK; (width * height) as usize],
                writes: std::vec![0; (width * height) as usize],
            }
        }

        pub fn pixel(&self, x: i32, y: i32) -> Rgb565 {
            self.pixels[(y as u32 * self.size.width + x as u32) as usize]
        }

        /// How often the pixel was written
        pub fn writes_at(&self, x: i32, y: i32) -> u32 {
            self.writes[(y as u32 * self.size.width + x as u32) as usize]
        }

        pub fn count(&self, color: Rgb565) -> usize {
            self.pixels.iter().filter(|c| **c == color).count()
        }

        /// Number of pixels of `color` inside the rectangle
        pub fn count_in(&self, area: &embedded_graphics::primitives::Rectangle, color: Rgb565) -> usize {
            area.points()
                .filter(|p| self.bounding_box().contains(*p) && self.pixel(p.x, p.y) == color)
                .count()
        }
    }

    impl OriginDimensions for FrameBuffer {
        fn size(&self) -> Size {
            self.size
        }
    }

    impl DrawTarget for FrameBuffer {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            let bounds = self.bounding_box();
            for Pixel(point, color) in pixels {
                if bounds.contains(point) {
                    let index = (point.y as u32 * self.size.width + point.x as u32) as usize;
                    self.pixels[index] = color;
                    self.writes[index] += 1;
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widgets_fit_canvas() {
        let canvas = Rectangle::new(Point::zero(), CANVAS);
        for area in [
            layout::TIME,
            layout::DAY,
            layout::MONTH,
            layout::BATTERY_TEXT,
            layout::BATTERY_BAR,
        ] {
            assert_eq!(canvas.intersection(&area), area);
        }
    }

    #[test]
    fn full_bar_stays_inside_frame() {
        let bar = Rectangle::new(
            layout::BAR_ORIGIN,
            Size::new(crate::battery::BAR_MAX_WIDTH as u32, layout::BAR_HEIGHT),
        );
        assert_eq!(layout::BATTERY_BAR.intersection(&bar), bar);
    }
}
