//! Closed polygon paths

use embedded_graphics::{
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
};
use heapless::Vec;

/// Closed polygon with `N` points.
///
/// Filling uses the even-odd rule sampled at pixel centres, so a path that
/// walks an outer outline and then an inner one describes a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Path<const N: usize> {
    points: [Point; N],
    offset: Point,
}

impl<const N: usize> Path<N> {
    pub const fn new(points: [Point; N]) -> Self {
        Self {
            points,
            offset: Point::zero(),
        }
    }

    /// Move the whole path by `offset`
    pub fn move_to(&mut self, offset: Point) {
        self.offset = offset;
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(move |p| *p + self.offset)
    }

    /// Smallest rectangle containing every point
    pub fn bounding_box(&self) -> Rectangle {
        let mut points = self.points();
        let Some(first) = points.next() else {
            return Rectangle::zero();
        };
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (min.component_min(p), max.component_max(p))
        });
        Rectangle::with_corners(min, max)
    }

    /// Fill the inside of the path
    pub fn draw_filled<D>(&self, target: &mut D, color: D::Color) -> Result<(), D::Error>
    where
        D: DrawTarget,
    {
        if N < 3 {
            return Ok(());
        }
        let bounds = self.bounding_box();
        let Some(bottom_right) = bounds.bottom_right() else {
            return Ok(());
        };

        for y in bounds.top_left.y..=bottom_right.y {
            let crossings = self.crossings(y);
            for span in crossings.chunks_exact(2) {
                // Crossings are in half pixels; a pixel is covered when its
                // centre lies in [start, end).
                let start = span[0].div_euclid(2);
                let end = span[1].div_euclid(2);
                if end > start {
                    let row = Rectangle::new(Point::new(start, y), Size::new((end - start) as u32, 1));
                    target.fill_solid(&row, color)?;
                }
            }
        }
        Ok(())
    }

    /// Stroke the outline of the path
    pub fn draw_outline<D>(&self, target: &mut D, color: D::Color) -> Result<(), D::Error>
    where
        D: DrawTarget,
    {
        let style = PrimitiveStyle::with_stroke(color, 1);
        let Some(mut previous) = self.points().last() else {
            return Ok(());
        };
        for point in self.points() {
            Line::new(previous, point).into_styled(style).draw(target)?;
            previous = point;
        }
        Ok(())
    }

    /// X positions (in half pixels) where the edges cross the centre of row `y`, sorted.
    fn crossings(&self, y: i32) -> Vec<i32, N> {
        let center = 2 * y + 1;
        let mut crossings: Vec<i32, N> = Vec::new();
        let mut previous = self.points[N - 1] + self.offset;
        for point in self.points() {
            let (a, b) = if previous.y <= point.y {
                (previous, point)
            } else {
                (point, previous)
            };
            previous = point;
            let (ya, yb) = (2 * a.y, 2 * b.y);
            if (ya < center) == (yb < center) {
                continue;
            }
            // 2x = 2*ax + 2*(bx - ax) * (center - ya) / (yb - ya)
            let dx = b.x - a.x;
            let x2 = 2 * a.x + (2 * dx * (center - ya)).div_euclid(yb - ya);
            // A polygon with N edges crosses any row at most N times.
            let _ = crossings.push(x2);
        }
        crossings.sort_unstable();
        crossings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::FrameBuffer;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::RgbColor;

    const SQUARE: Path<4> = Path::new([
        Point::new(2, 2),
        Point::new(6, 2),
        Point::new(6, 6),
        Point::new(2, 6),
    ]);

    #[test]
    fn bounding_box_covers_points() {
        let mut path = SQUARE;
        assert_eq!(path.bounding_box(), Rectangle::with_corners(Point::new(2, 2), Point::new(6, 6)));
        path.move_to(Point::new(10, 1));
        assert_eq!(path.bounding_box(), Rectangle::with_corners(Point::new(12, 3), Point::new(16, 7)));
    }

    #[test]
    fn square_fill_is_half_open() {
        let mut fb = FrameBuffer::new(10, 10);
        SQUARE.draw_filled(&mut fb, Rgb565::WHITE).unwrap();
        assert_eq!(fb.count(Rgb565::WHITE), 16);
        assert_eq!(fb.pixel(2, 2), Rgb565::WHITE);
        assert_eq!(fb.pixel(5, 5), Rgb565::WHITE);
        assert_eq!(fb.pixel(6, 6), Rgb565::BLACK);
        assert_eq!(fb.pixel(1, 3), Rgb565::BLACK);
    }

    #[test]
    fn outer_then_inner_outline_makes_a_frame() {
        let frame: Path<10> = Path::new([
            Point::new(0, 0),
            Point::new(8, 0),
            Point::new(8, 8),
            Point::new(0, 8),
            Point::new(0, 0),
            Point::new(2, 2),
            Point::new(6, 2),
            Point::new(6, 6),
            Point::new(2, 6),
            Point::new(2, 2),
        ]);
        let mut fb = FrameBuffer::new(10, 10);
        frame.draw_filled(&mut fb, Rgb565::WHITE).unwrap();
        // 8x8 outer minus 4x4 hole
        assert_eq!(fb.count(Rgb565::WHITE), 64 - 16);
        assert_eq!(fb.pixel(0, 0), Rgb565::WHITE);
        assert_eq!(fb.pixel(1, 4), Rgb565::WHITE);
        assert_eq!(fb.pixel(4, 4), Rgb565::BLACK);
        assert_eq!(fb.pixel(7, 7), Rgb565::WHITE);
    }

    #[test]
    fn outline_touches_corners() {
        let mut fb = FrameBuffer::new(10, 10);
        SQUARE.draw_outline(&mut fb, Rgb565::WHITE).unwrap();
        assert_eq!(fb.pixel(2, 2), Rgb565::WHITE);
        assert_eq!(fb.pixel(6, 6), Rgb565::WHITE);
        assert_eq!(fb.pixel(2, 4), Rgb565::WHITE);
        assert_eq!(fb.pixel(4, 4), Rgb565::BLACK);
    }
}
