//! Drawable layers

use embedded_graphics::{
    geometry::AnchorPoint,
    image::{Image, ImageRawLE},
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use heapless::String;

use super::path::Path;
use crate::config::Compositing;

/// Rectangular region of the window that can be redrawn
pub trait Layer {
    /// Area covered by the layer
    fn bounds(&self) -> Rectangle;

    /// Layer changed since it was last drawn
    fn is_dirty(&self) -> bool;

    fn mark_clean(&mut self);

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;
}

/// Single line of text with a fixed capacity of `N` bytes
pub struct TextLayer<const N: usize> {
    bounds: Rectangle,
    text: String<N>,
    font: &'static MonoFont<'static>,
    text_color: Rgb565,
    /// `None` leaves whatever is below visible
    background: Option<Rgb565>,
    alignment: Alignment,
    dirty: bool,
}

impl<const N: usize> TextLayer<N> {
    /// Create an empty, left aligned text layer
    pub fn new(bounds: Rectangle, font: &'static MonoFont<'static>) -> Self {
        Self {
            bounds,
            text: String::new(),
            font,
            text_color: Rgb565::WHITE,
            background: None,
            alignment: Alignment::Left,
            dirty: true,
        }
    }

    /// Replace the text. Input longer than the capacity is cut at the last
    /// character that fits.
    pub fn set_text(&mut self, text: &str) {
        if self.text.as_str() == text {
            return;
        }
        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
        self.dirty = true;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text_color(&mut self, color: Rgb565) {
        self.text_color = color;
        self.dirty = true;
    }

    pub fn set_background_color(&mut self, color: Option<Rgb565>) {
        self.background = color;
        self.dirty = true;
    }

    pub fn set_text_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
        self.dirty = true;
    }

    fn anchor(&self) -> Point {
        let anchor = match self.alignment {
            Alignment::Left => AnchorPoint::TopLeft,
            Alignment::Center => AnchorPoint::TopCenter,
            Alignment::Right => AnchorPoint::TopRight,
        };
        self.bounds.anchor_point(anchor)
    }
}

impl<const N: usize> Layer for TextLayer<N> {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut target = target.clipped(&self.bounds);
        if let Some(background) = self.background {
            target.fill_solid(&self.bounds, background)?;
        }
        if self.text.is_empty() {
            return Ok(());
        }
        let character_style = MonoTextStyle::new(self.font, self.text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Top)
            .build();
        Text::with_text_style(&self.text, self.anchor(), character_style, text_style)
            .draw(&mut target)?;
        Ok(())
    }
}

/// Bundled raw RGB565 image
pub struct Bitmap {
    raw: ImageRawLE<'static, Rgb565>,
}

impl Bitmap {
    /// Wrap little-endian RGB565 data that is `width` pixels wide
    pub fn from_resource(data: &'static [u8], width: u32) -> Self {
        Self {
            raw: ImageRawLE::new(data, width),
        }
    }

    pub fn size(&self) -> Size {
        self.raw.size()
    }
}

/// Layer showing a [`Bitmap`]
pub struct BitmapLayer {
    bounds: Rectangle,
    bitmap: Option<Bitmap>,
    compositing: Compositing,
    transparent_key: Rgb565,
    /// Colour painted in place of transparent pixels, `None` skips them
    underlay: Option<Rgb565>,
    dirty: bool,
}

impl BitmapLayer {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            bitmap: None,
            compositing: Compositing::Assign,
            transparent_key: Rgb565::MAGENTA,
            underlay: None,
            dirty: true,
        }
    }

    /// Take ownership of the bitmap; it is released with the layer.
    pub fn set_bitmap(&mut self, bitmap: Bitmap) {
        self.bitmap = Some(bitmap);
        self.dirty = true;
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    pub fn set_compositing_mode(&mut self, compositing: Compositing, transparent_key: Rgb565) {
        self.compositing = compositing;
        self.transparent_key = transparent_key;
        self.dirty = true;
    }

    pub fn compositing_mode(&self) -> Compositing {
        self.compositing
    }

    /// Paint transparent pixels with `color` instead of leaving what is below.
    /// Used when the only thing below is a solid background.
    pub fn set_underlay(&mut self, color: Option<Rgb565>) {
        self.underlay = color;
        self.dirty = true;
    }

    /// Drawing the layer writes every pixel of `area`
    pub fn covers(&self, area: &Rectangle) -> bool {
        let Some(bitmap) = &self.bitmap else {
            return false;
        };
        if self.compositing == Compositing::Set && self.underlay.is_none() {
            return false;
        }
        let drawn = Rectangle::new(self.bounds.top_left, bitmap.size()).intersection(&self.bounds);
        drawn.intersection(area) == *area
    }
}

impl Layer for BitmapLayer {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(bitmap) = &self.bitmap else {
            return Ok(());
        };
        let mut clipped = target.clipped(&self.bounds);
        let image = Image::new(&bitmap.raw, self.bounds.top_left);
        match self.compositing {
            Compositing::Assign => image.draw(&mut clipped),
            Compositing::Set => image.draw(&mut ColorKeyed {
                target: &mut clipped,
                key: self.transparent_key,
                underlay: self.underlay,
            }),
        }
    }
}

/// Draw target adapter replacing or dropping pixels of the key colour
struct ColorKeyed<'a, D> {
    target: &'a mut D,
    key: Rgb565,
    underlay: Option<Rgb565>,
}

impl<D> Dimensions for ColorKeyed<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}

impl<D> DrawTarget for ColorKeyed<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (key, underlay) = (self.key, self.underlay);
        self.target.draw_iter(pixels.into_iter().filter_map(|Pixel(point, color)| {
            if color != key {
                Some(Pixel(point, color))
            } else {
                underlay.map(|c| Pixel(point, c))
            }
        }))
    }
}

/// Battery bar with a decorative frame drawn on top
pub struct BatteryBarLayer {
    bounds: Rectangle,
    origin: Point,
    height: u32,
    bar_width: u8,
    bar_color: Rgb565,
    mask_color: Rgb565,
    mask: Path<10>,
    dirty: bool,
}

impl BatteryBarLayer {
    pub fn new(bounds: Rectangle, origin: Point, height: u32, mask: Path<10>) -> Self {
        Self {
            bounds,
            origin,
            height,
            bar_width: 0,
            bar_color: Rgb565::WHITE,
            mask_color: Rgb565::BLACK,
            mask,
            dirty: true,
        }
    }

    pub fn set_colors(&mut self, bar: Rgb565, mask: Rgb565) {
        self.bar_color = bar;
        self.mask_color = mask;
        self.dirty = true;
    }

    /// Store the fill width. Only a different width requests a redraw.
    pub fn set_bar_width(&mut self, width: u8) {
        if self.bar_width == width {
            return;
        }
        self.bar_width = width;
        self.dirty = true;
    }

    pub fn bar_width(&self) -> u8 {
        self.bar_width
    }
}

impl Layer for BatteryBarLayer {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut target = target.clipped(&self.bounds);
        if self.bar_width > 0 {
            let bar = Rectangle::new(self.origin, Size::new(self.bar_width.into(), self.height));
            target.fill_solid(&bar, self.bar_color)?;
        }
        self.mask.draw_filled(&mut target, self.mask_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{layout, testing::FrameBuffer};
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    const GREEN: Rgb565 = Rgb565::GREEN;

    fn text_layer() -> TextLayer<5> {
        let mut layer = TextLayer::new(Rectangle::new(Point::new(0, 0), Size::new(40, 12)), &FONT_6X10);
        layer.set_text_color(GREEN);
        layer
    }

    #[test]
    fn text_is_truncated_to_capacity() {
        let mut layer = text_layer();
        layer.set_text("12:345");
        assert_eq!(layer.text(), "12:34");
        layer.set_text("äöü");
        // two bytes per character, the third does not fit
        assert_eq!(layer.text(), "äö");
    }

    #[test]
    fn unchanged_text_keeps_layer_clean() {
        let mut layer = text_layer();
        layer.set_text("10:00");
        layer.mark_clean();
        layer.set_text("10:00");
        assert!(!layer.is_dirty());
        layer.set_text("10:01");
        assert!(layer.is_dirty());
    }

    #[test]
    fn text_draws_inside_bounds() {
        let mut layer = text_layer();
        layer.set_text("88:88");
        let mut fb = FrameBuffer::new(64, 32);
        layer.draw(&mut fb).unwrap();
        assert!(fb.count_in(&layer.bounds(), GREEN) > 0);
        assert_eq!(fb.count(GREEN), fb.count_in(&layer.bounds(), GREEN));
    }

    #[test]
    fn centered_text_leaves_margins() {
        let mut layer = text_layer();
        layer.set_text("1");
        layer.set_text_alignment(Alignment::Center);
        let mut fb = FrameBuffer::new(64, 32);
        layer.draw(&mut fb).unwrap();
        let left = Rectangle::new(Point::zero(), Size::new(10, 12));
        assert_eq!(fb.count_in(&left, GREEN), 0);
        assert!(fb.count(GREEN) > 0);
    }

    #[test]
    fn opaque_background_fills_bounds() {
        let mut layer = text_layer();
        layer.set_background_color(Some(Rgb565::BLUE));
        let mut fb = FrameBuffer::new(64, 32);
        layer.draw(&mut fb).unwrap();
        assert_eq!(fb.count(Rgb565::BLUE), 40 * 12);
    }

    static KEYED: [u8; 8] = [
        // magenta, white / white, magenta
        0x1f, 0xf8, 0xff, 0xff, 0xff, 0xff, 0x1f, 0xf8,
    ];

    #[test]
    fn assign_copies_every_pixel() {
        let mut layer = BitmapLayer::new(Rectangle::new(Point::zero(), Size::new(2, 2)));
        layer.set_bitmap(Bitmap::from_resource(&KEYED, 2));
        layer.set_compositing_mode(Compositing::Assign, Rgb565::MAGENTA);
        let mut fb = FrameBuffer::new(4, 4);
        layer.draw(&mut fb).unwrap();
        assert_eq!(fb.pixel(0, 0), Rgb565::MAGENTA);
        assert_eq!(fb.pixel(1, 0), Rgb565::WHITE);
    }

    #[test]
    fn set_skips_transparent_pixels() {
        let mut layer = BitmapLayer::new(Rectangle::new(Point::zero(), Size::new(2, 2)));
        layer.set_bitmap(Bitmap::from_resource(&KEYED, 2));
        layer.set_compositing_mode(Compositing::Set, Rgb565::MAGENTA);
        let mut fb = FrameBuffer::new(4, 4);
        layer.draw(&mut fb).unwrap();
        assert_eq!(fb.pixel(0, 0), Rgb565::BLACK);
        assert_eq!(fb.pixel(1, 0), Rgb565::WHITE);
        assert_eq!(fb.pixel(0, 1), Rgb565::WHITE);
        assert_eq!(fb.pixel(1, 1), Rgb565::BLACK);
        assert_eq!(fb.count(Rgb565::MAGENTA), 0);
    }

    #[test]
    fn underlay_replaces_transparent_pixels() {
        let mut layer = BitmapLayer::new(Rectangle::new(Point::zero(), Size::new(2, 2)));
        layer.set_bitmap(Bitmap::from_resource(&KEYED, 2));
        layer.set_compositing_mode(Compositing::Set, Rgb565::MAGENTA);
        layer.set_underlay(Some(Rgb565::BLUE));
        let mut fb = FrameBuffer::new(4, 4);
        layer.draw(&mut fb).unwrap();
        assert_eq!(fb.pixel(0, 0), Rgb565::BLUE);
        assert_eq!(fb.pixel(1, 0), Rgb565::WHITE);
        assert_eq!(fb.pixel(1, 1), Rgb565::BLUE);
        assert_eq!(fb.count(Rgb565::MAGENTA), 0);
    }

    #[test]
    fn coverage_depends_on_bitmap_and_mode() {
        let area = Rectangle::new(Point::zero(), Size::new(2, 2));
        let mut layer = BitmapLayer::new(area);
        assert!(!layer.covers(&area));

        layer.set_bitmap(Bitmap::from_resource(&KEYED, 2));
        assert_eq!(layer.compositing_mode(), Compositing::Assign);
        assert!(layer.covers(&area));
        assert!(!layer.covers(&Rectangle::new(Point::zero(), Size::new(3, 2))));

        layer.set_compositing_mode(Compositing::Set, Rgb565::MAGENTA);
        assert!(!layer.covers(&area));
        layer.set_underlay(Some(Rgb565::BLACK));
        assert!(layer.covers(&area));
    }

    fn bar_layer() -> BatteryBarLayer {
        let mut layer = BatteryBarLayer::new(
            layout::BATTERY_BAR,
            layout::BAR_ORIGIN,
            layout::BAR_HEIGHT,
            Path::new(layout::BAR_MASK),
        );
        layer.set_colors(GREEN, Rgb565::WHITE);
        layer
    }

    #[test]
    fn empty_bar_draws_only_frame() {
        let layer = bar_layer();
        let mut fb = FrameBuffer::new(144, 168);
        layer.draw(&mut fb).unwrap();
        assert_eq!(fb.count(GREEN), 0);
        assert_eq!(fb.pixel(5, 158), Rgb565::WHITE);
        assert_eq!(fb.pixel(70, 162), Rgb565::BLACK);
    }

    #[test]
    fn bar_fill_follows_width() {
        let mut layer = bar_layer();
        let mut fb = FrameBuffer::new(144, 168);
        layer.set_bar_width(65);
        layer.draw(&mut fb).unwrap();
        assert_eq!(fb.pixel(40, 162), GREEN);
        assert_eq!(fb.pixel(100, 162), Rgb565::BLACK);

        let mut fb = FrameBuffer::new(144, 168);
        layer.set_bar_width(130);
        layer.draw(&mut fb).unwrap();
        assert_eq!(fb.pixel(100, 162), GREEN);
        // the frame covers the slanted ends and the outer border
        assert_eq!(fb.pixel(8, 160), Rgb565::WHITE);
        assert_eq!(fb.pixel(136, 164), Rgb565::WHITE);
        assert_eq!(fb.pixel(70, 158), Rgb565::WHITE);
    }

    #[test]
    fn only_new_bar_width_marks_dirty() {
        let mut layer = bar_layer();
        layer.set_bar_width(13);
        layer.mark_clean();
        layer.set_bar_width(13);
        assert!(!layer.is_dirty());
        layer.set_bar_width(26);
        assert!(layer.is_dirty());
        assert_eq!(layer.bar_width(), 26);
    }
}
