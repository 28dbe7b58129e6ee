//! Draw surface over an `embedded-graphics` target
//!
//! Adapts any RGB565 [`DrawTarget`] (usually a shared-bus TFT driver whose
//! chip selects are handled by a [`PanelSelect`](ipstube_core::traits::PanelSelect))
//! to the renderer's primitive set.

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_9X15},
        MonoFont, MonoTextStyleBuilder,
    },
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};
use ipstube_core::image::PixelBuffer;
use ipstube_core::traits::{DrawSurface, FontSize, SurfaceError, TextStyle};

fn rgb565(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}

fn font(size: FontSize) -> &'static MonoFont<'static> {
    match size {
        FontSize::Small => &FONT_9X15,
        FontSize::Large => &FONT_10X20,
    }
}

/// `embedded-graphics` backed draw surface
pub struct GraphicsSurface<T> {
    target: T,
}

impl<T> GraphicsSurface<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: T) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn release(self) -> T {
        self.target
    }
}

impl<T> DrawSurface for GraphicsSurface<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    fn fill_screen(&mut self, color: u16) -> Result<(), SurfaceError> {
        self.target
            .clear(rgb565(color))
            .map_err(|_| SurfaceError::Communication)
    }

    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: u16,
    ) -> Result<(), SurfaceError> {
        // Clipped to the panel like the TFT driver does
        let area = Rectangle::new(
            Point::new(x.into(), y.into()),
            Size::new(width.into(), height.into()),
        )
        .intersection(&self.target.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }
        self.target
            .fill_solid(&area, rgb565(color))
            .map_err(|_| SurfaceError::Communication)
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, style: TextStyle) -> Result<(), SurfaceError> {
        let mut builder = MonoTextStyleBuilder::new()
            .font(font(style.size))
            .text_color(rgb565(style.color));
        if let Some(background) = style.background {
            builder = builder.background_color(rgb565(background));
        }

        Text::with_baseline(text, Point::new(x.into(), y.into()), builder.build(), Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| SurfaceError::Communication)
    }

    fn push_buffer(&mut self, buffer: &PixelBuffer<'_>) -> Result<(), SurfaceError> {
        let bounds = self.target.bounding_box();
        let size = Size::new(buffer.width().into(), buffer.height().into());
        if size.width > bounds.size.width || size.height > bounds.size.height {
            return Err(SurfaceError::OutOfBounds);
        }

        let area = Rectangle::new(bounds.top_left, size);
        self.target
            .fill_contiguous(&area, buffer.pixels().iter().map(|&p| rgb565(p)))
            .map_err(|_| SurfaceError::Communication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use ipstube_core::image::color::{BLACK, GREEN, RED, WHITE};

    fn surface() -> GraphicsSurface<MockDisplay<Rgb565>> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        GraphicsSurface::new(display)
    }

    fn pixel(surface: &GraphicsSurface<MockDisplay<Rgb565>>, x: i32, y: i32) -> Option<Rgb565> {
        surface.target().get_pixel(Point::new(x, y))
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(rgb565(RED), Rgb565::RED);
        assert_eq!(rgb565(WHITE), Rgb565::WHITE);
        assert_eq!(rgb565(BLACK), Rgb565::BLACK);
    }

    #[test]
    fn test_fill_rect() {
        let mut s = surface();
        s.fill_rect(2, 3, 4, 5, RED).unwrap();
        assert_eq!(pixel(&s, 2, 3), Some(Rgb565::RED));
        assert_eq!(pixel(&s, 5, 7), Some(Rgb565::RED));
        assert_eq!(pixel(&s, 6, 7), None);
        assert_eq!(pixel(&s, 2, 8), None);
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut s = surface();
        s.fill_rect(60, 60, 20, 20, GREEN).unwrap();
        assert_eq!(pixel(&s, 63, 63), Some(Rgb565::GREEN));
        s.fill_rect(100, 100, 5, 5, GREEN).unwrap();
    }

    #[test]
    fn test_push_buffer_row_major() {
        let mut s = surface();
        let mut pixels = [RED, GREEN, WHITE, BLACK];
        let buffer = PixelBuffer::new(&mut pixels, 2, 2).unwrap();
        s.push_buffer(&buffer).unwrap();
        assert_eq!(pixel(&s, 0, 0), Some(Rgb565::RED));
        assert_eq!(pixel(&s, 1, 0), Some(Rgb565::GREEN));
        assert_eq!(pixel(&s, 0, 1), Some(Rgb565::WHITE));
        assert_eq!(pixel(&s, 1, 1), Some(Rgb565::BLACK));
        assert_eq!(pixel(&s, 2, 0), None);
    }

    #[test]
    fn test_push_buffer_too_large() {
        let mut s = surface();
        let mut pixels = [0u16; 65 * 2];
        let buffer = PixelBuffer::new(&mut pixels, 65, 2).unwrap();
        assert_eq!(s.push_buffer(&buffer), Err(SurfaceError::OutOfBounds));
    }

    #[test]
    fn test_text_with_background() {
        let mut s = surface();
        let style = TextStyle {
            color: RED,
            background: Some(BLACK),
            size: FontSize::Large,
        };
        s.draw_text(0, 0, "8", style).unwrap();
        // The glyph cell is filled in both colors
        let count = |color| {
            (0..10)
                .flat_map(|x| (0..20).map(move |y| (x, y)))
                .filter(|&(x, y)| pixel(&s, x, y) == Some(color))
                .count()
        };
        assert!(count(Rgb565::RED) > 0);
        assert!(count(Rgb565::BLACK) > 0);
        assert_eq!(count(Rgb565::RED) + count(Rgb565::BLACK), 10 * 20);
    }

    #[test]
    fn test_fill_screen() {
        let mut s = surface();
        s.fill_screen(GREEN).unwrap();
        assert_eq!(pixel(&s, 0, 0), Some(Rgb565::GREEN));
        assert_eq!(pixel(&s, 63, 63), Some(Rgb565::GREEN));
    }
}
