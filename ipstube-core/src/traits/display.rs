//! Draw surface trait
//!
//! The narrow set of drawing primitives the renderer needs. Primitives go to
//! whichever panels the [`PanelSelect`](super::PanelSelect) currently
//! addresses. Colors are RGB565.

use crate::image::PixelBuffer;

/// Errors reported by a draw surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Bus transfer failed
    Communication,
    /// Primitive lies outside the panel
    OutOfBounds,
}

/// Font used for text primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontSize {
    /// Roughly 16 px high
    Small,
    /// Roughly 26 px high
    Large,
}

/// Text rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    /// Foreground color
    pub color: u16,
    /// Background color, `None` for transparent
    pub background: Option<u16>,
    /// Font
    pub size: FontSize,
}

/// Trait for the shared panel draw surface
pub trait DrawSurface {
    /// Fill the whole addressed panel
    fn fill_screen(&mut self, color: u16) -> Result<(), SurfaceError>;

    /// Fill a rectangle; zero-sized rectangles draw nothing
    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: u16,
    ) -> Result<(), SurfaceError>;

    /// Draw text with its top-left corner at `(x, y)`
    fn draw_text(&mut self, x: u16, y: u16, text: &str, style: TextStyle)
        -> Result<(), SurfaceError>;

    /// Transfer a full-panel pixel buffer
    fn push_buffer(&mut self, buffer: &PixelBuffer<'_>) -> Result<(), SurfaceError>;
}
