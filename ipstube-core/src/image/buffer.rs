//! Shared full-panel pixel buffer

/// Errors constructing a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// Backing slice length is not `width * height`
    SizeMismatch,
}

/// Row-major RGB565 buffer over caller-provided storage
///
/// The dimensions are fixed at construction; the buffer is overwritten in
/// place on every decode and never resized.
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    pixels: &'a mut [u16],
    width: u16,
    height: u16,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `pixels` as a `width` x `height` buffer
    pub fn new(pixels: &'a mut [u16], width: u16, height: u16) -> Result<Self, BufferError> {
        if pixels.len() != width as usize * height as usize {
            return Err(BufferError::SizeMismatch);
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[u16] {
        self.pixels
    }

    /// Set every pixel to black
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer
    pub fn get(&self, x: u16, y: u16) -> Option<u16> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at `(x, y)`; writes outside the buffer are ignored
    pub fn set(&mut self, x: u16, y: u16, color: u16) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}
