//! Decoding into the pixel buffer
//!
//! Decoding runs in two phases. [`ImageHeader::read`] parses and validates
//! without touching the buffer; [`render`] then clears the buffer and writes
//! the centered image. Only a failure during [`render`] can leave the buffer
//! holding a partial image.

use super::buffer::PixelBuffer;
use super::color::{dim, rgb888_to_565};
use super::format::{BitDepth, BmpHeader, ClkHeader, DecodeError, ImageHeader, Palette};
use super::source::{ByteSource, Reader};

/// Placement of a decoded image inside the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageInfo {
    pub width: u16,
    pub height: u16,
    /// Left edge of the image in the buffer
    pub x: u16,
    /// Top edge of the image in the buffer
    pub y: u16,
}

/// Decode a whole asset into `buffer`
///
/// # Arguments
///
/// * `source` - Asset bytes positioned at the signature
/// * `buffer` - Destination; cleared to black before pixels are written
/// * `dimming` - Brightness level, 255 for undimmed
pub fn decode<S: ByteSource + ?Sized>(
    source: &mut S,
    buffer: &mut PixelBuffer<'_>,
    dimming: u8,
) -> Result<ImageInfo, DecodeError> {
    let mut reader = Reader::new(source);
    let header = ImageHeader::read(&mut reader)?;
    render(&mut reader, &header, buffer, dimming)
}

/// Write the pixels described by `header` into `buffer`
///
/// Palette reads and the size check happen before the buffer is cleared.
pub fn render<S: ByteSource + ?Sized>(
    reader: &mut Reader<'_, S>,
    header: &ImageHeader,
    buffer: &mut PixelBuffer<'_>,
    dimming: u8,
) -> Result<ImageInfo, DecodeError> {
    let (width, height) = (header.width(), header.height());
    if width > u32::from(buffer.width()) || height > u32::from(buffer.height()) {
        return Err(DecodeError::ImageTooLarge { width, height });
    }

    let info = ImageInfo {
        width: width as u16,
        height: height as u16,
        x: (buffer.width() - width as u16) / 2,
        y: (buffer.height() - height as u16) / 2,
    };

    match header {
        ImageHeader::Bmp(bmp) => {
            let palette = Palette::read(reader, bmp)?;
            reader.seek(bmp.data_offset)?;
            buffer.clear();
            render_bmp(reader, bmp, &palette, buffer, &info, dimming)?;
        }
        ImageHeader::Clk(clk) => {
            buffer.clear();
            render_clk(reader, clk, buffer, &info, dimming)?;
        }
    }

    Ok(info)
}

fn render_bmp<S: ByteSource + ?Sized>(
    reader: &mut Reader<'_, S>,
    header: &BmpHeader,
    palette: &Palette,
    buffer: &mut PixelBuffer<'_>,
    info: &ImageInfo,
    dimming: u8,
) -> Result<(), DecodeError> {
    let depth = header.depth;
    let padding = (depth.row_stride(header.width) - depth.row_data_len(header.width)) as usize;

    // Rows are stored bottom-up
    for row in (0..info.height).rev() {
        let mut byte = 0u8;
        for col in 0..info.width {
            let rgb = match depth {
                BitDepth::TwentyFour => {
                    let b = reader.read_u8()?;
                    let g = reader.read_u8()?;
                    let r = reader.read_u8()?;
                    (r, g, b)
                }
                BitDepth::Eight => split_rgb(palette.get(reader.read_u8()?)),
                BitDepth::Four => {
                    // High nibble holds the even column
                    if col % 2 == 0 {
                        byte = reader.read_u8()?;
                        split_rgb(palette.get(byte >> 4))
                    } else {
                        split_rgb(palette.get(byte & 0x0F))
                    }
                }
                BitDepth::One => {
                    // Most significant bit holds the leftmost column
                    let bit = col % 8;
                    if bit == 0 {
                        byte = reader.read_u8()?;
                    }
                    split_rgb(palette.get((byte >> (7 - bit)) & 0x01))
                }
            };

            let color = dim(rgb888_to_565(rgb.0, rgb.1, rgb.2), dimming);
            buffer.set(info.x + col, info.y + row, color);
        }
        reader.skip(padding)?;
    }

    Ok(())
}

fn render_clk<S: ByteSource + ?Sized>(
    reader: &mut Reader<'_, S>,
    header: &ClkHeader,
    buffer: &mut PixelBuffer<'_>,
    info: &ImageInfo,
    dimming: u8,
) -> Result<(), DecodeError> {
    for row in 0..header.height {
        for col in 0..header.width {
            let color = dim(reader.read_u16()?, dimming);
            buffer.set(info.x + col, info.y + row, color);
        }
    }
    Ok(())
}

/// Split a `0x00RRGGBB` palette entry
fn split_rgb(entry: u32) -> (u8, u8, u8) {
    ((entry >> 16) as u8, (entry >> 8) as u8, entry as u8)
}
