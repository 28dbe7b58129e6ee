//! Asset container headers
//!
//! BMP layout (little-endian):
//! - signature `"BM"` (2), file size (4), reserved (4), pixel offset (4)
//! - header size (4), width (4), height (4), planes (2), bit depth (2),
//!   compression (4)
//! - for paletted depths: image size (4), x/y resolution (4+4), palette
//!   count (4, 0 means `2^depth`), palette entries at `14 + header size`
//!
//! CLK layout (little-endian): signature `"CK"` (2), width (2), height (2),
//! then `width * height` RGB565 pixels.

use embedded_io::ErrorKind;

use super::source::{ByteSource, Reader};

/// `"BM"` read as a little-endian u16
pub const BMP_SIGNATURE: u16 = 0x4D42;

/// `"CK"` read as a little-endian u16
pub const CLK_SIGNATURE: u16 = 0x4B43;

/// Size of the BMP file header preceding the info header
const BMP_FILE_HEADER_LEN: u32 = 14;

/// Smallest info header that carries the palette count
const BMP_INFO_HEADER_MIN_LEN: u32 = 40;

/// Largest palette a paletted bitmap can index
pub const MAX_PALETTE_LEN: usize = 256;

/// Errors that can occur while decoding an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Leading two bytes match neither container
    BadSignature(u16),
    /// Bit depth other than 1, 4, 8 or 24
    UnsupportedBitDepth(u16),
    /// Compressed bitmap
    UnsupportedCompression(u32),
    /// Color plane count other than 1
    BadPlaneCount(u16),
    /// Header fields are inconsistent (zero size, oversized palette, bad offsets)
    Malformed,
    /// Image does not fit in the pixel buffer
    ImageTooLarge { width: u32, height: u32 },
    /// Asset ended early
    Truncated,
    /// Underlying read failed
    Io(ErrorKind),
}

/// Supported BMP bit depths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitDepth {
    One,
    Four,
    Eight,
    TwentyFour,
}

impl TryFrom<u16> for BitDepth {
    type Error = DecodeError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            1 => Ok(BitDepth::One),
            4 => Ok(BitDepth::Four),
            8 => Ok(BitDepth::Eight),
            24 => Ok(BitDepth::TwentyFour),
            other => Err(DecodeError::UnsupportedBitDepth(other)),
        }
    }
}

impl BitDepth {
    /// Bits per pixel
    pub const fn bits(self) -> u32 {
        match self {
            BitDepth::One => 1,
            BitDepth::Four => 4,
            BitDepth::Eight => 8,
            BitDepth::TwentyFour => 24,
        }
    }

    /// Check if pixels are palette indices
    pub const fn is_paletted(self) -> bool {
        !matches!(self, BitDepth::TwentyFour)
    }

    /// Bytes per stored row, padded to a multiple of four
    pub const fn row_stride(self, width: u32) -> u32 {
        ((self.bits() * width + 31) >> 5) * 4
    }

    /// Bytes per row that carry pixel data
    pub const fn row_data_len(self, width: u32) -> u32 {
        (self.bits() * width + 7) / 8
    }
}

/// Parsed BMP header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BmpHeader {
    /// Offset of the first pixel row
    pub data_offset: u32,
    /// Offset of the first palette entry, just past the info header
    pub palette_offset: u32,
    pub width: u32,
    pub height: u32,
    pub depth: BitDepth,
    /// Palette entries to read (0 for 24-bit)
    pub palette_len: u16,
}

/// Parsed CLK header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClkHeader {
    pub width: u16,
    pub height: u16,
}

/// Header of either container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageHeader {
    Bmp(BmpHeader),
    Clk(ClkHeader),
}

impl ImageHeader {
    /// Read and validate a header from the start of an asset
    ///
    /// Only reads; the pixel buffer is not touched, so a failure here
    /// leaves previously decoded pixels intact.
    pub fn read<S: ByteSource + ?Sized>(reader: &mut Reader<'_, S>) -> Result<Self, DecodeError> {
        match reader.read_u16()? {
            BMP_SIGNATURE => read_bmp_header(reader).map(ImageHeader::Bmp),
            CLK_SIGNATURE => read_clk_header(reader).map(ImageHeader::Clk),
            other => Err(DecodeError::BadSignature(other)),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            ImageHeader::Bmp(h) => h.width,
            ImageHeader::Clk(h) => u32::from(h.width),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            ImageHeader::Bmp(h) => h.height,
            ImageHeader::Clk(h) => u32::from(h.height),
        }
    }
}

fn read_bmp_header<S: ByteSource + ?Sized>(
    reader: &mut Reader<'_, S>,
) -> Result<BmpHeader, DecodeError> {
    let _file_size = reader.read_u32()?;
    let _reserved = reader.read_u32()?;
    let data_offset = reader.read_u32()?;
    let header_size = reader.read_u32()?;
    let width = reader.read_i32()?;
    let height = reader.read_i32()?;
    let planes = reader.read_u16()?;
    let bits = reader.read_u16()?;
    let compression = reader.read_u32()?;

    if planes != 1 {
        return Err(DecodeError::BadPlaneCount(planes));
    }
    let depth = BitDepth::try_from(bits)?;
    if compression != 0 {
        return Err(DecodeError::UnsupportedCompression(compression));
    }
    // Top-down (negative height) bitmaps are not produced by the asset tools
    if width <= 0 || height <= 0 || header_size < BMP_INFO_HEADER_MIN_LEN {
        return Err(DecodeError::Malformed);
    }
    let palette_offset = BMP_FILE_HEADER_LEN
        .checked_add(header_size)
        .filter(|&offset| offset <= data_offset)
        .ok_or(DecodeError::Malformed)?;

    let palette_len = if depth.is_paletted() {
        let _image_size = reader.read_u32()?;
        let _x_resolution = reader.read_u32()?;
        let _y_resolution = reader.read_u32()?;
        let declared = reader.read_u32()?;
        let len = if declared == 0 {
            1u32 << depth.bits()
        } else {
            declared
        };
        if len as usize > MAX_PALETTE_LEN {
            return Err(DecodeError::Malformed);
        }
        len as u16
    } else {
        0
    };

    Ok(BmpHeader {
        data_offset,
        palette_offset,
        width: width as u32,
        height: height as u32,
        depth,
        palette_len,
    })
}

fn read_clk_header<S: ByteSource + ?Sized>(
    reader: &mut Reader<'_, S>,
) -> Result<ClkHeader, DecodeError> {
    let width = reader.read_u16()?;
    let height = reader.read_u16()?;
    if width == 0 || height == 0 {
        return Err(DecodeError::Malformed);
    }
    Ok(ClkHeader { width, height })
}

/// BMP color table
pub struct Palette {
    entries: [u32; MAX_PALETTE_LEN],
    len: usize,
}

impl Palette {
    /// Read `header.palette_len` entries from the palette offset
    pub fn read<S: ByteSource + ?Sized>(
        reader: &mut Reader<'_, S>,
        header: &BmpHeader,
    ) -> Result<Self, DecodeError> {
        let mut palette = Palette {
            entries: [0; MAX_PALETTE_LEN],
            len: header.palette_len as usize,
        };
        if palette.len > 0 {
            reader.seek(header.palette_offset)?;
            for entry in palette.entries[..palette.len].iter_mut() {
                *entry = reader.read_u32()?;
            }
        }
        Ok(palette)
    }

    /// Entry `index` as `0x00RRGGBB`; indices past the table are black
    pub fn get(&self, index: u8) -> u32 {
        let index = index as usize;
        if index < self.len {
            self.entries[index]
        } else {
            0
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
