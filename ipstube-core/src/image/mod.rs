//! Image decoding
//!
//! Two asset containers decode into the same fixed-size RGB565 buffer:
//!
//! - **BMP**: uncompressed Windows bitmap, 1/4/8-bit paletted or 24-bit BGR,
//!   rows bottom-up and padded to four bytes
//! - **CLK**: `"CK"` signature, 16-bit width and height, then little-endian
//!   RGB565 pixels top-down
//!
//! Images are centered in the buffer; everything outside the image is black.
//! Dimming blends every pixel toward black and is skipped at full
//! brightness.

pub mod buffer;
pub mod color;
pub mod decoder;
pub mod format;
pub mod source;

pub use buffer::{BufferError, PixelBuffer};
pub use decoder::{decode, ImageInfo};
pub use format::{BitDepth, DecodeError, ImageHeader, BMP_SIGNATURE, CLK_SIGNATURE};
pub use source::{ByteSource, MemorySource, Reader, SourceError};
