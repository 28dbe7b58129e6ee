//! Byte sources for the decoder
//!
//! Assets are read through `embedded-io`'s `Read + Seek`, so the decoder does
//! not care whether bytes come from a flash filesystem or from memory (a
//! base64 payload decoded into a scratch buffer).

use embedded_io::{Error as _, ErrorKind, ErrorType, Read, Seek, SeekFrom};

use super::format::DecodeError;

/// Anything the decoder can read an asset from
pub trait ByteSource: Read + Seek {}

impl<T: Read + Seek + ?Sized> ByteSource for T {}

/// Errors from [`MemorySource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// Seek target outside the data
    OutOfRange,
}

impl embedded_io::Error for SourceError {
    fn kind(&self) -> ErrorKind {
        match self {
            SourceError::OutOfRange => ErrorKind::InvalidInput,
        }
    }
}

/// Seekable reader over a byte slice
#[derive(Debug, Clone)]
pub struct MemorySource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MemorySource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read position
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl ErrorType for MemorySource<'_> {
    type Error = SourceError;
}

impl Read for MemorySource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = &self.data[self.pos..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl Seek for MemorySource<'_> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::End(offset) => self.data.len() as i128 + i128::from(offset),
            SeekFrom::Current(offset) => self.pos as i128 + i128::from(offset),
        };
        if target < 0 || target > self.data.len() as i128 {
            return Err(SourceError::OutOfRange);
        }
        self.pos = target as usize;
        Ok(self.pos as u64)
    }
}

/// Read chunk size; keeps flash reads batched without a full row buffer
const READ_CHUNK: usize = 64;

/// Buffered little-endian reader used by the decoder
pub struct Reader<'s, S: ByteSource + ?Sized> {
    source: &'s mut S,
    buf: [u8; READ_CHUNK],
    pos: usize,
    len: usize,
}

impl<'s, S: ByteSource + ?Sized> Reader<'s, S> {
    pub fn new(source: &'s mut S) -> Self {
        Self {
            source,
            buf: [0; READ_CHUNK],
            pos: 0,
            len: 0,
        }
    }

    fn fill(&mut self) -> Result<(), DecodeError> {
        let n = self
            .source
            .read(&mut self.buf)
            .map_err(|e| DecodeError::Io(e.kind()))?;
        if n == 0 {
            return Err(DecodeError::Truncated);
        }
        self.pos = 0;
        self.len = n;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        if self.pos == self.len {
            self.fill()?;
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let lo = self.read_u8()?;
        let hi = self.read_u8()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let lo = self.read_u16()?;
        let hi = self.read_u16()?;
        Ok(u32::from(lo) | (u32::from(hi) << 16))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        self.read_u32().map(|v| v as i32)
    }

    /// Discard `count` bytes
    pub fn skip(&mut self, count: usize) -> Result<(), DecodeError> {
        for _ in 0..count {
            self.read_u8()?;
        }
        Ok(())
    }

    /// Move to an absolute offset, dropping buffered bytes
    pub fn seek(&mut self, offset: u32) -> Result<(), DecodeError> {
        self.source
            .seek(SeekFrom::Start(u64::from(offset)))
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidInput => DecodeError::Malformed,
                kind => DecodeError::Io(kind),
            })?;
        self.pos = 0;
        self.len = 0;
        Ok(())
    }
}
