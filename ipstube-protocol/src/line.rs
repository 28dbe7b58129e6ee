//! Line accumulation for the serial command channel.
//!
//! Bytes are fed one at a time as they arrive from the UART. A line is
//! complete on `\n`; a trailing `\r` is dropped. Lines that do not fit in the
//! buffer are discarded up to and including their terminating newline.

use heapless::Vec;

/// Default line capacity, large enough for a base64 encoded digit image
pub const MAX_LINE_LEN: usize = 4096;

/// Errors reported while accumulating a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the buffer capacity; the rest of it will be skipped
    Overflow,
    /// Line is not valid UTF-8
    InvalidUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    /// Collecting bytes of the current line
    Accumulating,
    /// A line was returned; the buffer is cleared on the next byte
    Complete,
    /// Overflowed, skipping until the next newline
    Discarding,
}

/// State machine turning a byte stream into lines
#[derive(Debug, Clone)]
pub struct LineParser<const N: usize = MAX_LINE_LEN> {
    buffer: Vec<u8, N>,
    state: LineState,
}

impl<const N: usize> Default for LineParser<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineParser<N> {
    /// Create a new, empty line parser
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: LineState::Accumulating,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = LineState::Accumulating;
    }

    /// Number of bytes of the current, unfinished line
    pub fn pending(&self) -> usize {
        match self.state {
            LineState::Accumulating => self.buffer.len(),
            _ => 0,
        }
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` when a newline completes a line,
    /// `Ok(None)` when more bytes are needed, or `Err` on overflow or a
    /// line that is not UTF-8. Overflow is reported once per line.
    pub fn feed(&mut self, byte: u8) -> Result<Option<&str>, LineError> {
        if self.state == LineState::Complete {
            self.reset();
        }

        match self.state {
            LineState::Discarding => {
                if byte == b'\n' {
                    self.reset();
                }
                Ok(None)
            }
            _ => {
                if byte == b'\n' {
                    if self.buffer.last() == Some(&b'\r') {
                        self.buffer.pop();
                    }
                    self.state = LineState::Complete;
                    return core::str::from_utf8(&self.buffer)
                        .map(Some)
                        .map_err(|_| LineError::InvalidUtf8);
                }

                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.state = LineState::Discarding;
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
        }
    }
}
