//! Single-slot frame cache
//!
//! Holds exactly one decoded asset in the shared pixel buffer and remembers
//! which one. Asking for the resident asset again costs nothing; anything
//! else is decoded from storage. The resident tag only ever names an asset
//! whose pixels are fully in the buffer.

use crate::asset::AssetId;
use crate::config::{AssetFormat, FULL_BRIGHTNESS};
use crate::image::decoder::{self, ImageInfo};
use crate::image::{ByteSource, DecodeError, ImageHeader, PixelBuffer, Reader};
use crate::traits::{AssetStore, StorageError};

/// Errors from loading an asset into the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CacheError {
    /// Asset could not be opened
    Storage(StorageError),
    /// Asset could not be decoded
    Decode(DecodeError),
}

impl From<StorageError> for CacheError {
    fn from(e: StorageError) -> Self {
        CacheError::Storage(e)
    }
}

impl From<DecodeError> for CacheError {
    fn from(e: DecodeError) -> Self {
        CacheError::Decode(e)
    }
}

/// Decode cache owning the shared pixel buffer
///
/// Not reentrant: one decode at a time, and never while the buffer is being
/// transferred to a panel.
pub struct FrameCache<'b, S: AssetStore> {
    store: S,
    buffer: PixelBuffer<'b>,
    format: AssetFormat,
    dimming: u8,
    resident: Option<AssetId>,
}

impl<'b, S: AssetStore> FrameCache<'b, S> {
    /// Create an empty cache at full brightness
    pub fn new(store: S, buffer: PixelBuffer<'b>, format: AssetFormat) -> Self {
        Self {
            store,
            buffer,
            format,
            dimming: FULL_BRIGHTNESS,
            resident: None,
        }
    }

    /// Make `id` the resident asset
    ///
    /// A no-op if it already is. On failure the previous tag is kept when
    /// the buffer was left untouched, and cleared when a partial decode
    /// overwrote it.
    pub fn ensure_loaded(&mut self, id: AssetId) -> Result<(), CacheError> {
        if self.resident == Some(id) {
            trace!("Asset {} already in buffer", id.raw());
            return Ok(());
        }

        let path = id.path(self.format);
        let mut source = self.store.open(&path).map_err(|e| {
            warn!("Asset {} not found: {:?}", path.as_str(), e);
            e
        })?;

        let mut reader = Reader::new(&mut source);
        let header = ImageHeader::read(&mut reader).map_err(|e| {
            warn!("Asset {} rejected: {:?}", id.raw(), e);
            e
        })?;

        match decoder::render(&mut reader, &header, &mut self.buffer, self.dimming) {
            Ok(info) => {
                debug!(
                    "Loaded asset {} ({}x{}) at dimming {}",
                    id.raw(),
                    info.width,
                    info.height,
                    self.dimming
                );
                self.resident = Some(id);
                Ok(())
            }
            Err(e) => {
                warn!("Asset {} failed to decode: {:?}", id.raw(), e);
                // The buffer may hold a partial image now
                self.resident = None;
                Err(e.into())
            }
        }
    }

    /// Best-effort [`ensure_loaded`](Self::ensure_loaded)
    ///
    /// Returns true if a decode succeeded; failures are absorbed.
    pub fn prefetch(&mut self, id: AssetId) -> bool {
        if self.resident == Some(id) {
            return false;
        }
        trace!("Prefetching asset {}", id.raw());
        self.ensure_loaded(id).is_ok()
    }

    /// Force the next load to decode again
    pub fn invalidate(&mut self) {
        self.resident = None;
    }

    /// Change the dimming level, invalidating on change
    ///
    /// Returns true if the level changed.
    pub fn set_dimming(&mut self, level: u8) -> bool {
        if level == self.dimming {
            return false;
        }
        self.dimming = level;
        self.invalidate();
        true
    }

    /// Decode arbitrary image bytes into the buffer
    ///
    /// The buffer no longer holds a stored asset afterwards, whatever the
    /// outcome.
    pub fn load_from_source<R: ByteSource + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<ImageInfo, DecodeError> {
        self.resident = None;
        decoder::decode(source, &mut self.buffer, self.dimming)
    }

    pub fn dimming(&self) -> u8 {
        self.dimming
    }

    pub fn resident(&self) -> Option<AssetId> {
        self.resident
    }

    pub fn format(&self) -> AssetFormat {
        self.format
    }

    pub fn buffer(&self) -> &PixelBuffer<'b> {
        &self.buffer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
