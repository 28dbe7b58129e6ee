//! Asset storage trait

use crate::image::ByteSource;

/// Errors from the asset filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No asset at this path
    NotFound,
    /// The filesystem failed to mount
    Unavailable,
    /// Read failure
    Io,
}

/// Trait for the read-only asset filesystem
pub trait AssetStore {
    /// Open asset handle
    type Source<'s>: ByteSource
    where
        Self: 's;

    /// Check if the backing filesystem mounted successfully
    fn is_available(&self) -> bool {
        true
    }

    /// Check if a regular file exists at `path`
    fn exists(&mut self, path: &str) -> bool;

    /// Open the asset at `path` for reading
    fn open(&mut self, path: &str) -> Result<Self::Source<'_>, StorageError>;
}
