//! Asset store over data linked into the firmware image
//!
//! Boards without a filesystem embed the clock faces with
//! `include_bytes!` and hand this store a path table.

use ipstube_core::image::MemorySource;
use ipstube_core::traits::{AssetStore, StorageError};

/// Read-only asset table
pub struct StaticAssetStore<'a> {
    files: &'a [(&'a str, &'a [u8])],
}

impl<'a> StaticAssetStore<'a> {
    /// Create a store from `(path, bytes)` pairs
    pub const fn new(files: &'a [(&'a str, &'a [u8])]) -> Self {
        Self { files }
    }

    fn find(&self, path: &str) -> Option<&'a [u8]> {
        self.files
            .iter()
            .find(|(name, _)| *name == path)
            .map(|(_, data)| *data)
    }
}

impl<'a> AssetStore for StaticAssetStore<'a> {
    type Source<'s> = MemorySource<'a> where Self: 's;

    fn exists(&mut self, path: &str) -> bool {
        self.find(path).is_some()
    }

    fn open(&mut self, path: &str) -> Result<MemorySource<'a>, StorageError> {
        self.find(path).map(MemorySource::new).ok_or(StorageError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::Read;

    static FILES: &[(&str, &[u8])] = &[("/10.clk", b"CK\x01\x00"), ("/11.clk", b"CK")];

    #[test]
    fn test_lookup() {
        let mut store = StaticAssetStore::new(FILES);
        assert!(store.exists("/10.clk"));
        assert!(!store.exists("/20.clk"));
        assert!(matches!(store.open("/20.clk"), Err(StorageError::NotFound)));
    }

    #[test]
    fn test_open_reads_bytes() {
        let mut store = StaticAssetStore::new(FILES);
        let mut source = store.open("/10.clk").unwrap();
        let mut buf = [0u8; 8];
        let n = source.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"CK\x01\x00");
    }
}
