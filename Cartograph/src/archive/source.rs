//! Archive backends and the byte-provider seam used by the compositors

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A read-only container of named byte blobs.
///
/// Reads take `&mut self` because MPQ readers seek on a shared file handle.
pub trait ArchiveSource {
    /// Read the complete contents of `path`.
    ///
    /// # Errors
    /// Returns an error if the entry does not exist or cannot be read.
    fn read_file(&mut self, path: &str) -> Result<Vec<u8>>;
}

/// Anything that can hand out asset bytes by logical path.
///
/// `None` is an expected outcome (the asset is simply absent), not an error.
pub trait AssetSource {
    /// Fetch the bytes stored at `path`, if any.
    fn fetch(&mut self, path: &str) -> Option<Vec<u8>>;
}

/// An MPQ archive opened from disk.
pub struct MpqArchive {
    inner: wow_mpq::Archive,
    path: PathBuf,
}

impl MpqArchive {
    /// Open an MPQ archive.
    ///
    /// # Errors
    /// Returns [`Error::ArchiveOpen`] if the file is not a readable MPQ archive.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let inner = wow_mpq::Archive::open(path).map_err(|e| Error::ArchiveOpen {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self {
            inner,
            path: path.to_path_buf(),
        })
    }

    /// Path the archive was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArchiveSource for MpqArchive {
    fn read_file(&mut self, path: &str) -> Result<Vec<u8>> {
        self.inner.read_file(path).map_err(|e| Error::ArchiveRead {
            archive: self.path.display().to_string(),
            file: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// An archive held entirely in memory.
///
/// Lookups are exact and case-sensitive, which makes it useful for fixtures
/// that exercise path-variant fallback.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryArchive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, data);
        self
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), data.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArchiveSource for MemoryArchive {
    fn read_file(&mut self, path: &str) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::FileNotFoundInArchive(path.to_string()))
    }
}

impl AssetSource for MemoryArchive {
    fn fetch(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.get(path).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_archive_exact_lookup() {
        let mut archive = MemoryArchive::new().with_file(r"Interface\WorldMap\a.blp", vec![1, 2]);

        assert_eq!(archive.read_file(r"Interface\WorldMap\a.blp").unwrap(), vec![1, 2]);
        assert!(matches!(
            archive.read_file(r"Interface\WORLDMAP\a.blp"),
            Err(Error::FileNotFoundInArchive(_))
        ));
        assert_eq!(archive.fetch(r"Interface\WorldMap\a.blp"), Some(vec![1, 2]));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_mpq_open_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.MPQ");
        std::fs::write(&path, b"definitely not an archive").unwrap();

        assert!(matches!(MpqArchive::open(&path), Err(Error::ArchiveOpen { .. })));
    }

    fn build_mpq(path: &Path, files: &[(&str, &[u8])]) {
        let builder = files
            .iter()
            .fold(wow_mpq::ArchiveBuilder::new(), |builder, (name, data)| {
                builder.add_file_data(data.to_vec(), *name)
            });
        builder.build(path).unwrap();
    }

    #[test]
    fn test_mpq_locale_archive_overrides_base() {
        use crate::archive::{ArchiveLocation, ArchiveSet};

        const SHARED: &str = r"DBFilesClient\WorldMapArea.dbc";
        let data = tempfile::tempdir().unwrap();
        std::fs::create_dir(data.path().join("enUS")).unwrap();
        build_mpq(
            &data.path().join("common.MPQ"),
            &[(SHARED, b"base".as_slice()), (r"Interface\Minimap\POIIcons.blp", b"atlas".as_slice())],
        );
        build_mpq(
            &data.path().join("enUS").join("locale-enUS.MPQ"),
            &[(SHARED, b"locale".as_slice())],
        );

        let load_order = [
            ArchiveLocation::new(None, "common.MPQ"),
            ArchiveLocation::new(Some("enUS"), "locale-enUS.MPQ"),
        ];
        let mut set = ArchiveSet::open(data.path(), &load_order, Vec::new()).unwrap();
        assert_eq!(set.len(), 2);

        let shared = set.resolve(SHARED).unwrap();
        assert_eq!(shared.bytes, b"locale".to_vec());
        assert_eq!(shared.archive, load_order[1].to_string());

        let atlas = set.resolve(r"Interface\Minimap\POIIcons.blp").unwrap();
        assert_eq!(atlas.bytes, b"atlas".to_vec());
        assert_eq!(atlas.archive, load_order[0].to_string());

        assert!(set.resolve(r"Interface\Missing.blp").is_none());
    }
}
