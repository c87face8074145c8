//! Priority-ordered archive set with override resolution

use std::cmp::Reverse;
use std::fmt;
use std::path::{Path, PathBuf};

use super::source::{ArchiveSource, AssetSource, MpqArchive};
use super::variants::{PathVariantRule, path_variants};
use crate::error::{Error, Result};

/// Where an archive lives, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLocation {
    pub relative_path: PathBuf,
}

impl ArchiveLocation {
    /// `subdir` is `None` for archives directly inside the data directory.
    #[must_use]
    pub fn new(subdir: Option<&str>, file_name: &str) -> Self {
        let relative_path = match subdir {
            Some(dir) if !dir.is_empty() => Path::new(dir).join(file_name),
            _ => PathBuf::from(file_name),
        };
        Self { relative_path }
    }
}

impl fmt::Display for ArchiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative_path.display())
    }
}

/// An opened archive and its override rank.
pub struct ArchiveHandle {
    /// Display name (usually the path relative to the data directory).
    pub name: String,
    /// Higher priorities shadow lower ones.
    pub priority: usize,
    /// Registration sequence, used to order equal priorities.
    sequence: usize,
    source: Box<dyn ArchiveSource>,
}

impl fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// A file found by [`ArchiveSet::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub bytes: Vec<u8>,
    /// Name of the archive that served the file.
    pub archive: String,
    /// The path spelling that matched.
    pub path: String,
}

/// The set of mounted archives, kept sorted from highest to lowest priority.
#[derive(Debug, Default)]
pub struct ArchiveSet {
    archives: Vec<ArchiveHandle>,
    rules: Vec<PathVariantRule>,
    next_sequence: usize,
}

impl ArchiveSet {
    /// Create an empty set that will try `rules` as path variants.
    #[must_use]
    pub fn new(rules: Vec<PathVariantRule>) -> Self {
        Self {
            archives: Vec::new(),
            rules,
            next_sequence: 0,
        }
    }

    /// Open the MPQ archives of `load_order` from `data_dir`.
    ///
    /// Missing archives are skipped and archives that fail to open are logged
    /// and left out.
    ///
    /// # Errors
    /// Returns [`Error::NoArchivesFound`] if no archive could be opened.
    pub fn open<P: AsRef<Path>>(
        data_dir: P,
        load_order: &[ArchiveLocation],
        rules: Vec<PathVariantRule>,
    ) -> Result<Self> {
        Self::open_with(data_dir, load_order, rules, |path| {
            MpqArchive::open(path).map(|archive| Box::new(archive) as Box<dyn ArchiveSource>)
        })
    }

    /// Like [`open`](Self::open) with a custom opener for each archive file.
    ///
    /// # Errors
    /// Returns [`Error::NoArchivesFound`] if no archive could be opened.
    pub fn open_with<P, F>(
        data_dir: P,
        load_order: &[ArchiveLocation],
        rules: Vec<PathVariantRule>,
        mut opener: F,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        F: FnMut(&Path) -> Result<Box<dyn ArchiveSource>>,
    {
        let data_dir = data_dir.as_ref();
        let mut set = Self::new(rules);

        for location in load_order {
            let path = data_dir.join(&location.relative_path);
            if !path.exists() {
                tracing::debug!("Skipping missing archive {}", location);
                continue;
            }

            match opener(&path) {
                Ok(source) => {
                    tracing::info!("Opened {}", location);
                    set.push(location.to_string(), source);
                }
                Err(e) => tracing::warn!("Failed to open {}: {}", location, e),
            }
        }

        if set.is_empty() {
            return Err(Error::NoArchivesFound {
                data_dir: data_dir.to_path_buf(),
            });
        }

        tracing::info!("Loaded {} archives", set.len());
        Ok(set)
    }

    /// Register an archive above everything registered so far.
    ///
    /// Returns the priority it was given.
    pub fn push(&mut self, name: impl Into<String>, source: Box<dyn ArchiveSource>) -> usize {
        let priority = self
            .archives
            .iter()
            .map(|a| a.priority + 1)
            .max()
            .unwrap_or(0);
        self.insert(name, priority, source);
        priority
    }

    /// Register an archive at an explicit priority.
    ///
    /// Among equal priorities the archive registered last wins.
    pub fn insert(&mut self, name: impl Into<String>, priority: usize, source: Box<dyn ArchiveSource>) {
        self.archives.push(ArchiveHandle {
            name: name.into(),
            priority,
            sequence: self.next_sequence,
            source,
        });
        self.next_sequence += 1;
        self.archives
            .sort_by_key(|a| Reverse((a.priority, a.sequence)));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.archives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    /// Archive names from highest to lowest priority.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.archives.iter().map(|a| a.name.as_str())
    }

    /// The path variant rules in effect.
    #[must_use]
    pub fn rules(&self) -> &[PathVariantRule] {
        &self.rules
    }

    /// Find `logical_path`, honouring override precedence.
    ///
    /// Every spelling variant is tried against all archives, highest priority
    /// first, before the next variant is considered. Empty entries count as
    /// misses.
    pub fn resolve(&mut self, logical_path: &str) -> Option<ResolvedAsset> {
        for candidate in path_variants(logical_path, &self.rules) {
            for archive in &mut self.archives {
                match archive.source.read_file(&candidate) {
                    Ok(bytes) if !bytes.is_empty() => {
                        tracing::debug!("Resolved {} from {}", candidate, archive.name);
                        return Some(ResolvedAsset {
                            bytes,
                            archive: archive.name.clone(),
                            path: candidate,
                        });
                    }
                    Ok(_) => tracing::trace!("Empty entry {} in {}", candidate, archive.name),
                    Err(e) => tracing::trace!("{}", e),
                }
            }
        }
        None
    }
}

impl AssetSource for ArchiveSet {
    fn fetch(&mut self, path: &str) -> Option<Vec<u8>> {
        self.resolve(path).map(|asset| asset.bytes)
    }
}
