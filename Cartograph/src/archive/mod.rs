//! Layered MPQ archive access
//!
//! The client mounts its archives in a fixed order and lets later archives
//! shadow files from earlier ones. [`ArchiveSet`] reproduces that lookup:
//! every registered archive carries an explicit priority, and a logical path
//! is tried in each of its spelling variants against the archives from the
//! highest priority down.
//!
//! ```no_run
//! use cartograph::archive::{ArchiveLocation, ArchiveSet, PathVariantRule};
//!
//! let load_order = [
//!     ArchiveLocation::new(None, "common.MPQ"),
//!     ArchiveLocation::new(Some("enUS"), "locale-enUS.MPQ"),
//! ];
//! let rules = vec![PathVariantRule::Uppercase { segment: "WorldMap".into() }];
//! let mut archives = ArchiveSet::open("Data", &load_order, rules)?;
//!
//! if let Some(asset) = archives.resolve(r"Interface\WorldMap\Azeroth\Azeroth1.blp") {
//!     println!("{} bytes from {}", asset.bytes.len(), asset.archive);
//! }
//! # Ok::<(), cartograph::Error>(())
//! ```

mod set;
mod source;
mod variants;

pub use set::{ArchiveHandle, ArchiveLocation, ArchiveSet, ResolvedAsset};
pub use source::{ArchiveSource, AssetSource, MemoryArchive, MpqArchive};
pub use variants::{PathVariantRule, path_variants};
