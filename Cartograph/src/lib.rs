//! # Cartograph
//!
//! Extracts continent maps and minimap POI icons from a World of Warcraft
//! 3.3.5a client's MPQ archives and writes them out as PNG files.
//!
//! ## Supported Formats
//!
//! - **MPQ archives** - Layered, read-only lookup in client load order
//! - **WDBC tables** - Fixed-width records with a trailing string pool
//! - **BLP/PNG** - Texture decoding and PNG output
//!
//! ## Quick Start
//!
//! ```no_run
//! use cartograph::prelude::*;
//!
//! let config = ExtractConfig::bundled()?;
//! let archives = ArchiveSet::open("Data", &config.load_order(), config.path_variants.clone())?;
//!
//! let mut pipeline = Pipeline::new(&config, archives, BlpDecoder);
//! let bounds = pipeline.read_bounds();
//! pipeline.extract_maps("maps")?;
//! pipeline.extract_icons("maps")?;
//! pipeline.write_bounds(&bounds, "maps")?;
//! # Ok::<(), cartograph::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `cartograph` command-line binary

pub mod error;
pub mod archive;
pub mod formats;
pub mod converter;
pub mod worldmap;
pub mod atlas;
pub mod config;
pub mod pipeline;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::archive::{ArchiveSet, ArchiveSource, AssetSource, MemoryArchive, MpqArchive};
    pub use crate::atlas::{AtlasLayout, IconSpec};
    pub use crate::config::ExtractConfig;
    pub use crate::converter::{BlpDecoder, PngDecoder, TextureDecoder};
    pub use crate::formats::dbc::{RecordTable, WorldMapArea};
    pub use crate::pipeline::Pipeline;
    pub use crate::worldmap::{CompositeStatus, ContinentDescriptor, TileCompositor, TileGrid};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
