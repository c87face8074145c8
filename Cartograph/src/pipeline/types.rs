//! Per-stage extraction reports

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::atlas::CropRect;
use crate::worldmap::{CompositeStatus, TileReport};

/// One continent of the bounds report, ready to paste into a map viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapBoundsEntry {
    pub id: u32,
    pub name: String,
    pub key: String,
    pub image_width: u32,
    pub image_height: u32,
    pub loc_left: f32,
    pub loc_right: f32,
    pub loc_top: f32,
    pub loc_bottom: f32,
}

#[derive(Debug, Clone)]
pub struct ContinentReport {
    pub name: String,
    pub key: String,
    pub status: CompositeStatus,
    /// `None` when no tile was found.
    pub output: Option<PathBuf>,
    pub bytes_written: usize,
    pub tiles: Vec<TileReport>,
}

#[derive(Debug, Clone, Default)]
pub struct MapsReport {
    pub continents: Vec<ContinentReport>,
    /// `(key, message)` for continents whose image could not be written.
    pub write_failures: Vec<(String, String)>,
}

impl MapsReport {
    /// Number of continent images written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.continents.iter().filter(|c| c.output.is_some()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconOutcome {
    Written { path: PathBuf, size: u32 },
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct IconReport {
    pub name: String,
    pub index: u32,
    /// `(column, row)` in the atlas grid
    pub cell: (u32, u32),
    pub rect: CropRect,
    pub outcome: IconOutcome,
}

#[derive(Debug, Clone)]
pub struct IconsReport {
    /// Archive the atlas was read from.
    pub atlas_archive: String,
    pub atlas_size: (u32, u32),
    pub debug_atlas: Option<PathBuf>,
    pub icons: Vec<IconReport>,
}

impl IconsReport {
    /// Number of icon files written, not counting the debug atlas.
    #[must_use]
    pub fn written(&self) -> usize {
        self.icons
            .iter()
            .filter(|icon| matches!(icon.outcome, IconOutcome::Written { .. }))
            .count()
    }
}
