//! Type definitions for world map compositing

use std::fmt;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// A stitchable continent map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinentDescriptor {
    /// Display name ("Eastern Kingdoms").
    pub name: String,
    /// Output file stem ("eastern-kingdoms").
    pub key: String,
    /// Folder under `Interface\WorldMap`.
    pub folder: String,
    /// Tile filename prefix.
    pub stem: String,
    /// `Map.dbc` id, used to join `WorldMapArea` bounds.
    pub map_id: u32,
}

/// Tile grid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            tiles_x: 4,
            tiles_y: 3,
            tile_width: 256,
            tile_height: 256,
        }
    }
}

impl TileGrid {
    #[must_use]
    pub fn tile_count(&self) -> u32 {
        self.tiles_x * self.tiles_y
    }

    /// Output canvas `(width, height)`.
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.tiles_x * self.tile_width, self.tiles_y * self.tile_height)
    }

    /// `(col, row)` of a 1-based tile index.
    #[must_use]
    pub fn position(&self, index: u32) -> Option<(u32, u32)> {
        if index == 0 || index > self.tile_count() {
            return None;
        }
        let linear = index - 1;
        Some((linear % self.tiles_x, linear / self.tiles_x))
    }

    /// Top-left pixel of a 1-based tile index.
    #[must_use]
    pub fn offset(&self, index: u32) -> Option<(u32, u32)> {
        self.position(index)
            .map(|(col, row)| (col * self.tile_width, row * self.tile_height))
    }
}

/// What happened to one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileOutcome {
    /// Found, decoded and pasted.
    Decoded,
    /// Not present in any archive.
    NotFound,
    /// Present but undecodable.
    DecodeFailed(String),
}

/// Per-tile record of a composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileReport {
    pub index: u32,
    pub path: String,
    pub outcome: TileOutcome,
}

/// Completion of a continent composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeStatus {
    Complete,
    Partial { found: u32, total: u32 },
    /// No tile could be placed; no canvas is produced.
    Empty { total: u32 },
}

impl CompositeStatus {
    #[must_use]
    pub fn from_counts(found: u32, total: u32) -> Self {
        if found == 0 {
            Self::Empty { total }
        } else if found >= total {
            Self::Complete
        } else {
            Self::Partial { found, total }
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for CompositeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Partial { found, total } => write!(f, "partial ({found}/{total})"),
            Self::Empty { total } => write!(f, "empty (0/{total})"),
        }
    }
}

/// Result of compositing one continent.
#[derive(Debug, Clone)]
pub struct ContinentComposite {
    /// `None` when no tile was placed.
    pub canvas: Option<RgbaImage>,
    pub status: CompositeStatus,
    pub tiles: Vec<TileReport>,
}

impl ContinentComposite {
    /// Number of tiles that were pasted.
    #[must_use]
    pub fn found(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.outcome == TileOutcome::Decoded)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_positions() {
        let grid = TileGrid::default();

        assert_eq!(grid.tile_count(), 12);
        assert_eq!(grid.canvas_size(), (1024, 768));
        assert_eq!(grid.position(1), Some((0, 0)));
        assert_eq!(grid.position(4), Some((3, 0)));
        assert_eq!(grid.position(5), Some((0, 1)));
        assert_eq!(grid.position(12), Some((3, 2)));
        assert_eq!(grid.offset(7), Some((512, 256)));
        assert_eq!(grid.position(0), None);
        assert_eq!(grid.position(13), None);
    }

    #[test]
    fn test_status_from_counts() {
        assert_eq!(CompositeStatus::from_counts(12, 12), CompositeStatus::Complete);
        assert_eq!(
            CompositeStatus::from_counts(7, 12),
            CompositeStatus::Partial { found: 7, total: 12 }
        );
        assert_eq!(CompositeStatus::from_counts(0, 12), CompositeStatus::Empty { total: 12 });
        assert_eq!(CompositeStatus::from_counts(7, 12).to_string(), "partial (7/12)");
        assert_eq!(CompositeStatus::Complete.to_string(), "complete");
    }
}
