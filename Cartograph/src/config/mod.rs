//! Extraction configuration
//!
//! The archive load order, path variants, continent list and icon list are
//! data, not code. A default for the 3.3.5a client is bundled; a TOML file
//! with the same schema can replace it.

use std::path::{Path, PathBuf};

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::archive::{ArchiveLocation, PathVariantRule};
use crate::atlas::{AtlasLayout, IconSpec};
use crate::error::{Error, Result};
use crate::worldmap::{ContinentDescriptor, TileGrid};

const BUNDLED_CONFIG: &str = include_str!("extract.toml");

/// Top-level extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Client `Data` directory used when none is given on the command line.
    pub default_data_dir: PathBuf,
    /// Root of all generated files.
    pub output_dir: PathBuf,
    pub archives: LoadOrderConfig,
    #[serde(default)]
    pub path_variants: Vec<PathVariantRule>,
    pub world_map: WorldMapConfig,
    pub poi_icons: PoiIconConfig,
}

/// Archive names in mount order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOrderConfig {
    pub locale: String,
    /// Archives directly inside the data directory.
    pub base: Vec<String>,
    /// Archives inside `<data>/<locale>/`, mounted after `base`.
    #[serde(default)]
    pub localized: Vec<String>,
}

impl LoadOrderConfig {
    /// Every archive location in mount order, `{locale}` expanded.
    #[must_use]
    pub fn locations(&self) -> Vec<ArchiveLocation> {
        let base = self.base.iter().map(|name| ArchiveLocation::new(None, name));
        let localized = self.localized.iter().map(|name| {
            ArchiveLocation::new(Some(&self.locale), &name.replace("{locale}", &self.locale))
        });
        base.chain(localized).collect()
    }
}

/// Continent map settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldMapConfig {
    /// Archive path of `WorldMapArea.dbc`.
    pub table_path: String,
    /// Tile path template (`{folder}`, `{stem}`, `{index}`).
    pub tile_path: String,
    /// File name of the bounds report.
    pub bounds_file: String,
    #[serde(flatten)]
    pub grid: TileGrid,
    /// RGBA fill for missing tiles.
    pub background: [u8; 4],
    pub continents: Vec<ContinentDescriptor>,
}

impl WorldMapConfig {
    #[must_use]
    pub fn background(&self) -> Rgba<u8> {
        Rgba(self.background)
    }
}

/// Minimap POI icon settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiIconConfig {
    /// Archive path of the atlas texture.
    pub atlas_path: String,
    /// Directory under the output root for icons.
    pub output_subdir: String,
    /// File name for a copy of the whole atlas, if wanted.
    #[serde(default)]
    pub debug_atlas: Option<String>,
    #[serde(flatten)]
    pub layout: AtlasLayout,
    pub scale: u32,
    pub icons: Vec<IconSpec>,
}

impl ExtractConfig {
    /// The configuration shipped with the crate.
    ///
    /// # Errors
    /// Returns an error if the bundled TOML is invalid.
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_CONFIG)
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text.
    ///
    /// # Errors
    /// Returns [`Error::ConfigParse`] or [`Error::InvalidConfig`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the geometry values that would otherwise divide by zero or
    /// produce empty images.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let grid = &self.world_map.grid;
        if grid.tiles_x == 0 || grid.tiles_y == 0 || grid.tile_width == 0 || grid.tile_height == 0 {
            return Err(Error::InvalidConfig(
                "world_map tile grid dimensions must be nonzero".to_string(),
            ));
        }

        let products = [
            ("tiles_x * tiles_y", grid.tiles_x.checked_mul(grid.tiles_y)),
            ("tiles_x * tile_width", grid.tiles_x.checked_mul(grid.tile_width)),
            ("tiles_y * tile_height", grid.tiles_y.checked_mul(grid.tile_height)),
        ];
        if let Some((name, _)) = products.iter().find(|(_, product)| product.is_none()) {
            return Err(Error::InvalidConfig(format!("world_map {name} overflows u32")));
        }

        let layout = &self.poi_icons.layout;
        if layout.columns == 0 {
            return Err(Error::InvalidConfig("poi_icons.columns must be nonzero".to_string()));
        }
        if layout.icon_size == 0 || layout.icon_size > layout.cell_size {
            return Err(Error::InvalidConfig(format!(
                "poi_icons.icon_size {} must be in 1..={}",
                layout.icon_size, layout.cell_size
            )));
        }
        if self.poi_icons.scale == 0 {
            return Err(Error::InvalidConfig("poi_icons.scale must be at least 1".to_string()));
        }
        if layout.icon_size.checked_mul(self.poi_icons.scale).is_none() {
            return Err(Error::InvalidConfig(format!(
                "poi_icons.icon_size {} * scale {} overflows u32",
                layout.icon_size, self.poi_icons.scale
            )));
        }

        Ok(())
    }

    /// Archive locations in mount order.
    #[must_use]
    pub fn load_order(&self) -> Vec<ArchiveLocation> {
        self.archives.locations()
    }
}
