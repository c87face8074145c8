//! End-to-end extraction: archives in, PNG files out
//!
//! Every stage degrades per unit: a missing tile leaves a black cell, a
//! missing continent is skipped, a bad icon index is reported and the next one
//! is tried. Only a missing atlas, or a stage that could not write a single
//! file, is an error.

mod types;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::archive::ArchiveSet;
use crate::config::{ExtractConfig, WorldMapConfig};
use crate::converter::{TextureDecoder, save_png};
use crate::error::{Error, Result};
use crate::formats::dbc::{WorldMapArea, continent_bounds, parse_world_map_areas};
use crate::worldmap::{ContinentDescriptor, TileCompositor};

pub use types::{ContinentReport, IconOutcome, IconReport, IconsReport, MapBoundsEntry, MapsReport};

/// Drives extraction against one mounted archive set.
pub struct Pipeline<'a, D: TextureDecoder> {
    config: &'a ExtractConfig,
    archives: ArchiveSet,
    decoder: D,
}

fn compositor<'d>(config: &WorldMapConfig, decoder: &'d dyn TextureDecoder) -> TileCompositor<'d> {
    TileCompositor::new(config.grid, decoder)
        .with_path_template(config.tile_path.clone())
        .with_background(config.background())
}

impl<'a, D: TextureDecoder> Pipeline<'a, D> {
    #[must_use]
    pub fn new(config: &'a ExtractConfig, archives: ArchiveSet, decoder: D) -> Self {
        Self {
            config,
            archives,
            decoder,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ExtractConfig {
        self.config
    }

    #[must_use]
    pub fn archives(&self) -> &ArchiveSet {
        &self.archives
    }

    /// Continent-level `WorldMapArea` rows keyed by map id.
    ///
    /// Empty when the table is missing or unreadable.
    pub fn read_bounds(&mut self) -> BTreeMap<u32, WorldMapArea> {
        let path = &self.config.world_map.table_path;
        let Some(asset) = self.archives.resolve(path) else {
            tracing::warn!("{} not found in any archive", path);
            return BTreeMap::new();
        };

        match parse_world_map_areas(&asset.bytes) {
            Ok(areas) => {
                let bounds = continent_bounds(&areas);
                tracing::info!(
                    "Parsed {} WorldMapArea rows, {} continent-level",
                    areas.len(),
                    bounds.len()
                );
                bounds
            }
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path, e);
                BTreeMap::new()
            }
        }
    }

    /// Configured continents joined with their bounds, in config order.
    ///
    /// Continents without a bounds row are left out.
    #[must_use]
    pub fn bounds_entries(&self, bounds: &BTreeMap<u32, WorldMapArea>) -> Vec<MapBoundsEntry> {
        let (image_width, image_height) = self.config.world_map.grid.canvas_size();
        self.config
            .world_map
            .continents
            .iter()
            .filter_map(|continent| {
                bounds.get(&continent.map_id).map(|area| MapBoundsEntry {
                    id: continent.map_id,
                    name: continent.name.clone(),
                    key: continent.key.clone(),
                    image_width,
                    image_height,
                    loc_left: area.loc_left,
                    loc_right: area.loc_right,
                    loc_top: area.loc_top,
                    loc_bottom: area.loc_bottom,
                })
            })
            .collect()
    }

    /// Write the bounds report as pretty JSON into `out_dir`.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn write_bounds<P: AsRef<Path>>(
        &self,
        bounds: &BTreeMap<u32, WorldMapArea>,
        out_dir: P,
    ) -> Result<PathBuf> {
        let out_dir = out_dir.as_ref();
        std::fs::create_dir_all(out_dir)?;

        let entries = self.bounds_entries(bounds);
        let mut json = serde_json::to_string_pretty(&entries)?;
        json.push('\n');

        let path = out_dir.join(&self.config.world_map.bounds_file);
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Stitch one continent and write `<out_dir>/<key>.png`.
    ///
    /// Nothing is written when no tile was found.
    ///
    /// # Errors
    /// Returns an error if the PNG cannot be written.
    pub fn extract_continent<P: AsRef<Path>>(
        &mut self,
        continent: &ContinentDescriptor,
        out_dir: P,
    ) -> Result<ContinentReport> {
        let composite = compositor(&self.config.world_map, &self.decoder)
            .composite(continent, &mut self.archives);

        let mut report = ContinentReport {
            name: continent.name.clone(),
            key: continent.key.clone(),
            status: composite.status,
            output: None,
            bytes_written: 0,
            tiles: composite.tiles,
        };

        let Some(canvas) = composite.canvas else {
            tracing::warn!("No tiles found for {}, skipping", continent.name);
            return Ok(report);
        };

        let path = out_dir.as_ref().join(format!("{}.png", continent.key));
        report.bytes_written = save_png(&path, &canvas)?;
        report.output = Some(path);
        Ok(report)
    }

    /// Stitch every configured continent into `out_dir`.
    ///
    /// # Errors
    /// Returns an error if `out_dir` cannot be created, or if every write
    /// failed.
    pub fn extract_maps<P: AsRef<Path>>(&mut self, out_dir: P) -> Result<MapsReport> {
        let out_dir = out_dir.as_ref();
        std::fs::create_dir_all(out_dir)?;

        let config = self.config;
        let mut report = MapsReport::default();

        for continent in &config.world_map.continents {
            match self.extract_continent(continent, out_dir) {
                Ok(result) => report.continents.push(result),
                Err(e) => {
                    tracing::error!("Failed to write {}: {}", continent.key, e);
                    report.write_failures.push((continent.key.clone(), e.to_string()));
                }
            }
        }

        if report.written() == 0 {
            if let Some((_, message)) = report.write_failures.first() {
                return Err(Error::OutputWriteFailed {
                    path: out_dir.to_path_buf(),
                    message: message.clone(),
                });
            }
        }

        Ok(report)
    }

    /// Extract the configured POI icons (and the debug atlas) into
    /// `<out_dir>/<output_subdir>/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AtlasNotFound`] if the atlas is in no archive.
    /// Returns [`Error::TextureDecode`] if the atlas cannot be decoded.
    /// Returns [`Error::OutputWriteFailed`] if no file could be written.
    pub fn extract_icons<P: AsRef<Path>>(&mut self, out_dir: P) -> Result<IconsReport> {
        let icons_config = &self.config.poi_icons;
        let asset = self
            .archives
            .resolve(&icons_config.atlas_path)
            .ok_or_else(|| Error::AtlasNotFound {
                path: icons_config.atlas_path.clone(),
            })?;

        let atlas = self.decoder.decode(&asset.bytes)?;
        tracing::info!(
            "Atlas {} is {}x{} (from {})",
            asset.path,
            atlas.width(),
            atlas.height(),
            asset.archive
        );

        let icon_dir = out_dir.as_ref().join(&icons_config.output_subdir);
        std::fs::create_dir_all(&icon_dir)?;

        let mut report = IconsReport {
            atlas_archive: asset.archive,
            atlas_size: atlas.dimensions(),
            debug_atlas: None,
            icons: Vec::with_capacity(icons_config.icons.len()),
        };
        let mut first_write_error = None;

        if let Some(name) = &icons_config.debug_atlas {
            let path = icon_dir.join(name);
            match save_png(&path, &atlas) {
                Ok(_) => report.debug_atlas = Some(path),
                Err(e) => {
                    tracing::error!("Failed to write {}: {}", path.display(), e);
                    first_write_error.get_or_insert_with(|| e.to_string());
                }
            }
        }

        let layout = icons_config.layout;
        for icon in &icons_config.icons {
            let rect = layout.crop_rect(icon.index);
            let (col, row) = layout.cell(icon.index);
            let outcome = match layout.extract(&atlas, icon.index, icons_config.scale) {
                Ok(image) => {
                    let path = icon_dir.join(format!("{}.png", icon.name));
                    match save_png(&path, &image) {
                        Ok(_) => IconOutcome::Written {
                            path,
                            size: image.width(),
                        },
                        Err(e) => {
                            tracing::error!("Failed to write {}: {}", path.display(), e);
                            first_write_error.get_or_insert_with(|| e.to_string());
                            IconOutcome::Failed(e.to_string())
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping icon {} (index {}): {}", icon.name, icon.index, e);
                    IconOutcome::Failed(e.to_string())
                }
            };

            report.icons.push(IconReport {
                name: icon.name.clone(),
                index: icon.index,
                cell: (col, row),
                rect,
                outcome,
            });
        }

        if report.written() == 0 && report.debug_atlas.is_none() {
            if let Some(message) = first_write_error {
                return Err(Error::OutputWriteFailed {
                    path: icon_dir,
                    message,
                });
            }
        }

        Ok(report)
    }
}
