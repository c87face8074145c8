//! Tile grid stitching

use image::{Rgba, RgbaImage, imageops};

use super::types::{
    CompositeStatus, ContinentComposite, ContinentDescriptor, TileGrid, TileOutcome, TileReport,
};
use crate::archive::AssetSource;
use crate::converter::TextureDecoder;

/// Default tile path inside the archives.
pub const DEFAULT_TILE_PATH: &str = r"Interface\WorldMap\{folder}\{stem}{index}.blp";

/// Opaque black
pub const DEFAULT_BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Stitches continent tiles into one canvas.
pub struct TileCompositor<'a> {
    grid: TileGrid,
    path_template: String,
    background: Rgba<u8>,
    decoder: &'a dyn TextureDecoder,
}

impl<'a> TileCompositor<'a> {
    /// Compositor with the default tile path and background.
    #[must_use]
    pub fn new(grid: TileGrid, decoder: &'a dyn TextureDecoder) -> Self {
        Self {
            grid,
            path_template: DEFAULT_TILE_PATH.to_string(),
            background: DEFAULT_BACKGROUND,
            decoder,
        }
    }

    /// Use a different tile path template (`{folder}`, `{stem}`, `{index}`).
    #[must_use]
    pub fn with_path_template(mut self, template: impl Into<String>) -> Self {
        self.path_template = template.into();
        self
    }

    /// Fill colour for cells whose tile is missing.
    #[must_use]
    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Archive path of tile `index` (1-based) of `continent`.
    #[must_use]
    pub fn tile_path(&self, continent: &ContinentDescriptor, index: u32) -> String {
        self.path_template
            .replace("{folder}", &continent.folder)
            .replace("{stem}", &continent.stem)
            .replace("{index}", &index.to_string())
    }

    /// Fetch, decode and paste every tile of `continent`.
    ///
    /// Missing and undecodable tiles are logged and leave the background in
    /// their cell. Tiles larger than a cell are clipped by the canvas edge.
    pub fn composite<S: AssetSource + ?Sized>(
        &self,
        continent: &ContinentDescriptor,
        source: &mut S,
    ) -> ContinentComposite {
        let (width, height) = self.grid.canvas_size();
        let mut canvas = RgbaImage::from_pixel(width, height, self.background);
        let total = self.grid.tile_count();
        let mut tiles = Vec::with_capacity(total as usize);
        let mut found = 0;

        for index in 1..=total {
            let path = self.tile_path(continent, index);
            let outcome = self.place_tile(&mut canvas, index, &path, source);
            if outcome == TileOutcome::Decoded {
                found += 1;
            }
            tiles.push(TileReport {
                index,
                path,
                outcome,
            });
        }

        let status = CompositeStatus::from_counts(found, total);
        tracing::debug!("{}: {}", continent.name, status);

        ContinentComposite {
            canvas: (found > 0).then_some(canvas),
            status,
            tiles,
        }
    }

    fn place_tile<S: AssetSource + ?Sized>(
        &self,
        canvas: &mut RgbaImage,
        index: u32,
        path: &str,
        source: &mut S,
    ) -> TileOutcome {
        let Some(bytes) = source.fetch(path) else {
            tracing::warn!("Missing tile {}: {}", index, path);
            return TileOutcome::NotFound;
        };

        match self.decoder.decode(&bytes) {
            Ok(tile) => {
                let (x, y) = self.grid.offset(index).unwrap_or_default();
                imageops::replace(canvas, &tile, i64::from(x), i64::from(y));
                TileOutcome::Decoded
            }
            Err(e) => {
                tracing::warn!("Failed to decode tile {}: {}", index, e);
                TileOutcome::DecodeFailed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;
    use crate::converter::{PngDecoder, png_bytes};
    use pretty_assertions::assert_eq;

    const TILE_SIZE: u32 = 4;

    fn grid() -> TileGrid {
        TileGrid {
            tiles_x: 4,
            tiles_y: 3,
            tile_width: TILE_SIZE,
            tile_height: TILE_SIZE,
        }
    }

    fn kalimdor() -> ContinentDescriptor {
        ContinentDescriptor {
            name: "Kalimdor".to_string(),
            key: "kalimdor".to_string(),
            folder: "Kalimdor".to_string(),
            stem: "Kalimdor".to_string(),
            map_id: 1,
        }
    }

    fn tile_color(index: u32) -> Rgba<u8> {
        Rgba([index as u8 * 20, 255 - index as u8, 7, 255])
    }

    fn archive_with_tiles(indices: impl IntoIterator<Item = u32>) -> MemoryArchive {
        let mut archive = MemoryArchive::new();
        for index in indices {
            let tile = RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, tile_color(index));
            archive.insert(
                format!(r"Interface\WorldMap\Kalimdor\Kalimdor{index}.blp"),
                png_bytes(&tile).unwrap(),
            );
        }
        archive
    }

    fn cell_is(canvas: &RgbaImage, index: u32, color: Rgba<u8>) -> bool {
        let (x0, y0) = grid().offset(index).unwrap();
        (0..TILE_SIZE).all(|dy| (0..TILE_SIZE).all(|dx| *canvas.get_pixel(x0 + dx, y0 + dy) == color))
    }

    #[test]
    fn test_tile_path() {
        let compositor = TileCompositor::new(grid(), &PngDecoder);
        assert_eq!(
            compositor.tile_path(&kalimdor(), 12),
            r"Interface\WorldMap\Kalimdor\Kalimdor12.blp"
        );

        let custom = TileCompositor::new(grid(), &PngDecoder).with_path_template("{stem}/{index}.png");
        assert_eq!(custom.tile_path(&kalimdor(), 3), "Kalimdor/3.png");
    }

    #[test]
    fn test_all_tiles_complete() {
        let mut archive = archive_with_tiles(1..=12);
        let result = TileCompositor::new(grid(), &PngDecoder).composite(&kalimdor(), &mut archive);

        assert_eq!(result.status, CompositeStatus::Complete);
        assert_eq!(result.found(), 12);
        let canvas = result.canvas.unwrap();
        assert_eq!(canvas.dimensions(), (16, 12));
        assert!((1..=12).all(|i| cell_is(&canvas, i, tile_color(i))));
    }

    #[test]
    fn test_partial_keeps_background() {
        let mut archive = archive_with_tiles(1..=7);
        let result = TileCompositor::new(grid(), &PngDecoder).composite(&kalimdor(), &mut archive);

        assert_eq!(result.status, CompositeStatus::Partial { found: 7, total: 12 });
        let canvas = result.canvas.unwrap();
        assert!((1..=7).all(|i| cell_is(&canvas, i, tile_color(i))));
        assert!((8..=12).all(|i| cell_is(&canvas, i, DEFAULT_BACKGROUND)));
        assert_eq!(
            result.tiles.iter().filter(|t| t.outcome == TileOutcome::NotFound).count(),
            5
        );
    }

    #[test]
    fn test_decode_failure_counts_as_missing() {
        let mut archive = archive_with_tiles([1, 2]);
        archive.insert(r"Interface\WorldMap\Kalimdor\Kalimdor3.blp", b"corrupt".to_vec());

        let result = TileCompositor::new(grid(), &PngDecoder).composite(&kalimdor(), &mut archive);

        assert_eq!(result.status, CompositeStatus::Partial { found: 2, total: 12 });
        assert!(matches!(result.tiles[2].outcome, TileOutcome::DecodeFailed(_)));
        assert!(cell_is(result.canvas.as_ref().unwrap(), 3, DEFAULT_BACKGROUND));
    }

    #[test]
    fn test_no_tiles_yields_no_canvas() {
        let mut archive = MemoryArchive::new();
        let result = TileCompositor::new(grid(), &PngDecoder).composite(&kalimdor(), &mut archive);

        assert_eq!(result.status, CompositeStatus::Empty { total: 12 });
        assert!(result.canvas.is_none());
    }

    #[test]
    fn test_custom_background_and_oversized_tile() {
        let mut archive = MemoryArchive::new();
        let big = RgbaImage::from_pixel(TILE_SIZE * 2, TILE_SIZE * 2, Rgba([9, 9, 9, 255]));
        archive.insert(r"Interface\WorldMap\Kalimdor\Kalimdor12.blp", png_bytes(&big).unwrap());

        let fill = Rgba([1, 2, 3, 255]);
        let result = TileCompositor::new(grid(), &PngDecoder)
            .with_background(fill)
            .composite(&kalimdor(), &mut archive);

        let canvas = result.canvas.unwrap();
        assert_eq!(canvas.dimensions(), (16, 12));
        assert!(cell_is(&canvas, 12, Rgba([9, 9, 9, 255])));
        assert!(cell_is(&canvas, 1, fill));
    }
}
