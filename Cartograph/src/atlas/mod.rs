//! Sprite atlas icon extraction
//!
//! The minimap POI atlas is a grid of fixed-size cells, addressed by a linear
//! index in row-major order. Each cell holds a smaller icon centred inside a
//! uniform transparent border.

use image::{RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Cell geometry of an icon atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasLayout {
    pub columns: u32,
    pub cell_size: u32,
    pub icon_size: u32,
}

impl Default for AtlasLayout {
    /// `POIIcons.blp`: 14 columns of 18px cells holding 16px icons.
    fn default() -> Self {
        Self {
            columns: 14,
            cell_size: 18,
            icon_size: 16,
        }
    }
}

/// Crop rectangle, `x2`/`y2` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropRect {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }
}

/// A named icon to pull out of the atlas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSpec {
    pub index: u32,
    /// Output file stem.
    pub name: String,
}

impl AtlasLayout {
    /// Border between cell edge and icon.
    #[must_use]
    pub fn padding(&self) -> u32 {
        self.cell_size.saturating_sub(self.icon_size) / 2
    }

    /// `(col, row)` of a zero-based cell index.
    #[must_use]
    pub fn cell(&self, index: u32) -> (u32, u32) {
        let columns = self.columns.max(1);
        (index % columns, index / columns)
    }

    /// Visible icon rectangle of cell `index`.
    #[must_use]
    pub fn crop_rect(&self, index: u32) -> CropRect {
        let (col, row) = self.cell(index);
        let padding = self.padding();
        let x1 = col.saturating_mul(self.cell_size).saturating_add(padding);
        let y1 = row.saturating_mul(self.cell_size).saturating_add(padding);
        CropRect {
            x1,
            y1,
            x2: x1.saturating_add(self.icon_size),
            y2: y1.saturating_add(self.icon_size),
        }
    }

    /// Crop icon `index` and enlarge it `scale` times.
    ///
    /// Enlarging replicates each source pixel into a `scale`x`scale` block so
    /// pixel art stays sharp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScale`] if `scale` is zero.
    /// Returns [`Error::AtlasCellOutOfBounds`] if the cell lies outside `atlas`.
    pub fn extract(&self, atlas: &RgbaImage, index: u32, scale: u32) -> Result<RgbaImage> {
        if scale == 0 {
            return Err(Error::InvalidScale(scale));
        }

        let rect = self.crop_rect(index);
        let (width, height) = atlas.dimensions();
        if rect.x2 > width || rect.y2 > height {
            return Err(Error::AtlasCellOutOfBounds {
                index,
                x2: rect.x2,
                y2: rect.y2,
                width,
                height,
            });
        }

        let icon = imageops::crop_imm(atlas, rect.x1, rect.y1, rect.width(), rect.height()).to_image();
        if scale == 1 {
            return Ok(icon);
        }

        Ok(upscale_nearest(&icon, scale))
    }
}

/// Integer nearest-neighbour enlargement.
#[must_use]
pub fn upscale_nearest(img: &RgbaImage, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    RgbaImage::from_fn(img.width() * scale, img.height() * scale, |x, y| {
        *img.get_pixel(x / scale, y / scale)
    })
}
