//! BLP texture decoding and PNG output
//!
//! Tiles and atlases inside the archives are BLP2 textures. Decoding goes
//! through the [`TextureDecoder`] seam so compositing can be driven by any
//! format; [`BlpDecoder`] is the production implementation and
//! [`PngDecoder`] serves fixtures.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// Turns an encoded texture blob into RGBA pixels.
pub trait TextureDecoder {
    /// Decode `bytes` into an RGBA image.
    ///
    /// # Errors
    /// Returns [`Error::TextureDecode`] if the blob cannot be decoded.
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage>;
}

/// Decodes BLP textures (top mip level).
#[derive(Debug, Clone, Copy, Default)]
pub struct BlpDecoder;

impl TextureDecoder for BlpDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage> {
        let blp = wow_blp::parser::load_blp_from_buf(bytes).map_err(|e| Error::TextureDecode {
            message: format!("Failed to parse BLP: {e}"),
        })?;
        let decoded = wow_blp::convert::blp_to_image(&blp, 0).map_err(|e| Error::TextureDecode {
            message: format!("Failed to convert BLP: {e}"),
        })?;

        let (width, height) = (decoded.width(), decoded.height());
        RgbaImage::from_raw(width, height, decoded.to_rgba8().into_raw())
            .ok_or(Error::ImageBufferFailed)
    }
}

/// Decodes PNG blobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngDecoder;

impl TextureDecoder for PngDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage> {
        image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map(|img| img.to_rgba8())
            .map_err(|e| Error::TextureDecode {
                message: format!("Failed to decode PNG: {e}"),
            })
    }
}

/// Encode an image as PNG bytes.
///
/// # Errors
/// Returns [`Error::PngEncodeFailed`] if encoding fails.
pub fn png_bytes(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_data);
    img.write_with_encoder(encoder)
        .map_err(|e| Error::PngEncodeFailed {
            message: e.to_string(),
        })?;
    Ok(png_data)
}

/// Write an image to `path` as PNG, replacing any existing file.
///
/// Returns the number of bytes written.
///
/// # Errors
/// Returns an error if encoding fails or the file cannot be written.
pub fn save_png<P: AsRef<Path>>(path: P, img: &RgbaImage) -> Result<usize> {
    let png_data = png_bytes(img)?;

    let mut output = BufWriter::new(File::create(path.as_ref())?);
    output.write_all(&png_data)?;
    output.flush()?;

    Ok(png_data.len())
}
