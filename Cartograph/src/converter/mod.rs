//! Texture conversion utilities
//!
//! - BLP → RGBA decoding (`TextureDecoder`)
//! - RGBA → PNG encoding

mod blp_png;

pub use blp_png::{BlpDecoder, PngDecoder, TextureDecoder, png_bytes, save_png};
