//! Continent overview maps stitched from tile grids
//!
//! Each continent map in the client is split into `tiles_x * tiles_y` BLP
//! tiles named `{stem}{index}.blp`, numbered from 1 in row-major order.

mod compositor;
mod types;

pub use compositor::TileCompositor;
pub use types::{
    CompositeStatus, ContinentComposite, ContinentDescriptor, TileGrid, TileOutcome, TileReport,
};
