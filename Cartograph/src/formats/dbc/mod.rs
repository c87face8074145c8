//! WDBC client database tables
//!
//! A fixed 20-byte header, `record_count` records of `record_size` bytes each,
//! then a pool of NUL-terminated strings that string fields point into.
//!
//! The reader is schema-agnostic: [`RecordTable`] hands out raw [`Record`]s and
//! a schema type implementing [`FromRecord`] picks its fields by offset.

mod reader;
mod world_map_area;

pub use reader::{DbcHeader, FromRecord, Record, RecordTable};
pub use world_map_area::{WorldMapArea, continent_bounds, parse_world_map_areas};

/// "WDBC" magic bytes
pub const MAGIC: [u8; 4] = *b"WDBC";

/// Size of the table header in bytes
pub const HEADER_SIZE: usize = 20;
