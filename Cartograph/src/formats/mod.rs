//! File format handlers for client data files

pub mod dbc;

pub use dbc::{RecordTable, WorldMapArea, parse_world_map_areas};
