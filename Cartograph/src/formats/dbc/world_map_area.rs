//! `WorldMapArea.dbc` schema (3.3.5a layout)

use std::collections::BTreeMap;

use super::reader::{FromRecord, Record, RecordTable};
use crate::error::Result;

/// One row of `WorldMapArea.dbc`.
///
/// The `loc_*` bounds map in-game world coordinates onto the map image.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldMapArea {
    pub id: u32,
    pub map_id: u32,
    /// Zero for continent-level entries.
    pub area_id: u32,
    pub area_name: String,
    pub loc_left: f32,
    pub loc_right: f32,
    pub loc_top: f32,
    pub loc_bottom: f32,
}

impl WorldMapArea {
    /// Continent-level rows have no area and at least one nonzero bound.
    #[must_use]
    pub fn is_continent(&self) -> bool {
        self.area_id == 0
            && [self.loc_left, self.loc_right, self.loc_top, self.loc_bottom]
                .iter()
                .any(|&bound| bound != 0.0)
    }
}

impl FromRecord for WorldMapArea {
    fn from_record(record: &Record<'_>) -> Result<Self> {
        Ok(Self {
            id: record.u32_at(0)?,
            map_id: record.u32_at(4)?,
            area_id: record.u32_at(8)?,
            area_name: record.string_at(12)?,
            loc_left: record.f32_at(16)?,
            loc_right: record.f32_at(20)?,
            loc_top: record.f32_at(24)?,
            loc_bottom: record.f32_at(28)?,
        })
    }
}

/// Decode every row of a `WorldMapArea.dbc` buffer.
///
/// # Errors
/// Returns an error if the buffer is not a WDBC table or a record is too short.
pub fn parse_world_map_areas(data: &[u8]) -> Result<Vec<WorldMapArea>> {
    RecordTable::parse(data)?.decode()
}

/// Continent-level rows keyed by map id. A later row replaces an earlier one.
#[must_use]
pub fn continent_bounds(areas: &[WorldMapArea]) -> BTreeMap<u32, WorldMapArea> {
    areas
        .iter()
        .filter(|area| area.is_continent())
        .map(|area| (area.map_id, area.clone()))
        .collect()
}
