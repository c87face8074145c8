//! CLI command for continent coordinate bounds

use std::collections::BTreeMap;
use std::path::Path;

use crate::cli::progress::{DISK, LOOKING_GLASS, Steps};
use crate::converter::TextureDecoder;
use crate::formats::dbc::WorldMapArea;
use crate::pipeline::Pipeline;

/// Read the bounds table and print one line per configured continent.
pub fn read<D: TextureDecoder>(
    pipeline: &mut Pipeline<'_, D>,
    steps: &mut Steps,
) -> BTreeMap<u32, WorldMapArea> {
    let table = pipeline.config().world_map.table_path.clone();
    steps.next(LOOKING_GLASS, &format!("Reading {table}..."));

    let bounds = pipeline.read_bounds();

    if !steps.quiet() {
        if bounds.is_empty() {
            println!("  No continent bounds found");
        }
        for entry in pipeline.bounds_entries(&bounds) {
            println!(
                "  {} (map {}): left {:.2}, right {:.2}, top {:.2}, bottom {:.2}",
                entry.name,
                entry.id,
                entry.loc_left,
                entry.loc_right,
                entry.loc_top,
                entry.loc_bottom
            );
        }
    }

    bounds
}

/// Write the bounds JSON next to the maps.
pub fn write<D: TextureDecoder>(
    pipeline: &Pipeline<'_, D>,
    bounds: &BTreeMap<u32, WorldMapArea>,
    out_dir: &Path,
    steps: &mut Steps,
) -> anyhow::Result<()> {
    steps.next(DISK, "Writing bounds...");

    let path = pipeline.write_bounds(bounds, out_dir)?;
    if !steps.quiet() {
        println!("  -> {}", path.display());
    }

    Ok(())
}
