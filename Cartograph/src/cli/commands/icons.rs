//! CLI command for POI icon extraction

use std::path::Path;

use console::style;

use crate::cli::progress::{PICTURE, Steps};
use crate::converter::TextureDecoder;
use crate::pipeline::{IconOutcome, IconsReport, Pipeline};

pub fn execute<D: TextureDecoder>(
    pipeline: &mut Pipeline<'_, D>,
    out_dir: &Path,
    steps: &mut Steps,
) -> anyhow::Result<IconsReport> {
    let atlas = pipeline.config().poi_icons.atlas_path.clone();
    steps.next(PICTURE, &format!("Extracting icons from {atlas}..."));

    let report = pipeline.extract_icons(out_dir)?;

    if !steps.quiet() {
        let (width, height) = report.atlas_size;
        println!("  Atlas: {width}x{height} (from {})", report.atlas_archive);
        if let Some(path) = &report.debug_atlas {
            println!("  Debug atlas -> {}", path.display());
        }

        for icon in &report.icons {
            let (col, row) = icon.cell;
            let rect = icon.rect;
            match &icon.outcome {
                IconOutcome::Written { path, size } => println!(
                    "  {} (index {}, cell {col},{row}, crop {},{}-{},{}) -> {} ({size}x{size})",
                    icon.name,
                    icon.index,
                    rect.x1,
                    rect.y1,
                    rect.x2,
                    rect.y2,
                    path.display()
                ),
                IconOutcome::Failed(message) => {
                    println!("  {} (index {}): {}", style(&icon.name).red(), icon.index, message);
                }
            }
        }
    }

    Ok(report)
}
