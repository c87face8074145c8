//! CLI command for continent map stitching

use std::path::Path;

use console::style;

use crate::cli::progress::{MAP, Steps, simple_spinner};
use crate::converter::TextureDecoder;
use crate::pipeline::{MapsReport, Pipeline};
use crate::worldmap::CompositeStatus;

pub fn execute<D: TextureDecoder>(
    pipeline: &mut Pipeline<'_, D>,
    out_dir: &Path,
    steps: &mut Steps,
) -> anyhow::Result<MapsReport> {
    let continents = pipeline.config().world_map.continents.len();
    steps.next(MAP, &format!("Stitching {continents} continent maps..."));

    let pb = simple_spinner("Compositing tiles", steps.quiet());
    let report = pipeline.extract_maps(out_dir)?;
    pb.finish_and_clear();

    if !steps.quiet() {
        print_report(&report);
    }

    Ok(report)
}

fn print_report(report: &MapsReport) {
    for continent in &report.continents {
        let status = match continent.status {
            CompositeStatus::Complete => style(continent.status.to_string()).green(),
            CompositeStatus::Partial { .. } => style(continent.status.to_string()).yellow(),
            CompositeStatus::Empty { .. } => style(continent.status.to_string()).red(),
        };
        match &continent.output {
            Some(path) => println!("  {}: {} -> {}", continent.name, status, path.display()),
            None => println!("  {}: {} (skipped)", continent.name, status),
        }
    }

    for (key, message) in &report.write_failures {
        println!("  {}: {}", style(key).red(), message);
    }
}
