//! Command execution implementations

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::Commands;
use super::session::Session;
use super::{bounds, icons, maps};
use crate::cli::GlobalArgs;
use crate::cli::progress::{PACKAGE, Steps, print_done};
use crate::converter::{BlpDecoder, TextureDecoder};
use crate::pipeline::Pipeline;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the archives cannot be opened or a stage fails
    /// outright.
    pub fn execute(&self, globals: &GlobalArgs) -> anyhow::Result<()> {
        let started = Instant::now();
        let session = Session::new(globals, self.data_dir().map(PathBuf::as_path))?;
        let out_dir = session.output_dir.clone();

        let total = match self {
            Commands::Maps { .. } | Commands::Icons { .. } => 2,
            Commands::Bounds { .. } => 3,
            Commands::All { .. } => 5,
        };
        let mut steps = Steps::new(total, session.quiet);

        steps.next(
            PACKAGE,
            &format!("Opening archives in {}...", session.data_dir.display()),
        );
        let archives = session.open_archives()?;
        if !session.quiet {
            println!("  {} archives mounted", archives.len());
        }

        let mut pipeline = Pipeline::new(&session.config, archives, BlpDecoder);

        self.run_stages(&mut pipeline, &out_dir, &mut steps)?;

        if !session.quiet {
            print_done(started.elapsed());
        }

        Ok(())
    }

    /// Run this command's stages against a mounted pipeline.
    ///
    /// `All` writes the bounds before extracting icons.
    fn run_stages<D: TextureDecoder>(
        &self,
        pipeline: &mut Pipeline<'_, D>,
        out_dir: &Path,
        steps: &mut Steps,
    ) -> anyhow::Result<()> {
        match self {
            Commands::Maps { .. } => {
                maps::execute(pipeline, out_dir, steps)?;
            }
            Commands::Icons { .. } => {
                icons::execute(pipeline, out_dir, steps)?;
            }
            Commands::Bounds { .. } => {
                let found = bounds::read(pipeline, steps);
                bounds::write(pipeline, &found, out_dir, steps)?;
            }
            Commands::All { .. } => {
                let found = bounds::read(pipeline, steps);
                maps::execute(pipeline, out_dir, steps)?;
                bounds::write(pipeline, &found, out_dir, steps)?;
                icons::execute(pipeline, out_dir, steps)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{ArchiveSet, ArchiveSource, MemoryArchive};
    use crate::config::ExtractConfig;
    use crate::converter::{PngDecoder, png_bytes};
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_all_keeps_maps_and_bounds_when_atlas_missing() {
        let config = ExtractConfig::bundled().unwrap();
        let tile = png_bytes(&RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]))).unwrap();
        let files = MemoryArchive::new()
            .with_file(r"Interface\WorldMap\Kalimdor\Kalimdor1.blp", tile);
        let mut archives = ArchiveSet::new(config.path_variants.clone());
        archives.push("common.MPQ", Box::new(files) as Box<dyn ArchiveSource>);

        let dir = tempfile::tempdir().unwrap();
        let mut pipeline = Pipeline::new(&config, archives, PngDecoder);
        let mut steps = Steps::new(5, true);
        let result = Commands::All { data: None }.run_stages(&mut pipeline, dir.path(), &mut steps);

        assert!(result.is_err());
        assert!(dir.path().join("kalimdor.png").is_file());
        assert!(dir.path().join("map-bounds.json").is_file());
    }
}
