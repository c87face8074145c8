//! Config and archive setup shared by the subcommands

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

use crate::archive::ArchiveSet;
use crate::cli::GlobalArgs;
use crate::config::ExtractConfig;

/// Resolved settings for one CLI invocation.
#[derive(Debug)]
pub struct Session {
    pub config: ExtractConfig,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub quiet: bool,
}

impl Session {
    /// Load the config and apply command-line overrides.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be loaded.
    pub fn new(globals: &GlobalArgs, data: Option<&Path>) -> anyhow::Result<Self> {
        let config = match &globals.config {
            Some(path) => ExtractConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ExtractConfig::bundled().context("Bundled config is invalid")?,
        };

        let data_dir = data.map_or_else(|| config.default_data_dir.clone(), Path::to_path_buf);
        let output_dir = globals
            .output
            .clone()
            .unwrap_or_else(|| config.output_dir.clone());

        Ok(Self {
            config,
            data_dir,
            output_dir,
            quiet: globals.quiet,
        })
    }

    /// Mount every archive of the load order that exists.
    ///
    /// # Errors
    /// Returns an error if the data directory is unreadable or no archive
    /// could be opened.
    pub fn open_archives(&self) -> anyhow::Result<ArchiveSet> {
        if !self.data_dir.is_dir() {
            bail!("Data directory not found: {}", self.data_dir.display());
        }

        let archives = ArchiveSet::open(
            &self.data_dir,
            &self.config.load_order(),
            self.config.path_variants.clone(),
        )
        .with_context(|| format!("Failed to open archives in {}", self.data_dir.display()))?;

        Ok(archives)
    }
}
