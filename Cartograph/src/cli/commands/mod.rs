use clap::Subcommand;
use std::path::PathBuf;

pub mod bounds;
pub mod execute;
pub mod icons;
pub mod maps;
pub mod session;

#[derive(Subcommand)]
pub enum Commands {
    /// Stitch continent maps into <output>/<key>.png
    Maps {
        /// Client Data directory (defaults to the config's default_data_dir)
        data: Option<PathBuf>,
    },

    /// Extract minimap POI icons into <output>/icons/
    Icons {
        /// Client Data directory (defaults to the config's default_data_dir)
        data: Option<PathBuf>,
    },

    /// Print continent bounds and write map-bounds.json
    Bounds {
        /// Client Data directory (defaults to the config's default_data_dir)
        data: Option<PathBuf>,
    },

    /// Run maps, icons and bounds in one pass
    All {
        /// Client Data directory (defaults to the config's default_data_dir)
        data: Option<PathBuf>,
    },
}

impl Commands {
    /// Data directory given on the command line, if any.
    #[must_use]
    pub fn data_dir(&self) -> Option<&PathBuf> {
        match self {
            Commands::Maps { data }
            | Commands::Icons { data }
            | Commands::Bounds { data }
            | Commands::All { data } => data.as_ref(),
        }
    }
}
