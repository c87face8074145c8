//! Error types for `Cartograph`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `Cartograph` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Archive Errors ====================
    /// None of the archives in the load order could be opened.
    #[error("no MPQ archives found under {data_dir}")]
    NoArchivesFound {
        /// The data directory that was searched.
        data_dir: PathBuf,
    },

    /// An archive exists on disk but could not be opened.
    #[error("failed to open archive {path}: {message}")]
    ArchiveOpen {
        /// Path of the archive that failed.
        path: PathBuf,
        /// The underlying error message.
        message: String,
    },

    /// Reading an entry from an opened archive failed.
    #[error("failed to read {file} from {archive}: {message}")]
    ArchiveRead {
        /// Archive display name.
        archive: String,
        /// Archive-internal path.
        file: String,
        /// The underlying error message.
        message: String,
    },

    /// The requested file was not found in the archive.
    #[error("file not found in archive: {0}")]
    FileNotFoundInArchive(String),

    // ==================== DBC Record Table Errors ====================
    /// The table does not start with the WDBC magic.
    #[error("invalid DBC magic: expected WDBC, found {0:?}")]
    InvalidDbcMagic([u8; 4]),

    /// The buffer is shorter than its header claims.
    #[error("DBC table truncated: header needs {expected} bytes, buffer has {actual}")]
    DbcTruncated {
        /// Bytes required by the header fields.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// A schema asked for a field outside the record.
    #[error("DBC field at offset {offset} exceeds record size {record_size}")]
    DbcFieldOutOfBounds {
        /// Byte offset of the field inside the record.
        offset: usize,
        /// Width of one record in bytes.
        record_size: usize,
    },

    // ==================== Texture Errors ====================
    /// A BLP (or other) texture blob could not be decoded.
    #[error("failed to decode texture: {message}")]
    TextureDecode {
        /// The decoder error message.
        message: String,
    },

    /// Failed to create an image buffer from decoded pixels.
    #[error("failed to create image buffer")]
    ImageBufferFailed,

    /// Failed to encode PNG image.
    #[error("failed to encode PNG: {message}")]
    PngEncodeFailed {
        /// The encoding error message.
        message: String,
    },

    // ==================== Atlas Errors ====================
    /// The icon atlas is not present in any archive.
    #[error("icon atlas not found in any archive: {path}")]
    AtlasNotFound {
        /// Archive-internal path of the atlas.
        path: String,
    },

    /// The crop rectangle for a cell lies outside the atlas.
    #[error("atlas cell {index} ({x2}x{y2}) exceeds atlas size {width}x{height}")]
    AtlasCellOutOfBounds {
        /// The requested cell index.
        index: u32,
        /// Right edge of the crop rectangle.
        x2: u32,
        /// Bottom edge of the crop rectangle.
        y2: u32,
        /// Atlas width.
        width: u32,
        /// Atlas height.
        height: u32,
    },

    /// Upscale factor must be at least 1.
    #[error("invalid scale factor: {0}")]
    InvalidScale(u32),

    // ==================== Output Errors ====================
    /// Every output of a stage failed to write.
    #[error("failed to write any output to {path}: {message}")]
    OutputWriteFailed {
        /// The output directory.
        path: PathBuf,
        /// The first write error.
        message: String,
    },

    // ==================== Configuration Errors ====================
    /// Configuration TOML could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but is not usable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `Cartograph` operations.
pub type Result<T> = std::result::Result<T, Error>;
