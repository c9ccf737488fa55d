//! Error types for the asset generators.

use std::io;
use std::path::PathBuf;

/// Fatal conditions that abort a generator run.
///
/// Font problems never show up here: a missing font degrades to the
/// built-in bitmap font instead (see [`crate::FontSource`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The master icon the resizer reads from does not exist.
    #[error("master icon not found at {}", path.display())]
    MasterMissing { path: PathBuf },

    /// The master icon exists but could not be decoded.
    #[error("failed to decode master icon {}: {source}", path.display())]
    DecodeMaster {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output image could not be encoded or written.
    #[error("failed to write {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The manifest file could not be read.
    #[error("failed to read manifest {}: {source}", path.display())]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The manifest is not valid JSON or does not match the schema.
    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// A manifest entry parsed but describes an impossible output.
    #[error("invalid manifest entry {entry:?}: {reason}")]
    InvalidEntry { entry: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
