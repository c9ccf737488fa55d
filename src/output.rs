//! Output directories and PNG persistence.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::canvas::Canvas;
use crate::error::{Error, Result};

/// A directory that exists for as long as this handle is held.
///
/// Acquiring an existing directory is a no-op, so runs can be repeated;
/// saving over an existing file replaces it.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Creates `path` and any missing parents.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|source| Error::CreateDir {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `canvas` as a PNG named `file_name`, returning the full path.
    pub fn save(&self, file_name: &str, canvas: &Canvas) -> Result<PathBuf> {
        let path = self.path.join(file_name);
        canvas
            .to_dynamic()
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| Error::Encode {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}
