//! Multi-resolution launcher icons derived from one master image.
//!
//! Downscaling uses Lanczos3 (a windowed-sinc filter). Nearest-neighbour
//! and bilinear sampling alias badly going from 512 px down to 48 px.

use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::canvas::{Canvas, PixelFormat};
use crate::error::{Error, Result};
use crate::geometry::SizePx;
use crate::output::OutputDir;

/// Filter used for every resized icon.
pub const RESAMPLING_FILTER: FilterType = FilterType::Lanczos3;

/// The source image every launcher icon is derived from. Never modified.
#[derive(Debug, Clone)]
pub struct MasterIcon {
    data: RgbaImage,
}

impl MasterIcon {
    /// Decodes the master icon at `path`.
    ///
    /// A missing file is reported as [`Error::MasterMissing`].
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(|source| match source {
            image::ImageError::IoError(ref err) if err.kind() == io::ErrorKind::NotFound => {
                Error::MasterMissing {
                    path: path.to_path_buf(),
                }
            }
            source => Error::DecodeMaster {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Ok(Self::from_image(image.to_rgba8()))
    }

    pub fn from_image(data: RgbaImage) -> Self {
        let master = Self { data };
        let size = master.dimensions();
        if !size.is_square() {
            log::warn!(
                "master icon is {}x{}, resized icons will be stretched to squares",
                size.width,
                size.height
            );
        }
        master
    }

    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Returns a square copy with the given edge length.
    pub fn resize(&self, edge_length: u32) -> Canvas {
        let resized = imageops::resize(&self.data, edge_length, edge_length, RESAMPLING_FILTER);
        Canvas::new(resized, PixelFormat::Rgba)
    }
}

/// A named output bucket and the edge length it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeTarget {
    pub name: String,
    pub edge_length: u32,
}

impl ResizeTarget {
    pub fn new(name: impl Into<String>, edge_length: u32) -> Self {
        Self {
            name: name.into(),
            edge_length,
        }
    }
}

/// One resized icon, tagged with its target.
#[derive(Debug, Clone)]
pub struct ResizedIcon {
    pub target: ResizeTarget,
    pub canvas: Canvas,
}

/// Resizes `master` once per target, in target order.
pub fn resize_all(master: &MasterIcon, targets: &[ResizeTarget]) -> Vec<ResizedIcon> {
    targets
        .iter()
        .map(|target| ResizedIcon {
            target: target.clone(),
            canvas: master.resize(target.edge_length),
        })
        .collect()
}

/// Writes each icon to `<res_dir>/<target name>/<file_name>`.
///
/// Stops at the first directory or write failure.
pub fn write_all(icons: &[ResizedIcon], res_dir: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(icons.len());
    for icon in icons {
        let dir = OutputDir::acquire(res_dir.join(&icon.target.name))?;
        let path = dir.save(file_name, &icon.canvas)?;
        log::info!(
            "{}/{} ({}x{})",
            icon.target.name,
            file_name,
            icon.canvas.width(),
            icon.canvas.height()
        );
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// A master with four coloured quadrants.
    fn quadrant_master(edge: u32) -> MasterIcon {
        let half = edge / 2;
        let data = RgbaImage::from_fn(edge, edge, |x, y| match (x < half, y < half) {
            (true, true) => Rgba([255, 0, 0, 255]),
            (false, true) => Rgba([0, 255, 0, 255]),
            (true, false) => Rgba([0, 0, 255, 255]),
            (false, false) => Rgba([255, 255, 255, 255]),
        });
        MasterIcon::from_image(data)
    }

    #[test]
    fn resize_all_produces_requested_squares() {
        let master = quadrant_master(512);
        let targets = [
            ResizeTarget::new("mipmap-mdpi", 48),
            ResizeTarget::new("mipmap-xxxhdpi", 192),
        ];

        let icons = resize_all(&master, &targets);
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[0].target.name, "mipmap-mdpi");
        assert_eq!(icons[0].canvas.dimensions(), SizePx::new(48, 48));
        assert_eq!(icons[1].canvas.dimensions(), SizePx::new(192, 192));
        assert_eq!(master.dimensions(), SizePx::new(512, 512));
    }

    #[test]
    fn resize_preserves_layout() {
        let master = quadrant_master(512);
        for edge in [48, 192] {
            let icon = master.resize(edge);
            let quarter = edge / 4;
            let at = |x, y| icon.data.get_pixel(x, y).0;
            assert_eq!(at(quarter, quarter), [255, 0, 0, 255]);
            assert_eq!(at(edge - quarter, quarter), [0, 255, 0, 255]);
            assert_eq!(at(quarter, edge - quarter), [0, 0, 255, 255]);
            assert_eq!(at(edge - quarter, edge - quarter), [255, 255, 255, 255]);
        }
    }

    #[test]
    fn load_reports_missing_master() {
        let tmp = tempfile::tempdir().unwrap();
        let err = MasterIcon::load(&tmp.path().join("app_icon_512.png")).unwrap_err();
        assert!(matches!(err, Error::MasterMissing { .. }));
    }

    #[test]
    fn load_reports_undecodable_master() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("app_icon_512.png");
        std::fs::write(&path, b"not a png").unwrap();

        let err = MasterIcon::load(&path).unwrap_err();
        assert!(matches!(err, Error::DecodeMaster { .. }));
    }

    #[test]
    fn write_all_creates_bucket_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let icons = resize_all(
            &quadrant_master(64),
            &[ResizeTarget::new("mipmap-mdpi", 48), ResizeTarget::new("mipmap-hdpi", 72)],
        );

        let written = write_all(&icons, tmp.path(), "ic_launcher.png").unwrap();
        assert_eq!(
            written,
            vec![
                tmp.path().join("mipmap-mdpi").join("ic_launcher.png"),
                tmp.path().join("mipmap-hdpi").join("ic_launcher.png"),
            ]
        );
        let decoded = image::open(&written[1]).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (72, 72));
    }
}
