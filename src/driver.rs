//! Batch drivers that walk the manifest tables.

use std::path::{Path, PathBuf};

use crate::compose::{Background, Composer, FontLibrary};
use crate::error::Result;
use crate::manifest::{AssetGroup, AssetManifest};
use crate::output::OutputDir;
use crate::resize::{MasterIcon, resize_all, write_all};

/// Runs the generator steps described by an [`AssetManifest`].
///
/// Relative manifest paths resolve against `root`.
pub struct Generator {
    manifest: AssetManifest,
    root: PathBuf,
    composer: Composer,
}

impl Generator {
    pub fn new(manifest: AssetManifest, root: impl Into<PathBuf>, fonts: FontLibrary) -> Self {
        let composer = Composer::new(fonts, manifest.font_family.clone());
        Self {
            manifest,
            root: root.into(),
            composer,
        }
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Composes and writes every image in `group`.
    pub fn compose_group(&self, group: AssetGroup) -> Result<Vec<PathBuf>> {
        self.manifest.validate()?;
        let dir = OutputDir::acquire(self.resolve(&self.manifest.output_dir))?;

        let mut written = Vec::new();
        for settings in self.manifest.group(group) {
            let background: Background = settings.background.into();
            let canvas = self.composer.compose(
                settings.width,
                settings.height,
                &background,
                &settings.blocks(),
            );
            written.push(dir.save(&settings.file_name, &canvas)?);
            log::info!("Created: {}", settings.file_name);
        }

        log::info!("{} {group:?} assets in {}", written.len(), dir.path().display());
        Ok(written)
    }

    /// Downscales the master icon into every launcher bucket.
    ///
    /// The master is decoded and every size is produced before any
    /// directory is touched, so a missing master writes nothing.
    pub fn launcher_icons(&self) -> Result<Vec<PathBuf>> {
        self.manifest.validate()?;
        let settings = &self.manifest.launcher_icons;
        let master = MasterIcon::load(&self.resolve(&settings.master))?;
        let icons = resize_all(&master, &settings.targets());

        let written = write_all(&icons, &self.resolve(&settings.res_dir), &settings.file_name)?;
        log::info!("{} launcher icons generated", written.len());
        Ok(written)
    }

    /// Runs listing, screenshots, then launcher icons.
    ///
    /// The listing step writes the master icon the last step reads.
    pub fn run_all(&self) -> Result<Vec<PathBuf>> {
        let mut written = self.compose_group(AssetGroup::Listing)?;
        written.extend(self.compose_group(AssetGroup::Screenshots)?);
        written.extend(self.launcher_icons()?);
        Ok(written)
    }
}
