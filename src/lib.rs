//! storefront-assets: placeholder store-listing graphics and launcher icons
//!
//! This crate composes simple raster assets for an app's store listing
//! (icon, feature banner, screenshot placeholders) and derives the
//! per-density launcher icons from the master icon.
//!
//! # Example
//!
//! ```
//! use palette::Srgb;
//! use storefront_assets::{
//!     Anchor, Background, Composer, FontLibrary, MasterIcon, ResizeTarget, TextBlock, resize_all,
//! };
//!
//! // Compose a 512x512 icon: a green disc with a centered letter.
//! let composer = Composer::new(FontLibrary::empty(), "Arial");
//! let icon = composer.compose(
//!     512,
//!     512,
//!     &Background::Circle { color: Srgb::new(61, 220, 132), margin: 20 },
//!     &[TextBlock::new("A", 280.0, Srgb::new(255, 255, 255), Anchor::Center { bias: -10 })],
//! );
//!
//! // Derive launcher sizes from it.
//! let master = MasterIcon::from_image(icon.data);
//! let icons = resize_all(&master, &[ResizeTarget::new("mipmap-mdpi", 48)]);
//! assert_eq!(icons[0].canvas.width(), 48);
//! ```
//!
//! # Batch generation
//!
//! The full asset set is described by an [`AssetManifest`] and written by a
//! [`Generator`]:
//!
//! ```no_run
//! use storefront_assets::{AssetManifest, FontLibrary, Generator};
//!
//! let generator = Generator::new(AssetManifest::default(), ".", FontLibrary::system());
//! generator.run_all()?;
//! # Ok::<(), storefront_assets::Error>(())
//! ```

mod canvas;
mod compose;
mod driver;
mod error;
mod geometry;
mod manifest;
mod output;
mod resize;

pub use canvas::{Canvas, PixelFormat};
pub use compose::{
    Anchor, Background, Composer, Composition, FontHandle, FontLibrary, FontSource, PlacedText,
    TextBlock, TextLayout, TextPlacement, resolve_font,
};
pub use driver::Generator;
pub use error::{Error, Result};
pub use geometry::{BoundsPx, SizePx};
pub use manifest::{
    AnchorSettings, AssetGroup, AssetManifest, BackgroundSettings, CompositionSettings,
    LauncherIconSettings, MipmapBucket, TextSettings,
};
pub use output::OutputDir;
pub use resize::{MasterIcon, RESAMPLING_FILTER, ResizeTarget, ResizedIcon, resize_all, write_all};
