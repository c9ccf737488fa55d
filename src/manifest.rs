//! Declarative tables of the assets a run produces.
//!
//! An [`AssetManifest`] lists every composed image and every launcher-icon
//! bucket. [`AssetManifest::default`] is the stock Play Store set; a JSON
//! manifest can replace any part of it.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "outputDir": "tools/play_store_assets",
//!   "fontFamily": "Arial",
//!   "fontDirs": [],
//!   "compositions": [
//!     {
//!       "fileName": "feature_graphic_1024x500.png",
//!       "group": "listing",
//!       "width": 1024,
//!       "height": 500,
//!       "background": { "solid": { "color": "#3ddc84" } },
//!       "texts": [
//!         { "text": "Android News", "fontSize": 90.0, "color": "#ffffff", "anchor": { "top": 150 } }
//!       ]
//!     }
//!   ],
//!   "launcherIcons": {
//!     "master": "tools/play_store_assets/app_icon_512.png",
//!     "resDir": "android/app/src/main/res",
//!     "fileName": "ic_launcher.png",
//!     "buckets": [{ "name": "mipmap-mdpi", "edgeLength": 48 }]
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use storefront_assets::AssetManifest;
//!
//! let manifest = AssetManifest::default();
//! let json = manifest.to_json().unwrap();
//! let restored = AssetManifest::from_json(&json).unwrap();
//! assert_eq!(restored, manifest);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::compose::{Anchor, Background, TextBlock};
use crate::error::{Error, Result};
use crate::resize::ResizeTarget;

const ANDROID_GREEN: Srgb<u8> = Srgb::new(61, 220, 132);
const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);

// ============================================================================
// Colour Serialization
// ============================================================================

/// Serializes colours as `#rrggbb` strings.
mod hex_color {
    use std::str::FromStr;

    use palette::Srgb;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(color: &Srgb<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&crate::compose::markup::hex_color(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Srgb<u8>, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Srgb::from_str(&hex)
            .map_err(|err| de::Error::custom(format!("invalid colour {hex:?}: {err}")))
    }
}

// ============================================================================
// Composition Settings
// ============================================================================

/// Which generator step an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetGroup {
    /// Store listing graphics: the app icon and the feature banner.
    Listing,
    /// Phone and tablet screenshot placeholders.
    Screenshots,
}

/// Serializable version of [`Background`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundSettings {
    Solid {
        #[serde(with = "hex_color")]
        color: Srgb<u8>,
    },
    Circle {
        #[serde(with = "hex_color")]
        color: Srgb<u8>,
        margin: u32,
    },
}

impl From<BackgroundSettings> for Background {
    fn from(settings: BackgroundSettings) -> Self {
        match settings {
            BackgroundSettings::Solid { color } => Self::Solid(color),
            BackgroundSettings::Circle { color, margin } => Self::Circle { color, margin },
        }
    }
}

impl From<Background> for BackgroundSettings {
    fn from(background: Background) -> Self {
        match background {
            Background::Solid(color) => Self::Solid { color },
            Background::Circle { color, margin } => Self::Circle { color, margin },
        }
    }
}

/// Serializable version of [`Anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorSettings {
    Center {
        #[serde(default)]
        bias: i32,
    },
    Top(i32),
    Bottom(i32),
}

impl Default for AnchorSettings {
    fn default() -> Self {
        Self::Center { bias: 0 }
    }
}

impl From<AnchorSettings> for Anchor {
    fn from(settings: AnchorSettings) -> Self {
        match settings {
            AnchorSettings::Center { bias } => Self::Center { bias },
            AnchorSettings::Top(row) => Self::Top(row),
            AnchorSettings::Bottom(offset) => Self::Bottom(offset),
        }
    }
}

/// One line of text in a composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSettings {
    pub text: String,

    /// Requested size in pixels.
    pub font_size: f32,

    #[serde(with = "hex_color")]
    pub color: Srgb<u8>,

    #[serde(default)]
    pub anchor: AnchorSettings,
}

impl TextSettings {
    fn new(text: impl Into<String>, font_size: f32, anchor: AnchorSettings) -> Self {
        Self {
            text: text.into(),
            font_size,
            color: WHITE,
            anchor,
        }
    }
}

impl From<&TextSettings> for TextBlock {
    fn from(settings: &TextSettings) -> Self {
        TextBlock::new(
            settings.text.clone(),
            settings.font_size,
            settings.color,
            settings.anchor.into(),
        )
    }
}

/// One composed image and the file it is written to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionSettings {
    pub file_name: String,
    pub group: AssetGroup,
    pub width: u32,
    pub height: u32,
    pub background: BackgroundSettings,
    #[serde(default)]
    pub texts: Vec<TextSettings>,
}

impl CompositionSettings {
    /// The text blocks in drawing order.
    pub fn blocks(&self) -> Vec<TextBlock> {
        self.texts.iter().map(TextBlock::from).collect()
    }

    fn validate(&self) -> Result<()> {
        if self.file_name.is_empty() {
            return Err(invalid("composition", "file name is empty"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid(
                &self.file_name,
                format!("dimensions must be positive, got {}x{}", self.width, self.height),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Launcher Icon Settings
// ============================================================================

/// A named density bucket and its icon edge length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MipmapBucket {
    pub name: String,
    pub edge_length: u32,
}

impl MipmapBucket {
    fn new(name: &str, edge_length: u32) -> Self {
        Self {
            name: name.to_string(),
            edge_length,
        }
    }
}

/// Where launcher icons come from and where they go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LauncherIconSettings {
    /// The master image to downscale.
    pub master: PathBuf,

    /// Directory holding one subdirectory per bucket.
    pub res_dir: PathBuf,

    /// File name written inside each bucket directory.
    pub file_name: String,

    pub buckets: Vec<MipmapBucket>,
}

impl LauncherIconSettings {
    /// The buckets as resize targets, in order.
    pub fn targets(&self) -> Vec<ResizeTarget> {
        self.buckets
            .iter()
            .map(|bucket| ResizeTarget::new(bucket.name.clone(), bucket.edge_length))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.file_name.is_empty() {
            return Err(invalid("launcherIcons", "file name is empty"));
        }
        for bucket in &self.buckets {
            if bucket.name.is_empty() {
                return Err(invalid("launcherIcons", "bucket name is empty"));
            }
            if bucket.edge_length == 0 {
                return Err(invalid(&bucket.name, "edge length must be positive"));
            }
        }
        Ok(())
    }
}

impl Default for LauncherIconSettings {
    fn default() -> Self {
        Self {
            master: PathBuf::from("tools/play_store_assets/app_icon_512.png"),
            res_dir: PathBuf::from("android/app/src/main/res"),
            file_name: "ic_launcher.png".to_string(),
            buckets: vec![
                MipmapBucket::new("mipmap-mdpi", 48),
                MipmapBucket::new("mipmap-hdpi", 72),
                MipmapBucket::new("mipmap-xhdpi", 96),
                MipmapBucket::new("mipmap-xxhdpi", 144),
                MipmapBucket::new("mipmap-xxxhdpi", 192),
            ],
        }
    }
}

// ============================================================================
// AssetManifest
// ============================================================================

/// Every asset a run produces.
///
/// Missing fields in a JSON manifest take their value from
/// [`AssetManifest::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetManifest {
    /// Directory the composed images are written to.
    pub output_dir: PathBuf,

    /// Scalable font family for all text.
    pub font_family: String,

    /// Extra directories to load fonts from.
    pub font_dirs: Vec<PathBuf>,

    pub compositions: Vec<CompositionSettings>,

    pub launcher_icons: LauncherIconSettings,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("tools/play_store_assets"),
            font_family: "Arial".to_string(),
            font_dirs: Vec::new(),
            compositions: [listing_compositions(), screenshot_compositions()].concat(),
            launcher_icons: LauncherIconSettings::default(),
        }
    }
}

impl AssetManifest {
    /// Compositions in `group`, in manifest order.
    pub fn group(&self, group: AssetGroup) -> impl Iterator<Item = &CompositionSettings> {
        self.compositions.iter().filter(move |c| c.group == group)
    }

    /// Checks every entry describes a producible output.
    pub fn validate(&self) -> Result<()> {
        for composition in &self.compositions {
            composition.validate()?;
        }
        self.launcher_icons.validate()
    }

    /// Serializes the manifest to a JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the manifest to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses and validates a manifest.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reads, parses and validates the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::ReadManifest {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

fn invalid(entry: &str, reason: impl Into<String>) -> Error {
    Error::InvalidEntry {
        entry: entry.to_string(),
        reason: reason.into(),
    }
}

// ============================================================================
// Stock Tables
// ============================================================================

fn listing_compositions() -> Vec<CompositionSettings> {
    vec![
        CompositionSettings {
            file_name: "app_icon_512.png".to_string(),
            group: AssetGroup::Listing,
            width: 512,
            height: 512,
            background: BackgroundSettings::Circle {
                color: ANDROID_GREEN,
                margin: 20,
            },
            texts: vec![
                TextSettings::new("A", 280.0, AnchorSettings::Center { bias: -10 }),
                // Sits 80px above the bottom of the circle.
                TextSettings::new("NEWS", 48.0, AnchorSettings::Bottom(100)),
            ],
        },
        CompositionSettings {
            file_name: "feature_graphic_1024x500.png".to_string(),
            group: AssetGroup::Listing,
            width: 1024,
            height: 500,
            background: BackgroundSettings::Solid {
                color: ANDROID_GREEN,
            },
            texts: vec![
                TextSettings::new("Android News", 90.0, AnchorSettings::Top(150)),
                TextSettings::new(
                    "Tutte le notizie tech italiane in un'unica app",
                    40.0,
                    AnchorSettings::Top(280),
                ),
            ],
        },
    ]
}

fn screenshot_compositions() -> Vec<CompositionSettings> {
    let screens = [
        ("Android News - Home", "screenshot_1_home.png"),
        ("Android News - Articles", "screenshot_2_articles.png"),
        ("Android News - Settings", "screenshot_3_settings.png"),
        ("Android News - Sources", "screenshot_4_sources.png"),
    ];

    let screenshot = |text: String, file_name: String, width: u32, height: u32| {
        CompositionSettings {
            file_name,
            group: AssetGroup::Screenshots,
            width,
            height,
            background: BackgroundSettings::Solid {
                color: ANDROID_GREEN,
            },
            texts: vec![TextSettings::new(text, 60.0, AnchorSettings::default())],
        }
    };

    let phones = screens
        .iter()
        .map(|(text, file)| screenshot(text.to_string(), file.to_string(), 1080, 1920));
    let tablets_7 = screens.iter().take(2).enumerate().map(|(i, (text, _))| {
        screenshot(format!("{text} (Tablet)"), format!("tablet_7_{}.png", i + 1), 1080, 1920)
    });
    let tablets_10 = screens.iter().take(2).enumerate().map(|(i, (text, _))| {
        screenshot(
            format!("{text} (Tablet 10\")"),
            format!("tablet_10_{}.png", i + 1),
            1920,
            1080,
        )
    });

    phones.chain(tablets_7).chain(tablets_10).collect()
}
