use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use serde::de::Deserializer;

const DEFAULT_DATA_SOURCE: &str = "data.json";

/// Where the gallery document is fetched from at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_DATA_SOURCE))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

impl<'de> Deserialize<'de> for DataSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SlideshowOptions {
    /// Time between automatic page advances.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Pause between two unit steps of the time-progress bar.
    #[serde(with = "humantime_serde")]
    pub progress_step: Duration,
}

impl SlideshowOptions {
    const fn default_interval() -> Duration {
        Duration::from_millis(3000)
    }

    const fn default_progress_step() -> Duration {
        Duration::from_millis(26)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.interval > Duration::ZERO,
            "slideshow.interval must be positive"
        );
        ensure!(
            self.progress_step > Duration::ZERO,
            "slideshow.progress-step must be positive"
        );
        Ok(())
    }
}

impl Default for SlideshowOptions {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
            progress_step: Self::default_progress_step(),
        }
    }
}

/// Viewport breakpoints and the number of gallery columns used on each side of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LayoutOptions {
    /// Smallest width (px) that gets the tablet column count.
    pub tablet_min_width: u32,
    /// Smallest width (px) that gets the desktop column count.
    pub desktop_min_width: u32,
    pub mobile_columns: usize,
    pub tablet_columns: usize,
    pub desktop_columns: usize,
}

impl LayoutOptions {
    const fn default_tablet_min_width() -> u32 {
        768
    }

    const fn default_desktop_min_width() -> u32 {
        1440
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.tablet_min_width < self.desktop_min_width,
            "layout.tablet-min-width must be smaller than layout.desktop-min-width"
        );
        ensure!(
            self.mobile_columns >= 1 && self.tablet_columns >= 1 && self.desktop_columns >= 1,
            "layout column counts must be at least 1"
        );
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            tablet_min_width: Self::default_tablet_min_width(),
            desktop_min_width: Self::default_desktop_min_width(),
            mobile_columns: 1,
            tablet_columns: 2,
            desktop_columns: 4,
        }
    }
}

/// How the position indicator behaves when the gallery holds a single item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SingleItemPosition {
    /// The only item is also the last one: draw a full bar.
    #[default]
    Full,
    Hidden,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PositionIndicatorOptions {
    pub single_item: SingleItemPosition,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// JSON document listing the gallery items (path or http(s) URL).
    pub data_source: DataSource,
    /// Viewport width (px) assumed until the first resize command.
    pub viewport_width: u32,
    pub slideshow: SlideshowOptions,
    pub layout: LayoutOptions,
    pub position_indicator: PositionIndicatorOptions,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(self.viewport_width > 0, "viewport-width must be greater than zero");
        if let DataSource::File(path) = &self.data_source {
            ensure!(
                !path.as_os_str().is_empty(),
                "data-source must not be empty"
            );
        }
        self.slideshow
            .validate()
            .context("invalid slideshow configuration")?;
        self.layout
            .validate()
            .context("invalid layout configuration")?;
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            data_source: DataSource::default(),
            viewport_width: 1024,
            slideshow: SlideshowOptions::default(),
            layout: LayoutOptions::default(),
            position_indicator: PositionIndicatorOptions::default(),
        }
    }
}
