//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wv_core::{LayoutConfig, LayoutScale};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON events file.
    pub events_path: PathBuf,

    /// Viewer timezone (IANA name). Falls back to the system zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Geometry settings.
    #[serde(default)]
    pub layout: LayoutSettings,
}

/// Unit system for vertical geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Positions as a percentage of the day column.
    #[default]
    Percent,
    /// Positions in pixels, `hour_height` per hour.
    Pixels,
}

/// Layout section of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub mode: LayoutMode,
    /// Pixel height of one hour in `pixels` mode.
    pub hour_height: f64,
    /// Horizontal stagger between overlapping events.
    pub shift: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Percent,
            hour_height: 48.0,
            shift: 10.0,
        }
    }
}

impl LayoutSettings {
    /// Engine parameters for these settings.
    pub const fn to_layout_config(&self) -> LayoutConfig {
        let scale = match self.mode {
            LayoutMode::Percent => LayoutScale::Percent,
            LayoutMode::Pixels => LayoutScale::Pixels {
                hour_height: self.hour_height,
            },
        };
        LayoutConfig {
            scale,
            shift: self.shift,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            events_path: data_dir.join("events.json"),
            timezone: None,
            layout: LayoutSettings::default(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations, optionally layering a
    /// specific file on top.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // WV_TIMEZONE, WV_LAYOUT__MODE, ...
        figment = figment.merge(Env::prefixed("WV_").split("__"));

        figment.extract()
    }

    /// Resolves the viewer timezone: explicit override, then config, then
    /// the system zone, then UTC.
    pub fn viewer_timezone(&self, override_tz: Option<&str>) -> String {
        override_tz
            .map(str::to_string)
            .or_else(|| self.timezone.clone())
            .or_else(|| iana_time_zone::get_timezone().ok())
            .unwrap_or_else(|| "UTC".to_string())
    }
}

/// Returns the platform-specific config directory for wv.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wv"))
}

/// Returns the platform-specific data directory for wv.
///
/// On Linux: `~/.local/share/wv`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("wv"))
}
