//! Configuration file and environment settings.
//!
//! Settings come from an optional TOML file and `HOSTWATCH_*` environment
//! variables (nested keys use `__`, e.g. `HOSTWATCH_MAP__ZOOM=4`).
//!
//! ```toml
//! stale_after = "90s"
//! refresh = 1
//!
//! [icons]
//! up = "marker-single-up.png"
//! down = "marker-single-down.png"
//! shadow = "marker-shadow.png"
//!
//! [map]
//! latitude = 47.5
//! longitude = -120.5
//! zoom = 6
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::data::marker::{DEFAULT_DOWN_ICON, DEFAULT_SHADOW, DEFAULT_UP_ICON};
use crate::data::MarkerSet;

/// Top-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// How long without a report before the data is flagged as too old.
    #[serde(default = "default_stale_after")]
    pub stale_after: String,
    /// File poll interval in seconds.
    #[serde(default = "default_refresh")]
    pub refresh: u64,
    #[serde(default)]
    pub icons: IconSettings,
    #[serde(default)]
    pub map: MapSettings,
}

fn default_stale_after() -> String {
    "60s".to_string()
}

fn default_refresh() -> u64 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stale_after: default_stale_after(),
            refresh: default_refresh(),
            icons: IconSettings::default(),
            map: MapSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (if it exists) and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("HOSTWATCH").separator("__"))
            .build()
            .with_context(|| format!("loading configuration from {}", path.display()))?;

        Ok(settings.try_deserialize()?)
    }

    pub fn stale_after(&self) -> Result<Duration> {
        parse_duration(&self.stale_after)
            .with_context(|| format!("invalid stale_after value {:?}", self.stale_after))
    }

    /// Build the marker assets from the configured icon paths.
    pub fn marker_set(&self) -> MarkerSet {
        MarkerSet::new(&self.icons.up, &self.icons.down, &self.icons.shadow)
    }
}

/// Marker image references.
#[derive(Debug, Clone, Deserialize)]
pub struct IconSettings {
    #[serde(default = "default_up_icon")]
    pub up: String,
    #[serde(default = "default_down_icon")]
    pub down: String,
    #[serde(default = "default_shadow")]
    pub shadow: String,
}

fn default_up_icon() -> String {
    DEFAULT_UP_ICON.to_string()
}

fn default_down_icon() -> String {
    DEFAULT_DOWN_ICON.to_string()
}

fn default_shadow() -> String {
    DEFAULT_SHADOW.to_string()
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            up: default_up_icon(),
            down: default_down_icon(),
            shadow: default_shadow(),
        }
    }
}

/// Initial map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MapSettings {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            zoom: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/hostwatch.toml")).unwrap();
        assert_eq!(settings.stale_after().unwrap(), Duration::from_secs(60));
        assert_eq!(settings.refresh, 1);
        assert_eq!(settings.icons.up, DEFAULT_UP_ICON);
        assert_eq!(settings.map, MapSettings::default());
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
stale_after = "2m"
refresh = 5

[icons]
down = "red.png"

[map]
latitude = 47.5
longitude = -120.5
zoom = 6
"#
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.stale_after().unwrap(), Duration::from_secs(120));
        assert_eq!(settings.refresh, 5);
        assert_eq!(settings.icons.down, "red.png");
        assert_eq!(settings.icons.up, DEFAULT_UP_ICON);
        assert_eq!(settings.map.zoom, 6);
        assert_eq!(settings.map.latitude, 47.5);

        let markers = settings.marker_set();
        assert_eq!(markers.select(crate::data::HostState::Down).icon, "red.png");
    }

    #[test]
    fn test_bad_stale_after_is_an_error() {
        let settings = Settings {
            stale_after: "whenever".to_string(),
            ..Settings::default()
        };
        assert!(settings.stale_after().is_err());
    }
}
