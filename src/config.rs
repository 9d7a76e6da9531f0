//! Configuration for polyclip sessions
//!
//! Stored as JSON at `<config dir>/polyclip/config.json`. Missing fields
//! fall back to their defaults, so older files keep loading.

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::Rgba;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::editor::HIT_RADIUS;

/// Resampling filter for regions whose raster drifted from their box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Serializable RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Default for BackgroundColor {
    fn default() -> Self {
        // White page
        Self {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        }
    }
}

impl From<BackgroundColor> for Rgba<u8> {
    fn from(c: BackgroundColor) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Distance in source pixels within which a press grabs an existing point
    pub hit_radius: f32,
    /// Fill of reconstructed pages
    pub background: BackgroundColor,
    pub resize_filter: ResizeFilter,
    /// Where exports go (None = Pictures folder)
    pub export_dir: Option<PathBuf>,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            hit_radius: HIT_RADIUS,
            background: BackgroundColor::default(),
            resize_filter: ResizeFilter::default(),
            export_dir: None,
        }
    }
}

impl ClipConfig {
    pub const APP_DIR: &'static str = "polyclip";
    pub const FILE_NAME: &'static str = "config.json";

    /// Default location of the config file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join(Self::FILE_NAME))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {err:?}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("No config directory, cannot save config");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {err:?}");
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Replace values that would break the editor
    fn sanitized(mut self) -> Self {
        if !self.hit_radius.is_finite() || self.hit_radius <= 0.0 {
            log::warn!(
                "Invalid hit_radius {}, using {HIT_RADIUS}",
                self.hit_radius
            );
            self.hit_radius = HIT_RADIUS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClipConfig::default();
        assert_eq!(config.hit_radius, 20.0);
        assert_eq!(Rgba::from(config.background), Rgba([255, 255, 255, 255]));
        assert_eq!(FilterType::from(config.resize_filter), FilterType::Lanczos3);
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "resize_filter": "nearest", "background": {"r": 0, "g": 0, "b": 0} }"#)
            .unwrap();

        let config = ClipConfig::load_from(&path).unwrap();
        assert_eq!(config.resize_filter, ResizeFilter::Nearest);
        assert_eq!(Rgba::from(config.background), Rgba([0, 0, 0, 255]));
        assert_eq!(config.hit_radius, 20.0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = ClipConfig {
            hit_radius: 12.5,
            export_dir: Some(dir.path().to_path_buf()),
            ..ClipConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(ClipConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_radius_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "hit_radius": -3.0 }"#).unwrap();
        assert_eq!(ClipConfig::load_from(&path).unwrap().hit_radius, 20.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(ClipConfig::load_from(&path).is_err());
    }
}
