//! Persisted user settings.
//!
//! Stored as `settings.json` in the OS config directory. Every field carries
//! a default so a partial or hand-edited file still loads.

use std::path::{Path, PathBuf};

use egui::{Color32, Stroke};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::links::LinkMetrics;
use crate::model::demo::DemoParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Connector stroke colour.
    #[serde(with = "hex_color")]
    pub link_color: Color32,
    pub link_width: f32,
    pub row_height: f32,
    /// Item bar height as a fraction of the row height.
    pub item_height_ratio: f32,
    pub min_overlay_size: f32,
    pub pixels_per_hour: f32,
    pub demo_group_count: usize,
    pub demo_item_count: usize,
    pub demo_days_in_past: u32,
    pub demo_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            link_color: Color32::from_rgb(229, 57, 53),
            link_width: 2.0,
            row_height: 30.0,
            item_height_ratio: 0.75,
            min_overlay_size: 2.0,
            pixels_per_hour: 40.0,
            demo_group_count: 20,
            demo_item_count: 200,
            demo_days_in_past: 10,
            demo_seed: None,
        }
    }
}

const MIN_ROW_HEIGHT: f32 = 8.0;
const MIN_OVERLAY_SIZE: f32 = 1.0;

impl Settings {
    /// Row height, never smaller than a usable bar.
    pub fn clamped_row_height(&self) -> f32 {
        if self.row_height.is_finite() {
            self.row_height.max(MIN_ROW_HEIGHT)
        } else {
            MIN_ROW_HEIGHT
        }
    }

    pub fn item_height(&self) -> f32 {
        self.clamped_row_height() * self.item_height_ratio.clamp(0.1, 1.0)
    }

    pub fn link_stroke(&self) -> Stroke {
        Stroke::new(self.link_width, self.link_color)
    }

    pub fn link_metrics(&self) -> LinkMetrics {
        LinkMetrics {
            item_height: self.item_height(),
            min_size: if self.min_overlay_size.is_finite() {
                self.min_overlay_size.max(MIN_OVERLAY_SIZE)
            } else {
                MIN_OVERLAY_SIZE
            },
        }
    }

    pub fn demo_params(&self) -> DemoParams {
        DemoParams {
            group_count: self.demo_group_count,
            item_count: self.demo_item_count,
            days_in_past: self.demo_days_in_past,
            seed: self.demo_seed,
        }
    }
}

/// Loaded settings together with where they live on disk.
pub struct SettingsStore {
    pub settings: Settings,
    path: PathBuf,
}

impl SettingsStore {
    /// Load from the OS config directory, falling back to defaults.
    pub fn load() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("{e}; using ./settings.json");
                PathBuf::from("settings.json")
            }
        };
        let store = Self::load_from(path);
        // Write the defaults out once so there is a file to edit.
        if !store.path.exists() {
            if let Err(e) = store.save() {
                warn!("could not write default settings: {e}");
            }
        }
        store
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match read_settings(&path) {
            Ok(Some(settings)) => {
                debug!(path = %path.display(), "settings loaded");
                settings
            }
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!("ignoring settings file: {e}");
                Settings::default()
            }
        };
        Self { settings, path }
    }

    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| AppError::io(dir, e))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.settings)?;
        std::fs::write(&self.path, json).map_err(|e| AppError::io(&self.path, e))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    fn default_path() -> Result<PathBuf> {
        directories::ProjectDirs::from("", "", "TimelineLinks")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or(AppError::NoConfigDir)
    }
}

fn read_settings(path: &Path) -> Result<Option<Settings>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(AppError::io(path, e)),
    };
    Ok(Some(serde_json::from_str(&contents)?))
}

/// `#RRGGBB` / `#RRGGBBAA` colour strings.
pub mod hex_color {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        if a == 255 {
            serializer.serialize_str(&format!("#{:02X}{:02X}{:02X}", r, g, b))
        } else {
            serializer.serialize_str(&format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub fn parse(s: &str) -> Result<Color32, String> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| format!("invalid hex color '{}'", s))
        };
        match hex.len() {
            6 => Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color32::from_rgba_unmultiplied(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => Err(format!(
                "invalid hex color '{}': expected 6 or 8 hex digits",
                s
            )),
        }
    }
}
