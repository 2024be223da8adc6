//! Editor tunables, loadable from a JSON file.

use crate::error::MapError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_base_cell_px() -> f32 {
    40.0
}
fn default_min_zoom() -> f32 {
    0.15
}
fn default_max_zoom() -> f32 {
    1.5
}
fn default_zoom_step() -> f32 {
    0.1
}
fn one() -> f32 {
    1.0
}
fn default_drag_sensitivity() -> f32 {
    2.5
}
fn default_viewport_tiles() -> [u32; 2] {
    [15, 15]
}
fn default_palette_width() -> u32 {
    100
}
fn default_status_frames() -> u32 {
    180
}
fn default_error_status_frames() -> u32 {
    300
}
fn default_recenter_status_frames() -> u32 {
    60
}
fn default_map_extension() -> String {
    "dungeon".to_owned()
}
fn default_map_path() -> String {
    "map.dungeon".to_owned()
}

/// Tunables for camera, input and status handling.
///
/// Every field falls back to its default when absent from the file, so a
/// config only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Pixel size of one cell at zoom 1.0.
    #[serde(default = "default_base_cell_px")]
    pub base_cell_px: f32,
    /// Lower zoom bound.
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f32,
    /// Upper zoom bound.
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f32,
    /// Zoom change per wheel notch.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
    /// Zoom used at startup and for maps saved without one.
    #[serde(default = "one")]
    pub initial_zoom: f32,
    /// Drag divisor; higher means a slower pan.
    #[serde(default = "default_drag_sensitivity")]
    pub drag_sensitivity: f32,
    /// Cells panned per key tick at zoom 1.0.
    #[serde(default = "one")]
    pub scroll_speed: f32,
    /// Canvas size in cells at zoom 1.0 (width, height).
    #[serde(default = "default_viewport_tiles")]
    pub viewport_tiles: [u32; 2],
    /// Width of the palette column right of the canvas.
    #[serde(default = "default_palette_width")]
    pub palette_width: u32,
    /// Frames a neutral status message stays up.
    #[serde(default = "default_status_frames")]
    pub status_frames: u32,
    /// Frames an error status message stays up.
    #[serde(default = "default_error_status_frames")]
    pub error_status_frames: u32,
    /// Frames the recenter notice stays up.
    #[serde(default = "default_recenter_status_frames")]
    pub recenter_status_frames: u32,
    /// Extension offered by the save/open dialogs.
    #[serde(default = "default_map_extension")]
    pub map_extension: String,
    /// Path used when no native dialog is available.
    #[serde(default = "default_map_path")]
    pub default_map_path: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            base_cell_px: default_base_cell_px(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_step: default_zoom_step(),
            initial_zoom: one(),
            drag_sensitivity: default_drag_sensitivity(),
            scroll_speed: one(),
            viewport_tiles: default_viewport_tiles(),
            palette_width: default_palette_width(),
            status_frames: default_status_frames(),
            error_status_frames: default_error_status_frames(),
            recenter_status_frames: default_recenter_status_frames(),
            map_extension: default_map_extension(),
            default_map_path: default_map_path(),
        }
    }
}

impl EditorConfig {
    /// Loads a config file, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("Reading config file {}", path.display()))?;
        let cfg = Self::from_json(&txt)
            .with_context(|| format!("Parsing config file {}", path.display()))?;
        Ok(cfg)
    }

    /// Parses and validates a config from JSON text.
    pub fn from_json(txt: &str) -> Result<Self, MapError> {
        let cfg: Self = serde_json::from_str(txt).map_err(|source| MapError::Json {
            path: "<config>".into(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the invariants the camera math relies on.
    pub fn validate(&self) -> Result<(), MapError> {
        let floats = [
            ("base_cell_px", self.base_cell_px),
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("zoom_step", self.zoom_step),
            ("initial_zoom", self.initial_zoom),
            ("drag_sensitivity", self.drag_sensitivity),
            ("scroll_speed", self.scroll_speed),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MapError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.base_cell_px < 2.0 {
            return Err(MapError::InvalidConfig(
                "base_cell_px must be at least 2".into(),
            ));
        }
        if self.min_zoom <= 0.0 || self.min_zoom > self.max_zoom {
            return Err(MapError::InvalidConfig(format!(
                "zoom range [{}, {}] is empty or non-positive",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.initial_zoom) {
            return Err(MapError::InvalidConfig(format!(
                "initial_zoom {} outside [{}, {}]",
                self.initial_zoom, self.min_zoom, self.max_zoom
            )));
        }
        if self.zoom_step <= 0.0 {
            return Err(MapError::InvalidConfig("zoom_step must be positive".into()));
        }
        if self.drag_sensitivity <= 0.0 {
            return Err(MapError::InvalidConfig(
                "drag_sensitivity must be positive".into(),
            ));
        }
        if self.viewport_tiles[0] == 0 || self.viewport_tiles[1] == 0 {
            return Err(MapError::InvalidConfig(
                "viewport_tiles must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Canvas size in pixels; fixed regardless of zoom.
    pub fn canvas_px(&self) -> (f32, f32) {
        (
            self.viewport_tiles[0] as f32 * self.base_cell_px,
            self.viewport_tiles[1] as f32 * self.base_cell_px,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = EditorConfig::from_json(r#"{ "max_zoom": 2.0 }"#).expect("parse");
        assert_eq!(cfg.max_zoom, 2.0);
        assert_eq!(cfg.min_zoom, 0.15);
        assert_eq!(cfg.base_cell_px, 40.0);
        assert_eq!(cfg.viewport_tiles, [15, 15]);
    }

    #[test]
    fn rejects_inverted_zoom_range() {
        let err = EditorConfig::from_json(r#"{ "min_zoom": 2.0, "max_zoom": 1.0 }"#)
            .expect_err("should reject");
        assert!(matches!(err, MapError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_initial_zoom_out_of_range() {
        let err = EditorConfig::from_json(r#"{ "initial_zoom": 3.0 }"#).expect_err("should reject");
        assert!(matches!(err, MapError::InvalidConfig(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = EditorConfig::load("/definitely/not/here/dungeon_mapper.json").expect("defaults");
        assert_eq!(cfg, EditorConfig::default());
    }

    #[test]
    fn canvas_is_tiles_times_base() {
        assert_eq!(EditorConfig::default().canvas_px(), (600.0, 600.0));
    }
}
