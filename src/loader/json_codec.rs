// src/loader/json_codec.rs
//! Map documents: JSON encoding, tolerant decoding and atomic file writes.

use crate::config::EditorConfig;
use crate::error::MapError;
use crate::notes::NoteStore;
use crate::spatial::{CellCoord, TileGrid};
use crate::tiles::TileKind;
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize)]
struct JsonCamera {
    x: f32,
    y: f32,
}

#[derive(Serialize)]
struct JsonMapOut<'a> {
    grid: BTreeMap<String, u32>,
    notes: BTreeMap<String, &'a str>,
    camera: JsonCamera,
    zoom: f32,
}

#[derive(Deserialize)]
struct JsonMap {
    grid: BTreeMap<String, JsonValue>,
    #[serde(default)]
    notes: BTreeMap<String, JsonValue>,
    #[serde(default)]
    camera: Option<JsonCamera>,
    #[serde(default)]
    zoom: Option<f32>,
}

/// A complete map as held in memory: tiles, notes and the view it was saved with.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSnapshot {
    /// Tiles, entrance included.
    pub grid: TileGrid,
    /// Cell notes.
    pub notes: NoteStore,
    /// Camera position.
    pub camera: Vec2,
    /// Zoom, within the configured bounds.
    pub zoom: f32,
}

impl MapSnapshot {
    /// Serialises the snapshot. See [`encode_map`].
    pub fn encode(&self) -> Result<String, MapError> {
        encode_map(&self.grid, &self.notes, self.camera, self.zoom)
    }
}

/// A decoded map plus the entries that had to be dropped on the way.
#[derive(Debug)]
pub struct Decoded {
    /// Everything that loaded.
    pub snapshot: MapSnapshot,
    /// `InvalidCoordinateKey`, `UnknownTileId` or `InvalidNote` for every
    /// skipped entry.
    pub skipped: Vec<MapError>,
}

/// `"{x},{y}"`, the on-disk key of a cell.
pub fn cell_key(cell: CellCoord) -> String {
    format!("{},{}", cell.x, cell.y)
}

/// Parses `"x,y"`. The older `"(x, y)"` form is accepted as well.
pub fn parse_cell_key(key: &str) -> Result<CellCoord, MapError> {
    let invalid = || MapError::InvalidCoordinateKey {
        key: key.to_owned(),
    };

    let mut body = key.trim();
    if let Some(inner) = body.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
        body = inner;
    }
    let (xs, ys) = body.split_once(',').ok_or_else(invalid)?;
    let x = xs.trim().parse::<i32>().map_err(|_| invalid())?;
    let y = ys.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(CellCoord::new(x, y))
}

/// Serialises a map to pretty JSON. The entrance is left out since every load
/// puts it back; keys come out sorted so identical maps give identical files.
pub fn encode_map(
    grid: &TileGrid,
    notes: &NoteStore,
    camera: Vec2,
    zoom: f32,
) -> Result<String, MapError> {
    let doc = JsonMapOut {
        grid: grid
            .painted()
            .map(|(cell, kind)| (cell_key(cell), kind.id()))
            .collect(),
        notes: notes.iter().map(|(cell, text)| (cell_key(cell), text)).collect(),
        camera: JsonCamera {
            x: camera.x,
            y: camera.y,
        },
        zoom,
    };

    serde_json::to_string_pretty(&doc).map_err(|source| MapError::Json {
        path: PathBuf::from("<memory>"),
        source,
    })
}

/// Decodes map text. See [`decode_map_at`].
pub fn decode_map(txt: &str, cfg: &EditorConfig) -> Result<Decoded, MapError> {
    decode_map_at(txt, Path::new("<memory>"), cfg)
}

/// Decodes map text read from `path`.
///
/// Broken JSON or a wrong top-level shape fails the whole load. Entries with
/// unreadable keys, unusable tile ids or non-text notes are skipped and
/// reported in [`Decoded::skipped`]. A missing camera recentres, a missing
/// zoom uses the configured initial zoom, and the zoom is clamped to the
/// configured bounds. The entrance is always re-asserted.
pub fn decode_map_at(txt: &str, path: &Path, cfg: &EditorConfig) -> Result<Decoded, MapError> {
    let raw: JsonValue = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let j: JsonMap =
        serde_json::from_value(raw).map_err(|e| MapError::MalformedDocument(e.to_string()))?;

    let camera = match j.camera {
        Some(JsonCamera { x, y }) => vec2(x, y),
        None => -vec2(
            cfg.viewport_tiles[0] as f32 / 2.0,
            cfg.viewport_tiles[1] as f32 / 2.0,
        ),
    };
    if !camera.is_finite() {
        return Err(MapError::MalformedDocument(format!(
            "camera position {camera:?} is not finite"
        )));
    }

    let zoom = j.zoom.unwrap_or(cfg.initial_zoom);
    if !zoom.is_finite() {
        return Err(MapError::MalformedDocument(format!("zoom {zoom} is not finite")));
    }
    let zoom = zoom.clamp(cfg.min_zoom, cfg.max_zoom);

    let mut skipped = Vec::new();

    let mut grid = TileGrid::new();
    for (key, value) in j.grid {
        let cell = match parse_cell_key(&key) {
            Ok(cell) => cell,
            Err(e) => {
                skipped.push(e);
                continue;
            }
        };
        let kind = value
            .as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .and_then(TileKind::from_id);
        match kind {
            Some(kind) if kind.is_placeable() && !cell.is_origin() => {
                grid.paint(cell, kind);
            }
            // an older save may list the entrance explicitly
            Some(TileKind::Entrance) if cell.is_origin() => {}
            _ => skipped.push(MapError::UnknownTileId { key, id: value }),
        }
    }
    grid.assert_entrance();

    let mut notes = NoteStore::new();
    for (key, value) in j.notes {
        let cell = match parse_cell_key(&key) {
            Ok(cell) => cell,
            Err(e) => {
                skipped.push(e);
                continue;
            }
        };
        match value.as_str() {
            Some(text) => {
                notes.set_note(cell, text);
            }
            None => skipped.push(MapError::InvalidNote { key }),
        }
    }

    for e in &skipped {
        log::warn!("skipped map entry: {e}");
    }

    Ok(Decoded {
        snapshot: MapSnapshot {
            grid,
            notes,
            camera,
            zoom,
        },
        skipped,
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Writes the map next to `path` first and renames it into place, so a failed
/// save never truncates an existing file.
pub fn save_map_file(path: &Path, contents: &str) -> Result<(), MapError> {
    replace_file_with(path, |tmp| std::fs::write(tmp, contents))
}

/// Runs `write` against the temp path, then renames the result over `path`.
/// The temp file is gone afterwards whichever step fails.
fn replace_file_with<W>(path: &Path, write: W) -> Result<(), MapError>
where
    W: FnOnce(&Path) -> std::io::Result<()>,
{
    let tmp = temp_path_for(path);
    if let Err(source) = write(&tmp) {
        let _ = std::fs::remove_file(&tmp);
        return Err(MapError::Io { path: tmp, source });
    }
    if let Err(source) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(MapError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Reads and decodes a map file.
pub fn load_map_file(path: &Path, cfg: &EditorConfig) -> Result<Decoded, MapError> {
    let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_map_at(&txt, path, cfg)
}
