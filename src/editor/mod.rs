//! Editor controller: owns the map state and turns input into commands.

mod input;
mod picker;

pub use input::{Key, Modifiers, PointerButton};
#[cfg(feature = "native-dialogs")]
pub use picker::NativePicker;
pub use picker::{FilePicker, FixedPathPicker};

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::loader::json_codec::{encode_map, load_map_file, save_map_file, MapSnapshot};
use crate::notes::NoteStore;
use crate::render::cull::{query_visible_notes, query_visible_tiles, TileDraw};
use crate::spatial::{CellCoord, Sample, TileGrid};
use crate::tiles::TileKind;
use input::Gesture;
use macroquad::prelude::*;
use std::path::{Path, PathBuf};

/// Drag movements below this many (sensitivity-scaled) pixels are held back
/// until they add up.
const DRAG_DEADZONE: f32 = 0.1;

/// Everything the editor can be asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Save to the last path, asking for one the first time.
    Save,
    /// Always ask for a destination.
    SaveAs,
    /// Load from a path the picker supplies.
    Load,
    /// Make a palette entry the selection.
    SelectTile(TileKind),
    /// Pan by cells.
    Pan(f32, f32),
    /// Zoom by `direction` steps about a canvas pixel.
    ZoomAt(Vec2, f32),
    /// Bring the entrance back to the canvas centre.
    Recenter,
    /// Paint the selected tile.
    Paint(CellCoord),
    /// Clear a cell.
    Erase(CellCoord),
    /// Make the tile in a cell the selection.
    Pick(CellCoord),
    /// Store a note; blank text removes it.
    SetNote(CellCoord, String),
    /// Remove every tile and note.
    Clear,
}

/// Transient message shown under the canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLine {
    text: String,
    frames_left: u32,
}

impl StatusLine {
    /// Shows `text` for `frames` ticks.
    pub fn set(&mut self, text: impl Into<String>, frames: u32) {
        self.text = text.into();
        self.frames_left = frames;
    }

    /// Ages the message by one frame.
    pub fn tick(&mut self) {
        self.frames_left = self.frames_left.saturating_sub(1);
    }

    /// The message, while it is still due to be shown.
    pub fn current(&self) -> Option<&str> {
        (self.frames_left > 0).then_some(self.text.as_str())
    }
}

/// An open note edit. Closed by commit or cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEditor {
    /// Cell the note belongs to.
    pub cell: CellCoord,
    /// Text typed so far.
    pub buffer: String,
}

/// The map being edited and the view onto it.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// View onto the map.
    pub camera: Camera,
    /// Painted tiles.
    pub grid: TileGrid,
    /// Cell notes.
    pub notes: NoteStore,
    /// Active palette entry.
    pub selected: TileKind,
    /// Message under the canvas.
    pub status: StatusLine,
    /// Note being typed, if any.
    pub note_editor: Option<NoteEditor>,
    /// Where the map was last saved or loaded.
    pub last_path: Option<PathBuf>,
}

impl EditorState {
    /// Blank map with the entrance, Wall selected.
    pub fn new(cfg: &EditorConfig) -> Self {
        Self {
            camera: Camera::new(cfg),
            grid: TileGrid::new(),
            notes: NoteStore::new(),
            selected: TileKind::Wall,
            status: StatusLine::default(),
            note_editor: None,
            last_path: None,
        }
    }

    /// Copy of the persistent part of the state.
    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            grid: self.grid.clone(),
            notes: self.notes.clone(),
            camera: self.camera.position(),
            zoom: self.camera.zoom(),
        }
    }

    /// Replaces tiles, notes and view wholesale.
    pub fn install(&mut self, snapshot: MapSnapshot) {
        let MapSnapshot {
            grid,
            notes,
            camera,
            zoom,
        } = snapshot;
        self.grid = grid;
        self.grid.assert_entrance();
        self.notes = notes;
        self.camera.set_zoom(zoom);
        self.camera.set_position(camera);
        self.note_editor = None;
    }
}

/// Drives an [`EditorState`] from input events and commands.
pub struct Editor {
    state: EditorState,
    config: EditorConfig,
    gesture: Gesture,
    picker: Box<dyn FilePicker>,
}

impl Editor {
    /// Editor over a blank map.
    pub fn new(config: EditorConfig, picker: Box<dyn FilePicker>) -> Self {
        Self {
            state: EditorState::new(&config),
            config,
            gesture: Gesture::Idle,
            picker,
        }
    }

    /// Full editor state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Tunables the editor was built with.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current camera.
    pub fn camera(&self) -> &Camera {
        &self.state.camera
    }

    /// Current tiles.
    pub fn grid(&self) -> &TileGrid {
        &self.state.grid
    }

    /// Current notes.
    pub fn notes(&self) -> &NoteStore {
        &self.state.notes
    }

    /// Active palette entry.
    pub fn selected(&self) -> TileKind {
        self.state.selected
    }

    /// Status message, while it is still showing.
    pub fn status(&self) -> Option<&str> {
        self.state.status.current()
    }

    /// Note being typed, if any.
    pub fn note_editor(&self) -> Option<&NoteEditor> {
        self.state.note_editor.as_ref()
    }

    /// Whether a middle-button pan is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// Cell under a canvas pixel, for the coordinate read-out.
    pub fn hovered_cell(&self, px: Vec2) -> CellCoord {
        self.state.camera.cell_under(px)
    }

    /// Per-frame housekeeping: ages the status line and re-asserts the entrance.
    pub fn tick(&mut self) {
        self.state.status.tick();
        self.state.grid.assert_entrance();
    }

    /// Tiles to draw this frame.
    pub fn render_frame(&self, viewport_px: Vec2) -> Vec<TileDraw> {
        query_visible_tiles(&self.state.grid, &self.state.camera, viewport_px)
    }

    /// Note markers to draw this frame.
    pub fn render_notes(&self, viewport_px: Vec2) -> Vec<(CellCoord, Rect)> {
        query_visible_notes(&self.state.notes, &self.state.camera, viewport_px)
    }

    fn info(&mut self, text: impl Into<String>) {
        let frames = self.config.status_frames;
        self.state.status.set(text, frames);
    }

    fn error(&mut self, text: impl Into<String>) {
        let frames = self.config.error_status_frames;
        self.state.status.set(text, frames);
    }

    /// Executes one command.
    pub fn dispatch(&mut self, cmd: EditorCommand) {
        match cmd {
            EditorCommand::Save => {
                let path = self.state.last_path.clone();
                self.save(path);
            }
            EditorCommand::SaveAs => self.save(None),
            EditorCommand::Load => self.load(),
            EditorCommand::SelectTile(kind) => {
                if kind.is_palette_tile() {
                    self.state.selected = kind;
                }
            }
            EditorCommand::Pan(dx, dy) => self.state.camera.pan(dx, dy),
            EditorCommand::ZoomAt(px, direction) => {
                self.state.camera.zoom_at(px, direction);
            }
            EditorCommand::Recenter => {
                self.state.camera.recenter();
                let frames = self.config.recenter_status_frames;
                self.state.status.set("Centered on origin", frames);
            }
            EditorCommand::Paint(cell) => {
                self.state.grid.paint(cell, self.state.selected);
            }
            EditorCommand::Erase(cell) => {
                self.state.grid.erase(cell);
            }
            EditorCommand::Pick(cell) => match self.state.grid.sample_at(cell) {
                Sample::Picked(kind) => {
                    self.state.selected = kind;
                    self.info(format!("Picked {}", kind.name()));
                }
                Sample::Rejected(kind) => {
                    log::debug!("nothing to pick at {cell}: {}", kind.name());
                    self.info("Nothing to pick here");
                }
            },
            EditorCommand::SetNote(cell, text) => {
                self.state.notes.set_note(cell, &text);
            }
            EditorCommand::Clear => {
                self.commit_note();
                self.state.grid.clear();
                self.state.notes.clear();
                self.info("Map cleared");
            }
        }
    }

    fn save(&mut self, path: Option<PathBuf>) {
        self.commit_note();
        let Some(path) = path.or_else(|| self.picker.pick_save_destination()) else {
            self.info("Save cancelled.");
            return;
        };

        let result = encode_map(
            &self.state.grid,
            &self.state.notes,
            self.state.camera.position(),
            self.state.camera.zoom(),
        )
        .and_then(|txt| save_map_file(&path, &txt));

        match result {
            Ok(()) => {
                log::info!("saved map to {}", path.display());
                self.info(format!("Map saved: {}", file_label(&path)));
                self.state.last_path = Some(path);
            }
            Err(e) => {
                log::error!("saving map failed: {e}");
                self.error(format!("Error saving map: {e}"));
            }
        }
    }

    fn load(&mut self) {
        self.commit_note();
        let Some(path) = self.picker.pick_load_source() else {
            self.info("Load cancelled.");
            return;
        };

        match load_map_file(&path, &self.config) {
            Ok(decoded) => {
                let skipped = decoded.skipped.len();
                self.state.install(decoded.snapshot);
                self.gesture = Gesture::Idle;
                log::info!("loaded map from {} ({skipped} entries skipped)", path.display());
                let label = file_label(&path);
                if skipped == 0 {
                    self.info(format!("Map loaded: {label}"));
                } else {
                    self.info(format!("Map loaded: {label} ({skipped} entries skipped)"));
                }
                self.state.last_path = Some(path);
            }
            Err(e) => {
                log::error!("loading map failed: {e}");
                self.error(format!("Error loading map: {e}"));
            }
        }
    }

    /// Applies the selected tile or tool to `cell`.
    fn apply_tool(&mut self, cell: CellCoord) {
        match self.state.selected {
            TileKind::NoteMarker => self.open_note(cell),
            TileKind::ColorPicker => self.dispatch(EditorCommand::Pick(cell)),
            _ => self.dispatch(EditorCommand::Paint(cell)),
        }
    }

    /// Button press over the canvas. Commits an open note first.
    pub fn on_pointer_down(&mut self, px: Vec2, button: PointerButton) {
        if self.state.note_editor.is_some() {
            self.commit_note();
        }

        let cell = self.hovered_cell(px);
        self.gesture = match button {
            PointerButton::Middle => Gesture::Dragging { anchor: px },
            PointerButton::Primary => {
                let tool = self.state.selected;
                self.apply_tool(cell);
                if tool.is_placeable() {
                    Gesture::Painting
                } else {
                    Gesture::Idle
                }
            }
            PointerButton::Secondary => {
                self.dispatch(EditorCommand::Erase(cell));
                Gesture::Erasing
            }
        };
    }

    /// Pointer movement; continues the current gesture.
    pub fn on_pointer_drag(&mut self, px: Vec2) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Painting => {
                let cell = self.hovered_cell(px);
                self.dispatch(EditorCommand::Paint(cell));
            }
            Gesture::Erasing => {
                let cell = self.hovered_cell(px);
                self.dispatch(EditorCommand::Erase(cell));
            }
            Gesture::Dragging { anchor } => {
                let delta = px - anchor;
                let sensitivity = self.config.drag_sensitivity;
                let scaled = delta / sensitivity;
                if scaled.x.abs() > DRAG_DEADZONE || scaled.y.abs() > DRAG_DEADZONE {
                    self.state.camera.pan_by_drag(delta, sensitivity);
                    self.gesture = Gesture::Dragging { anchor: px };
                }
            }
        }
    }

    /// Button release; ends the gesture that button started.
    pub fn on_pointer_up(&mut self, _px: Vec2, button: PointerButton) {
        let ends = matches!(
            (self.gesture, button),
            (Gesture::Dragging { .. }, PointerButton::Middle)
                | (Gesture::Painting, PointerButton::Primary)
                | (Gesture::Erasing, PointerButton::Secondary)
        );
        if ends {
            self.gesture = Gesture::Idle;
        }
    }

    /// Wheel input; positive `direction` zooms in.
    pub fn on_scroll(&mut self, px: Vec2, direction: f32) {
        self.dispatch(EditorCommand::ZoomAt(px, direction));
    }

    /// Key press. Goes to the note editor while one is open.
    pub fn on_key(&mut self, key: Key, mods: Modifiers) {
        if self.state.note_editor.is_some() {
            self.note_key(key);
            return;
        }

        let step = self.config.scroll_speed / self.state.camera.zoom();
        let cmd = match key {
            Key::Char('s') if mods.ctrl && mods.shift => EditorCommand::SaveAs,
            Key::Char('s') if mods.ctrl => EditorCommand::Save,
            Key::Char('l') if mods.ctrl => EditorCommand::Load,
            _ if mods.ctrl => return,
            Key::Left | Key::Char('a') => EditorCommand::Pan(-step, 0.0),
            Key::Right | Key::Char('d') => EditorCommand::Pan(step, 0.0),
            Key::Up | Key::Char('w') => EditorCommand::Pan(0.0, -step),
            Key::Down | Key::Char('s') => EditorCommand::Pan(0.0, step),
            Key::Space => EditorCommand::Recenter,
            Key::ZoomIn | Key::ZoomOut => {
                let (w, h) = self.config.canvas_px();
                let direction = if key == Key::ZoomIn { 1.0 } else { -1.0 };
                EditorCommand::ZoomAt(vec2(w, h) / 2.0, direction)
            }
            Key::Char(c) => match TileKind::from_hotkey(c) {
                Some(kind) => EditorCommand::SelectTile(kind),
                None => return,
            },
            Key::Enter | Key::Escape | Key::Backspace => return,
        };
        self.dispatch(cmd);
    }

    fn open_note(&mut self, cell: CellCoord) {
        let buffer = self.state.notes.get_note(cell).unwrap_or_default().to_owned();
        self.state.note_editor = Some(NoteEditor { cell, buffer });
    }

    fn note_key(&mut self, key: Key) {
        let Some(editor) = self.state.note_editor.as_mut() else {
            return;
        };
        match key {
            Key::Char(c) => editor.buffer.push(c),
            Key::Space => editor.buffer.push(' '),
            Key::Backspace => {
                editor.buffer.pop();
            }
            Key::Enter => self.commit_note(),
            Key::Escape => self.state.note_editor = None,
            _ => {}
        }
    }

    /// Closes the note editor, storing (or deleting, if blank) its text.
    pub fn commit_note(&mut self) {
        if let Some(NoteEditor { cell, buffer }) = self.state.note_editor.take() {
            self.dispatch(EditorCommand::SetNote(cell, buffer));
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
