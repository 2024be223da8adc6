#![warn(missing_docs)]

//! Infinite-grid dungeon map editor core: coordinate transforms, camera,
//! sparse tile grid, notes and the JSON map codec, plus the editor
//! controller the Macroquad shell drives.

pub mod camera;
pub mod config;
pub mod editor;
mod error;
pub mod loader {
    //! Map persistence.
    pub mod json_codec;
}
pub mod notes;
pub mod render {
    //! Visible-range enumeration for the renderer.
    pub mod cull;
}
pub mod spatial;
pub mod tiles;

pub use camera::Camera;
pub use config::EditorConfig;
pub use editor::{Editor, EditorCommand, EditorState, FilePicker, FixedPathPicker};
pub use error::MapError;
pub use loader::json_codec::MapSnapshot;
pub use notes::NoteStore;
pub use render::cull::TileDraw;
pub use spatial::{CellCoord, Sample, TileGrid};
pub use tiles::TileKind;
