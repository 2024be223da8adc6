//! Free-form text attached to cells, independent of the tile grid.

use crate::spatial::CellCoord;
use std::collections::HashMap;

/// Trimmed, non-empty notes keyed by cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteStore {
    notes: HashMap<CellCoord, String>,
}

impl NoteStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `text` for `cell`, or removes the note when `text` is blank.
    ///
    /// The stored text is trimmed. Returns true when a note remains.
    pub fn set_note(&mut self, cell: CellCoord, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.notes.remove(&cell);
            false
        } else {
            self.notes.insert(cell, trimmed.to_owned());
            true
        }
    }

    /// Note at `cell`, if any.
    pub fn get_note(&self, cell: CellCoord) -> Option<&str> {
        self.notes.get(&cell).map(String::as_str)
    }

    /// Removes and returns the note at `cell`.
    pub fn delete_note(&mut self, cell: CellCoord) -> Option<String> {
        self.notes.remove(&cell)
    }

    /// All notes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &str)> + '_ {
        self.notes.iter().map(|(c, t)| (*c, t.as_str()))
    }

    /// Number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether there are no notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Removes every note.
    pub fn clear(&mut self) {
        self.notes.clear();
    }
}
