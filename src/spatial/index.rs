use crate::tiles::TileKind;
use macroquad::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// Integer address of one cell on the unbounded map plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// Column; grows to the right.
    pub x: i32,
    /// Row; grows downwards.
    pub y: i32,
}

impl CellCoord {
    /// The reserved entrance cell.
    pub const ORIGIN: CellCoord = CellCoord { x: 0, y: 0 };

    /// Cell at column `x`, row `y`.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this is the entrance cell.
    #[inline]
    pub fn is_origin(self) -> bool {
        self == Self::ORIGIN
    }

    /// Continuous position of the cell's top-left corner.
    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        vec2(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Result of the colour-picker tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// The cell holds a palette tile, which may become the selection.
    Picked(TileKind),
    /// The cell is empty or holds a system tile; the selection must not change.
    Rejected(TileKind),
}

/// Sparse cell -> tile mapping with a protected entrance at the origin.
///
/// Absent keys are empty cells; erasing removes the key, so the map only
/// ever holds the entrance plus placeable tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    cells: HashMap<CellCoord, TileKind>,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TileGrid {
    /// Empty grid with the entrance already in place.
    pub fn new() -> Self {
        let mut grid = TileGrid {
            cells: HashMap::new(),
        };
        grid.assert_entrance();
        grid
    }

    /// Stores `kind` at `cell`. Returns false, leaving the grid untouched,
    /// for the origin and for kinds that cannot be placed.
    pub fn paint(&mut self, cell: CellCoord, kind: TileKind) -> bool {
        if cell.is_origin() {
            log::debug!("paint at entrance ignored");
            return false;
        }
        if !kind.is_placeable() {
            log::debug!("{} cannot be painted at {}", kind.name(), cell);
            return false;
        }
        self.cells.insert(cell, kind);
        true
    }

    /// Clears `cell`. Returns whether a tile was removed.
    pub fn erase(&mut self, cell: CellCoord) -> bool {
        if cell.is_origin() {
            log::debug!("erase at entrance ignored");
            return false;
        }
        self.cells.remove(&cell).is_some()
    }

    /// Tile at `cell`; `Empty` when nothing is stored.
    pub fn query(&self, cell: CellCoord) -> TileKind {
        self.cells.get(&cell).copied().unwrap_or(TileKind::Empty)
    }

    /// Reads `cell` for the colour picker.
    pub fn sample_at(&self, cell: CellCoord) -> Sample {
        let kind = self.query(cell);
        if kind.is_palette_tile() {
            Sample::Picked(kind)
        } else {
            Sample::Rejected(kind)
        }
    }

    /// Writes the entrance at the origin. Idempotent.
    pub fn assert_entrance(&mut self) {
        self.cells.insert(CellCoord::ORIGIN, TileKind::Entrance);
    }

    /// Drops every painted tile; the entrance stays.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.assert_entrance();
    }

    /// Occupied cells in no particular order, entrance included.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, TileKind)> + '_ {
        self.cells.iter().map(|(c, k)| (*c, *k))
    }

    /// Painted cells, i.e. everything except the entrance.
    pub fn painted(&self) -> impl Iterator<Item = (CellCoord, TileKind)> + '_ {
        self.iter().filter(|(c, _)| !c.is_origin())
    }

    /// Number of occupied cells, entrance included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false while the entrance is in place.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_holds_only_the_entrance() {
        let grid = TileGrid::new();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.query(CellCoord::ORIGIN), TileKind::Entrance);
        assert_eq!(grid.query(CellCoord::new(5, -5)), TileKind::Empty);
    }

    #[test]
    fn paint_overwrites_and_erase_removes_key() {
        let mut grid = TileGrid::new();
        let cell = CellCoord::new(2, -3);
        assert!(grid.paint(cell, TileKind::Wall));
        assert!(grid.paint(cell, TileKind::Chest));
        assert_eq!(grid.query(cell), TileKind::Chest);
        assert!(grid.erase(cell));
        assert!(!grid.erase(cell));
        assert_eq!(grid.query(cell), TileKind::Empty);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn tools_and_system_kinds_are_not_stored() {
        let mut grid = TileGrid::new();
        let cell = CellCoord::new(1, 1);
        assert!(!grid.paint(cell, TileKind::NoteMarker));
        assert!(!grid.paint(cell, TileKind::ColorPicker));
        assert!(!grid.paint(cell, TileKind::Entrance));
        assert!(!grid.paint(cell, TileKind::Empty));
        assert_eq!(grid.query(cell), TileKind::Empty);
    }

    #[test]
    fn clear_keeps_entrance() {
        let mut grid = TileGrid::new();
        grid.paint(CellCoord::new(4, 4), TileKind::Torch);
        grid.clear();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.query(CellCoord::ORIGIN), TileKind::Entrance);
        assert_eq!(grid.painted().count(), 0);
    }

    #[test]
    fn display_reads_like_a_tuple() {
        assert_eq!(CellCoord::new(-2, 7).to_string(), "(-2, 7)");
    }
}
