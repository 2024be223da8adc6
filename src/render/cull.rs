//! Visible-range enumeration for tiles and note markers.

use crate::camera::{Camera, CellRange};
use crate::notes::NoteStore;
use crate::spatial::{CellCoord, TileGrid};
use crate::tiles::TileKind;
use macroquad::prelude::*;

/// One tile the renderer should draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDraw {
    /// Cell being drawn.
    pub cell: CellCoord,
    /// Tile in that cell.
    pub kind: TileKind,
    /// Destination in canvas pixels, overlap included.
    pub rect: Rect,
}

/// Occupied cells inside `range`, in row-major order.
///
/// Walks whichever is smaller: the visible range or the occupied set, so a
/// zoomed-out view over a sparse map stays cheap and a dense map does not
/// pay for cells far off screen.
fn visible_cells<F>(range: CellRange, occupied: usize, mut iter_occupied: F) -> Vec<CellCoord>
where
    F: FnMut(&mut dyn FnMut(CellCoord)),
{
    let mut cells = Vec::new();
    if range.area() <= occupied as u64 {
        let mut all = Vec::new();
        iter_occupied(&mut |c| all.push(c));
        all.sort_unstable();
        for cell in range.cells() {
            if all.binary_search(&cell).is_ok() {
                cells.push(cell);
            }
        }
    } else {
        iter_occupied(&mut |c| {
            if range.contains(c) {
                cells.push(c);
            }
        });
        cells.sort_by_key(|c| (c.y, c.x));
    }
    cells
}

/// Tiles to draw for a canvas of `viewport_px`, sorted by row then column.
/// Empty cells are never listed.
pub fn query_visible_tiles(grid: &TileGrid, camera: &Camera, viewport_px: Vec2) -> Vec<TileDraw> {
    let range = camera.visible_cell_range(viewport_px);
    let proj = camera.projection();

    visible_cells(range, grid.len(), |f| {
        for (cell, _) in grid.iter() {
            f(cell);
        }
    })
    .into_iter()
    .filter_map(|cell| {
        let kind = grid.query(cell);
        (kind != TileKind::Empty).then(|| TileDraw {
            cell,
            kind,
            rect: proj.cell_rect(cell),
        })
    })
    .collect()
}

/// Cells carrying a note within the visible range, with their rectangles.
pub fn query_visible_notes(
    notes: &NoteStore,
    camera: &Camera,
    viewport_px: Vec2,
) -> Vec<(CellCoord, Rect)> {
    let range = camera.visible_cell_range(viewport_px);
    let proj = camera.projection();

    visible_cells(range, notes.len(), |f| {
        for (cell, _) in notes.iter() {
            f(cell);
        }
    })
    .into_iter()
    .map(|cell| (cell, proj.cell_rect(cell)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    #[test]
    fn query_visible_tiles_returns_cells_in_stable_order() {
        let mut grid = TileGrid::new();
        grid.paint(CellCoord::new(2, 2), TileKind::Wall);
        grid.paint(CellCoord::new(-1, 0), TileKind::Floor);
        grid.paint(CellCoord::new(1, 0), TileKind::Floor);
        grid.paint(CellCoord::new(0, 1), TileKind::Trap);

        let cam = Camera::new(&EditorConfig::default());
        let draws = query_visible_tiles(&grid, &cam, vec2(600.0, 600.0));
        let coords: Vec<CellCoord> = draws.iter().map(|d| d.cell).collect();

        assert_eq!(coords.len(), 5);
        assert!(coords.windows(2).all(|w| (w[0].y, w[0].x) <= (w[1].y, w[1].x)));
    }

    #[test]
    fn range_and_occupied_walks_agree() {
        let mut grid = TileGrid::new();
        for x in -40..40 {
            for y in -40..40 {
                if (x + y) % 3 == 0 {
                    grid.paint(CellCoord::new(x, y), TileKind::Floor);
                }
            }
        }
        let cam = Camera::new(&EditorConfig::default());
        let range = cam.visible_cell_range(vec2(600.0, 600.0));

        // an occupancy hint of MAX forces the range walk, 0 the occupied walk
        let by_range = visible_cells(range, usize::MAX, |f| grid.iter().for_each(|(c, _)| f(c)));
        let by_occupied = visible_cells(range, 0, |f| grid.iter().for_each(|(c, _)| f(c)));
        assert!(!by_range.is_empty());
        assert_eq!(by_range, by_occupied);
    }

    #[test]
    fn off_screen_tiles_are_culled() {
        let mut grid = TileGrid::new();
        grid.paint(CellCoord::new(500, 500), TileKind::Wall);
        let cam = Camera::new(&EditorConfig::default());
        let draws = query_visible_tiles(&grid, &cam, vec2(600.0, 600.0));
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].kind, TileKind::Entrance);
        assert_eq!(draws[0].rect, Rect::new(300.0, 300.0, 41.0, 41.0));
    }
}
