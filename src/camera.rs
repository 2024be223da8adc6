//! Camera position and zoom over the unbounded grid.

use crate::config::EditorConfig;
use crate::spatial::{cell_pixel_size, CellCoord, Projection};
use macroquad::prelude::*;

/// Inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    /// Top-left cell.
    pub min: CellCoord,
    /// Bottom-right cell, inclusive.
    pub max: CellCoord,
}

impl CellRange {
    /// Whether `cell` lies inside the range.
    #[inline]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// Number of cells covered.
    pub fn area(&self) -> u64 {
        let w = (self.max.x as i64 - self.min.x as i64 + 1).max(0) as u64;
        let h = (self.max.y as i64 - self.min.y as i64 + 1).max(0) as u64;
        w * h
    }

    /// Row-major walk over every cell in the range.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| CellCoord::new(x, y)))
    }
}

/// Continuous camera plus clamped zoom.
///
/// `position` is the grid point under the canvas' top-left pixel. It is never
/// clamped. Setters refuse non-finite values so the transforms stay total.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec2,
    zoom: f32,
    base_cell_px: f32,
    min_zoom: f32,
    max_zoom: f32,
    zoom_step: f32,
    home: Vec2,
}

impl Camera {
    /// Camera at the home position and the configured initial zoom.
    pub fn new(cfg: &EditorConfig) -> Self {
        let home = -vec2(
            cfg.viewport_tiles[0] as f32 / 2.0,
            cfg.viewport_tiles[1] as f32 / 2.0,
        );
        Self {
            position: home,
            zoom: cfg.initial_zoom.clamp(cfg.min_zoom, cfg.max_zoom),
            base_cell_px: cfg.base_cell_px,
            min_zoom: cfg.min_zoom,
            max_zoom: cfg.max_zoom,
            zoom_step: cfg.zoom_step,
            home,
        }
    }

    /// Grid point under the top-left canvas pixel.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current zoom factor.
    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Cell size in pixels at zoom 1.0.
    #[inline]
    pub fn base_cell_px(&self) -> f32 {
        self.base_cell_px
    }

    /// Camera position that centres the entrance in the canvas.
    #[inline]
    pub fn home(&self) -> Vec2 {
        self.home
    }

    /// Transform for the current position and zoom.
    #[inline]
    pub fn projection(&self) -> Projection {
        Projection {
            camera: self.position,
            zoom: self.zoom,
            base_cell_px: self.base_cell_px,
        }
    }

    /// Cell under a canvas pixel.
    pub fn cell_under(&self, px: Vec2) -> CellCoord {
        self.projection().screen_to_cell(px)
    }

    /// Moves the camera. Returns false for a non-finite position.
    pub fn set_position(&mut self, position: Vec2) -> bool {
        if !position.is_finite() {
            log::warn!("ignoring non-finite camera position {position:?}");
            return false;
        }
        self.position = position;
        true
    }

    /// Sets the zoom, clamped to the configured bounds.
    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        if !zoom.is_finite() {
            log::warn!("ignoring non-finite zoom {zoom}");
            return false;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        true
    }

    /// Moves the camera by whole or fractional cells.
    pub fn pan(&mut self, dx_cells: f32, dy_cells: f32) {
        let target = self.position + vec2(dx_cells, dy_cells);
        self.set_position(target);
    }

    /// Pans by a pointer drag of `pixel_delta`. The camera moves against the
    /// pointer so the map follows the cursor.
    pub fn pan_by_drag(&mut self, pixel_delta: Vec2, sensitivity: f32) {
        let cell_delta = -pixel_delta / (self.base_cell_px * self.zoom * sensitivity);
        self.pan(cell_delta.x, cell_delta.y);
    }

    /// Steps the zoom by `direction` notches while keeping the grid point
    /// under `px` fixed on screen. Returns false when the zoom is already at
    /// the bound in that direction.
    pub fn zoom_at(&mut self, px: Vec2, direction: f32) -> bool {
        if !px.is_finite() || !direction.is_finite() {
            log::warn!("ignoring zoom at {px:?} by {direction}");
            return false;
        }

        let before = self.projection().screen_to_continuous(px);

        let new_zoom = (self.zoom + direction * self.zoom_step).clamp(self.min_zoom, self.max_zoom);
        if new_zoom == self.zoom {
            return false;
        }
        self.zoom = new_zoom;

        let after = self.projection().screen_to_continuous(px);
        self.position += before - after;
        true
    }

    /// Cells to draw for a viewport of the given pixel size, with one cell of
    /// overscan on every edge to cover the seam padding.
    ///
    /// The low edge reaches back a full padded cell width, which is more
    /// than one cell once a cell is only a few pixels wide.
    pub fn visible_cell_range(&self, viewport_px: Vec2) -> CellRange {
        let scale = self.projection().scale();
        let visible = viewport_px / scale;
        let reach = (cell_pixel_size(self.zoom, self.base_cell_px) / scale).max(1.0);
        let min = (self.position - Vec2::splat(reach)).floor();
        let max = (self.position + visible + Vec2::ONE).ceil();
        CellRange {
            min: CellCoord::new(min.x as i32, min.y as i32),
            max: CellCoord::new(max.x as i32, max.y as i32),
        }
    }

    /// Puts the entrance back in the middle of the canvas. Zoom is untouched.
    pub fn recenter(&mut self) {
        self.position = self.home;
    }
}
