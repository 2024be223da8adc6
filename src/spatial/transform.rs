use super::CellCoord;
use macroquad::prelude::*;

/// Everything needed to map between pixels and grid space for one frame.
///
/// `camera` is the continuous grid position under the viewport's top-left
/// pixel; one cell spans `base_cell_px * zoom` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Grid point under the top-left pixel.
    pub camera: Vec2,
    /// Zoom factor.
    pub zoom: f32,
    /// Cell size in pixels at zoom 1.0.
    pub base_cell_px: f32,
}

impl Projection {
    /// Unpadded pixel size of one cell.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.base_cell_px * self.zoom
    }

    /// See [`screen_to_continuous`].
    #[inline]
    pub fn screen_to_continuous(&self, px: Vec2) -> Vec2 {
        screen_to_continuous(px, self.camera, self.zoom, self.base_cell_px)
    }

    /// See [`continuous_to_screen`].
    #[inline]
    pub fn continuous_to_screen(&self, g: Vec2) -> Vec2 {
        continuous_to_screen(g, self.camera, self.zoom, self.base_cell_px)
    }

    /// Cell under a canvas pixel.
    #[inline]
    pub fn screen_to_cell(&self, px: Vec2) -> CellCoord {
        continuous_to_cell(self.screen_to_continuous(px))
    }

    /// Pixel rectangle a cell is drawn into, overlap included.
    pub fn cell_rect(&self, cell: CellCoord) -> Rect {
        let origin = self.continuous_to_screen(cell.as_vec2());
        let size = cell_pixel_size(self.zoom, self.base_cell_px);
        Rect::new(origin.x, origin.y, size, size)
    }
}

/// Pixel position to continuous grid position.
#[inline]
pub fn screen_to_continuous(px: Vec2, camera: Vec2, zoom: f32, base_cell_px: f32) -> Vec2 {
    px / (base_cell_px * zoom) + camera
}

/// Snaps a continuous position to its cell. Floors, so -0.3 lands in cell -1.
#[inline]
pub fn continuous_to_cell(g: Vec2) -> CellCoord {
    CellCoord {
        x: g.x.floor() as i32,
        y: g.y.floor() as i32,
    }
}

/// Continuous grid position to a whole-pixel screen position.
#[inline]
pub fn continuous_to_screen(g: Vec2, camera: Vec2, zoom: f32, base_cell_px: f32) -> Vec2 {
    ((g - camera) * (base_cell_px * zoom)).floor()
}

/// Drawn edge length of a cell. One pixel larger than the rounded-up scale so
/// neighbouring cells overlap and fractional zoom leaves no seams.
#[inline]
pub fn cell_pixel_size(zoom: f32, base_cell_px: f32) -> f32 {
    (base_cell_px * zoom).ceil() + 1.0
}
