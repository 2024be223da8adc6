//! Cell addressing, screen/grid transforms and the sparse tile grid.

mod index;
mod transform;

pub use index::{CellCoord, Sample, TileGrid};
pub use transform::{
    cell_pixel_size, continuous_to_cell, continuous_to_screen, screen_to_continuous, Projection,
};
