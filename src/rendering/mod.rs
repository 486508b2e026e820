use std::num::NonZeroU32;

use crate::sim::Grid;
use crate::util::Color;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerSize {
    pub w_px: u32,
    pub h_px: u32,
}

/// Where the grid sits on the surface. The grid is centered and any leftover
/// pixels are split evenly into a margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub surface: ContainerSize,
    pub cell_size_px: u32,
    pub cols: u32,
    pub rows: u32,
    pub offset_x_px: u32,
    pub offset_y_px: u32,
}

impl Layout {
    pub fn compute(container: ContainerSize, cell_size: NonZeroU32) -> Layout {
        let cell_size_px = cell_size.get();
        let cols = container.w_px / cell_size_px;
        let rows = container.h_px / cell_size_px;
        Layout {
            surface: container,
            cell_size_px,
            cols,
            rows,
            offset_x_px: (container.w_px - cols * cell_size_px) / 2,
            offset_y_px: (container.h_px - rows * cell_size_px) / 2,
        }
    }

    /// Top-left pixel of the cell at `(row, col)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> (u32, u32) {
        (
            self.offset_x_px + col as u32 * self.cell_size_px,
            self.offset_y_px + row as u32 * self.cell_size_px,
        )
    }
}

/// The drawing operations the simulation needs from its host.
pub trait DrawingSurface {
    fn clear(&mut self, width: u32, height: u32, background: Color);
    fn fill_cell(&mut self, x_px: u32, y_px: u32, size_px: u32, foreground: Color);
}

/// Clear the whole surface, then fill each alive cell.
pub fn draw_grid<S: DrawingSurface + ?Sized>(
    grid: &Grid,
    layout: &Layout,
    surface: &mut S,
    alive: Color,
    dead: Color,
) {
    surface.clear(layout.surface.w_px, layout.surface.h_px, dead);
    for (row, col) in grid.iter_alive() {
        let (x, y) = layout.cell_origin(row, col);
        surface.fill_cell(x, y, layout.cell_size_px, alive);
    }
}
