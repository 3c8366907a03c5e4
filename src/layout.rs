use cgmath::Matrix4;

use crate::config::BoardConfig;
use crate::game::CellPos;

/// Pixel geometry of the board on screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layout {
    /// Size of one sprite in the atlas, in pixels.
    pub cell_size: u32,
    /// Scale at which sprites are drawn.
    pub scale: f32,
    /// Margin around the board, in pixels.
    pub padding: u32,
}
impl Default for Layout {
    fn default() -> Self {
        Self {
            cell_size: 32,
            scale: 1.5,
            padding: 32,
        }
    }
}
impl Layout {
    /// Returns the on-screen width and height of a cell, in pixels.
    pub fn scaled_cell_size(self) -> u32 {
        (self.cell_size as f32 * self.scale) as u32
    }

    /// Returns the window size needed to fit a board, saturating at
    /// `u32::MAX`.
    pub fn window_size(self, config: &BoardConfig) -> (u32, u32) {
        let side = |cells: u32| {
            self.scaled_cell_size()
                .saturating_mul(cells)
                .saturating_add(self.padding.saturating_mul(2))
        };
        (side(config.width()), side(config.height()))
    }

    /// Returns the cell under a pixel, or `None` if the pixel is in the margin
    /// before the first cell. Positions past the last cell are returned as-is
    /// and must be bounds-checked against the board.
    pub fn pixel_to_cell(self, (x, y): (f64, f64)) -> Option<CellPos> {
        let cell = self.scaled_cell_size() as f64;
        let cx = ((x - self.padding as f64) / cell).floor();
        let cy = ((y - self.padding as f64) / cell).floor();
        if cx < 0.0 || cy < 0.0 || cx > i32::MAX as f64 || cy > i32::MAX as f64 {
            return None;
        }
        Some(CellPos(cx as i32, cy as i32))
    }

    /// Returns the orthographic projection from pixel coordinates (origin at
    /// the top left, Y down) to clip space.
    pub fn projection(self, (width, height): (u32, u32)) -> Matrix4<f32> {
        cgmath::ortho(0.0, width.max(1) as f32, height.max(1) as f32, 0.0, -1.0, 1.0)
    }
}
