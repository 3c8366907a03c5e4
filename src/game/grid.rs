use std::ops::{Index, IndexMut};

use itertools::Itertools;

use crate::error::{GameError, Result};

/// Rectangular grid of cells, stored row-major in a flat vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}
impl<T: Clone> Grid<T> {
    /// Returns a new grid with every cell set to `fill`.
    ///
    /// Fails instead of aborting if the storage cannot be allocated, or if a
    /// side is too long to be addressed by a `CellPos`.
    pub fn new(width: u32, height: u32, fill: T) -> Result<Self> {
        let alloc_err = GameError::Allocation { width, height };
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(alloc_err);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(alloc_err)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| alloc_err)?;
        cells.resize(len, fill);
        Ok(Self {
            width,
            height,
            cells,
        })
    }
}
impl<T> Grid<T> {
    /// Returns the width of the grid.
    #[cfg(test)]
    pub fn width(&self) -> u32 {
        self.width
    }
    /// Returns the height of the grid.
    #[cfg(test)]
    pub fn height(&self) -> u32 {
        self.height
    }
    /// Returns the total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether a position lies on the grid.
    pub fn contains(&self, CellPos(x, y): CellPos) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
    fn index_of(&self, pos: CellPos) -> Option<usize> {
        if self.contains(pos) {
            let CellPos(x, y) = pos;
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Returns a cell, or `None` if the position is off the grid.
    pub fn get(&self, pos: CellPos) -> Option<&T> {
        self.index_of(pos).map(|i| &self.cells[i])
    }
    /// Returns a cell mutably, or `None` if the position is off the grid.
    pub fn get_mut(&mut self, pos: CellPos) -> Option<&mut T> {
        match self.index_of(pos) {
            Some(i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// Returns an iterator over every position on the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = CellPos> {
        (0..self.height as i32)
            .cartesian_product(0..self.width as i32)
            .map(|(y, x)| CellPos(x, y))
    }
    /// Returns an iterator over the neighbors of a position that lie on the
    /// grid. Edges do not wrap around.
    pub fn neighbors(&self, pos: CellPos) -> impl Iterator<Item = CellPos> {
        let (width, height) = (self.width, self.height);
        pos.neighbors().filter(move |&CellPos(x, y)| {
            x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
        })
    }
}
impl<T> Index<CellPos> for Grid<T> {
    type Output = T;

    fn index(&self, pos: CellPos) -> &T {
        match self.index_of(pos) {
            Some(i) => &self.cells[i],
            None => panic!("{:?} is outside {}x{} grid", pos, self.width, self.height),
        }
    }
}
impl<T> IndexMut<CellPos> for Grid<T> {
    fn index_mut(&mut self, pos: CellPos) -> &mut T {
        match self.index_of(pos) {
            Some(i) => &mut self.cells[i],
            None => panic!("{:?} is outside {}x{} grid", pos, self.width, self.height),
        }
    }
}

/// Cell coordinates. Signed so that positions off the board (e.g. from the
/// cursor) can be represented and rejected.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos(pub i32, pub i32);
impl CellPos {
    /// Returns an iterator over the 8 surrounding positions, which may be off
    /// the board.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        (-1..=1)
            .cartesian_product(-1..=1)
            .filter(|&d| d != (0, 0))
            .map(move |(dx, dy)| CellPos(self.0 + dx, self.1 + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = Grid::new(3, 2, 0_u8).unwrap();
        assert_eq!(grid.len(), 6);
        assert!(grid.contains(CellPos(2, 1)));
        assert!(!grid.contains(CellPos(3, 1)));
        assert!(!grid.contains(CellPos(2, 2)));
        assert!(!grid.contains(CellPos(-1, 0)));
        assert_eq!(grid.get(CellPos(0, -1)), None);
        assert_eq!(grid.get(CellPos(1, 1)), Some(&0));
    }

    #[test]
    fn test_neighbors_clipped_at_edges() {
        let grid = Grid::new(3, 3, ()).unwrap();
        assert_eq!(grid.neighbors(CellPos(0, 0)).count(), 3);
        assert_eq!(grid.neighbors(CellPos(1, 0)).count(), 5);
        assert_eq!(grid.neighbors(CellPos(1, 1)).count(), 8);
        assert!(grid.neighbors(CellPos(1, 1)).all(|p| p != CellPos(1, 1)));

        let single = Grid::new(1, 1, ()).unwrap();
        assert_eq!(single.neighbors(CellPos(0, 0)).count(), 0);
    }

    #[test]
    fn test_positions_row_major() {
        let grid = Grid::new(2, 2, ()).unwrap();
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(
            positions,
            vec![CellPos(0, 0), CellPos(1, 0), CellPos(0, 1), CellPos(1, 1)]
        );
    }

    #[test]
    fn test_index_mut() {
        let mut grid = Grid::new(4, 4, 0_u32).unwrap();
        grid[CellPos(3, 2)] = 7;
        assert_eq!(grid[CellPos(3, 2)], 7);
        assert_eq!(grid.get_mut(CellPos(4, 0)), None);
    }

    #[test]
    fn test_oversized_grid_fails_to_allocate() {
        assert_eq!(
            Grid::new(u32::MAX, u32::MAX, 0_u64),
            Err(GameError::Allocation {
                width: u32::MAX,
                height: u32::MAX,
            })
        );
    }

    #[test]
    fn test_grid_sides_fit_cell_pos() {
        let too_wide = i32::MAX as u32 + 1;
        assert_eq!(
            Grid::new(too_wide, 1, ()),
            Err(GameError::Allocation {
                width: too_wide,
                height: 1,
            })
        );
    }
}
