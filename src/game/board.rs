use super::grid::{CellPos, Grid};
use super::tile::{Cell, Tile};
use crate::error::Result;

/// Mine layout plus the parallel grid of what the player can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Ground truth: mines and adjacency counts.
    cells: Grid<Cell>,
    /// Player-visible tiles.
    tiles: Grid<Tile>,
    /// Number of tiles that are `Tile::Hidden`.
    hidden: usize,
}
impl Board {
    /// Returns a board with no mines and every tile hidden.
    pub(super) fn empty(width: u32, height: u32) -> Result<Self> {
        let cells = Grid::new(width, height, Cell::default())?;
        let tiles = Grid::new(width, height, Tile::Hidden)?;
        let hidden = tiles.len();
        Ok(Self {
            cells,
            tiles,
            hidden,
        })
    }

    /// Returns a board with mines at exactly the given positions.
    #[cfg(test)]
    pub fn from_mines(width: u32, height: u32, mines: &[CellPos]) -> Result<Self> {
        let mut board = Self::empty(width, height)?;
        for &pos in mines {
            match board.cells.get_mut(pos) {
                Some(cell) => *cell = Cell::Mine,
                None => return Err(crate::error::GameError::InvalidCoords),
            }
        }
        board.count_adjacent_mines();
        Ok(board)
    }

    /// Places a mine, returning `false` if there already was one.
    pub(super) fn place_mine(&mut self, pos: CellPos) -> bool {
        let cell = &mut self.cells[pos];
        if cell.is_mine() {
            false
        } else {
            *cell = Cell::Mine;
            true
        }
    }

    /// Resets every safe cell to zero, then adds one to each safe neighbor of
    /// every mine.
    pub(super) fn count_adjacent_mines(&mut self) {
        for pos in self.cells.positions() {
            if !self.cells[pos].is_mine() {
                self.cells[pos] = Cell::Number(0);
            }
        }
        let mines: Vec<CellPos> = self
            .cells
            .positions()
            .filter(|&pos| self.cells[pos].is_mine())
            .collect();
        for mine in mines {
            for nbr in self.cells.neighbors(mine) {
                if let Cell::Number(n) = &mut self.cells[nbr] {
                    *n += 1;
                }
            }
        }
    }

    /// Returns the ground truth of a cell.
    pub fn cell(&self, pos: CellPos) -> Option<Cell> {
        self.cells.get(pos).copied()
    }
    /// Returns the tile the player sees at a position.
    pub fn tile(&self, pos: CellPos) -> Option<Tile> {
        self.tiles.get(pos).copied()
    }
    /// Returns the player-visible grid.
    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }
    /// Returns the number of mines on the board.
    pub fn mine_count(&self) -> usize {
        self.cells
            .positions()
            .filter(|&pos| self.cells[pos].is_mine())
            .count()
    }
    /// Returns the number of tiles that are still hidden. Flagged tiles do not
    /// count as hidden.
    pub fn hidden_count(&self) -> usize {
        self.hidden
    }

    /// Sets a visible tile, keeping the hidden count up to date. Does nothing
    /// if the position is off the board.
    pub(super) fn set_tile(&mut self, pos: CellPos, tile: Tile) {
        if let Some(t) = self.tiles.get_mut(pos) {
            match (*t == Tile::Hidden, tile == Tile::Hidden) {
                (true, false) => self.hidden -= 1,
                (false, true) => self.hidden += 1,
                _ => (),
            }
            *t = tile;
        }
    }

    /// Uncovers a hidden tile, flood-filling outwards from tiles with no
    /// adjacent mines.
    ///
    /// Returns what was under the tile at `pos`, or `None` if nothing happened
    /// because the position is off the board or the tile is not hidden.
    /// Flagged tiles are never uncovered.
    pub fn uncover(&mut self, pos: CellPos) -> Option<Cell> {
        if self.tile(pos)? != Tile::Hidden {
            return None;
        }
        let cell = self.cells[pos];

        let mut to_visit = vec![pos];
        let mut uncovered = 0;
        while let Some(p) = to_visit.pop() {
            if self.tiles[p] != Tile::Hidden {
                continue;
            }
            let c = self.cells[p];
            self.set_tile(p, c.into());
            uncovered += 1;
            if c == Cell::Number(0) {
                to_visit.extend(
                    self.tiles
                        .neighbors(p)
                        .filter(|&nbr| self.tiles[nbr] == Tile::Hidden),
                );
            }
        }
        if uncovered > 1 {
            log::debug!("Flood fill from {:?} uncovered {} tiles", pos, uncovered);
        }

        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::error::GameError;
    use crate::game::generate;
    use rand::Rng;
    use std::collections::HashSet;

    fn uncovered(board: &Board) -> Vec<CellPos> {
        board
            .tiles()
            .positions()
            .filter(|&p| board.tile(p) != Some(Tile::Hidden))
            .collect()
    }

    #[test]
    fn test_from_mines_counts() {
        let board = Board::from_mines(3, 3, &[CellPos(0, 0), CellPos(2, 0)]).unwrap();
        assert_eq!(board.cell(CellPos(1, 0)), Some(Cell::Number(2)));
        assert_eq!(board.cell(CellPos(1, 1)), Some(Cell::Number(2)));
        assert_eq!(board.cell(CellPos(0, 1)), Some(Cell::Number(1)));
        assert_eq!(board.cell(CellPos(1, 2)), Some(Cell::Number(0)));
        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.hidden_count(), 9);
    }

    #[test]
    fn test_from_mines_rejects_off_board() {
        assert_eq!(
            Board::from_mines(2, 2, &[CellPos(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn test_uncover_number_reveals_single_tile() {
        let mut board = Board::from_mines(4, 4, &[CellPos(1, 1)]).unwrap();
        assert_eq!(board.uncover(CellPos(2, 2)), Some(Cell::Number(1)));
        assert_eq!(uncovered(&board), vec![CellPos(2, 2)]);
        assert_eq!(board.hidden_count(), 15);
    }

    #[test]
    fn test_uncover_flood_fill() {
        // . . . .
        // . . . .
        // . . 1 1
        // . . 1 *
        let mut board = Board::from_mines(4, 4, &[CellPos(3, 3)]).unwrap();
        assert_eq!(board.uncover(CellPos(0, 0)), Some(Cell::Number(0)));
        assert_eq!(board.tile(CellPos(3, 3)), Some(Tile::Hidden));
        assert_eq!(board.tile(CellPos(2, 2)), Some(Tile::Number(1)));
        assert_eq!(board.hidden_count(), 1);
    }

    #[test]
    fn test_flood_fill_stops_at_numbers() {
        // A wall of mines down column 2 splits the board.
        let mines = [CellPos(2, 0), CellPos(2, 1), CellPos(2, 2)];
        let mut board = Board::from_mines(5, 3, &mines).unwrap();
        board.uncover(CellPos(0, 1));
        for y in 0..3 {
            assert_ne!(board.tile(CellPos(0, y)), Some(Tile::Hidden));
            assert_ne!(board.tile(CellPos(1, y)), Some(Tile::Hidden));
            assert_eq!(board.tile(CellPos(2, y)), Some(Tile::Hidden));
            assert_eq!(board.tile(CellPos(3, y)), Some(Tile::Hidden));
            assert_eq!(board.tile(CellPos(4, y)), Some(Tile::Hidden));
        }
    }

    #[test]
    fn test_flood_fill_skips_flags() {
        let mut board = Board::from_mines(3, 3, &[]).unwrap();
        board.set_tile(CellPos(2, 2), Tile::Flagged);
        board.uncover(CellPos(0, 0));
        assert_eq!(board.tile(CellPos(2, 2)), Some(Tile::Flagged));
        assert_eq!(board.hidden_count(), 0);
    }

    #[test]
    fn test_uncover_is_idempotent() {
        let mut board = Board::from_mines(3, 3, &[CellPos(0, 0)]).unwrap();
        assert!(board.uncover(CellPos(2, 2)).is_some());
        let before = board.clone();
        assert_eq!(board.uncover(CellPos(2, 2)), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_uncover_ignores_flags_and_off_board() {
        let mut board = Board::from_mines(2, 2, &[CellPos(0, 0)]).unwrap();
        board.set_tile(CellPos(1, 1), Tile::Flagged);
        assert_eq!(board.uncover(CellPos(1, 1)), None);
        assert_eq!(board.uncover(CellPos(-1, 0)), None);
        assert_eq!(board.uncover(CellPos(0, 2)), None);
        assert_eq!(board.hidden_count(), 3);
    }

    /// Returns the tiles that uncovering `start` must reveal: a single tile for
    /// a number, or the connected region of zeros plus its border.
    fn expected_reveal(board: &Board, start: CellPos) -> HashSet<CellPos> {
        let mut region = HashSet::new();
        let mut to_visit = vec![start];
        while let Some(p) = to_visit.pop() {
            if !region.insert(p) {
                continue;
            }
            if board.cell(p) == Some(Cell::Number(0)) {
                to_visit.extend(board.tiles().neighbors(p));
            }
        }
        region
    }

    #[test]
    fn test_flood_fill_on_generated_boards() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let width = rng.gen_range(1..=20);
            let height = rng.gen_range(1..=20);
            let mines = rng.gen_range(0..=BoardConfig::max_mines(width, height));
            let config = BoardConfig::new(width, height, mines).unwrap();
            let mut board = generate(&config, rng.gen()).unwrap();

            let start = CellPos(
                rng.gen_range(0..width) as i32,
                rng.gen_range(0..height) as i32,
            );
            let cell = board.cell(start).unwrap();
            if cell.is_mine() {
                assert_eq!(board.uncover(start), Some(Cell::Mine));
                assert_eq!(uncovered(&board), vec![start]);
                continue;
            }

            let expected = expected_reveal(&board, start);
            assert_eq!(board.uncover(start), Some(cell));
            let revealed: HashSet<CellPos> = uncovered(&board).into_iter().collect();
            assert_eq!(revealed, expected, "flood fill from {:?}", start);
            if cell != Cell::Number(0) {
                assert_eq!(revealed.len(), 1);
            }
            for &p in &revealed {
                assert!(!board.cell(p).unwrap().is_mine(), "uncovered mine at {:?}", p);
                assert_eq!(board.tile(p), board.cell(p).map(Tile::from));
            }
            assert_eq!(
                board.hidden_count(),
                (width * height) as usize - revealed.len()
            );
        }
    }

    #[test]
    fn test_large_flood_fill() {
        let mut board = Board::from_mines(300, 300, &[]).unwrap();
        board.uncover(CellPos(150, 150));
        assert_eq!(board.hidden_count(), 0);
    }
}
