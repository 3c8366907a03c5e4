/// Ground truth for a cell, hidden from the player until uncovered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Safe cell with the number of adjacent mines.
    Number(u8),
    /// Mine.
    Mine,
}
impl Default for Cell {
    fn default() -> Self {
        Cell::Number(0)
    }
}
impl Cell {
    /// Returns `true` if the cell is a mine.
    pub fn is_mine(self) -> bool {
        self == Cell::Mine
    }
}

/// Cell as shown to the player.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Covered tile.
    Hidden,
    /// Covered tile with a flag on it.
    Flagged,
    /// Uncovered safe tile.
    Number(u8),
    /// Uncovered mine.
    Mine,
    /// The mine that ended the game.
    ExplodedMine,
    /// Flag that turned out not to be on a mine.
    WrongFlag,
}
impl Default for Tile {
    fn default() -> Self {
        Tile::Hidden
    }
}
impl From<Cell> for Tile {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Number(n) => Tile::Number(n),
            Cell::Mine => Tile::Mine,
        }
    }
}
impl Tile {
    /// Index of the sprite for this tile in the texture atlas.
    pub fn atlas_index(self) -> u32 {
        match self {
            Tile::Number(n) => n as u32,
            Tile::Hidden => 9,
            Tile::Flagged => 10,
            Tile::ExplodedMine => 11,
            Tile::Mine => 12,
            Tile::WrongFlag => 13,
        }
    }
    /// Returns the tile drawn by an atlas sprite, if there is one.
    pub fn from_atlas_index(index: u32) -> Option<Tile> {
        match index {
            0..=8 => Some(Tile::Number(index as u8)),
            9 => Some(Tile::Hidden),
            10 => Some(Tile::Flagged),
            11 => Some(Tile::ExplodedMine),
            12 => Some(Tile::Mine),
            13 => Some(Tile::WrongFlag),
            _ => None,
        }
    }
}

#[cfg(test)]
#[test]
fn test_atlas_index() {
    for i in 0..14 {
        let tile = Tile::from_atlas_index(i).expect("missing sprite");
        assert_eq!(tile.atlas_index(), i);
    }
    assert_eq!(Tile::from_atlas_index(14), None);
    assert_eq!(Tile::from(Cell::Mine).atlas_index(), 12);
    assert_eq!(Tile::from(Cell::Number(3)), Tile::Number(3));
}
