use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;

use crate::error::{GameError, Result};

/// Percentage of cells that may be mines.
const MAX_MINE_PERCENT: u64 = 31;
/// Largest number of rows or columns on a board.
pub const MAX_SIDE: u32 = 10_000;

/// Board dimensions and mine count, validated on construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    width: u32,
    height: u32,
    mines: u32,
}
impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            mines: 40,
        }
    }
}
impl BoardConfig {
    /// Returns a configuration, or an error if the board is empty, wider or
    /// taller than [`MAX_SIDE`], or too densely mined.
    pub fn new(width: u32, height: u32, mines: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::EmptyBoard);
        }
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(GameError::TooLarge {
                width,
                height,
                max: MAX_SIDE,
            });
        }
        let max = Self::max_mines(width, height);
        if mines > max {
            return Err(GameError::TooManyMines { mines, max });
        }
        Ok(Self {
            width,
            height,
            mines,
        })
    }

    /// Returns the largest mine count allowed on a board: 31% of its cells,
    /// rounded down.
    pub fn max_mines(width: u32, height: u32) -> u32 {
        let max = width as u64 * height as u64 * MAX_MINE_PERCENT / 100;
        max.min(u32::MAX as u64) as u32
    }

    /// Returns the number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }
    /// Returns the number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }
    /// Returns the number of mines.
    pub fn mines(&self) -> u32 {
        self.mines
    }
}

/// Classic minesweeper.
#[derive(Parser, Debug)]
#[command(name = "minesweeper", version)]
pub struct Args {
    /// Number of columns.
    #[arg(requires = "rows", value_parser = clap::value_parser!(u32).range(1..))]
    pub columns: Option<u32>,
    /// Number of rows.
    #[arg(requires = "mines", value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: Option<u32>,
    /// Number of mines, at most 31% of the cells.
    pub mines: Option<u32>,

    /// Seed for the first game. Restarts are always seeded from the clock.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Texture atlas with 32x32 sprites in 8 columns.
    #[arg(long, default_value = "atlas.png")]
    pub atlas: PathBuf,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}
impl Args {
    /// Returns the board configuration requested on the command line.
    pub fn board_config(&self) -> Result<BoardConfig> {
        match (self.columns, self.rows, self.mines) {
            (Some(columns), Some(rows), Some(mines)) => BoardConfig::new(columns, rows, mines),
            _ => Ok(BoardConfig::default()),
        }
    }
}
