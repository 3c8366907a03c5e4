mod board;
mod generator;
mod grid;
mod rng;
mod tile;

pub use board::Board;
pub use generator::generate;
pub use grid::CellPos;
pub use rng::time_seed;
pub use tile::{Cell, Tile};

use crate::config::BoardConfig;
use crate::error::Result;

/// Phase of a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    /// Accepting reveals and flags.
    Playing,
    /// A mine was uncovered on this frame.
    Lost,
    /// Every mine was flagged and every safe cell uncovered on this frame.
    Won,
    /// Finished; waiting for a restart.
    Infinite,
}

/// How a finished game ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every safe cell was uncovered and every mine flagged.
    Won,
    /// A mine was uncovered.
    Lost,
}

/// Player action for one frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Uncover a cell.
    Reveal(CellPos),
    /// Add or remove a flag.
    ToggleFlag(CellPos),
    /// Start a new game with the same configuration.
    Restart {
        /// Seed for the new board.
        seed: u64,
    },
}

/// Receives every visible tile of the board for drawing.
pub trait CellSink {
    /// Draws the sprite for `tile` at cell `pos`.
    fn draw_cell(&mut self, pos: CellPos, tile: Tile);
}

/// Single game session.
#[derive(Debug, Clone)]
pub struct Game {
    config: BoardConfig,
    board: Board,
    /// Number of mines minus number of flags. Negative if the player placed
    /// too many flags.
    mines_left: i64,
    /// Number of flags that are not on a mine.
    mines_wrong: u32,
    state: GameState,
    /// Mine that ended the game.
    exploded: Option<CellPos>,
}
impl Game {
    /// Returns a new game with a freshly generated board.
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        let board = generate(&config, seed)?;
        log::info!(
            "New {}x{} game with {} mines (seed {})",
            config.width(),
            config.height(),
            config.mines(),
            seed,
        );
        Ok(Self::with_board(config, board))
    }
    /// Returns a new game on an existing board.
    pub fn with_board(config: BoardConfig, board: Board) -> Self {
        Self {
            config,
            mines_left: board.mine_count() as i64,
            board,
            mines_wrong: 0,
            state: GameState::Playing,
            exploded: None,
        }
    }

    /// Returns the board configuration.
    pub fn config(&self) -> BoardConfig {
        self.config
    }
    /// Returns the board.
    #[cfg(test)]
    pub fn board(&self) -> &Board {
        &self.board
    }
    /// Returns the current state.
    pub fn state(&self) -> GameState {
        self.state
    }
    /// Returns the number of mines minus the number of flags.
    pub fn mines_left(&self) -> i64 {
        self.mines_left
    }
    /// Returns the number of flags that are not on a mine.
    #[cfg(test)]
    pub fn mines_wrong(&self) -> u32 {
        self.mines_wrong
    }
    /// Returns the mine that ended the game, if the game was lost.
    #[cfg(test)]
    pub fn exploded(&self) -> Option<CellPos> {
        self.exploded
    }
    /// Returns how the game ended, or `None` if it is still being played.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            GameState::Playing => None,
            GameState::Lost => Some(Outcome::Lost),
            GameState::Won => Some(Outcome::Won),
            GameState::Infinite if self.exploded.is_some() => Some(Outcome::Lost),
            GameState::Infinite => Some(Outcome::Won),
        }
    }

    /// Applies an action, returning `false` if it was ignored.
    ///
    /// Reveals and flags are only accepted while playing. Restarts are only
    /// accepted once the game is over.
    pub fn apply(&mut self, action: Action) -> Result<bool> {
        log::trace!("{:?} in state {:?}", action, self.state);
        match action {
            Action::Reveal(pos) if self.state == GameState::Playing => Ok(self.reveal(pos)),
            Action::ToggleFlag(pos) if self.state == GameState::Playing => {
                Ok(self.toggle_flag(pos))
            }
            Action::Restart { seed } if self.state == GameState::Infinite => {
                self.restart(seed)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Uncovers a cell, losing the game if it is a mine. Returns `false` if
    /// nothing was uncovered.
    pub fn reveal(&mut self, pos: CellPos) -> bool {
        match self.board.uncover(pos) {
            Some(Cell::Mine) => {
                self.lose(pos);
                true
            }
            Some(Cell::Number(_)) => true,
            None => false,
        }
    }

    /// Places a flag on a hidden cell or removes one. Returns `false` for
    /// uncovered cells and positions off the board.
    pub fn toggle_flag(&mut self, pos: CellPos) -> bool {
        let is_mine = match self.board.cell(pos) {
            Some(cell) => cell.is_mine(),
            None => return false,
        };
        match self.board.tile(pos) {
            Some(Tile::Flagged) => {
                self.board.set_tile(pos, Tile::Hidden);
                if !is_mine {
                    self.mines_wrong -= 1;
                }
                self.mines_left += 1;
                true
            }
            Some(Tile::Hidden) => {
                self.board.set_tile(pos, Tile::Flagged);
                if !is_mine {
                    self.mines_wrong += 1;
                }
                self.mines_left -= 1;
                true
            }
            _ => false,
        }
    }

    /// Reveals every mine, marks wrong flags and marks the mine that was hit.
    fn lose(&mut self, exploded: CellPos) {
        let positions: Vec<CellPos> = self.board.tiles().positions().collect();
        for pos in positions {
            let is_mine = self.board.cell(pos) == Some(Cell::Mine);
            match self.board.tile(pos) {
                Some(Tile::Hidden) if is_mine => self.board.set_tile(pos, Tile::Mine),
                Some(Tile::Flagged) if !is_mine => self.board.set_tile(pos, Tile::WrongFlag),
                _ => (),
            }
        }
        self.board.set_tile(exploded, Tile::ExplodedMine);
        self.exploded = Some(exploded);
        self.state = GameState::Lost;
        log::info!("Lost: uncovered mine at {:?}", exploded);
    }

    /// Returns `true` if every mine is flagged, no flag is wrong, and no cell
    /// is left hidden.
    pub fn is_won(&self) -> bool {
        self.mines_left == 0 && self.mines_wrong == 0 && self.board.hidden_count() == 0
    }

    /// Advances the state machine by one frame.
    pub fn update(&mut self) {
        match self.state {
            GameState::Playing => {
                if self.is_won() {
                    self.state = GameState::Won;
                    log::info!("Won!");
                }
            }
            GameState::Lost | GameState::Won => self.state = GameState::Infinite,
            GameState::Infinite => (),
        }
    }

    /// Replaces the board with a new one with the same configuration.
    pub fn restart(&mut self, seed: u64) -> Result<()> {
        *self = Self::new(self.config, seed)?;
        Ok(())
    }

    /// Sends every visible tile to a sink, row by row.
    pub fn draw_cells(&self, sink: &mut impl CellSink) {
        let tiles = self.board.tiles();
        for pos in tiles.positions() {
            sink.draw_cell(pos, tiles[pos]);
        }
    }
}
