use thiserror::Error;

/// Errors from building or setting up a game.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A board needs at least one row and one column.
    #[error("board must be at least 1x1")]
    EmptyBoard,
    /// The board is wider or taller than allowed.
    #[error("board is {width}x{height} but at most {max} rows and columns are allowed")]
    TooLarge { width: u32, height: u32, max: u32 },
    /// More mines were requested than the density limit allows.
    #[error("too many mines: {mines} requested but at most {max} fit")]
    TooManyMines { mines: u32, max: u32 },
    /// A mine position lies off the board.
    #[cfg(test)]
    #[error("invalid coordinates")]
    InvalidCoords,
    /// The board storage could not be allocated.
    #[error("failed to allocate a {width}x{height} board")]
    Allocation { width: u32, height: u32 },
}

/// Result type for game setup.
pub type Result<T> = std::result::Result<T, GameError>;
