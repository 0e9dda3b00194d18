/// Errors from parsing or building a board coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordError {
    #[error("malformed square {0:?}: expected a file letter a-h followed by a rank 1-8")]
    Malformed(String),

    #[error("rank {0} is off the board")]
    RankOutOfRange(usize),

    #[error("file {0} is off the board")]
    FileOutOfRange(usize),
}

/// Errors from parsing a board layout string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout has {0} cells, expected 64")]
    WrongLength(usize),

    #[error("unexpected character {ch:?} at cell {index}")]
    BadCell { ch: char, index: usize },
}

/// Errors raised by the game controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,
}
