//! Error types for the checkers engine.

use crate::board::Square;
use crate::constants::Player;
use thiserror::Error;

/// Errors raised while building a board or reading squares, moves and
/// board layouts from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid square notation: {0:?}")]
    InvalidSquare(String),

    #[error("Invalid move notation: {0:?}")]
    InvalidMove(String),

    #[error("Board layout must have 8 ranks, found {0}")]
    RankCount(usize),

    #[error("Rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: usize },

    #[error("Unknown piece character {ch:?} in rank {rank}")]
    UnknownPiece { rank: usize, ch: char },

    #[error("Piece placed on non-playable square {0}")]
    UnplayableSquare(Square),
}

/// Errors raised by the game session when a requested move is rejected.
/// A rejected request never changes the board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("The game is already over")]
    GameOver,

    #[error("Square ({row}, {col}) is off the board")]
    InvalidSquare { row: i32, col: i32 },

    #[error("No piece at square {0}")]
    NoPieceAtSquare(Square),

    #[error("Piece at square {square} does not belong to {player}")]
    WrongPieceColor { square: Square, player: Player },

    #[error("Illegal move: {from} -> {to}")]
    IllegalMove { from: Square, to: Square },
}

pub type GameResult<T> = Result<T, GameError>;
