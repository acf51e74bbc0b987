pub mod board;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod game;
pub mod move_gen;
pub mod r#move;

pub use board::{Board, Square};
pub use constants::{Piece, Player};
pub use engine::{Engine, SearchResult};
pub use error::{BoardError, GameError};
pub use game::{Game, GameStatus};
pub use r#move::Move;
