//! Game session: whose turn it is, the live board and the move history.
//!
//! Every move, human or machine, is checked against the legal-move list
//! before it touches the board. A rejected move leaves the session as it was.

use crate::board::{Board, Square};
use crate::constants::Player;
use crate::error::{GameError, GameResult};
use crate::move_gen;
use crate::r#move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
}

/// A move together with the side that played it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub player: Player,
    pub mv: Move,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Player,
    history: Vec<PlayedMove>,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game from the opening layout, Red to move.
    pub fn new() -> Self {
        Self::from_position(Board::starting(), Player::Red)
    }

    pub fn from_position(board: Board, to_move: Player) -> Self {
        let status = match move_gen::winner_with_turn(&board, to_move) {
            Some(player) => GameStatus::Won(player),
            None => GameStatus::InProgress,
        };
        Self { board, to_move, history: Vec::new(), status }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won(player) => Some(player),
            GameStatus::InProgress => None,
        }
    }

    /// Resolves a raw coordinate pair into a square.
    pub fn square(row: i32, col: i32) -> GameResult<Square> {
        Square::new(row, col).ok_or(GameError::InvalidSquare { row, col })
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        move_gen::moves_for_player(&self.board, self.to_move)
    }

    /// Legal moves starting on `from`, with the mandatory-capture rule
    /// applied across the whole board.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        self.legal_moves().into_iter().filter(|mv| mv.from == from).collect()
    }

    /// Finds the legal move that takes the piece on `from` to `to`.
    pub fn select(&self, from: Square, to: Square) -> GameResult<Move> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let piece = self.board.piece_at(from).ok_or(GameError::NoPieceAtSquare(from))?;
        if piece.owner != self.to_move {
            return Err(GameError::WrongPieceColor { square: from, player: self.to_move });
        }
        self.legal_moves_from(from)
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(GameError::IllegalMove { from, to })
    }

    /// Selects and plays the move from `from` to `to`.
    pub fn play_squares(&mut self, from: Square, to: Square) -> GameResult<&PlayedMove> {
        let mv = self.select(from, to)?;
        self.play(&mv)
    }

    /// Plays `mv` for the side to move if it is in the legal-move list.
    pub fn play(&mut self, mv: &Move) -> GameResult<&PlayedMove> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if !self.legal_moves().contains(mv) {
            return Err(GameError::IllegalMove { from: mv.from, to: mv.to });
        }

        self.board = self.board.apply_move(mv);
        self.history.push(PlayedMove { player: self.to_move, mv: mv.clone() });
        self.to_move = self.to_move.opponent();
        if let Some(player) = move_gen::winner_with_turn(&self.board, self.to_move) {
            self.status = GameStatus::Won(player);
        }

        Ok(&self.history[self.history.len() - 1])
    }
}
