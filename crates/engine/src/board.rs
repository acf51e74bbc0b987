//! The board representation for the checkers engine.
//!
//! A `Board` is a plain 64-cell array and is `Copy`: applying a move
//! produces a new board and never touches the one it was derived from.

use crate::constants::{BOARD_SIZE, NUM_SQUARES, Piece, Player};
use crate::error::BoardError;
use crate::r#move::Move;
use std::fmt;
use std::str::FromStr;

/// Returns true iff `(row, col)` is on the board and is a dark square,
/// the only squares pieces may ever stand on.
pub fn is_occupiable(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row)
        && (0..BOARD_SIZE as i32).contains(&col)
        && (row + col) % 2 == 1
}

/// A board coordinate. Both components are always in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square, returning `None` when either coordinate is off the board.
    pub fn new(row: i32, col: i32) -> Option<Square> {
        if (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col) {
            Some(Square { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    pub(crate) fn from_index(idx: usize) -> Square {
        Square { row: (idx / BOARD_SIZE) as u8, col: (idx % BOARD_SIZE) as u8 }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    pub fn index(self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }

    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// The square `steps` diagonal steps away in `dir`, if it is on the board.
    pub fn offset(self, dir: (i8, i8), steps: i8) -> Option<Square> {
        Square::new(
            self.row as i32 + (dir.0 * steps) as i32,
            self.col as i32 + (dir.1 * steps) as i32,
        )
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Square {
    type Err = BoardError;

    /// Parses the `row,col` form used in move notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidSquare(s.to_string());
        let (row, col) = s.trim().split_once(',').ok_or_else(invalid)?;
        let row: i32 = row.trim().parse().map_err(|_| invalid())?;
        let col: i32 = col.trim().parse().map_err(|_| invalid())?;
        Square::new(row, col).ok_or_else(invalid)
    }
}

/// The state of the 8x8 board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; NUM_SQUARES],
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Self { squares: [None; NUM_SQUARES] }
    }

    /// The standard opening layout: Red men on rows 0-2, Black men on rows 5-7.
    pub fn starting() -> Self {
        let mut board = Board::empty();
        for idx in 0..NUM_SQUARES {
            let sq = Square::from_index(idx);
            if !sq.is_playable() {
                continue;
            }
            match sq.row() {
                0..=2 => board.squares[idx] = Some(Piece::man(Player::Red)),
                5..=7 => board.squares[idx] = Some(Piece::man(Player::Black)),
                _ => {}
            }
        }
        board
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Puts `piece` on `sq`, replacing whatever stood there.
    pub fn place(&mut self, sq: Square, piece: Piece) -> Result<(), BoardError> {
        if !sq.is_playable() {
            return Err(BoardError::UnplayableSquare(sq));
        }
        self.squares[sq.index()] = Some(piece);
        Ok(())
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Iterates over every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|piece| (Square::from_index(idx), piece)))
    }

    /// Iterates over the squares holding `player`'s pieces in row-major order.
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.owner == player)
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    /// Returns a new board with `mv` played: the piece relocated, every
    /// captured square cleared, and the piece crowned if it ends on its
    /// promotion row. `self` is left untouched.
    pub fn apply_move(&self, mv: &Move) -> Board {
        let mut next = *self;
        let Some(mut piece) = next.remove(mv.from) else {
            return next;
        };
        for &captured in mv.captures.iter() {
            next.remove(captured);
        }
        if mv.to.row() == piece.owner.promotion_row() {
            piece.crowned = true;
        }
        next.squares[mv.to.index()] = Some(piece);
        next
    }

    /// Parses a layout string: eight ranks separated by `/`, row 0 first.
    /// `r`/`R` are Red men/kings, `b`/`B` Black men/kings, digits skip
    /// that many empty squares.
    pub fn from_layout(layout: &str) -> Result<Self, BoardError> {
        let ranks: Vec<&str> = layout.trim().split('/').collect();
        if ranks.len() != BOARD_SIZE {
            return Err(BoardError::RankCount(ranks.len()));
        }

        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0;
            for ch in rank.chars() {
                if let Some(digit) = ch.to_digit(10) {
                    col += digit as usize;
                    continue;
                }
                let piece = Piece::from_layout_char(ch).ok_or(BoardError::UnknownPiece { rank: row, ch })?;
                if col >= BOARD_SIZE {
                    return Err(BoardError::RankWidth { rank: row });
                }
                board.place(Square::from_index(row * BOARD_SIZE + col), piece)?;
                col += 1;
            }
            if col != BOARD_SIZE {
                return Err(BoardError::RankWidth { rank: row });
            }
        }
        Ok(board)
    }

    pub fn to_layout(&self) -> String {
        let mut layout = String::with_capacity(72);
        for row in 0..BOARD_SIZE {
            let mut empty_count = 0;
            for col in 0..BOARD_SIZE {
                match self.squares[row * BOARD_SIZE + col] {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            layout.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        layout.push(piece.to_layout_char());
                    }
                }
            }
            if empty_count > 0 {
                layout.push_str(&empty_count.to_string());
            }
            if row < BOARD_SIZE - 1 {
                layout.push('/');
            }
        }
        layout
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_layout())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    0 1 2 3 4 5 6 7")?;
        writeln!(f, "  +-----------------+")?;
        for row in 0..BOARD_SIZE {
            write!(f, "{} | ", row)?;
            for col in 0..BOARD_SIZE {
                let ch = self.squares[row * BOARD_SIZE + col].map_or('.', Piece::to_layout_char);
                write!(f, "{} ", ch)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")
    }
}
