//! Constants used in the checkers engine.

use std::fmt;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Diagonal step offsets as `(row, col)` deltas.
pub const UP_LEFT: (i8, i8) = (-1, -1);
pub const UP_RIGHT: (i8, i8) = (-1, 1);
pub const DOWN_LEFT: (i8, i8) = (1, -1);
pub const DOWN_RIGHT: (i8, i8) = (1, 1);

/// All four diagonals. Direction sets elsewhere are indices into this table.
pub const ALL_DIRECTIONS: [(i8, i8); 4] = [UP_LEFT, UP_RIGHT, DOWN_LEFT, DOWN_RIGHT];
pub const NUM_DIRECTIONS: usize = ALL_DIRECTIONS.len();

const KING_DIRECTIONS: [usize; 4] = [0, 1, 2, 3];
const RED_MAN_DIRECTIONS: [usize; 2] = [2, 3];
const BLACK_MAN_DIRECTIONS: [usize; 2] = [0, 1];

/// The two sides. Red opens from rows 0-2 and advances toward row 7,
/// Black opens from rows 5-7 and advances toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Black,
}

impl Player {
    /// Get the opponent of the current player.
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Black,
            Player::Black => Player::Red,
        }
    }

    /// Directions an uncrowned piece of this side may move and jump in.
    pub fn man_directions(self) -> &'static [usize] {
        match self {
            Player::Red => &RED_MAN_DIRECTIONS,
            Player::Black => &BLACK_MAN_DIRECTIONS,
        }
    }

    /// The row on which this side's men are crowned (the opponent's back rank).
    pub fn promotion_row(self) -> usize {
        match self {
            Player::Red => BOARD_SIZE - 1,
            Player::Black => 0,
        }
    }

    /// The row this side defends, i.e. the opponent's promotion row.
    pub fn home_row(self) -> usize {
        self.opponent().promotion_row()
    }

    /// How many rows a man of this side on `row` has advanced from its own back rank.
    pub fn progress(self, row: usize) -> usize {
        match self {
            Player::Red => row,
            Player::Black => BOARD_SIZE - 1 - row,
        }
    }

    /// Gets the index for per-side tables (0 for Red, 1 for Black).
    pub fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Black => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Red => write!(f, "red"),
            Player::Black => write!(f, "black"),
        }
    }
}

/// A piece on the board. Only `crowned` ever changes after placement,
/// and only from false to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: Player,
    pub crowned: bool,
}

impl Piece {
    pub const fn man(owner: Player) -> Self {
        Self { owner, crowned: false }
    }

    pub const fn king(owner: Player) -> Self {
        Self { owner, crowned: true }
    }

    /// Directions this piece may step or jump in.
    pub fn directions(self) -> &'static [usize] {
        if self.crowned {
            &KING_DIRECTIONS
        } else {
            self.owner.man_directions()
        }
    }

    pub fn to_layout_char(self) -> char {
        match (self.owner, self.crowned) {
            (Player::Red, false) => 'r',
            (Player::Red, true) => 'R',
            (Player::Black, false) => 'b',
            (Player::Black, true) => 'B',
        }
    }

    pub fn from_layout_char(c: char) -> Option<Piece> {
        match c {
            'r' => Some(Piece::man(Player::Red)),
            'R' => Some(Piece::king(Player::Red)),
            'b' => Some(Piece::man(Player::Black)),
            'B' => Some(Piece::king(Player::Black)),
            _ => None,
        }
    }
}
