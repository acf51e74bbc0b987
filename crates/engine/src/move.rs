//! Defines the representation of a move in the engine.

use crate::board::Square;
use crate::error::BoardError;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Captured squares of one move, in jump order. Chains rarely exceed four jumps.
pub type Captures = SmallVec<[Square; 4]>;

/// Represents a single move: one simple diagonal step, or a whole capture
/// chain collapsed into its start square, end square and the ordered
/// list of squares jumped over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub captures: Captures,
}

impl Move {
    /// Creates a non-capturing move.
    pub fn step(from: Square, to: Square) -> Self {
        Self { from, to, captures: Captures::new() }
    }

    /// Creates a capturing move from its chain of jumped squares.
    pub fn capture(from: Square, to: Square, captures: impl IntoIterator<Item = Square>) -> Self {
        Self { from, to, captures: captures.into_iter().collect() }
    }

    /// Checks if the move is a capture.
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }
}

/// Canonical notation: `from_row,from_col->to_row,to_col|r,c;r,c`, with
/// the capture list empty for simple moves.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}|", self.from, self.to)?;
        for (i, sq) in self.captures.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{}", sq)?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = BoardError;

    /// Parses the canonical notation. The `|captures` suffix may be omitted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidMove(s.to_string());
        let (path, captures) = match s.trim().split_once('|') {
            Some((path, captures)) => (path, captures.trim()),
            None => (s.trim(), ""),
        };
        let (from, to) = path.split_once("->").ok_or_else(invalid)?;
        let from: Square = from.parse().map_err(|_| invalid())?;
        let to: Square = to.parse().map_err(|_| invalid())?;
        let captures = if captures.is_empty() {
            Captures::new()
        } else {
            captures
                .split(';')
                .map(|sq| sq.parse::<Square>().map_err(|_| invalid()))
                .collect::<Result<Captures, _>>()?
        };
        Ok(Move { from, to, captures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn simple_move_notation() {
        let mv = Move::step(sq(2, 1), sq(3, 0));
        assert!(!mv.is_capture());
        assert_eq!(mv.to_string(), "2,1->3,0|");
        assert_eq!("2,1->3,0".parse::<Move>().unwrap(), mv);
    }

    #[test]
    fn chain_notation_keeps_capture_order() {
        let mv = Move::capture(sq(5, 0), sq(1, 0), [sq(4, 1), sq(2, 1)]);
        assert!(mv.is_capture());
        assert_eq!(mv.to_string(), "5,0->1,0|4,1;2,1");
        assert_eq!(" 5,0 -> 1,0 | 4,1;2,1 ".parse::<Move>().unwrap(), mv);
    }

    #[test]
    fn malformed_notation_is_rejected() {
        for bad in ["", "2,1", "2,1-3,0", "2,1->9,0", "2,1->3,0|x"] {
            assert!(bad.parse::<Move>().is_err(), "{bad:?} should not parse");
        }
    }
}
