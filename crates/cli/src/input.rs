//! Parsing of the human player's input lines.

use checkers_engine::board::Square;
use checkers_engine::error::BoardError;
use checkers_engine::r#move::Move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Origin and destination; the legal move joining them is looked up.
    Squares(Square, Square),
    /// A move with its capture list spelled out.
    Exact(Move),
    Moves,
    Board,
    New,
    Help,
    Quit,
}

pub const HELP: &str = "\
Enter a move as `row,col->row,col` or `row,col row,col`, e.g. `2,1->3,0`.
Add `|r,c;r,c` to pick one of several capture chains with the same ends.
Commands: moves, board, new, help, quit";

pub fn parse_command(line: &str) -> Result<Command, BoardError> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "moves" | "m" => return Ok(Command::Moves),
        "board" | "b" => return Ok(Command::Board),
        "new" => return Ok(Command::New),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        _ => {}
    }

    if line.contains("->") {
        let mv: Move = line.parse()?;
        return Ok(if line.contains('|') { Command::Exact(mv) } else { Command::Squares(mv.from, mv.to) });
    }

    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(from), Some(to), None) => Ok(Command::Squares(from.parse()?, to.parse()?)),
        _ => Err(BoardError::InvalidMove(line.to_string())),
    }
}
