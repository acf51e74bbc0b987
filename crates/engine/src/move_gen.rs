//! Move generation logic, including pre-computed diagonal tables.
//!
//! Capture chains are enumerated recursively. Each branch of a chain
//! carries its own copy of the captured-square list, so sibling branches
//! never see each other's jumps. Only completed chains are returned as
//! moves; promotion is left to [`Board::apply_move`], so a man that
//! passes its promotion row mid-chain keeps moving as a man.

use crate::board::{Board, Square};
use crate::constants::{ALL_DIRECTIONS, NUM_DIRECTIONS, NUM_SQUARES, Piece, Player};
use crate::r#move::{Captures, Move};
use once_cell::sync::Lazy;

/// Pre-computed neighbours for every square and direction.
pub struct DiagonalTables {
    /// `step[sq][dir]`: the adjacent square in `dir`.
    pub step: [[Option<Square>; NUM_DIRECTIONS]; NUM_SQUARES],
    /// `jump[sq][dir]`: the jumped-over square and the landing square.
    pub jump: [[Option<(Square, Square)>; NUM_DIRECTIONS]; NUM_SQUARES],
}

impl DiagonalTables {
    fn new() -> Self {
        let mut tables = DiagonalTables {
            step: [[None; NUM_DIRECTIONS]; NUM_SQUARES],
            jump: [[None; NUM_DIRECTIONS]; NUM_SQUARES],
        };

        for idx in 0..NUM_SQUARES {
            let sq = Square::from_index(idx);
            for (d, &dir) in ALL_DIRECTIONS.iter().enumerate() {
                tables.step[idx][d] = sq.offset(dir, 1);
                tables.jump[idx][d] = sq.offset(dir, 1).zip(sq.offset(dir, 2));
            }
        }
        tables
    }
}

pub static DIAGONALS: Lazy<DiagonalTables> = Lazy::new(DiagonalTables::new);

/// Legal moves for the piece on `sq`, provided it belongs to `side`.
///
/// Returns an empty list for an empty square or an opponent's piece. When
/// the piece can capture, only its captures are returned.
pub fn moves_from(board: &Board, sq: Square, side: Player) -> Vec<Move> {
    match board.piece_at(sq) {
        Some(piece) if piece.owner == side => piece_moves(board, sq, piece),
        _ => Vec::new(),
    }
}

/// All legal moves for `side`, with the mandatory-capture rule applied:
/// when any capture exists anywhere on the board, only captures are returned.
///
/// Moves come out in row-major origin order, then in direction order. Callers
/// that need a tie-break rely on this order.
pub fn moves_for_player(board: &Board, side: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for (sq, piece) in board.pieces_of(side) {
        moves.extend(piece_moves(board, sq, piece));
    }
    if moves.iter().any(Move::is_capture) {
        moves.retain(Move::is_capture);
    }
    moves
}

pub fn has_legal_moves(board: &Board, side: Player) -> bool {
    board
        .pieces_of(side)
        .any(|(sq, piece)| !piece_moves(board, sq, piece).is_empty())
}

/// True when either side has no legal move left.
pub fn is_terminal(board: &Board) -> bool {
    !has_legal_moves(board, Player::Red) || !has_legal_moves(board, Player::Black)
}

/// The side that has won, if any, without regard to whose turn it is.
///
/// Piece counts are decided first: a side with no pieces has lost, Red
/// checked before Black. Only when both sides still have pieces does a
/// side with no legal move lose, again Red first.
pub fn winner(board: &Board) -> Option<Player> {
    if let Some(winner) = winner_by_material(board) {
        return Some(winner);
    }
    if !has_legal_moves(board, Player::Red) {
        Some(Player::Black)
    } else if !has_legal_moves(board, Player::Black) {
        Some(Player::Red)
    } else {
        None
    }
}

/// The side that has won with `to_move` about to play.
///
/// Same priority as [`winner`], piece counts first, except that among
/// the blocked sides the side to move is checked before its opponent.
pub fn winner_with_turn(board: &Board, to_move: Player) -> Option<Player> {
    if let Some(winner) = winner_by_material(board) {
        return Some(winner);
    }
    [to_move, to_move.opponent()]
        .into_iter()
        .find(|&side| !has_legal_moves(board, side))
        .map(Player::opponent)
}

fn winner_by_material(board: &Board) -> Option<Player> {
    if board.piece_count(Player::Red) == 0 {
        Some(Player::Black)
    } else if board.piece_count(Player::Black) == 0 {
        Some(Player::Red)
    } else {
        None
    }
}

/// Returns true if the piece on `sq` could be jumped by one of `attacker`'s
/// pieces: some diagonal neighbour holds an attacker and the square on the
/// opposite side is empty. The attacker's own movement directions are not
/// considered.
pub fn is_threatened_by(board: &Board, sq: Square, attacker: Player) -> bool {
    (0..NUM_DIRECTIONS).any(|d| {
        let Some(attacker_sq) = DIAGONALS.step[sq.index()][d] else {
            return false;
        };
        // The landing square lies in the opposite direction.
        let Some(landing_sq) = DIAGONALS.step[sq.index()][NUM_DIRECTIONS - 1 - d] else {
            return false;
        };
        matches!(board.piece_at(attacker_sq), Some(p) if p.owner == attacker)
            && board.piece_at(landing_sq).is_none()
    })
}

fn piece_moves(board: &Board, sq: Square, piece: Piece) -> Vec<Move> {
    let mut captures = Vec::new();
    capture_chains(board, sq, sq, piece, &Captures::new(), &mut captures);
    if !captures.is_empty() {
        return captures;
    }

    piece
        .directions()
        .iter()
        .filter_map(|&d| DIAGONALS.step[sq.index()][d])
        .filter(|&to| board.piece_at(to).is_none())
        .map(|to| Move::step(sq, to))
        .collect()
}

/// Extends the chain that started at `origin` and currently stands on `at`.
/// Every maximal continuation is pushed to `out` as one move.
fn capture_chains(
    board: &Board,
    origin: Square,
    at: Square,
    piece: Piece,
    captured: &Captures,
    out: &mut Vec<Move>,
) {
    for &d in piece.directions() {
        let Some((over, land)) = DIAGONALS.jump[at.index()][d] else {
            continue;
        };
        let jumpable = matches!(board.piece_at(over), Some(victim) if victim.owner != piece.owner);
        if !jumpable || captured.contains(&over) || board.piece_at(land).is_some() {
            continue;
        }

        let mut chain = captured.clone();
        chain.push(over);

        let found = out.len();
        capture_chains(board, origin, land, piece, &chain, out);
        if out.len() == found {
            out.push(Move::capture(origin, land, chain));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    fn board(layout: &str) -> Board {
        Board::from_layout(layout).unwrap()
    }

    #[test]
    fn opening_position_has_seven_moves_each() {
        let board = Board::starting();
        let red = moves_for_player(&board, Player::Red);
        let black = moves_for_player(&board, Player::Black);
        assert_eq!(red.len(), 7);
        assert_eq!(black.len(), 7);
        assert!(red.iter().all(|mv| mv.from.row() == 2 && mv.to.row() == 3));
        assert!(black.iter().all(|mv| mv.from.row() == 5 && mv.to.row() == 4));
    }

    #[test]
    fn men_only_move_forward() {
        // Red man on (3,2), Black man on (4,5), nothing else nearby.
        let board = board("8/8/8/2r5/5b2/8/8/8");
        let red = moves_from(&board, sq(3, 2), Player::Red);
        assert_eq!(red, vec![Move::step(sq(3, 2), sq(4, 1)), Move::step(sq(3, 2), sq(4, 3))]);

        let black = moves_from(&board, sq(4, 5), Player::Black);
        assert_eq!(black, vec![Move::step(sq(4, 5), sq(3, 4)), Move::step(sq(4, 5), sq(3, 6))]);
    }

    #[test]
    fn kings_move_in_all_directions() {
        let board = board("8/8/8/4R3/8/8/8/8");
        let moves = moves_from(&board, sq(3, 4), Player::Red);
        let targets: Vec<Square> = moves.iter().map(|mv| mv.to).collect();
        assert_eq!(targets, vec![sq(2, 3), sq(2, 5), sq(4, 3), sq(4, 5)]);
    }

    #[test]
    fn moves_from_ignores_empty_and_opponent_squares() {
        let board = Board::starting();
        assert!(moves_from(&board, sq(3, 0), Player::Red).is_empty());
        assert!(moves_from(&board, sq(5, 0), Player::Red).is_empty());
        assert!(!moves_from(&board, sq(5, 0), Player::Black).is_empty());
    }

    #[test]
    fn single_capture_is_mandatory() {
        // Black man on (3,4) can jump the Red man on (2,3) into (1,2).
        // Black also has a free man on (6,1) with simple moves available.
        let board = board("8/8/3r4/4b3/8/8/1b6/8");
        let moves = moves_for_player(&board, Player::Black);
        assert_eq!(moves, vec![Move::capture(sq(3, 4), sq(1, 2), [sq(2, 3)])]);
    }

    #[test]
    fn capture_chain_collapses_into_one_move() {
        // Black man on (5,0) jumps (4,1) then (2,1).
        let board = board("8/8/1r6/8/1r6/b7/8/8");
        let moves = moves_for_player(&board, Player::Black);
        assert_eq!(moves, vec![Move::capture(sq(5, 0), sq(1, 0), [sq(4, 1), sq(2, 1)])]);
    }

    #[test]
    fn branching_chains_do_not_share_captures() {
        // Red man on (0,3) jumps (1,4) to (2,5); from there it can take
        // (3,4) or (3,6). Each branch lists only its own jumps.
        let board = board("3r4/4b3/8/4b1b1/8/8/8/8");
        let mut moves = moves_for_player(&board, Player::Red);
        moves.sort_by_key(|mv| mv.to);
        assert_eq!(
            moves,
            vec![
                Move::capture(sq(0, 3), sq(4, 3), [sq(1, 4), sq(3, 4)]),
                Move::capture(sq(0, 3), sq(4, 7), [sq(1, 4), sq(3, 6)]),
            ]
        );
    }

    #[test]
    fn chain_ending_on_promotion_row_crowns_on_apply() {
        let board = board("8/2r5/3b4/8/8/8/8/8");
        let moves = moves_for_player(&board, Player::Black);
        assert_eq!(moves, vec![Move::capture(sq(2, 3), sq(0, 1), [sq(1, 2)])]);
        let next = board.apply_move(&moves[0]);
        assert_eq!(next.piece_at(sq(0, 1)), Some(Piece::king(Player::Black)));
    }

    #[test]
    fn promotion_does_not_extend_a_chain() {
        // Black man on (2,5) jumps (1,4) to (0,3). As a king it could then
        // jump backward over (1,2) to (2,1); as a man it must stop.
        let board = board("8/2r1r3/5b2/8/8/8/8/8");
        let moves = moves_for_player(&board, Player::Black);
        assert_eq!(moves, vec![Move::capture(sq(2, 5), sq(0, 3), [sq(1, 4)])]);
    }

    #[test]
    fn king_chain_cannot_recapture_a_piece() {
        // Red king on (2,1) surrounded by Black men it can jump in a loop;
        // no square may be captured twice in the same chain.
        let board = board("8/8/1R6/2b1b3/8/2b1b3/8/8");
        let moves = moves_for_player(&board, Player::Red);
        assert!(!moves.is_empty());
        for mv in &moves {
            let mut seen = mv.captures.to_vec();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), mv.captures.len(), "duplicate capture in {mv}");
        }
    }

    #[test]
    fn blocked_landing_square_prevents_capture() {
        // Black man on (6,1) faces Red on (5,2); (4,3) is empty so it jumps.
        let open = board("8/8/8/8/8/2r5/1b6/8");
        assert_eq!(
            moves_for_player(&open, Player::Black),
            vec![Move::capture(sq(6, 1), sq(4, 3), [sq(5, 2)])]
        );

        // With (4,3) occupied only the simple step to (5,0) remains.
        let blocked = board("8/8/8/8/3r4/2r5/1b6/8");
        assert_eq!(moves_for_player(&blocked, Player::Black), vec![Move::step(sq(6, 1), sq(5, 0))]);
    }

    #[test]
    fn terminal_and_winner() {
        let board = Board::starting();
        assert!(!is_terminal(&board));
        assert_eq!(winner(&board), None);

        // Red has no pieces at all.
        let board = Board::from_layout("8/8/8/8/8/b7/8/8").unwrap();
        assert!(is_terminal(&board));
        assert_eq!(winner(&board), Some(Player::Black));
        assert_eq!(winner_with_turn(&board, Player::Red), Some(Player::Black));
    }

    #[test]
    fn empty_side_loses_even_when_the_other_is_blocked() {
        // Black has no pieces; Red's only man is stuck on the back rank.
        let board = board("8/8/8/8/8/8/8/r7");
        assert!(!has_legal_moves(&board, Player::Red));
        assert_eq!(winner(&board), Some(Player::Red));
        assert_eq!(winner_with_turn(&board, Player::Red), Some(Player::Red));
        assert_eq!(winner_with_turn(&board, Player::Black), Some(Player::Red));
    }

    #[test]
    fn blocked_side_to_move_loses_first() {
        // Both men sit on their far rank with no moves left.
        let board = board("1b6/8/8/8/8/8/8/r7");
        assert_eq!(winner(&board), Some(Player::Black));
        assert_eq!(winner_with_turn(&board, Player::Red), Some(Player::Black));
        assert_eq!(winner_with_turn(&board, Player::Black), Some(Player::Red));
    }

    #[test]
    fn threat_detection() {
        // Red man on (3,2) with Black on (4,3) and (2,1) empty.
        let board = board("8/8/8/2r5/3b4/8/8/8");
        assert!(is_threatened_by(&board, sq(3, 2), Player::Black));
        assert!(is_threatened_by(&board, sq(4, 3), Player::Red));

        let covered = Board::from_layout("8/8/1r6/2r5/3b4/8/8/8").unwrap();
        assert!(!is_threatened_by(&covered, sq(3, 2), Player::Black));
    }
}
