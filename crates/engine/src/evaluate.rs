//! Evaluates a board position and returns a score.
//!
//! Scores are always from the point of view of `perspective`: positive
//! favours that side. Some terms deliberately only look at one side (the
//! edge bonus only rewards `perspective`'s men, the threat bonus only
//! counts the opponent's hanging pieces), which gives the machine an
//! aggressive bias.

use crate::board::Board;
use crate::config::Config;
use crate::constants::{Piece, Player};
use crate::move_gen;

pub fn evaluate(board: &Board, perspective: Player, config: &Config) -> f64 {
    let piece_score = calculate_piece_score(board, perspective, config);
    let mobility_score = calculate_mobility_score(board, perspective, config);
    let king_row_score = calculate_king_row_score(board, perspective, config);
    let threat_score = calculate_threat_score(board, perspective, config);

    piece_score + mobility_score + king_row_score + threat_score
}

/// Material plus the per-piece positional terms.
fn calculate_piece_score(board: &Board, perspective: Player, config: &Config) -> f64 {
    let mut score = 0.0;

    for (sq, piece) in board.pieces() {
        let (row, col) = (sq.row(), sq.col());
        let own = piece.owner == perspective;
        let sign = if own { 1.0 } else { -1.0 };

        score += sign * material_value(piece, config);

        if piece.crowned {
            // Kings are strongest in the middle of the board.
            if (3..=4).contains(&row) && (2..=5).contains(&col) {
                score += sign * config.king_center_bonus;
            }
            continue;
        }

        score += sign * piece.owner.progress(row) as f64 * config.advancement_per_row;
        if (2..=5).contains(&col) {
            score += sign * config.center_bonus;
        }
        if own && (col == 0 || col == 7) {
            score += config.edge_bonus;
        }
    }
    score
}

fn material_value(piece: Piece, config: &Config) -> f64 {
    if piece.crowned { config.king_value } else { config.man_value }
}

fn calculate_mobility_score(board: &Board, perspective: Player, config: &Config) -> f64 {
    let own_moves = move_gen::moves_for_player(board, perspective).len() as f64;
    let opponent_moves = move_gen::moves_for_player(board, perspective.opponent()).len() as f64;
    (own_moves - opponent_moves) * config.mobility_per_move
}

/// Rewards pieces sitting on the opponent's back rank.
fn calculate_king_row_score(board: &Board, perspective: Player, config: &Config) -> f64 {
    let mut score = 0.0;
    for (sq, piece) in board.pieces() {
        if sq.row() == piece.owner.promotion_row() {
            if piece.owner == perspective {
                score += config.king_row_bonus;
            } else {
                score -= config.king_row_bonus;
            }
        }
    }
    score
}

fn calculate_threat_score(board: &Board, perspective: Player, config: &Config) -> f64 {
    board
        .pieces_of(perspective.opponent())
        .filter(|&(sq, _)| move_gen::is_threatened_by(board, sq, perspective))
        .count() as f64
        * config.threat_bonus
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn eval(layout: &str, perspective: Player) -> f64 {
        evaluate(&Board::from_layout(layout).unwrap(), perspective, &Config::default())
    }

    #[test]
    fn opening_position_only_differs_by_edge_bonus() {
        // Material, advancement, centre and mobility all cancel out; Black
        // has three men on the edge columns.
        let score = evaluate(&Board::starting(), Player::Black, &Config::default());
        assert!((score - 0.3).abs() < EPSILON, "got {score}");

        // Red's edge men are on (0,7), (1,0) and (2,7).
        let score = evaluate(&Board::starting(), Player::Red, &Config::default());
        assert!((score - 0.3).abs() < EPSILON, "got {score}");
    }

    #[test]
    fn lone_man_terms() {
        // Black man on (4,3): material 1, advancement 3 rows, centre, two moves.
        let score = eval("8/8/8/8/3b4/8/8/8", Player::Black);
        let expected = 1.0 + 0.3 + 0.05 + 2.0 * 0.1;
        assert!((score - expected).abs() < EPSILON, "got {score}");

        // Same board seen by Red mirrors everything but has no edge/threat asymmetry here.
        let score = eval("8/8/8/8/3b4/8/8/8", Player::Red);
        assert!((score + expected).abs() < EPSILON, "got {score}");
    }

    #[test]
    fn edge_bonus_only_counts_for_perspective() {
        // Black man on (5,0): one move, edge column.
        let black = eval("8/8/8/8/8/b7/8/8", Player::Black);
        let expected = 1.0 + 0.2 + 0.1 + 0.1;
        assert!((black - expected).abs() < EPSILON, "got {black}");

        let red = eval("8/8/8/8/8/b7/8/8", Player::Red);
        let expected = -(1.0 + 0.2) - 0.1;
        assert!((red - expected).abs() < EPSILON, "got {red}");
    }

    #[test]
    fn centralised_king_bonus() {
        // Black king on (3,4): value 3, centre king bonus, four moves.
        let score = eval("8/8/8/4B3/8/8/8/8", Player::Black);
        let expected = 3.0 + 0.2 + 4.0 * 0.1;
        assert!((score - expected).abs() < EPSILON, "got {score}");
    }

    #[test]
    fn king_row_control() {
        // Black king on (0,1) sits on Red's back rank; two backward moves.
        let score = eval("1B6/8/8/8/8/8/8/8", Player::Black);
        let expected = 3.0 + 0.3 + 2.0 * 0.1;
        assert!((score - expected).abs() < EPSILON, "got {score}");
    }

    #[test]
    fn hanging_opponent_piece_earns_threat_bonus() {
        let with_threat = Board::from_layout("8/8/8/2r5/3b4/8/8/8").unwrap();
        let config = Config::default();
        let threat = calculate_threat_score(&with_threat, Player::Black, &config);
        assert!((threat - 0.5).abs() < EPSILON);

        // Only the opponent's pieces are inspected, never the perspective's own.
        let threat = calculate_threat_score(&with_threat, Player::Red, &config);
        assert!((threat - 0.5).abs() < EPSILON);
        let lone_black = Board::from_layout("8/8/8/8/3b4/8/8/8").unwrap();
        assert_eq!(calculate_threat_score(&lone_black, Player::Black, &config), 0.0);

        let covered = Board::from_layout("8/8/1r6/2r5/3b4/8/8/8").unwrap();
        assert_eq!(calculate_threat_score(&covered, Player::Black, &config), 0.0);
    }
}
