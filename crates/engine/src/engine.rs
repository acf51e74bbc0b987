//! The main search engine.
//!
//! Depth-limited minimax with alpha-beta pruning. Scores are always from
//! the maximizing side's point of view, whichever side is to move. Every
//! ply works on a fresh copy of the board, so the caller's board is never
//! touched and the search keeps no state between calls.

use crate::board::Board;
use crate::config::Config;
use crate::constants::Player;
use crate::evaluate;
use crate::move_gen;
use crate::r#move::Move;
use std::time::Instant;
use tracing::debug;

/// Score reported when the side to move has no legal move: a loss for the
/// maximizer is `-WIN_SCORE`, a loss for the minimizer is `WIN_SCORE`.
pub const WIN_SCORE: f64 = f64::INFINITY;

/// The outcome of one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best move for the side to move, or `None` when no move was searched
    /// (depth exhausted or the side to move is stuck).
    pub best_move: Option<Move>,
    pub score: f64,
    /// Number of positions visited, root included.
    pub nodes: u64,
}

/// The search engine.
#[derive(Debug, Clone)]
pub struct Engine {
    pub config: Config,
    /// The side whose advantage scores count as positive.
    pub maximizer: Player,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Player::Black)
    }
}

impl Engine {
    /// Creates an engine playing for `maximizer` with the default weights.
    pub fn new(maximizer: Player) -> Self {
        Self { config: Config::default(), maximizer }
    }

    pub fn with_config(maximizer: Player, config: Config) -> Self {
        Self { config, maximizer }
    }

    /// Static evaluation of `board` from the maximizer's point of view.
    pub fn evaluate(&self, board: &Board) -> f64 {
        evaluate::evaluate(board, self.maximizer, &self.config)
    }

    /// Searches `depth` plies ahead with `to_move` to play.
    ///
    /// A depth of zero or less returns the static evaluation without a move.
    /// Among equally scored moves the first one in generation order wins.
    pub fn search(&self, board: &Board, depth: i32, to_move: Player) -> SearchResult {
        let start_time = Instant::now();
        let mut nodes = 0;

        let (best_move, score) =
            self.alpha_beta(board, depth, -WIN_SCORE, WIN_SCORE, to_move, &mut nodes);

        debug!(
            depth,
            %to_move,
            score,
            nodes,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            best_move = %best_move.as_ref().map_or_else(|| "none".to_string(), Move::to_string),
            "search finished"
        );

        SearchResult { best_move, score, nodes }
    }

    fn alpha_beta(
        &self,
        board: &Board,
        depth: i32,
        mut alpha: f64,
        mut beta: f64,
        to_move: Player,
        nodes: &mut u64,
    ) -> (Option<Move>, f64) {
        *nodes += 1;

        if depth <= 0 {
            return (None, self.evaluate(board));
        }

        let maximizing = to_move == self.maximizer;
        let moves = move_gen::moves_for_player(board, to_move);
        if moves.is_empty() {
            return (None, if maximizing { -WIN_SCORE } else { WIN_SCORE });
        }
        // The opponent is stuck: nothing further to explore.
        if !move_gen::has_legal_moves(board, to_move.opponent()) {
            return (None, self.evaluate(board));
        }

        let mut best_move = None;
        let mut best_score = if maximizing { -WIN_SCORE } else { WIN_SCORE };

        for mv in moves {
            let child = board.apply_move(&mv);
            let (_, score) = self.alpha_beta(&child, depth - 1, alpha, beta, to_move.opponent(), nodes);

            if maximizing {
                if best_move.is_none() || score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if best_move.is_none() || score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                break; // Cutoff
            }
        }

        (best_move, best_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plain minimax without pruning, as a reference for the pruned search.
    fn minimax(engine: &Engine, board: &Board, depth: i32, to_move: Player) -> (Option<Move>, f64) {
        if depth <= 0 {
            return (None, engine.evaluate(board));
        }
        let maximizing = to_move == engine.maximizer;
        let moves = move_gen::moves_for_player(board, to_move);
        if moves.is_empty() {
            return (None, if maximizing { -WIN_SCORE } else { WIN_SCORE });
        }
        if !move_gen::has_legal_moves(board, to_move.opponent()) {
            return (None, engine.evaluate(board));
        }

        let mut best: Option<(Move, f64)> = None;
        for mv in moves {
            let (_, score) = minimax(engine, &board.apply_move(&mv), depth - 1, to_move.opponent());
            let better = match &best {
                None => true,
                Some((_, best_score)) if maximizing => score > *best_score,
                Some((_, best_score)) => score < *best_score,
            };
            if better {
                best = Some((mv, score));
            }
        }
        let (mv, score) = best.unwrap();
        (Some(mv), score)
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let engine = Engine::default();
        let board = Board::starting();
        for side in [Player::Red, Player::Black] {
            let result = engine.search(&board, 0, side);
            assert_eq!(result.best_move, None);
            assert_eq!(result.score, engine.evaluate(&board));
            assert_eq!(result.nodes, 1);
        }
    }

    #[test]
    fn negative_depth_behaves_like_zero() {
        let engine = Engine::default();
        let board = Board::starting();
        let result = engine.search(&board, -3, Player::Black);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, engine.evaluate(&board));
    }

    #[test]
    fn depth_one_picks_best_immediate_reply() {
        let engine = Engine::default();
        let board = Board::starting();
        let moves = move_gen::moves_for_player(&board, Player::Black);

        let expected = moves
            .iter()
            .map(|mv| engine.evaluate(&board.apply_move(mv)))
            .fold(f64::NEG_INFINITY, f64::max);
        let result = engine.search(&board, 1, Player::Black);

        assert_eq!(result.score, expected);
        let best = result.best_move.unwrap();
        assert_eq!(engine.evaluate(&board.apply_move(&best)), expected);
        // The first move reaching the best score is the one reported.
        let first_best = moves
            .iter()
            .find(|mv| engine.evaluate(&board.apply_move(mv)) == expected)
            .unwrap();
        assert_eq!(&best, first_best);
    }

    #[test]
    fn pruning_matches_plain_minimax() {
        let engine = Engine::default();
        let positions = [
            (Board::starting(), Player::Black),
            (Board::starting().apply_move(&move_gen::moves_for_player(&Board::starting(), Player::Red)[2]), Player::Black),
            (Board::from_layout("8/2r1r3/5b2/8/1r1r4/2b5/8/4B3").unwrap(), Player::Red),
        ];

        for (board, to_move) in positions {
            for depth in 1..=4 {
                let pruned = engine.search(&board, depth, to_move);
                let (plain_move, plain_score) = minimax(&engine, &board, depth, to_move);
                assert_eq!(pruned.score, plain_score, "depth {depth} on {board:?}");

                // The pruned move must be just as good as the plain one.
                let plain_move = plain_move.unwrap();
                let pruned_move = pruned.best_move.unwrap();
                let (_, via_pruned) = minimax(&engine, &board.apply_move(&pruned_move), depth - 1, to_move.opponent());
                let (_, via_plain) = minimax(&engine, &board.apply_move(&plain_move), depth - 1, to_move.opponent());
                assert_eq!(via_pruned, via_plain);
            }
        }
    }

    #[test]
    fn stuck_maximizer_scores_as_forced_loss() {
        // Black man on (1,0) is blocked by the Red man on (0,1).
        let board = Board::from_layout("1r6/b7/8/8/8/8/8/8").unwrap();
        let engine = Engine::new(Player::Black);

        let result = engine.search(&board, 2, Player::Black);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -WIN_SCORE);

        // With Red to move the position is terminal and scored statically.
        let result = engine.search(&board, 2, Player::Red);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, engine.evaluate(&board));
    }

    #[test]
    fn stuck_minimizer_scores_as_forced_win() {
        // Red man on (6,7) is blocked by the Black man on (7,6).
        let board = Board::from_layout("8/8/8/8/8/8/7r/6b1").unwrap();
        let result = Engine::new(Player::Black).search(&board, 3, Player::Red);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn search_takes_the_free_piece() {
        // Black must capture (2,3); the capture is the only legal move.
        let board = Board::from_layout("8/8/3r4/4b3/8/8/1b6/r7").unwrap();
        let result = Engine::default().search(&board, 3, Player::Black);
        let best = result.best_move.unwrap();
        assert!(best.is_capture());
        assert!(result.nodes > 1);
    }

    #[test]
    fn search_is_deterministic() {
        let engine = Engine::default();
        let board = Board::starting();
        let first = engine.search(&board, 3, Player::Black);
        let second = engine.search(&board, 3, Player::Black);
        assert_eq!(first, second);
    }

    #[test]
    fn engine_can_play_red() {
        let engine = Engine::new(Player::Red);
        let board = Board::starting();
        let result = engine.search(&board, 2, Player::Red);
        let best = result.best_move.unwrap();
        assert!(move_gen::moves_for_player(&board, Player::Red).contains(&best));
    }
}
