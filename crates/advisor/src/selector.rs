//! Picks the machine's move: the advisor's proposal when it is usable,
//! the search engine's choice otherwise.

use crate::client::MoveAdvisor;
use crate::error::AdvisorError;
use crate::protocol::{AdvisoryRequest, Personality};
use checkers_engine::engine::Engine;
use checkers_engine::game::Game;
use checkers_engine::r#move::Move;
use std::time::Duration;
use tracing::{info, warn};

/// Where a machine move came from.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOrigin {
    Advisor { insight: String, personality: Personality },
    Search { score: f64, nodes: u64 },
}

#[derive(Debug)]
pub struct MachineMove {
    pub mv: Move,
    pub origin: MoveOrigin,
    /// Why the advisor's proposal was not used, when one was asked for.
    pub fallback_reason: Option<AdvisorError>,
}

pub struct MoveSelector {
    engine: Engine,
    depth: i32,
    advisor: Option<Box<dyn MoveAdvisor>>,
    deadline: Duration,
}

impl MoveSelector {
    pub fn new(engine: Engine, depth: i32) -> Self {
        Self { engine, depth, advisor: None, deadline: Duration::from_secs(20) }
    }

    pub fn with_advisor(mut self, advisor: Box<dyn MoveAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Caps how long the advisor may take, whatever its own transport settings.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn has_advisor(&self) -> bool {
        self.advisor.is_some()
    }

    /// Chooses a move for the side to move. `None` only when that side has
    /// no legal move.
    pub async fn choose(&self, game: &Game) -> Option<MachineMove> {
        let legal = game.legal_moves();
        if legal.is_empty() {
            return None;
        }

        let mut fallback_reason = None;
        if let Some(advisor) = &self.advisor {
            let request = AdvisoryRequest::from_game(game);
            let outcome = match tokio::time::timeout(self.deadline, advisor.propose(&request)).await {
                Ok(result) => result,
                Err(_) => Err(AdvisorError::Timeout(self.deadline)),
            };
            match outcome {
                Ok(advice) if legal.contains(&advice.mv) => {
                    info!(advisor = advisor.name(), mv = %advice.mv, personality = %advice.personality, "playing advised move");
                    return Some(MachineMove {
                        mv: advice.mv,
                        origin: MoveOrigin::Advisor { insight: advice.insight, personality: advice.personality },
                        fallback_reason: None,
                    });
                }
                Ok(advice) => {
                    let reason = AdvisorError::UnknownMove(advice.mv.to_string());
                    warn!(advisor = advisor.name(), error = %reason, "advice rejected, falling back to search");
                    fallback_reason = Some(reason);
                }
                Err(err) => {
                    warn!(advisor = advisor.name(), error = %err, "advisor failed, falling back to search");
                    fallback_reason = Some(err);
                }
            }
        }

        let result = self.engine.search(game.board(), self.depth, game.to_move());
        let mv = match result.best_move {
            Some(mv) => mv,
            None => legal[0].clone(),
        };
        Some(MachineMove { mv, origin: MoveOrigin::Search { score: result.score, nodes: result.nodes }, fallback_reason })
    }
}
