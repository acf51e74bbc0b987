//! Wire format of the advisory service.
//!
//! Requests follow the chat-completions shape: a system message setting
//! the advisor's personality and a user message describing the position
//! and every legal move in canonical notation. The reply's first choice
//! must hold a JSON object `{"move": "...", "insight": "..."}` naming
//! exactly one of those moves.

use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, AdvisorResult};
use checkers_engine::board::{Board, Square};
use checkers_engine::constants::{BOARD_SIZE, Player};
use checkers_engine::game::Game;
use checkers_engine::r#move::Move;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Playing style the advisor is asked to adopt for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Personality {
    Aggressive,
    Tricky,
    Defensive,
    Psychological,
    Unpredictable,
}

impl Personality {
    pub const ALL: [Personality; 5] = [
        Personality::Aggressive,
        Personality::Tricky,
        Personality::Defensive,
        Personality::Psychological,
        Personality::Unpredictable,
    ];

    pub fn random() -> Self {
        *Self::ALL.choose(&mut rand::thread_rng()).unwrap_or(&Personality::Aggressive)
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Personality::Aggressive => "aggressive",
            Personality::Tricky => "tricky",
            Personality::Defensive => "defensive",
            Personality::Psychological => "psychological",
            Personality::Unpredictable => "unpredictable",
        };
        f.write_str(name)
    }
}

/// Everything the advisor is told about the position.
#[derive(Debug, Clone)]
pub struct AdvisoryRequest {
    pub board: Board,
    /// The side the advisor plays for; always the side to move.
    pub side: Player,
    pub legal_moves: Vec<Move>,
    pub history_len: usize,
}

impl AdvisoryRequest {
    pub fn from_game(game: &Game) -> Self {
        Self {
            board: *game.board(),
            side: game.to_move(),
            legal_moves: game.legal_moves(),
            history_len: game.move_count(),
        }
    }
}

/// A move proposed by an advisor, before it is checked against the legal list.
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub mv: Move,
    pub insight: String,
    pub personality: Personality,
}

/// Renders the board as eight rows of space-separated cells:
/// `·` empty, `R`/`RK` Red man/king, `B`/`BK` Black man/king.
pub fn render_board(board: &Board) -> String {
    let mut rows = Vec::with_capacity(BOARD_SIZE);
    for row in 0..BOARD_SIZE as i32 {
        let cells: Vec<&str> = (0..BOARD_SIZE as i32)
            .filter_map(|col| Square::new(row, col))
            .map(|sq| match board.piece_at(sq) {
                None => "·",
                Some(p) => match (p.owner, p.crowned) {
                    (Player::Red, false) => "R",
                    (Player::Red, true) => "RK",
                    (Player::Black, false) => "B",
                    (Player::Black, true) => "BK",
                },
            })
            .collect();
        rows.push(cells.join(" "));
    }
    rows.join("\n")
}

fn side_name(player: Player) -> &'static str {
    match player {
        Player::Red => "Red",
        Player::Black => "Black",
    }
}

pub fn system_message(personality: Personality) -> String {
    format!(
        "You are a strong checkers player with a {personality} style. \
         Pick one move from the list you are given and answer with a single JSON object only."
    )
}

pub fn render_prompt(request: &AdvisoryRequest) -> String {
    let moves: Vec<String> = request.legal_moves.iter().map(Move::to_string).collect();
    let me = request.side;
    let opponent = me.opponent();

    format!(
        "Checkers position (row 0 at the top; Red moves toward row 7, Black toward row 0).\n\
         You play {me_name}, your opponent plays {opp_name}.\n\
         \n\
         {board}\n\
         \n\
         Legal moves ({count}), format from_row,from_col->to_row,to_col|captured squares:\n\
         {moves}\n\
         \n\
         Moves played so far: {history}\n\
         Your pieces: {mine}\n\
         Opponent pieces: {theirs}\n\
         Side to move: {me_name}\n\
         \n\
         Reply with exactly this JSON and nothing else:\n\
         {{\"move\": \"from_row,from_col->to_row,to_col\", \"insight\": \"one sentence about the move\"}}",
        me_name = side_name(me),
        opp_name = side_name(opponent),
        board = render_board(&request.board),
        count = moves.len(),
        moves = moves.join("\n"),
        history = request.history_len,
        mine = request.board.piece_count(me),
        theirs = request.board.piece_count(opponent),
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(rename = "move")]
    mv: String,
    #[serde(default)]
    insight: String,
}

pub fn build_chat_request(config: &AdvisorConfig, request: &AdvisoryRequest, personality: Personality) -> ChatRequest {
    ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage { role: "system".to_string(), content: system_message(personality) },
            ChatMessage { role: "user".to_string(), content: render_prompt(request) },
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    }
}

/// Extracts the proposed move and insight from a raw chat-completions body.
pub fn parse_chat_response(body: &str, legal_moves: &[Move]) -> AdvisorResult<(Move, String)> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AdvisorError::MalformedResponse("response has no choices".to_string()))?;
    parse_reply(&choice.message.content, legal_moves)
}

/// Parses the JSON object in the reply text and matches its move.
/// Text around the outermost braces (such as a code fence) is ignored.
pub fn parse_reply(content: &str, legal_moves: &[Move]) -> AdvisorResult<(Move, String)> {
    let json = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => return Err(AdvisorError::MalformedResponse(format!("no JSON object in {content:?}"))),
    };
    let reply: Reply = serde_json::from_str(json).map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;
    let mv = match_move(&reply.mv, legal_moves)?;
    Ok((mv, reply.insight))
}

/// Finds the legal move described by `text`.
///
/// `text` is `from->to`, optionally followed by `|captures`. Without a
/// capture list the origin and destination must single out one move.
pub fn match_move(text: &str, legal_moves: &[Move]) -> AdvisorResult<Move> {
    let unknown = || AdvisorError::UnknownMove(text.to_string());

    let proposed: Move = text.parse().map_err(|_| unknown())?;
    let explicit_captures = text.contains('|');

    let mut candidates = legal_moves
        .iter()
        .filter(|mv| mv.from == proposed.from && mv.to == proposed.to)
        .filter(|mv| !explicit_captures || mv.captures == proposed.captures);

    let first = candidates.next().ok_or_else(unknown)?;
    if candidates.next().is_some() {
        return Err(AdvisorError::AmbiguousMove(text.to_string()));
    }
    Ok(first.clone())
}
