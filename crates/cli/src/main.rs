//! Terminal checkers: a human against the search engine, optionally
//! steered by an external move advisor.

mod input;

use anyhow::{Context, Result, bail};
use checkers_advisor::{AdvisorConfig, MoveOrigin, MoveSelector, OpenAiAdvisor};
use checkers_engine::board::Board;
use checkers_engine::constants::Player;
use checkers_engine::engine::Engine;
use checkers_engine::game::Game;
use clap::{Parser, ValueEnum};
use input::Command;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    fn depth(self) -> i32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
            Difficulty::Expert => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    Red,
    Black,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Red => Player::Red,
            Side::Black => Player::Black,
        }
    }
}

/// Play checkers against the computer.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Search strength.
    #[arg(long, value_enum, default_value_t = Difficulty::Expert)]
    difficulty: Difficulty,

    /// Search depth in plies; overrides --difficulty.
    #[arg(long)]
    depth: Option<i32>,

    /// Colour played by the computer.
    #[arg(long, value_enum, default_value_t = Side::Black)]
    machine: Side,

    /// Starting position as eight `/`-separated ranks, row 0 first
    /// (`r`/`R` red man/king, `b`/`B` black man/king, digits for empty runs).
    #[arg(long)]
    position: Option<String>,

    /// Side to move in the starting position.
    #[arg(long, value_enum, default_value_t = Side::Red)]
    to_move: Side,

    /// Ask the advisory service for the computer's moves.
    #[arg(long)]
    advisor: bool,

    /// Credential for the advisory service.
    #[arg(long, env = "CHECKERS_OPENAI_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Chat-completions endpoint of the advisory service.
    #[arg(long, default_value = checkers_advisor::config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Model requested from the advisory service.
    #[arg(long, default_value = checkers_advisor::config::DEFAULT_MODEL)]
    model: String,

    /// Seconds to wait for advice before falling back to search.
    #[arg(long, default_value_t = 20)]
    timeout_secs: u64,

    /// Log filter used when RUST_LOG is unset, e.g. `info` or `checkers_engine=debug`.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn build_selector(args: &Args, machine: Player) -> Result<MoveSelector> {
    let depth = args.depth.unwrap_or_else(|| args.difficulty.depth());
    let selector = MoveSelector::new(Engine::new(machine), depth);
    if !args.advisor {
        return Ok(selector);
    }

    let timeout = Duration::from_secs(args.timeout_secs);
    let config = AdvisorConfig {
        endpoint: args.endpoint.clone(),
        model: args.model.clone(),
        timeout,
        api_key: args.api_key.clone(),
        ..AdvisorConfig::default()
    };
    if config.api_key.is_none() {
        println!("No advisory credential set; the computer will rely on its own search.");
    }
    debug!(?config, "advisor configured");
    let advisor = OpenAiAdvisor::new(config).context("building advisory client")?;
    Ok(selector.with_advisor(Box::new(advisor)).with_deadline(timeout))
}

fn initial_game(args: &Args) -> Result<Game> {
    match &args.position {
        Some(layout) => {
            let board = Board::from_layout(layout).with_context(|| format!("reading position {layout:?}"))?;
            Ok(Game::from_position(board, args.to_move.into()))
        }
        None => Ok(Game::new()),
    }
}

fn print_status(game: &Game) {
    println!();
    println!("{}", game.board());
    println!(
        "red {}  black {}  moves played {}",
        game.board().piece_count(Player::Red),
        game.board().piece_count(Player::Black),
        game.move_count()
    );
}

fn print_moves(game: &Game) {
    for mv in game.legal_moves() {
        println!("  {mv}");
    }
}

/// Reads one line; `None` on end of input.
fn prompt(stdin: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Runs one human turn. Returns `false` when the player asked to leave.
fn human_turn(game: &mut Game, stdin: &mut impl BufRead) -> Result<bool> {
    loop {
        let Some(line) = prompt(stdin, &format!("{} to move> ", game.to_move()))? else {
            return Ok(false);
        };
        let command = match input::parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}. Type `help` for the move format.");
                continue;
            }
        };

        let played = match command {
            Command::Quit => return Ok(false),
            Command::Help => {
                println!("{}", input::HELP);
                continue;
            }
            Command::Moves => {
                print_moves(game);
                continue;
            }
            Command::Board => {
                print_status(game);
                continue;
            }
            Command::New => {
                game.reset();
                print_status(game);
                return Ok(true);
            }
            Command::Squares(from, to) => game.play_squares(from, to),
            Command::Exact(mv) => game.play(&mv),
        };

        match played {
            Ok(played) => {
                info!(player = %played.player, mv = %played.mv, "human move");
                return Ok(true);
            }
            Err(err) => println!("{err}"),
        }
    }
}

async fn machine_turn(game: &mut Game, selector: &MoveSelector) -> Result<()> {
    println!("Computer is thinking...");
    let Some(chosen) = selector.choose(game).await else {
        bail!("no legal move for {}", game.to_move());
    };

    if let Some(reason) = &chosen.fallback_reason {
        println!("Advisor unavailable ({reason}); using search.");
    }
    match &chosen.origin {
        MoveOrigin::Advisor { insight, personality } => {
            println!("Computer ({personality}) plays {}", chosen.mv);
            if !insight.is_empty() {
                println!("  \"{insight}\"");
            }
        }
        MoveOrigin::Search { score, nodes } => {
            println!("Computer plays {} (score {score:.2}, {nodes} nodes)", chosen.mv);
        }
    }

    game.play(&chosen.mv)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let machine: Player = args.machine.into();
    let selector = build_selector(&args, machine)?;
    let mut game = initial_game(&args)?;
    info!(%machine, depth = selector.depth(), advisor = selector.has_advisor(), "starting game");

    println!("--- Checkers ---");
    println!("You play {}. {}", machine.opponent(), input::HELP);

    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    loop {
        print_status(&game);

        if let Some(winner) = game.winner() {
            let verdict = if winner == machine { "The computer wins." } else { "You win!" };
            println!("{winner} wins. {verdict}");
            match prompt(&mut stdin, "Play again? [y/N] ")? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                    game.reset();
                    continue;
                }
                _ => break,
            }
        }

        if game.to_move() == machine {
            machine_turn(&mut game, &selector).await?;
        } else if !human_turn(&mut game, &mut stdin)? {
            break;
        }
    }

    Ok(())
}
