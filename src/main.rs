//! Othello-Rust: command-line front end.
//!
//! ## Usage
//!
//! - `othello-rust` - Show the opening position
//! - `othello-rust play --black human --white search` - Play a game
//! - `othello-rust selfplay --games 1000` - Run a batch of random games
//! - `othello-rust console` - Start the command console on stdin/stdout

use std::io;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use othello_rust::board::{Board, Color};
use othello_rust::console::Console;
use othello_rust::constants::DEFAULT_SEARCH_DEPTH;
use othello_rust::game::{Game, MoveProvider};
use othello_rust::players::{FirstLegalPlayer, KeyboardPlayer, RandomPlayer};
use othello_rust::playout::simulate;
use othello_rust::search::SearchPlayer;
use othello_rust::stability::stable_discs;

/// Othello-Rust: an Othello rules engine
#[derive(Parser)]
#[command(name = "othello-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between two players
    Play {
        #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
        black: PlayerKind,
        #[arg(long, value_enum, default_value_t = PlayerKind::Search)]
        white: PlayerKind,
        /// Search depth in plies for `search` players
        #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
        depth: u32,
        /// Seed for `random` players
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Play a batch of random games and report the results
    Selfplay {
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 1)]
        threads: usize,
    },
    /// Start the line-oriented command console
    Console {
        /// Search depth in plies for `genmove`
        #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
        depth: u32,
    },
    /// Print the opening position
    Show,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    /// Moves typed on stdin
    Human,
    /// Uniformly random legal moves
    Random,
    /// The first legal move in board order
    First,
    /// Alpha-beta search
    Search,
}

impl PlayerKind {
    fn build(self, depth: u32, seed: u64) -> Box<dyn MoveProvider> {
        match self {
            PlayerKind::Human => Box::new(KeyboardPlayer::stdio()),
            PlayerKind::Random => Box::new(RandomPlayer::new(fastrand::Rng::with_seed(seed))),
            PlayerKind::First => Box::new(FirstLegalPlayer),
            PlayerKind::Search => Box::new(SearchPlayer::new(depth)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Play {
            black,
            white,
            depth,
            seed,
        }) => {
            // Stdin can only be locked once, so two human sides share a reader.
            let shared = black == PlayerKind::Human && white == PlayerKind::Human;
            let mut black = black.build(depth, seed);
            let mut white = (!shared).then(|| white.build(depth, seed.wrapping_add(1)));

            let mut game = Game::new();
            while let Some(color) = game.to_move() {
                let player = match (color, white.as_mut()) {
                    (Color::White, Some(white)) => white.as_mut(),
                    _ => black.as_mut(),
                };
                game.step(player).context("game aborted")?;
            }
            println!("{}", game.board().pretty());
            println!("{} after {} moves", game.outcome(), game.moves_played());
        }
        Some(Commands::Selfplay {
            games,
            seed,
            threads,
        }) => {
            let summary = simulate(games, seed, threads)?;
            println!("Games:      {}", summary.games);
            println!("Black wins: {}", summary.black_wins);
            println!("White wins: {}", summary.white_wins);
            println!("Ties:       {}", summary.ties);
            if summary.games > 0 {
                println!(
                    "Avg moves:  {:.1}",
                    summary.moves as f64 / summary.games as f64
                );
            }
        }
        Some(Commands::Console { depth }) => {
            let mut console = Console::with_depth(depth);
            console.run(io::stdin().lock(), io::stdout())?;
        }
        Some(Commands::Show) | None => {
            let board = Board::new();
            println!("{}", board.pretty());
            let moves = board.legal_moves(Color::Black);
            println!("Black to move: {} legal moves", moves.len());
            println!("Stable discs: {}", stable_discs(&board).len());
        }
    }
    Ok(())
}

/// Send logs to stderr, filtered by RUST_LOG when set.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
