//! Othello-Rust: a rules engine for Othello.
//!
//! The core is the board-state machine: square adjacency, move legality, disc
//! flipping, incremental tracking of candidate squares, stable-disc analysis,
//! and the turn/pass/game-over sequence. Move selection is pluggable through
//! the [`game::MoveProvider`] trait.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, display markers, and search parameters
//! - [`topology`] - Squares, directions, adjacency, algebraic notation
//! - [`board`] - Disc colors and the derived square sets
//! - [`moves`] - Legality, flip sets, and move application
//! - [`stability`] - Stable-disc analysis
//! - [`game`] - Turn state machine and move providers
//! - [`players`] - Keyboard, random, scripted, and first-legal players
//! - [`search`] - Alpha-beta search player
//! - [`playout`] - Random self-play batches
//! - [`console`] - Line-oriented command console
//!
//! ## Example
//!
//! ```
//! use othello_rust::board::Color;
//! use othello_rust::game::Game;
//!
//! let mut game = Game::new();
//! let c4 = game.board().square("c4").unwrap();
//! assert!(game.play(c4).unwrap());
//! assert_eq!(game.to_move(), Some(Color::White));
//! print!("{}", game.board());
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod error;
pub mod game;
pub mod moves;
pub mod players;
pub mod playout;
pub mod search;
pub mod stability;
pub mod topology;
