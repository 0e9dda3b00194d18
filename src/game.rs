//! Turn sequencing, passes, and game termination.
//!
//! A [`Game`] owns its board and is the only thing that mutates it during
//! play. Moves come from [`MoveProvider`]s, which only see the board through
//! a shared reference.

use std::fmt;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::board::{Board, Color, SquareSet};
use crate::constants::MAX_MOVES;
use crate::error::GameError;
use crate::topology::Square;

/// Where the game stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    /// `Color` is to move and has at least one legal move.
    Turn(Color),
    /// Neither color can move.
    GameOver,
}

/// A source of moves: keyboard input, a random choice, a script, a search.
pub trait MoveProvider {
    /// Pick a square for `color` to play on `board`.
    ///
    /// The game only asks when `color` has a legal move, and asks again if
    /// the answer is not legal.
    fn choose(&mut self, color: Color, board: &Board) -> anyhow::Result<Square>;
}

/// A move that was played.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub color: Color,
    pub square: Square,
}

/// Final disc counts and the winner, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub black: u32,
    pub white: u32,
}

impl Outcome {
    pub fn from_board(board: &Board) -> Self {
        Self {
            black: board.count(Color::Black),
            white: board.count(Color::White),
        }
    }

    /// The color with strictly more discs; `None` on a tie.
    pub fn winner(&self) -> Option<Color> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(color) => write!(f, "{color} wins {}-{}", self.black, self.white),
            None => write!(f, "Tie {}-{}", self.black, self.white),
        }
    }
}

/// A single game of Othello.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    state: GameState,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game from the standard opening, Black to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::Black)
    }

    /// A game continuing from `board` with `to_move` to play.
    ///
    /// If `to_move` has no legal move the opponent plays instead; if neither
    /// can move the game is already over.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let state = next_state(&board, to_move.opposite(), to_move);
        Self {
            board,
            state,
            history: Vec::with_capacity(MAX_MOVES),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The color to move, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Color> {
        match self.state {
            GameState::Turn(color) => Some(color),
            GameState::GameOver => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Legal moves for the color to move; empty once the game is over.
    pub fn legal_moves(&self) -> SquareSet {
        self.to_move()
            .map_or(SquareSet::EMPTY, |color| self.board.legal_moves(color))
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_board(&self.board)
    }

    /// Play `square` for the color to move.
    ///
    /// Returns `Ok(false)` and leaves the game unchanged if the move is
    /// illegal (occupied square or nothing captured).
    ///
    /// # Errors
    /// Returns [`GameError::GameOver`] if the game has finished.
    pub fn play(&mut self, square: Square) -> Result<bool, GameError> {
        let GameState::Turn(color) = self.state else {
            return Err(GameError::GameOver);
        };
        if self.board.is_occupied(square) || !self.board.apply(square, color) {
            return Ok(false);
        }

        self.history.push(Move { color, square });
        debug!(%color, %square, n = self.history.len(), "move");
        self.state = next_state(&self.board, color, color.opposite());
        if self.state == GameState::GameOver {
            info!(outcome = %self.outcome(), moves = self.history.len(), "game over");
        }
        Ok(true)
    }

    /// Ask `provider` for a move for the color to move and play it,
    /// retrying until the provider gives a legal square.
    ///
    /// # Errors
    /// Fails if the game is over or the provider fails.
    pub fn step(&mut self, provider: &mut dyn MoveProvider) -> anyhow::Result<Move> {
        let GameState::Turn(color) = self.state else {
            return Err(GameError::GameOver.into());
        };
        loop {
            let square = provider
                .choose(color, &self.board)
                .with_context(|| format!("{color} failed to choose a move"))?;
            if self.play(square)? {
                return Ok(Move { color, square });
            }
            warn!(%color, %square, "illegal move, asking again");
        }
    }

    /// Play the game to the end.
    pub fn run(
        &mut self,
        black: &mut dyn MoveProvider,
        white: &mut dyn MoveProvider,
    ) -> anyhow::Result<Outcome> {
        while let GameState::Turn(color) = self.state {
            match color {
                Color::Black => self.step(black)?,
                Color::White => self.step(white)?,
            };
        }
        Ok(self.outcome())
    }
}

/// State after `mover` played (or, at setup, before `next` plays): `next`
/// moves if it can, otherwise `mover` moves again, otherwise the game is over.
fn next_state(board: &Board, mover: Color, next: Color) -> GameState {
    if board.has_move(next) {
        GameState::Turn(next)
    } else if board.has_move(mover) {
        debug!(color = %next, "pass");
        GameState::Turn(mover)
    } else {
        GameState::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::squares;
    use crate::constants::INITIAL_DISCS;
    use crate::players::{RandomPlayer, ScriptedPlayer};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.state(), GameState::Turn(Color::Black));
        assert_eq!(game.moves_played(), 0);
        assert_eq!(game.legal_moves(), squares(&["c4", "d3", "e6", "f5"]));
    }

    #[test]
    fn test_play_alternates_turns() {
        let mut game = Game::new();
        assert_eq!(game.play(sq("c4")), Ok(true));
        assert_eq!(game.to_move(), Some(Color::White));
        assert_eq!(game.play(sq("e3")), Ok(true));
        assert_eq!(game.to_move(), Some(Color::Black));
        assert_eq!(
            game.history(),
            &[
                Move { color: Color::Black, square: sq("c4") },
                Move { color: Color::White, square: sq("e3") },
            ]
        );
    }

    #[test]
    fn test_illegal_play_keeps_turn() {
        let mut game = Game::new();
        let before = game.board().clone();
        assert_eq!(game.play(sq("a1")), Ok(false));
        assert_eq!(game.play(sq("d4")), Ok(false));
        assert_eq!(game.board(), &before);
        assert_eq!(game.to_move(), Some(Color::Black));
    }

    #[test]
    fn test_game_over_when_nobody_can_move() {
        // Taking a2 leaves White without discs, so neither color can move
        let board = Board::from_layout(concat!(
            "b       ", //
            "w       ", //
            "        ", //
            "        ", //
            "        ", //
            "        ", //
            "        ", //
            "        ",
        ))
        .unwrap();
        let mut game = Game::from_board(board, Color::Black);
        assert_eq!(game.state(), GameState::Turn(Color::Black));
        assert_eq!(game.play(sq("a3")), Ok(true));
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.outcome().winner(), Some(Color::Black));
        assert_eq!(game.play(sq("a4")), Err(GameError::GameOver));
    }

    #[test]
    fn test_pass_returns_turn_to_mover() {
        // White's g8 can never flank anything, but Black still has f8
        let board = Board::from_layout(concat!(
            "b       ", //
            "w       ", //
            "        ", //
            "        ", //
            "        ", //
            "        ", //
            "        ", //
            "      wb",
        ))
        .unwrap();
        let mut game = Game::from_board(board, Color::Black);
        assert_eq!(game.play(sq("a3")), Ok(true));
        assert!(!game.board().has_move(Color::White));
        assert_eq!(game.state(), GameState::Turn(Color::Black));
        assert_eq!(game.play(sq("f8")), Ok(true));
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.outcome(), Outcome { black: 6, white: 0 });
    }

    #[test]
    fn test_from_board_skips_stuck_color() {
        // White cannot move; Black can
        let board = Board::from_layout(concat!(
            "bw      ", //
            "        ", //
            "        ", //
            "        ", //
            "        ", //
            "        ", //
            "        ", //
            "        ",
        ))
        .unwrap();
        assert!(!board.has_move(Color::White));
        let game = Game::from_board(board, Color::White);
        assert_eq!(game.state(), GameState::Turn(Color::Black));
    }

    #[test]
    fn test_full_board_is_game_over() {
        let board = Board::from_layout(&"bbbbwwww".repeat(8)).unwrap();
        let game = Game::from_board(board, Color::Black);
        assert!(game.is_over());
        assert_eq!(game.outcome(), Outcome { black: 32, white: 32 });
        assert_eq!(game.outcome().winner(), None);
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_step_retries_illegal_answers() {
        let mut game = Game::new();
        let mut script = ScriptedPlayer::from_notation(&["a1", "d4", "c4"]).unwrap();
        let mv = game.step(&mut script).unwrap();
        assert_eq!(mv.square, sq("c4"));
        assert_eq!(game.moves_played(), 1);
    }

    #[test]
    fn test_step_propagates_provider_error() {
        let mut game = Game::new();
        let mut script = ScriptedPlayer::from_notation(&["a1"]).unwrap();
        let err = game.step(&mut script).unwrap_err();
        assert!(err.to_string().contains("Black failed to choose a move"));
        assert_eq!(game.moves_played(), 0);
    }

    #[test]
    fn test_run_random_game_to_completion() {
        let mut game = Game::new();
        let mut black = RandomPlayer::new(fastrand::Rng::with_seed(1));
        let mut white = RandomPlayer::new(fastrand::Rng::with_seed(2));
        let outcome = game.run(&mut black, &mut white).unwrap();

        assert!(game.is_over());
        assert!(!game.board().has_move(Color::Black));
        assert!(!game.board().has_move(Color::White));
        assert_eq!(outcome.black + outcome.white, INITIAL_DISCS + game.moves_played() as u32);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome { black: 40, white: 24 }.to_string(), "Black wins 40-24");
        assert_eq!(Outcome { black: 10, white: 54 }.to_string(), "White wins 10-54");
        assert_eq!(Outcome { black: 32, white: 32 }.to_string(), "Tie 32-32");
    }
}
