//! Move providers: keyboard input, random choice, a fixed script, and the
//! first legal move.
//!
//! The alpha-beta player lives in [`crate::search`].

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};

use crate::board::{Board, Color};
use crate::error::CoordError;
use crate::game::MoveProvider;
use crate::topology::Square;

/// Reads moves in algebraic notation, one per line.
///
/// Malformed input and illegal squares are reported and the player is asked
/// again; only end of input or an I/O error ends the prompt.
pub struct KeyboardPlayer<R, W> {
    input: R,
    output: W,
}

impl KeyboardPlayer<io::StdinLock<'static>, io::Stdout> {
    /// A keyboard player on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> KeyboardPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> MoveProvider for KeyboardPlayer<R, W> {
    fn choose(&mut self, color: Color, board: &Board) -> anyhow::Result<Square> {
        writeln!(self.output, "{}", board.pretty())?;
        loop {
            write!(self.output, "{color}'s turn. Place disc at: ")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).context("reading move")?;
            if read == 0 {
                bail!("input closed");
            }

            match line.trim().parse::<Square>() {
                Ok(square) if board.is_legal(square, color) => return Ok(square),
                Ok(square) => writeln!(self.output, "{square} is not a legal move")?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }
}

/// Plays a uniformly random legal move.
///
/// The random source is supplied by the caller so games can be replayed.
pub struct RandomPlayer {
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn new(rng: fastrand::Rng) -> Self {
        Self { rng }
    }
}

impl MoveProvider for RandomPlayer {
    fn choose(&mut self, color: Color, board: &Board) -> anyhow::Result<Square> {
        let moves: Vec<Square> = board.legal_moves(color).iter().collect();
        if moves.is_empty() {
            bail!("{color} has no legal move");
        }
        Ok(moves[self.rng.usize(..moves.len())])
    }
}

/// Plays the next square from a fixed list, legal or not.
pub struct ScriptedPlayer {
    moves: VecDeque<Square>,
}

impl ScriptedPlayer {
    pub fn new(moves: impl IntoIterator<Item = Square>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    /// Build a script from squares in algebraic notation.
    pub fn from_notation(moves: &[&str]) -> Result<Self, CoordError> {
        let moves = moves
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<Square>, _>>()?;
        Ok(Self::new(moves))
    }

    /// Squares not yet played.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl MoveProvider for ScriptedPlayer {
    fn choose(&mut self, _color: Color, _board: &Board) -> anyhow::Result<Square> {
        match self.moves.pop_front() {
            Some(square) => Ok(square),
            None => bail!("move list exhausted"),
        }
    }
}

/// Plays the legal move with the lowest square index.
#[derive(Default)]
pub struct FirstLegalPlayer;

impl MoveProvider for FirstLegalPlayer {
    fn choose(&mut self, color: Color, board: &Board) -> anyhow::Result<Square> {
        match board.legal_moves(color).iter().next() {
            Some(square) => Ok(square),
            None => bail!("{color} has no legal move"),
        }
    }
}
