//! Move legality, flip computation, and move application.
//!
//! A move at `square` for `color` captures, in each of the eight directions,
//! the run of opposite-color discs that starts right next to `square` and is
//! closed off by a `color` disc. A move is legal when it captures at least
//! one disc.

use tracing::trace;

use crate::board::{Board, Color, SquareSet};
use crate::topology::{Direction, Square};

impl Board {
    /// Discs captured along one direction by playing `color` at `square`.
    ///
    /// Empty unless at least one opposite-color disc lies between `square`
    /// and a bounding `color` disc. A run that reaches an empty square or the
    /// board edge captures nothing.
    pub fn flips_in_direction(&self, square: Square, color: Color, dir: Direction) -> SquareSet {
        let mut run = SquareSet::EMPTY;
        for sq in square.ray(dir) {
            match self.get(sq) {
                Some(c) if c == color => return run,
                Some(_) => run.insert(sq),
                None => break,
            }
        }
        SquareSet::EMPTY
    }

    /// All discs captured by playing `color` at `square`.
    pub fn flip_set(&self, square: Square, color: Color) -> SquareSet {
        Direction::ALL
            .into_iter()
            .fold(SquareSet::EMPTY, |acc, dir| acc | self.flips_in_direction(square, color, dir))
    }

    /// Whether `color` may play at `square`: the square is empty and the
    /// move captures at least one disc.
    pub fn is_legal(&self, square: Square, color: Color) -> bool {
        !self.is_occupied(square)
            && Direction::ALL
                .into_iter()
                .any(|dir| !self.flips_in_direction(square, color, dir).is_empty())
    }

    /// Play `color` at `square`.
    ///
    /// Returns `false` without touching the board if the move captures
    /// nothing. Otherwise places the disc, flips every captured disc, and
    /// returns `true`.
    ///
    /// # Panics
    /// Panics if `square` is already occupied. Callers check occupancy first.
    pub fn apply(&mut self, square: Square, color: Color) -> bool {
        assert!(
            !self.is_occupied(square),
            "apply called on occupied square {square}"
        );

        let flips = self.flip_set(square, color);
        if flips.is_empty() {
            return false;
        }

        self.place_disc(square, color);
        for sq in flips.iter() {
            self.flip(sq);
        }
        trace!(%square, ?color, flipped = flips.len(), "applied move");
        true
    }

    /// All legal moves for `color`, drawn from the accessible squares.
    pub fn legal_moves(&self, color: Color) -> SquareSet {
        self.accessible()
            .iter()
            .filter(|&sq| self.is_legal(sq, color))
            .collect()
    }

    /// Whether `color` has at least one legal move.
    pub fn has_move(&self, color: Color) -> bool {
        self.accessible().iter().any(|sq| self.is_legal(sq, color))
    }
}
