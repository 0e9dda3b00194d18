//! Stable-disc analysis.
//!
//! A disc is stable when no sequence of future moves can flip it. This module
//! finds a sound subset of the stable discs, growing outward from the
//! corners:
//!
//! A disc of color `c` is stable, given the discs already known to be stable,
//! when each of the four lines through it (N-S, E-W, NE-SW, NW-SE) is secured:
//! - one end of the line is off the board, or
//! - one end is a stable `c` disc, or
//! - the whole line through the disc is filled, so no move can land on it.
//!
//! The search runs in rounds. Each round judges its candidates only against
//! discs proven stable in earlier rounds, and the next round examines the
//! occupied neighbors of whatever was newly proven. It stops at the first
//! round that proves nothing new, which is a fixed point.

use tracing::trace;

use crate::board::{Board, Color, SquareSet};
use crate::topology::{Direction, Square};

/// All stable discs on the board, of either color.
pub fn stable_discs(board: &Board) -> SquareSet {
    let occupied = board.occupied();
    let mut stable = SquareSet::EMPTY;
    let mut candidates: SquareSet = Square::CORNERS
        .into_iter()
        .filter(|&c| occupied.contains(c))
        .collect();
    let mut round = 0;

    while !candidates.is_empty() {
        let newly: SquareSet = candidates
            .iter()
            .filter(|&sq| is_secured(board, sq, stable))
            .collect();
        if newly.is_empty() {
            break;
        }
        stable |= newly;
        trace!(round, found = newly.len(), total = stable.len(), "stability round");

        candidates = newly
            .iter()
            .flat_map(Square::neighbors)
            .filter(|&n| occupied.contains(n) && !stable.contains(n))
            .collect();
        round += 1;
    }

    stable
}

/// Number of stable discs of `color`.
pub fn stable_count(board: &Board, color: Color) -> u32 {
    stable_discs(board)
        .iter()
        .filter(|&sq| board.get(sq) == Some(color))
        .count() as u32
}

/// Whether every line through the occupied square `sq` is secured.
fn is_secured(board: &Board, sq: Square, stable: SquareSet) -> bool {
    let Some(color) = board.get(sq) else {
        return false;
    };
    let anchors = |end: Option<Square>| match end {
        None => true,
        Some(n) => stable.contains(n) && board.get(n) == Some(color),
    };

    Direction::AXES.into_iter().all(|(a, b)| {
        anchors(sq.neighbor(a)) || anchors(sq.neighbor(b)) || line_is_full(board, sq, a, b)
    })
}

/// Whether the line through `sq` along `a`/`b` has no empty square.
fn line_is_full(board: &Board, sq: Square, a: Direction, b: Direction) -> bool {
    sq.ray(a).chain(sq.ray(b)).all(|s| board.is_occupied(s))
}
