//! Depth-limited alpha-beta search.
//!
//! Positions are scored by a static evaluation combining:
//! - disc difference
//! - mobility (legal move count) difference
//! - stable disc difference
//! - corner difference
//!
//! Finished games score as a win or loss that dominates every heuristic
//! value, adjusted by the final disc difference.

use tracing::debug;

use crate::board::{Board, Color};
use crate::constants::{
    DEFAULT_SEARCH_DEPTH, WEIGHT_CORNER, WEIGHT_DISCS, WEIGHT_MOBILITY, WEIGHT_STABLE, WIN_SCORE,
};
use crate::game::MoveProvider;
use crate::stability::stable_discs;
use crate::topology::Square;

/// Static evaluation of `board` from `color`'s point of view.
pub fn evaluate(board: &Board, color: Color) -> i32 {
    let opp = color.opposite();
    let discs = board.count(color) as i32 - board.count(opp) as i32;

    let my_moves = board.legal_moves(color).len() as i32;
    let opp_moves = board.legal_moves(opp).len() as i32;
    if my_moves == 0 && opp_moves == 0 {
        return match discs.signum() {
            1 => WIN_SCORE + discs,
            -1 => -WIN_SCORE + discs,
            _ => 0,
        };
    }

    let stable = stable_discs(board);
    let mut stable_diff = 0;
    for sq in stable.iter() {
        stable_diff += if board.get(sq) == Some(color) { 1 } else { -1 };
    }

    let mut corner_diff = 0;
    for corner in Square::CORNERS {
        match board.get(corner) {
            Some(c) if c == color => corner_diff += 1,
            Some(_) => corner_diff -= 1,
            None => {}
        }
    }

    WEIGHT_DISCS * discs
        + WEIGHT_MOBILITY * (my_moves - opp_moves)
        + WEIGHT_STABLE * stable_diff
        + WEIGHT_CORNER * corner_diff
}

/// Best move for `color` searching `depth` plies, with its score.
///
/// Returns `None` if `color` has no legal move. Ties go to the lowest square.
pub fn best_move(board: &Board, color: Color, depth: u32) -> Option<(Square, i32)> {
    let mut best: Option<(Square, i32)> = None;
    let mut alpha = -i32::MAX;
    let beta = i32::MAX;

    for mv in board.legal_moves(color).iter() {
        let mut child = board.clone();
        child.apply(mv, color);
        let score = -negamax(&child, color.opposite(), depth.saturating_sub(1), -beta, -alpha);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
        alpha = alpha.max(score);
    }
    best
}

/// Negamax with alpha-beta pruning. A side without moves passes; the search
/// stops at depth zero or when neither side can move.
fn negamax(board: &Board, color: Color, depth: u32, mut alpha: i32, beta: i32) -> i32 {
    if depth == 0 {
        return evaluate(board, color);
    }

    let moves = board.legal_moves(color);
    if moves.is_empty() {
        if !board.has_move(color.opposite()) {
            return evaluate(board, color);
        }
        return -negamax(board, color.opposite(), depth - 1, -beta, -alpha);
    }

    let mut value = -i32::MAX;
    for mv in moves.iter() {
        let mut child = board.clone();
        child.apply(mv, color);
        value = value.max(-negamax(&child, color.opposite(), depth - 1, -beta, -alpha));
        alpha = alpha.max(value);
        if alpha >= beta {
            break;
        }
    }
    value
}

/// A move provider backed by [`best_move`].
pub struct SearchPlayer {
    depth: u32,
}

impl Default for SearchPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}

impl SearchPlayer {
    pub fn new(depth: u32) -> Self {
        Self { depth: depth.max(1) }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl MoveProvider for SearchPlayer {
    fn choose(&mut self, color: Color, board: &Board) -> anyhow::Result<Square> {
        let (square, score) = best_move(board, color, self.depth)
            .ok_or_else(|| anyhow::anyhow!("{color} has no legal move"))?;
        debug!(%color, %square, score, depth = self.depth, "search result");
        Ok(square)
    }
}
