//! Board state: disc colors plus the incrementally maintained square sets.
//!
//! Besides the color of each cell the board tracks three derived sets:
//! - `occupied`: squares holding a disc
//! - `frontier`: occupied squares with at least one empty neighbor
//! - `accessible`: empty squares next to a frontier square
//!
//! `accessible` bounds the legal-move search for both colors. The sets are
//! updated locally on every placement and never recomputed from scratch.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Sub};

use crate::constants::{MARK_BLACK, MARK_EMPTY, MARK_WHITE, NUM_SQUARES, SIDE};
use crate::error::{CoordError, LayoutError};
use crate::topology::Square;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn marker(self) -> char {
        match self {
            Color::Black => MARK_BLACK,
            Color::White => MARK_WHITE,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// A set of squares, one bit per square.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq.index()) != 0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Squares in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = Square> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let idx = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(Square::from_index(idx))
        })
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl BitOr for SquareSet {
    type Output = SquareSet;

    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: SquareSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SquareSet {
    type Output = SquareSet;

    fn bitand(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 & rhs.0)
    }
}

impl Sub for SquareSet {
    type Output = SquareSet;

    fn sub(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 & !rhs.0)
    }
}

/// An Othello board.
///
/// Cloning a board produces a fully independent copy, which is how search
/// explores hypothetical moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Color>; NUM_SQUARES],
    occupied: SquareSet,
    frontier: SquareSet,
    accessible: SquareSet,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with the standard opening: Black on d5 and e4, White
    /// on d4 and e5.
    pub fn new() -> Self {
        let mut board = Self::empty();
        let p = SIDE / 2 - 1;
        board.force_place(Square::from_index(p * SIDE + p), Color::White);
        board.force_place(Square::from_index(p * SIDE + p + 1), Color::Black);
        board.force_place(Square::from_index((p + 1) * SIDE + p), Color::Black);
        board.force_place(Square::from_index((p + 1) * SIDE + p + 1), Color::White);
        board
    }

    fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
            occupied: SquareSet::EMPTY,
            frontier: SquareSet::EMPTY,
            accessible: SquareSet::EMPTY,
        }
    }

    /// Build a board from a 64-cell layout in row-major order, for test
    /// fixtures and analysis of arbitrary positions.
    ///
    /// `b`/`B` is a black disc, `w`/`W` a white disc, and ` `, `.` or `-` an
    /// empty square. Newlines are skipped, so the output of `Display` can be
    /// fed back in.
    ///
    /// # Errors
    /// Returns an error on any other character or if the layout does not
    /// describe exactly 64 cells.
    pub fn from_layout(layout: &str) -> Result<Board, LayoutError> {
        let cells: Vec<char> = layout.chars().filter(|&c| c != '\n' && c != '\r').collect();
        if cells.len() != NUM_SQUARES {
            return Err(LayoutError::WrongLength(cells.len()));
        }

        let mut board = Self::empty();
        for (index, &ch) in cells.iter().enumerate() {
            let color = match ch {
                'b' | 'B' => Some(Color::Black),
                'w' | 'W' => Some(Color::White),
                ' ' | '.' | '-' => None,
                _ => return Err(LayoutError::BadCell { ch, index }),
            };
            if let Some(color) = color {
                board.force_place(Square::from_index(index), color);
            }
        }
        Ok(board)
    }

    /// Color of the disc on `sq`, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Color> {
        self.cells[sq.index()]
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_some()
    }

    /// Look up a square by algebraic notation.
    pub fn square(&self, notation: &str) -> Result<Square, CoordError> {
        notation.parse()
    }

    pub fn occupied(&self) -> SquareSet {
        self.occupied
    }

    pub fn frontier(&self) -> SquareSet {
        self.frontier
    }

    pub fn accessible(&self) -> SquareSet {
        self.accessible
    }

    /// Squares holding a disc of `color`.
    pub fn discs(&self, color: Color) -> SquareSet {
        self.occupied.iter().filter(|&sq| self.get(sq) == Some(color)).collect()
    }

    /// Number of discs of `color` on the board.
    pub fn count(&self, color: Color) -> u32 {
        self.cells.iter().filter(|&&c| c == Some(color)).count() as u32
    }

    /// Place a disc without checking legality or flipping anything.
    ///
    /// Only board setup goes through here; play uses [`Board::apply`].
    fn force_place(&mut self, sq: Square, color: Color) {
        self.place_disc(sq, color);
    }

    /// Put a disc on an empty square and update the derived sets.
    pub(crate) fn place_disc(&mut self, sq: Square, color: Color) {
        debug_assert!(!self.is_occupied(sq));
        self.cells[sq.index()] = Some(color);
        self.mark_occupied(sq);
    }

    /// Reverse the color of a disc already on the board.
    pub(crate) fn flip(&mut self, sq: Square) {
        if let Some(c) = self.cells[sq.index()] {
            self.cells[sq.index()] = Some(c.opposite());
        }
    }

    fn has_empty_neighbor(&self, sq: Square) -> bool {
        sq.neighbors().any(|n| !self.is_occupied(n))
    }

    /// Update the derived sets after `sq` became occupied.
    ///
    /// Only `sq` and its neighbors can change membership. An occupied
    /// neighbor may drop out of the frontier but never joins it.
    fn mark_occupied(&mut self, sq: Square) {
        self.occupied.insert(sq);
        self.accessible.remove(sq);

        let mut on_frontier = false;
        for n in sq.neighbors() {
            if self.is_occupied(n) {
                if !self.has_empty_neighbor(n) {
                    self.frontier.remove(n);
                }
            } else {
                on_frontier = true;
                self.accessible.insert(n);
            }
        }
        if on_frontier {
            self.frontier.insert(sq);
        } else {
            self.frontier.remove(sq);
        }
    }

    /// Board with file letters and rank numbers around it, for human display.
    pub fn pretty(&self) -> String {
        let mut out = String::from("  ");
        for file in 0..SIDE {
            out.push(' ');
            out.push((b'a' + file as u8) as char);
        }
        out.push('\n');
        for rank in 0..SIDE {
            out.push_str(&format!("{:>2}", rank + 1));
            for file in 0..SIDE {
                out.push(' ');
                out.push(self.marker(Square::from_index(rank * SIDE + file)));
            }
            out.push('\n');
        }
        out
    }

    fn marker(&self, sq: Square) -> char {
        self.get(sq).map_or(MARK_EMPTY, Color::marker)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..SIDE {
            for file in 0..SIDE {
                write!(f, "{}", self.marker(Square::from_index(rank * SIDE + file)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn squares(names: &[&str]) -> SquareSet {
        names.iter().map(|s| s.parse::<Square>().unwrap()).collect()
    }

    /// Derive (occupied, frontier, accessible) from the cells alone.
    pub(crate) fn derived_from_scratch(board: &Board) -> (SquareSet, SquareSet, SquareSet) {
        let occupied: SquareSet = Square::all().filter(|&s| board.is_occupied(s)).collect();
        let frontier: SquareSet = occupied
            .iter()
            .filter(|&s| s.neighbors().any(|n| !occupied.contains(n)))
            .collect();
        let accessible: SquareSet = Square::all()
            .filter(|&s| !occupied.contains(s) && s.neighbors().any(|n| frontier.contains(n)))
            .collect();
        (occupied, frontier, accessible)
    }

    #[test]
    fn test_color_opposite() {
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::White.opposite(), Color::Black);
    }

    #[test]
    fn test_initial_board() {
        let board = Board::new();
        assert_eq!(board.discs(Color::Black), squares(&["d5", "e4"]));
        assert_eq!(board.discs(Color::White), squares(&["d4", "e5"]));
        assert_eq!(board.occupied(), squares(&["d4", "d5", "e4", "e5"]));
        assert_eq!(board.frontier(), board.occupied());
        assert_eq!(
            board.accessible(),
            squares(&["c3", "c4", "c5", "c6", "d3", "d6", "e3", "e6", "f3", "f4", "f5", "f6"])
        );
        assert_eq!(board.count(Color::Black), 2);
        assert_eq!(board.count(Color::White), 2);
    }

    #[test]
    fn test_square_set_ops() {
        let a = squares(&["a1", "b2", "h8"]);
        let b = squares(&["b2", "c3"]);
        assert_eq!(a.len(), 3);
        assert_eq!((a | b).len(), 4);
        assert_eq!(a & b, squares(&["b2"]));
        assert_eq!(a - b, squares(&["a1", "h8"]));
        assert!(SquareSet::EMPTY.is_empty());
        let order: Vec<String> = a.iter().map(|s| s.to_string()).collect();
        assert_eq!(order, ["a1", "b2", "h8"]);
    }

    #[test]
    fn test_from_layout() {
        let board = Board::from_layout(concat!(
            "b      w", //
            "        ", //
            "        ", //
            "        ", //
            "        ", //
            "        ", //
            "        ", //
            "W......B",
        ))
        .unwrap();
        assert_eq!(board.discs(Color::Black), squares(&["a1", "h8"]));
        assert_eq!(board.discs(Color::White), squares(&["h1", "a8"]));
        assert_eq!(board.frontier(), board.occupied());
        assert_eq!(board.accessible().len(), 12);
    }

    #[test]
    fn test_from_layout_errors() {
        assert_eq!(Board::from_layout("bw"), Err(LayoutError::WrongLength(2)));
        let mut layout = " ".repeat(64);
        layout.replace_range(5..6, "x");
        assert_eq!(
            Board::from_layout(&layout),
            Err(LayoutError::BadCell { ch: 'x', index: 5 })
        );
    }

    #[test]
    fn test_display_roundtrip() {
        let board = Board::new();
        let text = board.to_string();
        assert_eq!(text.lines().count(), 8);
        assert!(text.lines().all(|l| l.len() == 8));
        assert_eq!(text.lines().nth(3), Some("...WB..."));
        assert_eq!(Board::from_layout(&text).unwrap(), board);
    }

    #[test]
    fn test_pretty_has_coordinates() {
        let pretty = Board::new().pretty();
        assert!(pretty.starts_with("   a b c d e f g h\n"));
        assert!(pretty.contains(" 4 . . . W B . . .\n"));
    }

    #[test]
    fn test_frontier_shrinks_when_enclosed() {
        // Fill the whole 3x3 block around b2; b2 is then no longer frontier
        let board = Board::from_layout(concat!(
            "bbb     ", //
            "bbb     ", //
            "bbb     ", //
            "        ", //
            "        ", //
            "        ", //
            "        ", //
            "        ",
        ))
        .unwrap();
        let b2: Square = "b2".parse().unwrap();
        assert!(board.occupied().contains(b2));
        assert!(!board.frontier().contains(b2));
        assert!(!board.frontier().contains("a1".parse().unwrap()));
        assert_eq!(derived_from_scratch(&board), (board.occupied(), board.frontier(), board.accessible()));
    }

    #[test]
    fn test_derived_sets_on_full_board() {
        let board = Board::from_layout(&"bw".repeat(32)).unwrap();
        assert_eq!(board.occupied().len(), 64);
        assert!(board.frontier().is_empty());
        assert!(board.accessible().is_empty());
    }
}
