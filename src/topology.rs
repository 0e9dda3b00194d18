//! Board squares, compass directions, and the static adjacency table.
//!
//! Every square has up to eight neighbors, one per compass direction. The
//! table is computed once at compile time and shared read-only by all boards;
//! neighbors are looked up by index, so no square owns or points at another.
//!
//! Squares are written in algebraic notation: a file letter `a`-`h` followed
//! by a rank number `1`-`8`. Unlike chess, `a1` is the *top*-left square as
//! the board is displayed.

use std::fmt;
use std::str::FromStr;

use crate::constants::{DELTA, NUM_SQUARES, SIDE};
use crate::error::CoordError;

/// A square on the board, stored as its row-major index `rank * 8 + file`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

/// The eight compass directions. North points towards rank 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions, in the same order as [`DELTA`].
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The four lines through a square, each as a pair of opposite directions.
    pub const AXES: [(Direction, Direction); 4] = [
        (Direction::North, Direction::South),
        (Direction::East, Direction::West),
        (Direction::NorthEast, Direction::SouthWest),
        (Direction::NorthWest, Direction::SouthEast),
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Offset as `(d_rank, d_file)`.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        DELTA[self as usize]
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 4) % 8]
    }
}

/// Neighbor table: `NEIGHBORS[square][direction]`, `None` past the edge.
static NEIGHBORS: [[Option<Square>; 8]; NUM_SQUARES] = build_neighbors();

const fn build_neighbors() -> [[Option<Square>; 8]; NUM_SQUARES] {
    let mut table = [[None; 8]; NUM_SQUARES];
    let mut idx = 0;
    while idx < NUM_SQUARES {
        let rank = (idx / SIDE) as i8;
        let file = (idx % SIDE) as i8;
        let mut d = 0;
        while d < 8 {
            let (dr, df) = DELTA[d];
            let r = rank + dr;
            let f = file + df;
            if r >= 0 && r < SIDE as i8 && f >= 0 && f < SIDE as i8 {
                table[idx][d] = Some(Square((r as usize * SIDE + f as usize) as u8));
            }
            d += 1;
        }
        idx += 1;
    }
    table
}

impl Square {
    /// The four corners: a1, h1, a8, h8.
    pub const CORNERS: [Square; 4] = [
        Square(0),
        Square((SIDE - 1) as u8),
        Square((NUM_SQUARES - SIDE) as u8),
        Square((NUM_SQUARES - 1) as u8),
    ];

    /// Square at `(rank, file)`, both 0-indexed.
    ///
    /// # Errors
    /// Returns an error if either coordinate is outside `0..8`.
    pub fn new(rank: usize, file: usize) -> Result<Square, CoordError> {
        if rank >= SIDE {
            return Err(CoordError::RankOutOfRange(rank));
        }
        if file >= SIDE {
            return Err(CoordError::FileOutOfRange(file));
        }
        Ok(Square((rank * SIDE + file) as u8))
    }

    /// Square at a row-major index. Callers guarantee `idx < 64`.
    #[inline]
    pub(crate) const fn from_index(idx: usize) -> Square {
        debug_assert!(idx < NUM_SQUARES);
        Square(idx as u8)
    }

    /// Iterate over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES).map(Square::from_index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn rank(self) -> usize {
        self.0 as usize / SIDE
    }

    #[inline]
    pub const fn file(self) -> usize {
        self.0 as usize % SIDE
    }

    /// The adjacent square in `dir`, or `None` at the board edge.
    #[inline]
    pub fn neighbor(self, dir: Direction) -> Option<Square> {
        NEIGHBORS[self.index()][dir.index()]
    }

    /// The squares adjacent to this one (its Moore neighborhood).
    pub fn neighbors(self) -> impl Iterator<Item = Square> {
        NEIGHBORS[self.index()].into_iter().flatten()
    }

    /// Walk outward from this square in `dir`, excluding the square itself.
    pub fn ray(self, dir: Direction) -> impl Iterator<Item = Square> {
        std::iter::successors(self.neighbor(dir), move |sq| sq.neighbor(dir))
    }

    pub fn is_corner(self) -> bool {
        Square::CORNERS.contains(&self)
    }
}

impl FromStr for Square {
    type Err = CoordError;

    /// Parse algebraic notation such as `"d4"` or `"E7"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordError::Malformed(s.to_string());

        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(malformed)?;
        if !letter.is_ascii_alphabetic() {
            return Err(malformed());
        }
        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let file = (letter.to_ascii_lowercase() as u8 - b'a') as usize;
        let rank: usize = digits.parse().map_err(|_| malformed())?;
        if file >= SIDE {
            return Err(CoordError::FileOutOfRange(file));
        }
        if rank > SIDE {
            return Err(CoordError::RankOutOfRange(rank - 1));
        }
        Square::new(rank - 1, file)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'a' + self.file() as u8) as char;
        write!(f, "{letter}{}", self.rank() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_notation() {
        assert_eq!(sq("a1"), Square::new(0, 0).unwrap());
        assert_eq!(sq("E7"), Square::new(6, 4).unwrap());
        assert_eq!(sq("h8"), Square::new(7, 7).unwrap());
        assert_eq!(sq("c4").rank(), 3);
        assert_eq!(sq("c4").file(), 2);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in ["", "abc", "5h", "d06", "d", "d4x", "-1", "4"] {
            assert!(
                matches!(bad.parse::<Square>(), Err(CoordError::Malformed(_))),
                "{bad:?} should be malformed"
            );
        }
        assert_eq!("i1".parse::<Square>(), Err(CoordError::FileOutOfRange(8)));
        assert_eq!("a9".parse::<Square>(), Err(CoordError::RankOutOfRange(8)));
        assert_eq!("a10".parse::<Square>(), Err(CoordError::RankOutOfRange(9)));
    }

    #[test]
    fn test_new_out_of_range() {
        assert_eq!(Square::new(8, 0), Err(CoordError::RankOutOfRange(8)));
        assert_eq!(Square::new(0, 8), Err(CoordError::FileOutOfRange(8)));
    }

    #[test]
    fn test_display_roundtrip() {
        for s in Square::all() {
            assert_eq!(sq(&s.to_string()), s);
        }
        assert_eq!(Square::new(3, 2).unwrap().to_string(), "c4");
    }

    #[test]
    fn test_neighbor_counts() {
        // Moore neighborhood: 8 inside, 5 on an edge, 3 in a corner
        assert_eq!(sq("f5").neighbors().count(), 8);
        assert_eq!(sq("b1").neighbors().count(), 5);
        assert_eq!(sq("a8").neighbors().count(), 3);
        for corner in Square::CORNERS {
            assert_eq!(corner.neighbors().count(), 3);
        }
    }

    #[test]
    fn test_neighbor_directions() {
        let s = sq("d4");
        assert_eq!(s.neighbor(Direction::North), Some(sq("d3")));
        assert_eq!(s.neighbor(Direction::East), Some(sq("e4")));
        assert_eq!(s.neighbor(Direction::SouthWest), Some(sq("c5")));
        assert_eq!(sq("a1").neighbor(Direction::North), None);
        assert_eq!(sq("a1").neighbor(Direction::West), None);
        assert_eq!(sq("h8").neighbor(Direction::SouthEast), None);
    }

    #[test]
    fn test_neighbors_are_symmetric() {
        for s in Square::all() {
            for dir in Direction::ALL {
                if let Some(n) = s.neighbor(dir) {
                    assert_eq!(n.neighbor(dir.opposite()), Some(s));
                }
            }
        }
    }

    #[test]
    fn test_ray() {
        let ray: Vec<String> = sq("f6").ray(Direction::SouthEast).map(|s| s.to_string()).collect();
        assert_eq!(ray, ["g7", "h8"]);
        assert_eq!(sq("a1").ray(Direction::NorthWest).count(), 0);
        assert_eq!(sq("a1").ray(Direction::East).count(), 7);
    }
}
