//! Constants for board geometry, display markers, and search parameters.
//!
//! The board is a fixed 8x8 grid stored as a flat array of 64 cells in
//! row-major order: index `rank * SIDE + file`, with rank 0 displayed at the top.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of squares along one side of the board.
pub const SIDE: usize = 8;

/// Total number of squares on the board.
pub const NUM_SQUARES: usize = SIDE * SIDE;

/// Number of discs on the board before the first move.
pub const INITIAL_DISCS: u32 = 4;

/// Maximum number of moves in a game (every empty square filled once).
pub const MAX_MOVES: usize = NUM_SQUARES - INITIAL_DISCS as usize;

/// Compass offsets as `(d_rank, d_file)`.
/// Order: North, NE, East, SE, South, SW, West, NW
pub const DELTA: [(i8, i8); 8] = [
    (-1, 0),  // North (up one rank)
    (-1, 1),  // NE
    (0, 1),   // East (right one file)
    (1, 1),   // SE
    (1, 0),   // South (down one rank)
    (1, -1),  // SW
    (0, -1),  // West (left one file)
    (-1, -1), // NW
];

// =============================================================================
// Display Markers
// =============================================================================

/// Black disc (first mover).
pub const MARK_BLACK: char = 'B';

/// White disc (second mover).
pub const MARK_WHITE: char = 'W';

/// Empty square.
pub const MARK_EMPTY: char = '.';

// =============================================================================
// Search Parameters
// =============================================================================

/// Default depth (in plies) of the alpha-beta search player.
pub const DEFAULT_SEARCH_DEPTH: u32 = 4;

/// Evaluation weight per disc of difference.
pub const WEIGHT_DISCS: i32 = 1;

/// Evaluation weight per legal move of difference (mobility).
pub const WEIGHT_MOBILITY: i32 = 5;

/// Evaluation weight per stable disc of difference.
pub const WEIGHT_STABLE: i32 = 20;

/// Evaluation weight per corner of difference.
pub const WEIGHT_CORNER: i32 = 25;

/// Score of a won game; dominates every heuristic value.
pub const WIN_SCORE: i32 = 100_000;
