// engine/src/engine/constants.rs
#![forbid(unsafe_code)]

/// Board side length.
pub const DIM: usize = 7;
pub const CELLS: usize = DIM * DIM;

/// Linear index of the center cell, which starts every game empty.
pub const CENTER: usize = (DIM / 2) * DIM + DIM / 2;

pub const NUM_COLORS: usize = 6;

/// Tokens of each color on a fresh board (48 non-center cells / 6 colors).
pub const BALLS_PER_COLOR: u32 = 8;

/// Collected tokens of one color needed per score point.
pub const BALLS_PER_POINT: u32 = 3;

/// Single moves: 7 rows shifted left, 7 rows shifted right, 7 columns up, 7 columns down.
pub const SINGLE_MOVES: usize = 4 * DIM;
pub const DOUBLE_MOVES: usize = SINGLE_MOVES * SINGLE_MOVES;

/// One edge-injection shift, decoded from a single-move index.
///
/// Index partition:
/// - `[0, 7)`   row `i` right-to-left (tokens compact toward column 0)
/// - `[7, 14)`  row `i-7` left-to-right (toward column 6)
/// - `[14, 21)` column `i-14` down-to-up (toward row 0)
/// - `[21, 28)` column `i-21` up-to-down (toward row 6)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shift {
    RowLeft(usize),
    RowRight(usize),
    ColumnUp(usize),
    ColumnDown(usize),
}

impl Shift {
    /// Cells of the shifted line, starting at the edge the tokens compact toward.
    pub fn line(self) -> [(usize, usize); DIM] {
        core::array::from_fn(|k| match self {
            Shift::RowLeft(r) => (r, k),
            Shift::RowRight(r) => (r, DIM - 1 - k),
            Shift::ColumnUp(c) => (k, c),
            Shift::ColumnDown(c) => (DIM - 1 - k, c),
        })
    }
}

#[inline]
pub fn decode_single_move(index: usize) -> Option<Shift> {
    match index / DIM {
        0 => Some(Shift::RowLeft(index % DIM)),
        1 => Some(Shift::RowRight(index % DIM)),
        2 => Some(Shift::ColumnUp(index % DIM)),
        3 => Some(Shift::ColumnDown(index % DIM)),
        _ => None,
    }
}

#[inline]
pub fn encode_double_move(first: usize, second: usize) -> usize {
    debug_assert!(first < SINGLE_MOVES);
    debug_assert!(second < SINGLE_MOVES);
    first * SINGLE_MOVES + second
}

#[inline]
pub fn decode_double_move(packed: usize) -> (usize, usize) {
    (packed / SINGLE_MOVES, packed % SINGLE_MOVES)
}
