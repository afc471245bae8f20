// engine/src/engine/color.rs
#![forbid(unsafe_code)]

use super::constants::NUM_COLORS;

/// Token color. An empty cell is `None` in `Option<Color>` and code `0` on the wire.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Color {
    Blue,
    Yellow,
    Red,
    Orange,
    Purple,
    Green,
}

impl Color {
    pub fn all() -> &'static [Color] {
        use Color::*;
        &[Blue, Yellow, Red, Orange, Purple, Green]
    }

    /// Strict 1..=6 code used for cell encoding (0 = empty).
    pub fn idx(self) -> u8 {
        use Color::*;
        match self {
            Blue => 1,
            Yellow => 2,
            Red => 3,
            Orange => 4,
            Purple => 5,
            Green => 6,
        }
    }

    /// Inverse of `idx()` (1..=6). Returns None for empty or invalid codes.
    pub fn from_idx(idx: u8) -> Option<Self> {
        use Color::*;
        match idx {
            1 => Some(Blue),
            2 => Some(Yellow),
            3 => Some(Red),
            4 => Some(Orange),
            5 => Some(Purple),
            6 => Some(Green),
            _ => None,
        }
    }

    /// Zero-based slot for per-color arrays (tallies, counts).
    #[inline]
    pub fn slot(self) -> usize {
        (self.idx() - 1) as usize
    }

    #[inline]
    pub fn from_slot(slot: usize) -> Option<Self> {
        if slot < NUM_COLORS {
            Self::from_idx(slot as u8 + 1)
        } else {
            None
        }
    }

    pub fn glyph(self) -> char {
        use Color::*;
        match self {
            Blue => 'B',
            Yellow => 'Y',
            Red => 'R',
            Orange => 'O',
            Purple => 'P',
            Green => 'G',
        }
    }

    pub fn name(self) -> &'static str {
        use Color::*;
        match self {
            Blue => "blue",
            Yellow => "yellow",
            Red => "red",
            Orange => "orange",
            Purple => "purple",
            Green => "green",
        }
    }
}

/// Wire code of a cell (0 = empty).
#[inline]
pub fn cell_code(cell: Option<Color>) -> u8 {
    cell.map_or(0, Color::idx)
}
