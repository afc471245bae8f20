// engine/src/engine/grid.rs
#![forbid(unsafe_code)]

use crate::engine::color::{Color, cell_code};
use crate::engine::constants::{CELLS, DIM, NUM_COLORS, SINGLE_MOVES, decode_single_move};
use crate::engine::error::CodecError;

/// The 7x7 playing field.
///
/// Cells hold wire codes (0 = empty, 1..=6 = `Color::idx()`); every write goes through
/// `Option<Color>` so no other code can appear. The board is a plain value: copying it is the
/// deep copy used for every simulation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Board {
    cells: [[u8; DIM]; DIM],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[0u8; DIM]; DIM],
        }
    }

    #[inline]
    pub fn index(row: usize, col: usize) -> usize {
        row * DIM + col
    }

    /// True iff `(row, col)` lies on the board. Signed so neighbor probes need no care.
    #[inline]
    pub fn is_field(row: i32, col: i32) -> bool {
        (0..DIM as i32).contains(&row) && (0..DIM as i32).contains(&col)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        Color::from_idx(self.cells[row][col])
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Option<Color>) {
        self.cells[row][col] = cell_code(cell);
    }

    #[inline]
    pub fn get_index(&self, index: usize) -> Option<Color> {
        self.get(index / DIM, index % DIM)
    }

    #[inline]
    pub fn set_index(&mut self, index: usize, cell: Option<Color>) {
        self.set(index / DIM, index % DIM, cell);
    }

    /// Raw codes, row-major (the snapshot interchange format).
    pub fn to_codes(&self) -> [u8; CELLS] {
        core::array::from_fn(|i| self.cells[i / DIM][i % DIM])
    }

    pub fn from_codes(codes: &[u8]) -> Result<Self, CodecError> {
        if codes.len() != CELLS {
            return Err(CodecError::Length {
                expected: CELLS,
                got: codes.len(),
            });
        }
        let mut board = Self::empty();
        for (i, &code) in codes.iter().enumerate() {
            if code != 0 && Color::from_idx(code).is_none() {
                return Err(CodecError::ColorCode { cell: i, code });
            }
            board.cells[i / DIM][i % DIM] = code;
        }
        Ok(board)
    }

    /// Tokens of each color currently on the board, indexed by `Color::slot()`.
    pub fn color_counts(&self) -> [u32; NUM_COLORS] {
        let mut counts = [0u32; NUM_COLORS];
        for row in &self.cells {
            for &code in row {
                if let Some(c) = Color::from_idx(code) {
                    counts[c.slot()] += 1;
                }
            }
        }
        counts
    }

    pub fn ball_count(&self) -> u32 {
        self.color_counts().iter().sum()
    }

    // -------------------------------------------------------------------------
    // Adjacency rule
    // -------------------------------------------------------------------------

    /// True iff no orthogonal neighbor holds the same color as the cell.
    #[inline]
    pub fn is_valid_position(&self, row: usize, col: usize) -> bool {
        self.is_valid_position_as(row, col, self.get(row, col))
    }

    /// Same test for a hypothetical occupant of `(row, col)`. Empty is always valid.
    pub fn is_valid_position_as(&self, row: usize, col: usize, cell: Option<Color>) -> bool {
        let Some(color) = cell else {
            return true;
        };
        let code = color.idx();
        let (r, c) = (row as i32, col as i32);
        for (dr, dc) in [(-1, 0), (0, -1), (1, 0), (0, 1)] {
            let (nr, nc) = (r + dr, c + dc);
            if Self::is_field(nr, nc) && self.cells[nr as usize][nc as usize] == code {
                return false;
            }
        }
        true
    }

    /// True iff at least one cell has a same-color neighbor.
    pub fn is_collectable(&self) -> bool {
        (0..DIM).any(|r| (0..DIM).any(|c| !self.is_valid_position(r, c)))
    }

    /// Number of cells currently violating the adjacency rule.
    pub fn violations(&self) -> usize {
        (0..DIM)
            .flat_map(|r| (0..DIM).map(move |c| (r, c)))
            .filter(|&(r, c)| !self.is_valid_position(r, c))
            .count()
    }

    // -------------------------------------------------------------------------
    // Move physics
    // -------------------------------------------------------------------------

    /// Shifts one row or column toward the edge named by `index`.
    ///
    /// Returns false, leaving the board untouched, for out-of-range indices and for lines that
    /// are entirely empty or entirely full.
    pub fn make_single_move(&mut self, index: usize) -> bool {
        if index >= SINGLE_MOVES {
            return false;
        }
        let Some(shift) = decode_single_move(index) else {
            return false;
        };
        let line = shift.line();

        let mut queue = [0u8; DIM];
        let mut n = 0usize;
        for &(r, c) in &line {
            let v = self.cells[r][c];
            if v != 0 {
                queue[n] = v;
                n += 1;
            }
        }
        if n == 0 || n == DIM {
            return false;
        }

        for (k, &(r, c)) in line.iter().enumerate() {
            self.cells[r][c] = if k < n { queue[k] } else { 0 };
        }
        true
    }

    /// Applies two shifts in order. Atomic: if either fails the board is left as it was.
    pub fn make_double_move(&mut self, first: usize, second: usize) -> bool {
        let before = self.cells;
        if self.make_single_move(first) && self.make_single_move(second) {
            return true;
        }
        self.cells = before;
        false
    }

    /// Removes every token that has a same-color neighbor and returns their colors in
    /// row-major order. Adjacency is judged on the board as it was before any removal.
    pub fn collect_balls(&mut self) -> Vec<Color> {
        let mut marked = [[false; DIM]; DIM];
        for (r, row) in marked.iter_mut().enumerate() {
            for (c, m) in row.iter_mut().enumerate() {
                *m = !self.is_valid_position(r, c);
            }
        }

        let mut collected = Vec::new();
        for r in 0..DIM {
            for c in 0..DIM {
                if marked[r][c] {
                    if let Some(color) = self.get(r, c) {
                        collected.push(color);
                    }
                    self.cells[r][c] = 0;
                }
            }
        }
        collected
    }

    /// Board drawing with move numbers on every edge:
    /// columns 21..27 push down from the top, 14..20 push up from the bottom,
    /// rows 7..13 push right from the left edge, 0..6 push left from the right edge.
    pub fn render_ascii(&self) -> String {
        let mut s = String::new();

        s.push_str("      ");
        for c in 0..DIM {
            s.push_str(&format!("{:>3}", 21 + c));
        }
        s.push('\n');
        s.push_str("      ");
        for _ in 0..DIM {
            s.push_str("  v");
        }
        s.push('\n');

        for r in 0..DIM {
            s.push_str(&format!("{:>3} > ", 7 + r));
            for c in 0..DIM {
                let glyph = self.get(r, c).map_or('.', Color::glyph);
                s.push_str(&format!("  {glyph}"));
            }
            s.push_str(&format!("  < {r}\n"));
        }

        s.push_str("      ");
        for _ in 0..DIM {
            s.push_str("  ^");
        }
        s.push('\n');
        s.push_str("      ");
        for c in 0..DIM {
            s.push_str(&format!("{:>3}", 14 + c));
        }
        s.push('\n');
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::constants::CENTER;

    const A: Option<Color> = Some(Color::Red);
    const B: Option<Color> = Some(Color::Blue);

    #[test]
    fn row_left_compacts_toward_column_zero() {
        let mut b = Board::empty();
        b.set(2, 3, A);
        b.set(2, 6, B);
        assert!(b.make_single_move(2));
        assert_eq!(b.get(2, 0), A);
        assert_eq!(b.get(2, 1), B);
        for c in 2..DIM {
            assert_eq!(b.get(2, c), None);
        }
    }

    #[test]
    fn each_index_range_moves_toward_its_edge() {
        let mut b = Board::empty();
        b.set(3, 3, A);

        let mut right = b;
        assert!(right.make_single_move(7 + 3));
        assert_eq!(right.get(3, DIM - 1), A);

        let mut up = b;
        assert!(up.make_single_move(14 + 3));
        assert_eq!(up.get(0, 3), A);

        let mut down = b;
        assert!(down.make_single_move(21 + 3));
        assert_eq!(down.get(DIM - 1, 3), A);
    }

    #[test]
    fn empty_full_and_out_of_range_lines_do_not_move() {
        let mut b = Board::empty();
        assert!(!b.make_single_move(0));

        for c in 0..DIM {
            b.set(0, c, if c % 2 == 0 { A } else { B });
        }
        let before = b;
        assert!(!b.make_single_move(0));
        assert!(!b.make_single_move(7));
        assert!(!b.make_single_move(SINGLE_MOVES));
        assert_eq!(b, before);
    }

    #[test]
    fn failed_double_move_rolls_back() {
        let mut b = Board::empty();
        b.set(0, 4, A);
        let before = b;
        // First shift succeeds, second targets an empty row.
        assert!(!b.make_double_move(0, 6));
        assert_eq!(b, before);
    }

    #[test]
    fn collect_removes_every_adjacent_token() {
        let mut b = Board::empty();
        for i in [0usize, 1, 2, 7] {
            b.set_index(i, A);
        }
        b.set_index(10, B);
        assert!(b.is_collectable());
        assert!(b.make_single_move(0));
        let got = b.collect_balls();
        assert_eq!(got, vec![Color::Red; 4]);
        for i in [0usize, 1, 2, 7] {
            assert_eq!(b.get_index(i), None);
        }
        assert_eq!(b.get_index(10), B);
        assert!(!b.is_collectable());
    }

    #[test]
    fn empty_cells_are_always_valid() {
        let mut b = Board::empty();
        b.set(0, 1, A);
        b.set(1, 0, A);
        assert!(b.is_valid_position(0, 0));
        assert!(!b.is_valid_position_as(0, 0, A));
        assert!(b.is_valid_position_as(0, 0, B));
    }

    #[test]
    fn codes_reject_bad_input() {
        assert_eq!(
            Board::from_codes(&[0u8; 3]),
            Err(CodecError::Length {
                expected: CELLS,
                got: 3
            })
        );
        let mut codes = [0u8; CELLS];
        codes[CENTER] = 9;
        assert_eq!(
            Board::from_codes(&codes),
            Err(CodecError::ColorCode {
                cell: CENTER,
                code: 9
            })
        );
        codes[CENTER] = 6;
        let b = Board::from_codes(&codes).expect("valid codes");
        assert_eq!(b.to_codes(), codes);
        assert_eq!(b.get_index(CENTER), Some(Color::Green));
    }

    #[test]
    fn render_marks_edges_and_tokens() {
        let mut b = Board::empty();
        b.set(0, 0, B);
        let s = b.render_ascii();
        assert!(s.contains("  7 >   B"));
        assert!(s.contains("< 6"));
        assert!(s.contains(" 27"));
        assert!(s.contains(" 14"));
    }
}
