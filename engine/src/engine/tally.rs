// engine/src/engine/tally.rs
#![forbid(unsafe_code)]

use crate::engine::color::Color;
use crate::engine::constants::{BALLS_PER_COLOR, BALLS_PER_POINT, NUM_COLORS};
use crate::engine::error::CodecError;
use crate::engine::grid::Board;

/// Tokens one player has collected, per color.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Tally {
    counts: [u32; NUM_COLORS],
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts in `Color::all()` order (the interchange format).
    pub fn counts(&self) -> [u32; NUM_COLORS] {
        self.counts
    }

    pub fn from_counts(counts: &[u32]) -> Result<Self, CodecError> {
        let counts: [u32; NUM_COLORS] =
            counts.try_into().map_err(|_| CodecError::Length {
                expected: NUM_COLORS,
                got: counts.len(),
            })?;
        Ok(Self { counts })
    }

    #[inline]
    pub fn get(&self, color: Color) -> u32 {
        self.counts[color.slot()]
    }

    #[inline]
    pub fn add(&mut self, color: Color) {
        self.counts[color.slot()] += 1;
    }

    pub fn add_all(&mut self, collected: &[Color]) {
        for &c in collected {
            self.add(c);
        }
    }

    /// Copy of this tally with `collected` added.
    pub fn with_collected(&self, collected: &[Color]) -> Self {
        let mut t = *self;
        t.add_all(collected);
        t
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// One point per full set of three of a color.
    pub fn score(&self) -> u32 {
        score_of(&self.counts)
    }

    /// Tally of the other player, inferred from supply conservation:
    /// `8 - on_board - mover` per color.
    pub fn opponent_of(board: &Board, mover: &Tally) -> Self {
        let on_board = board.color_counts();
        Self {
            counts: core::array::from_fn(|i| {
                BALLS_PER_COLOR
                    .saturating_sub(on_board[i])
                    .saturating_sub(mover.counts[i])
            }),
        }
    }
}

pub fn score_of(counts: &[u32; NUM_COLORS]) -> u32 {
    counts.iter().map(|&n| n / BALLS_PER_POINT).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_floors_each_color() {
        let t = Tally::from_counts(&[2, 3, 5, 6, 0, 8]).expect("six counts");
        assert_eq!(t.score(), 1 + 1 + 2 + 2);
        assert_eq!(t.total(), 24);
    }

    #[test]
    fn collected_balls_accumulate() {
        let mut t = Tally::new();
        t.add_all(&[Color::Red, Color::Red, Color::Blue]);
        assert_eq!(t.get(Color::Red), 2);
        assert_eq!(t.get(Color::Blue), 1);
        assert_eq!(t.score(), 0);
        let t2 = t.with_collected(&[Color::Red]);
        assert_eq!(t2.score(), 1);
        assert_eq!(t.score(), 0);
    }

    #[test]
    fn opponent_is_what_the_board_and_mover_do_not_hold() {
        let mut b = Board::empty();
        for c in 0..3 {
            b.set(0, c, Some(Color::Green));
        }
        let mover = Tally::from_counts(&[0, 0, 0, 0, 0, 4]).expect("six counts");
        let opp = Tally::opponent_of(&b, &mover);
        assert_eq!(opp.get(Color::Green), 1);
        assert_eq!(opp.get(Color::Blue), 8);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            Tally::from_counts(&[1, 2]),
            Err(CodecError::Length {
                expected: NUM_COLORS,
                got: 2
            })
        );
    }
}
