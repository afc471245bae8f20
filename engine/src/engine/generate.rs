// engine/src/engine/generate.rs
#![forbid(unsafe_code)]

/*
Board generation

Goal
----
Fill a fresh board so that every color appears exactly BALLS_PER_COLOR times, the center
cell is empty, no two same-colored tokens touch, and the first player has a single move.

Fill
----
Cells are visited row-major. Each cell draws uniformly among the colors that still have
supply left, so the per-color counts come out exact. When a draw lands next to the same
color, the cell is swapped with a partner elsewhere on the board:
- preferably a token that is itself touching its own color and would be fine here;
- otherwise the last token for which both cells end up fine after the exchange;
- otherwise nothing is swapped.
A second full pass repeats the repair for whatever is still touching.

Retry
-----
The fill can still leave contacts, or produce a board with no single move. Such boards are
discarded and the fill is repeated, up to `GenerationSpec::max_attempts`. The RNG stream
continues across attempts, so a seed always yields the same board.
*/

use rand::Rng;
use rand::rngs::StdRng;

use crate::engine::color::Color;
use crate::engine::constants::{BALLS_PER_COLOR, CELLS, CENTER, DIM, NUM_COLORS};
use crate::engine::error::GenerationError;
use crate::engine::grid::Board;

/// Attempts after which a successful generation is still worth a warning.
const SLOW_ATTEMPTS: u32 = 50;

#[derive(Clone, Copy, Debug)]
pub struct GenerationSpec {
    /// Boards discarded before giving up.
    pub max_attempts: u32,
}

impl GenerationSpec {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;
}

impl Default for GenerationSpec {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Board {
    /// One fill + two repair passes. Returns true iff no cell touches its own color.
    pub fn initialize_random(&mut self, rng: &mut StdRng) -> bool {
        *self = Board::empty();

        let mut placed = [0u32; NUM_COLORS];
        let mut available = NUM_COLORS;

        for i in 0..CELLS {
            if i == CENTER {
                continue;
            }

            let mut pick = rng.gen_range(1..=available);
            let Some(color) = Color::all().iter().copied().find(|c| {
                if placed[c.slot()] < BALLS_PER_COLOR {
                    pick -= 1;
                    pick == 0
                } else {
                    false
                }
            }) else {
                continue;
            };

            placed[color.slot()] += 1;
            if placed[color.slot()] == BALLS_PER_COLOR {
                available -= 1;
            }

            self.set_index(i, Some(color));
            let (row, col) = (i / DIM, i % DIM);
            if !self.is_valid_position(row, col) {
                self.repair_at(row, col);
            }
        }

        for row in 0..DIM {
            for col in 0..DIM {
                if !self.is_valid_position(row, col) {
                    self.repair_at(row, col);
                }
            }
        }

        self.violations() == 0
    }

    fn repair_at(&mut self, row: usize, col: usize) {
        let here = Board::index(row, col);
        let there = self.find_swap_position(row, col);
        let a = self.get_index(here);
        let b = self.get_index(there);
        self.set_index(here, b);
        self.set_index(there, a);
    }

    /// Swap partner for the token at `(row, col)`; its own index when none fits.
    pub fn find_swap_position(&self, row: usize, col: usize) -> usize {
        let ball = self.get(row, col);
        let mut fallback = Board::index(row, col);

        for r in 0..DIM {
            for c in 0..DIM {
                let other = self.get(r, c);
                if other.is_none() {
                    continue;
                }
                let fits_here = self.is_valid_position_as(row, col, other);
                if fits_here && !self.is_valid_position(r, c) {
                    return Board::index(r, c);
                }
                if fits_here && self.is_valid_position_as(r, c, ball) {
                    fallback = Board::index(r, c);
                }
            }
        }
        fallback
    }
}

/// Draws boards until one is clean and offers the first player a single move.
pub fn generate_board(rng: &mut StdRng, spec: &GenerationSpec) -> Result<Board, GenerationError> {
    let attempts = spec.max_attempts.max(1);

    for attempt in 1..=attempts {
        let mut board = Board::empty();
        let clean = board.initialize_random(rng);

        if !clean {
            log::trace!(
                "generation attempt {attempt}: {} contacts left",
                board.violations()
            );
            continue;
        }
        if !board.is_still_possible_single_move() {
            log::trace!("generation attempt {attempt}: no opening single move");
            continue;
        }

        if attempt > SLOW_ATTEMPTS {
            log::warn!("board generation needed {attempt} attempts");
        } else {
            log::debug!("board generated after {attempt} attempt(s)");
        }
        return Ok(board);
    }

    Err(GenerationError::Exhausted(attempts))
}
