// engine/src/engine/moves.rs
#![forbid(unsafe_code)]

use crate::engine::color::Color;
use crate::engine::constants::{SINGLE_MOVES, decode_double_move, encode_double_move};
use crate::engine::error::MoveError;
use crate::engine::grid::Board;

/// A move as exchanged with callers: one shift, or two shifts applied in order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Move {
    Single(usize),
    Double(usize, usize),
}

impl Move {
    /// Parses the boundary form: one or two indices, each in `0..=27`.
    pub fn from_indices(indices: &[i64]) -> Result<Self, MoveError> {
        let check = |i: i64| -> Result<usize, MoveError> {
            if (0..SINGLE_MOVES as i64).contains(&i) {
                Ok(i as usize)
            } else {
                Err(MoveError::OutOfRange(i))
            }
        };
        match *indices {
            [a] => Ok(Move::Single(check(a)?)),
            [a, b] => Ok(Move::Double(check(a)?, check(b)?)),
            _ => Err(MoveError::Arity(indices.len())),
        }
    }

    pub fn indices(self) -> Vec<usize> {
        match self {
            Move::Single(i) => vec![i],
            Move::Double(a, b) => vec![a, b],
        }
    }

    /// Packed id of a double move (`first * 28 + second`).
    pub fn from_packed_double(packed: usize) -> Self {
        let (a, b) = decode_double_move(packed);
        Move::Double(a, b)
    }

    pub fn packed(self) -> usize {
        match self {
            Move::Single(i) => i,
            Move::Double(a, b) => encode_double_move(a, b),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Single(i) => write!(f, "{i}"),
            Move::Double(a, b) => write!(f, "{a}->{b}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SimMove {
    pub board_after_shift: Board,
    pub board_after_collect: Board,
    pub collected: Vec<Color>,
    /// True iff the shift was mechanically impossible or collected nothing.
    pub invalid: bool,
}

impl Board {
    // -------------------------------------------------------------------------
    // Validity (copy-based, never touches `self`)
    // -------------------------------------------------------------------------

    pub fn is_valid_single_move(&self, index: usize) -> bool {
        if index >= SINGLE_MOVES {
            return false;
        }
        let mut copy = *self;
        copy.make_single_move(index) && copy.is_collectable()
    }

    pub fn is_valid_double_move(&self, first: usize, second: usize) -> bool {
        if first >= SINGLE_MOVES || second >= SINGLE_MOVES {
            return false;
        }
        let mut copy = *self;
        copy.make_double_move(first, second) && copy.is_collectable()
    }

    pub fn valid_single_moves(&self) -> Vec<usize> {
        (0..SINGLE_MOVES)
            .filter(|&i| self.is_valid_single_move(i))
            .collect()
    }

    /// Valid pairs, ordered by first index then second.
    pub fn valid_double_moves(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for a in 0..SINGLE_MOVES {
            for b in 0..SINGLE_MOVES {
                if self.is_valid_double_move(a, b) {
                    out.push((a, b));
                }
            }
        }
        out
    }

    pub fn is_still_possible_single_move(&self) -> bool {
        (0..SINGLE_MOVES).any(|i| self.is_valid_single_move(i))
    }

    pub fn is_still_possible_double_move(&self) -> bool {
        (0..SINGLE_MOVES)
            .any(|a| (0..SINGLE_MOVES).any(|b| self.is_valid_double_move(a, b)))
    }

    pub fn is_end_game(&self) -> bool {
        !self.is_still_possible_single_move() && !self.is_still_possible_double_move()
    }

    /// Moves the player to act may choose from: valid singles, or valid doubles when no
    /// single is valid. Empty on a finished board.
    pub fn legal_moves(&self) -> Vec<Move> {
        let singles = self.valid_single_moves();
        if !singles.is_empty() {
            return singles.into_iter().map(Move::Single).collect();
        }
        self.valid_double_moves()
            .into_iter()
            .map(|(a, b)| Move::Double(a, b))
            .collect()
    }

    /// Validity plus precedence: a double is only legal when no single is.
    pub fn is_legal_move(&self, mv: Move) -> bool {
        match mv {
            Move::Single(i) => self.is_valid_single_move(i),
            Move::Double(a, b) => {
                self.is_valid_double_move(a, b) && !self.is_still_possible_single_move()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Pure transition kernel
    // -------------------------------------------------------------------------

    pub fn simulate(&self, mv: Move) -> SimMove {
        let mut shifted = *self;
        let moved = match mv {
            Move::Single(i) => shifted.make_single_move(i),
            Move::Double(a, b) => shifted.make_double_move(a, b),
        };
        if !moved {
            return SimMove {
                board_after_shift: *self,
                board_after_collect: *self,
                collected: Vec::new(),
                invalid: true,
            };
        }

        let mut after = shifted;
        let collected = after.collect_balls();
        let invalid = collected.is_empty();
        SimMove {
            board_after_shift: shifted,
            board_after_collect: after,
            collected,
            invalid,
        }
    }
}
