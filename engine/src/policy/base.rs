// engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::engine::{Board, Move, Tally};

/// Move provider for the player to act.
///
/// Receives a read-only board and the mover's own tally; returns `None` iff no legal move
/// exists (the length-0 move at the protocol boundary).
///
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn choose_move(&mut self, board: &Board, mover: &Tally) -> Option<Move>;
}
