// engine/src/policy/random.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::{Board, Move, Tally};

use super::base::Policy;

/// Uniform pick among the legal moves (singles first, doubles only when no single exists).
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_move(&mut self, board: &Board, _mover: &Tally) -> Option<Move> {
        let moves = board.legal_moves();
        let &mv = moves.choose(&mut self.rng)?;
        Some(mv)
    }
}
