// engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod engine;
pub mod policy;

// Re-export what the CLI and the tests reach for most.
pub use engine::{Board, Color, Game, Move, Tally};
pub use policy::{HeuristicPolicy, Policy, RandomPolicy};
