// engine/src/policy/mod.rs
#![forbid(unsafe_code)]

mod base;
mod heuristic;
mod random;
mod strategy;

/**
 * Curated policy public API.
 *
 * Internal implementation modules remain private; only stable policy entrypoints are re-exported.
 */
pub use base::Policy;
pub use heuristic::{
    CandidateEval, HeuristicBuildError, HeuristicConfig, HeuristicPolicy, Involved,
};
pub use random::RandomPolicy;
pub use strategy::{Strategy, StrategyKind};
