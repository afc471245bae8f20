// engine/src/policy/strategy.rs
#![forbid(unsafe_code)]

use crate::engine::{Board, Move, Tally};

use super::base::Policy;
use super::heuristic::{HeuristicBuildError, HeuristicConfig, HeuristicPolicy};
use super::random::RandomPolicy;

/// Named move providers selectable from the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StrategyKind {
    Random,
    Heuristic,
}

impl StrategyKind {
    pub fn from_cli(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "rand" => Some(Self::Random),
            "heuristic" | "smart" => Some(Self::Heuristic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Heuristic => "heuristic",
        }
    }

    pub fn build(self, seed: u64, cfg: HeuristicConfig) -> Result<Strategy, HeuristicBuildError> {
        Ok(match self {
            Self::Random => Strategy::Random(RandomPolicy::new(seed)),
            Self::Heuristic => Strategy::Heuristic(HeuristicPolicy::try_new(cfg)?),
        })
    }
}

/// Closed set of providers, for callers that prefer a value over `Box<dyn Policy>`.
pub enum Strategy {
    Random(RandomPolicy),
    Heuristic(HeuristicPolicy),
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Random(_) => StrategyKind::Random,
            Strategy::Heuristic(_) => StrategyKind::Heuristic,
        }
    }
}

impl Policy for Strategy {
    fn choose_move(&mut self, board: &Board, mover: &Tally) -> Option<Move> {
        match self {
            Strategy::Random(p) => p.choose_move(board, mover),
            Strategy::Heuristic(p) => p.choose_move(board, mover),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_names() {
        assert_eq!(StrategyKind::from_cli("Random"), Some(StrategyKind::Random));
        assert_eq!(StrategyKind::from_cli(" smart "), Some(StrategyKind::Heuristic));
        assert_eq!(StrategyKind::from_cli("beam"), None);
    }

    #[test]
    fn build_keeps_kind() {
        let cfg = HeuristicConfig::default();
        for kind in [StrategyKind::Random, StrategyKind::Heuristic] {
            let s = kind.build(3, cfg).expect("default config");
            assert_eq!(s.kind(), kind);
            assert_eq!(StrategyKind::from_cli(kind.as_str()), Some(kind));
        }
    }
}
