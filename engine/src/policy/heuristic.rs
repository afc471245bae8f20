// engine/src/policy/heuristic.rs
#![forbid(unsafe_code)]

/*
Heuristic policy

Every legal move is simulated on a copy of the board and scored on what it collects, what
it adds to the mover's score, and what the opponent can best collect right after it
(one-ply lookahead on the post-collection board). Selection then runs, in order:

1. keep moves that leave the opponent at most `close_margin` balls ahead of us
   (if none survive, take the move that loses least);
2. a move that collects strictly more than the best reply, largest margin first;
3. the biggest collection, if it reaches `outright_balls`;
4. a ten-tier cascade built around color scarcity (who holds how many of the colors the
   move collects), restricted to moves that keep us level when any do.
*/

use std::cmp::Reverse;

use rustc_hash::FxHashMap;

use crate::engine::{Board, Color, DOUBLE_MOVES, Move, SINGLE_MOVES, SimMove, Tally};
use crate::policy::base::Policy;

/// Opponent count at which one more set of a color is all that remains out there.
const OPPONENT_EXHAUSTED: u32 = 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HeuristicConfig {
    /// Largest tolerated `opponent best reply - our gain`, in balls.
    pub close_margin: u32,
    /// Collections of at least this many balls are taken without further ranking.
    pub outright_balls: u32,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            close_margin: 2,
            outright_balls: 5,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HeuristicBuildError {
    #[error("outright_balls must be at least 2 (the smallest collection), got {0}")]
    OutrightTooSmall(u32),
    #[error("close_margin {0} exceeds the number of tokens in play")]
    MarginTooLarge(u32),
}

/// Colors a collection involves, as far as the scarcity tiers care.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Involved {
    /// Up to three balls: the first color collected.
    One(Color),
    /// Exactly four balls: the first color and the last color differing from it.
    Pair(Color, Color),
    /// Larger collections are not classified.
    Untracked,
}

impl Involved {
    pub fn from_collected(collected: &[Color]) -> Self {
        match collected.len() {
            1..=3 => Involved::One(collected[0]),
            4 => {
                let first = collected[0];
                let second = collected
                    .iter()
                    .rev()
                    .copied()
                    .find(|&c| c != first)
                    .unwrap_or(first);
                Involved::Pair(first, second)
            }
            _ => Involved::Untracked,
        }
    }

    fn any(self, pred: impl Fn(Color) -> bool) -> bool {
        match self {
            Involved::One(a) => pred(a),
            Involved::Pair(a, b) => pred(a) || pred(b),
            Involved::Untracked => false,
        }
    }

    fn all(self, pred: impl Fn(Color) -> bool) -> bool {
        match self {
            Involved::One(a) => pred(a),
            Involved::Pair(a, b) => pred(a) && pred(b),
            Involved::Untracked => true,
        }
    }
}

/// Simulated outcome of one candidate move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CandidateEval {
    pub mv: Move,
    pub gain_balls: u32,
    pub gain_score: u32,
    pub involved: Involved,
    /// Most balls the opponent can collect in reply.
    pub opp_best_gain: u32,
    /// Score the opponent gains with that reply.
    pub opp_gain_score: u32,
}

impl CandidateEval {
    #[inline]
    fn deficit(&self) -> i64 {
        i64::from(self.opp_best_gain) - i64::from(self.gain_balls)
    }
}

/// Legal moves with their simulations: singles, or doubles (in packed order) when no single
/// collects.
fn legal_simulations(board: &Board) -> Vec<(Move, SimMove)> {
    let singles = collecting(board, (0..SINGLE_MOVES).map(Move::Single));
    if !singles.is_empty() {
        return singles;
    }
    collecting(board, (0..DOUBLE_MOVES).map(Move::from_packed_double))
}

fn collecting(board: &Board, moves: impl Iterator<Item = Move>) -> Vec<(Move, SimMove)> {
    moves
        .filter_map(|mv| {
            let sim = board.simulate(mv);
            (!sim.invalid).then_some((mv, sim))
        })
        .collect()
}

/// Opponent's best reply on `board`: (balls, score gain). `(0, 0)` when it has no move.
fn best_reply(board: &Board, opponent: &Tally) -> (u32, u32) {
    let base = opponent.score();
    let mut best: Option<(u32, u32)> = None;
    for (_mv, sim) in legal_simulations(board) {
        let balls = sim.collected.len() as u32;
        let score = opponent.with_collected(&sim.collected).score() - base;
        if best.is_none_or(|b| (balls, score) > b) {
            best = Some((balls, score));
        }
    }
    best.unwrap_or((0, 0))
}

pub struct HeuristicPolicy {
    cfg: HeuristicConfig,
}

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self {
            cfg: HeuristicConfig::default(),
        }
    }

    pub fn try_new(cfg: HeuristicConfig) -> Result<Self, HeuristicBuildError> {
        if cfg.outright_balls < 2 {
            return Err(HeuristicBuildError::OutrightTooSmall(cfg.outright_balls));
        }
        if cfg.close_margin as usize > crate::engine::CELLS {
            return Err(HeuristicBuildError::MarginTooLarge(cfg.close_margin));
        }
        Ok(Self { cfg })
    }

    pub fn config(&self) -> HeuristicConfig {
        self.cfg
    }

    /// Simulates every legal move and its best reply. Replies are memoised per resulting board.
    pub fn evaluate(&self, board: &Board, mover: &Tally, opponent: &Tally) -> Vec<CandidateEval> {
        let base_score = mover.score();
        let mut reply_cache: FxHashMap<Board, (u32, u32)> = FxHashMap::default();

        legal_simulations(board)
            .into_iter()
            .map(|(mv, sim)| {
                let (opp_best_gain, opp_gain_score) = *reply_cache
                    .entry(sim.board_after_collect)
                    .or_insert_with(|| best_reply(&sim.board_after_collect, opponent));
                CandidateEval {
                    mv,
                    gain_balls: sim.collected.len() as u32,
                    gain_score: mover.with_collected(&sim.collected).score() - base_score,
                    involved: Involved::from_collected(&sim.collected),
                    opp_best_gain,
                    opp_gain_score,
                }
            })
            .collect()
    }

    /// Chooses with an explicitly known opponent tally.
    pub fn choose_with_opponent(
        &self,
        board: &Board,
        mover: &Tally,
        opponent: &Tally,
    ) -> Option<Move> {
        let cands = self.evaluate(board, mover, opponent);
        for c in &cands {
            log::debug!(
                "move {} gains {} balls (+{} score); best reply gains {} balls (+{} score)",
                c.mv,
                c.gain_balls,
                c.gain_score,
                c.opp_best_gain,
                c.opp_gain_score
            );
        }
        let chosen = select_move(&cands, mover, opponent, &self.cfg);
        if let Some(mv) = chosen {
            log::debug!("heuristic picks {mv} out of {} candidates", cands.len());
        }
        chosen
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for HeuristicPolicy {
    fn choose_move(&mut self, board: &Board, mover: &Tally) -> Option<Move> {
        let opponent = Tally::opponent_of(board, mover);
        self.choose_with_opponent(board, mover, &opponent)
    }
}

// -----------------------------------------------------------------------------
// Ranking
// -----------------------------------------------------------------------------

pub(crate) fn select_move(
    cands: &[CandidateEval],
    mover: &Tally,
    opponent: &Tally,
    cfg: &HeuristicConfig,
) -> Option<Move> {
    let fallback = least_behind(cands.iter())?;

    let close: Vec<&CandidateEval> = cands
        .iter()
        .filter(|c| c.deficit() <= i64::from(cfg.close_margin))
        .collect();
    if close.is_empty() {
        return Some(fallback.mv);
    }

    if let Some(c) = best_ahead(&close) {
        return Some(c.mv);
    }

    let biggest = close
        .iter()
        .min_by_key(|c| (Reverse(c.gain_balls), Reverse(c.gain_score)));
    if let Some(c) = biggest.filter(|c| c.gain_balls >= cfg.outright_balls) {
        return Some(c.mv);
    }

    tiered(&close, mover, opponent).map(|c| c.mv)
}

/// Smallest deficit, then most score, then weakest reply (balls, then score).
fn least_behind<'a>(cands: impl Iterator<Item = &'a CandidateEval>) -> Option<&'a CandidateEval> {
    cands.min_by_key(|c| {
        (
            c.deficit(),
            Reverse(c.gain_score),
            c.opp_best_gain,
            c.opp_gain_score,
        )
    })
}

/// Strictly ahead of the best reply: largest margin, then balls, then score, then the reply
/// that scores least.
fn best_ahead<'a>(close: &[&'a CandidateEval]) -> Option<&'a CandidateEval> {
    close
        .iter()
        .copied()
        .filter(|c| c.gain_balls > c.opp_best_gain)
        .min_by_key(|c| {
            (
                Reverse(c.gain_balls - c.opp_best_gain),
                Reverse(c.gain_balls),
                Reverse(c.gain_score),
                c.opp_gain_score,
            )
        })
}

fn tiered<'a>(
    close: &[&'a CandidateEval],
    mover: &Tally,
    opponent: &Tally,
) -> Option<&'a CandidateEval> {
    let level: Vec<&CandidateEval> = close
        .iter()
        .copied()
        .filter(|c| c.gain_balls >= c.opp_best_gain)
        .collect();
    let pool = if level.is_empty() { close } else { &level[..] };

    for tier in 1..=10u8 {
        let best = pool
            .iter()
            .copied()
            .filter(|c| in_tier(tier, c, mover, opponent))
            .min_by_key(|c| c.opp_gain_score);
        if let Some(c) = best {
            log::trace!("tier {tier} decides {}", c.mv);
            return Some(c);
        }
    }
    None
}

fn in_tier(tier: u8, c: &CandidateEval, mover: &Tally, opponent: &Tally) -> bool {
    let held = |opp: u32, mine: u32| {
        c.involved
            .any(|k| opponent.get(k) == opp && mover.get(k) == mine)
    };
    let quiet_reply = c.opp_gain_score == 0;
    match tier {
        1 => c.gain_score == 2 && quiet_reply,
        // Deny the opponent's near set while building our own.
        2 => c.gain_balls == 4 && held(2, 4),
        3 => c.gain_balls == 4 && held(4, 2),
        4 => c.gain_balls == 3 && c.involved.any(|k| opponent.get(k) == 4),
        5 => c.gain_balls == 2 && held(2, 4),
        6 => c.gain_balls == 3 && c.involved.any(|k| mover.get(k) == 0),
        7 => c.gain_balls == 2 && held(4, 2),
        8 => c.gain_score == 1 && quiet_reply,
        9 => c.involved.all(|k| opponent.get(k) != OPPONENT_EXHAUSTED),
        _ => true,
    }
}
