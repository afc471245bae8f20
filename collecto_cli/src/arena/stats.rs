// collecto_cli/src/arena/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use collecto_engine::engine::{Game, NUM_PLAYERS};

#[derive(Clone, Debug)]
pub struct ArenaStats {
    pub games_finished: u64,
    pub wins: [u64; NUM_PLAYERS],
    pub draws: u64,
    /// Games cut short because a provider returned nothing on a live board.
    pub aborted: u64,

    pub turns_sum: u64,
    pub turns_max: u64,

    // per-seat aggregates over finished games
    pub score_sum: [u64; NUM_PLAYERS],
    pub balls_sum: [u64; NUM_PLAYERS],

    t0: Instant,
}

impl ArenaStats {
    pub fn new() -> Self {
        Self {
            games_finished: 0,
            wins: [0; NUM_PLAYERS],
            draws: 0,
            aborted: 0,
            turns_sum: 0,
            turns_max: 0,
            score_sum: [0; NUM_PLAYERS],
            balls_sum: [0; NUM_PLAYERS],
            t0: Instant::now(),
        }
    }

    /// Call once per finished game, before the next one is dealt.
    pub fn on_game_end(&mut self, game: &Game, aborted: bool) {
        self.games_finished += 1;
        if aborted {
            // Not a result: counted apart from wins and draws.
            self.aborted += 1;
        } else {
            match game.winner() {
                Some(seat) => self.wins[seat] += 1,
                None => self.draws += 1,
            }
        }

        self.turns_sum += game.turns;
        self.turns_max = self.turns_max.max(game.turns);
        for (seat, p) in game.players.iter().enumerate() {
            self.score_sum[seat] += u64::from(p.score());
            self.balls_sum[seat] += u64::from(p.balls());
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn games_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.games_finished as f64 / dt
        } else {
            0.0
        }
    }

    fn per_game(&self, total: u64) -> f64 {
        if self.games_finished > 0 {
            total as f64 / self.games_finished as f64
        } else {
            0.0
        }
    }

    pub fn avg_turns(&self) -> f64 {
        self.per_game(self.turns_sum)
    }

    pub fn avg_score(&self, seat: usize) -> f64 {
        self.per_game(self.score_sum[seat])
    }

    pub fn avg_balls(&self, seat: usize) -> f64 {
        self.per_game(self.balls_sum[seat])
    }

    pub fn win_rate(&self, seat: usize) -> f64 {
        self.per_game(self.wins[seat])
    }

    pub fn live_msg(&self) -> String {
        format!(
            "gps={:.1} p1={} p2={} draws={} avg_turns={:.1} score={:.2}/{:.2}",
            self.games_per_sec(),
            self.wins[0],
            self.wins[1],
            self.draws,
            self.avg_turns(),
            self.avg_score(0),
            self.avg_score(1),
        )
    }

    pub fn final_report(&self, p1: &str, p2: &str) -> FinalReport {
        FinalReport {
            p1: p1.to_string(),
            p2: p2.to_string(),

            games: self.games_finished,
            elapsed_s: self.elapsed_secs(),
            games_per_s: self.games_per_sec(),

            wins: self.wins,
            win_rate: [self.win_rate(0), self.win_rate(1)],
            draws: self.draws,
            aborted: self.aborted,

            avg_score: [self.avg_score(0), self.avg_score(1)],
            avg_balls: [self.avg_balls(0), self.avg_balls(1)],
            avg_turns: self.avg_turns(),
            max_turns: self.turns_max,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FinalReport {
    pub p1: String,
    pub p2: String,

    pub games: u64,
    pub elapsed_s: f64,
    pub games_per_s: f64,

    pub wins: [u64; NUM_PLAYERS],
    pub win_rate: [f64; NUM_PLAYERS],
    pub draws: u64,
    pub aborted: u64,

    pub avg_score: [f64; NUM_PLAYERS],
    pub avg_balls: [f64; NUM_PLAYERS],
    pub avg_turns: f64,
    pub max_turns: u64,
}
