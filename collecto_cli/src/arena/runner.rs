// collecto_cli/src/arena/runner.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use collecto_engine::engine::{Game, GenerationError, GenerationSpec};
use collecto_engine::policy::Policy;

use super::stats::{ArenaStats, FinalReport};

/// Fixed internal cadence for progress-bar live message updates.
const LIVE_EVERY: u64 = 10;

/// Turns after which a game is abandoned; a real game needs at most 24.
const MAX_TURNS: u64 = 200;

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    // ---------------- core arena ----------------
    /// Number of games to play.
    pub games: u64,
    /// Base seed; game `k` is dealt from `base_seed + k`.
    pub base_seed: u64,
    pub generation: GenerationSpec,

    /// Used only for the final report string.
    pub p1_name: String,
    pub p2_name: String,

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    /// 2 = progress bar + one line per finished game
    pub verbosity: u8,

    // ---------------- rendering ----------------
    /// If Some(ms): render every turn; sleep ms between frames (0 = no sleep).
    pub render_ms: Option<u64>,
}

pub struct Runner {
    cfg: RunnerConfig,
}

impl Runner {
    pub fn new(cfg: RunnerConfig) -> Self {
        Self { cfg }
    }

    /// Plays `cfg.games` games, seat 0 always driven by `p1`.
    pub fn run(
        &mut self,
        p1: &mut dyn Policy,
        p2: &mut dyn Policy,
    ) -> Result<FinalReport, GenerationError> {
        let cfg = self.cfg.clone();

        let pb = if cfg.verbosity >= 1 && cfg.render_ms.is_none() {
            let style = ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos:>9}/{len:<9}  {percent:>3}%  {elapsed_precise}  {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
            let pb = ProgressBar::new(cfg.games);
            pb.set_style(style);
            Some(pb)
        } else {
            None
        };

        let mut stats = ArenaStats::new();

        for game_id in 0..cfg.games {
            let seed = cfg.base_seed.wrapping_add(game_id);
            let mut game = Game::new_with_spec(seed, cfg.generation)?
                .with_names(cfg.p1_name.clone(), cfg.p2_name.clone());

            if cfg.render_ms.is_some() {
                println!("=== game {game_id} (seed {seed}) ===");
                print!("{}", game.render_ascii());
            }

            let mut aborted = false;
            while !game.game_over {
                let seat = game.current;
                let policy: &mut dyn Policy = if seat == 0 { &mut *p1 } else { &mut *p2 };
                let r = game.play_turn(policy);

                if r.illegal_move {
                    log::warn!(
                        "game {game_id}: {} produced no legal move on a live board",
                        game.players[seat].name
                    );
                    aborted = true;
                    break;
                }
                if game.turns >= MAX_TURNS {
                    log::warn!("game {game_id}: abandoned after {MAX_TURNS} turns");
                    aborted = true;
                    break;
                }

                if let Some(ms) = cfg.render_ms {
                    let glyphs: String = r.collected.iter().map(|c| c.glyph()).collect();
                    println!("turn={} seat={} collected={glyphs}", game.turns, seat + 1);
                    print!("{}", game.render_ascii());
                    if ms > 0 {
                        std::thread::sleep(Duration::from_millis(ms));
                    }
                }
            }

            stats.on_game_end(&game, aborted);
            log::debug!(
                "game {game_id}: turns={} scores={}/{} winner={:?}",
                game.turns,
                game.players[0].score(),
                game.players[1].score(),
                game.winner()
            );

            if cfg.verbosity >= 2 {
                let result = match game.winner() {
                    Some(seat) => format!("{} wins", game.players[seat].name),
                    None => "draw".to_string(),
                };
                let line = format!(
                    "game={game_id:>6} seed={seed} turns={:>2} score={}/{} balls={}/{} {result}",
                    game.turns,
                    game.players[0].score(),
                    game.players[1].score(),
                    game.players[0].balls(),
                    game.players[1].balls(),
                );
                match pb {
                    Some(ref pb) => pb.println(line),
                    None => println!("{line}"),
                }
            }

            if let Some(ref pb) = pb {
                pb.inc(1);
                if stats.games_finished % LIVE_EVERY == 0 {
                    pb.set_message(stats.live_msg());
                }
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        Ok(stats.final_report(&cfg.p1_name, &cfg.p2_name))
    }
}

#[cfg(test)]
mod tests {
    use collecto_engine::policy::{HeuristicPolicy, RandomPolicy};

    use super::*;

    fn quiet_config(games: u64) -> RunnerConfig {
        RunnerConfig {
            games,
            base_seed: 12345,
            generation: GenerationSpec::default(),
            p1_name: "heuristic".to_string(),
            p2_name: "random".to_string(),
            verbosity: 0,
            render_ms: None,
        }
    }

    #[test]
    fn every_game_is_counted_once() {
        let mut runner = Runner::new(quiet_config(4));
        let mut p1 = HeuristicPolicy::new();
        let mut p2 = RandomPolicy::new(9);
        let report = runner.run(&mut p1, &mut p2).expect("boards generate");
        assert_eq!(report.games, 4);
        assert_eq!(report.wins[0] + report.wins[1] + report.draws, 4);
        assert_eq!(report.aborted, 0);
        assert!(report.avg_turns > 0.0);
    }
}
