// collecto_cli/src/main.rs
#![forbid(unsafe_code)]

mod arena;

use std::process::ExitCode;

use clap::Parser;

use crate::arena::{Runner, RunnerConfig};
use collecto_engine::engine::GenerationSpec;
use collecto_engine::policy::{HeuristicConfig, Strategy, StrategyKind};

#[derive(Parser, Debug)]
#[command(name = "collecto_cli")]
struct Args {
    // ---------------- arena sizing ----------------
    /// Number of games to play.
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Base RNG seed (game k is dealt from base_seed + k). If omitted, a fixed default is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Strategy for the first seat: random | heuristic
    #[arg(long, default_value = "heuristic")]
    p1: String,

    /// Strategy for the second seat: random | heuristic
    #[arg(long, default_value = "random")]
    p2: String,

    /// Boards discarded by the generator before giving up.
    #[arg(long, default_value_t = GenerationSpec::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    // ---------------- heuristic tuning ----------------
    /// Largest tolerated lead of the opponent's best reply over our collection, in balls.
    #[arg(long, default_value_t = 2)]
    close_margin: u32,

    /// Collections of at least this many balls are taken without further ranking.
    #[arg(long, default_value_t = 5)]
    outright_balls: u32,

    // ---------------- visualization ----------------
    /**
     * Render the board as ASCII every turn; value is sleep in ms (e.g. 300). Omit to disable.
     * Examples:
     *   --render 0     (render as fast as possible)
     *   --render 300   (sleep 300ms between frames)
     */
    #[arg(long, value_name = "ms")]
    render: Option<u64>,

    // ---------------- output / reporting ----------------
    /// Verbosity: 0=silent (final summary only), 1=progress bar, 2=progress bar + a line per game.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,
}

fn build_strategy(
    name: &str,
    seed: u64,
    cfg: HeuristicConfig,
) -> Result<(StrategyKind, Strategy), String> {
    let kind = StrategyKind::from_cli(name)
        .ok_or_else(|| format!("unknown strategy '{name}' (expected random | heuristic)"))?;
    let strategy = kind
        .build(seed, cfg)
        .map_err(|e| format!("invalid heuristic configuration: {e}"))?;
    Ok((kind, strategy))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // Game seeds are derived from this base seed; provider RNGs are offset from it.
    let base_seed = args.seed.unwrap_or(12345);
    let heuristic = HeuristicConfig {
        close_margin: args.close_margin,
        outright_balls: args.outright_balls,
    };

    let p1_seed = base_seed.wrapping_add(1_000);
    let (p1_kind, mut p1) = match build_strategy(&args.p1, p1_seed, heuristic) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("--p1: {e}");
            return ExitCode::from(2);
        }
    };
    let p2_seed = base_seed.wrapping_add(2_000);
    let (p2_kind, mut p2) = match build_strategy(&args.p2, p2_seed, heuristic) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("--p2: {e}");
            return ExitCode::from(2);
        }
    };

    // Arena configuration (data only; no logic).
    let cfg = RunnerConfig {
        games: args.games,
        base_seed,
        generation: GenerationSpec {
            max_attempts: args.max_attempts,
        },

        p1_name: format!("p1:{}", p1_kind.as_str()),
        p2_name: format!("p2:{}", p2_kind.as_str()),

        verbosity: args.verbosity,
        render_ms: args.render,
    };

    let mut runner = Runner::new(cfg);
    let report = match runner.run(&mut p1, &mut p2) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("arena stopped: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Final one-line summary (useful for logs / grep).
    println!(
        "DONE: p1={} p2={} games={} elapsed={:.3}s games/s={:.1} wins={}/{} win_rate={:.3}/{:.3} draws={} aborted={} avg_score={:.2}/{:.2} avg_balls={:.2}/{:.2} avg_turns={:.2} max_turns={}",
        report.p1,
        report.p2,
        report.games,
        report.elapsed_s,
        report.games_per_s,
        report.wins[0],
        report.wins[1],
        report.win_rate[0],
        report.win_rate[1],
        report.draws,
        report.aborted,
        report.avg_score[0],
        report.avg_score[1],
        report.avg_balls[0],
        report.avg_balls[1],
        report.avg_turns,
        report.max_turns,
    );
    ExitCode::SUCCESS
}
