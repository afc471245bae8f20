// engine/benches/engine_core_bench.rs
#![forbid(unsafe_code)]

/**
 * Core engine micro-benchmarks.
 *
 * Focus:
 * - Board generation
 * - Move catalog enumeration (singles and the 28x28 double space)
 * - Pure simulation (`simulate`)
 * - Policy decision latency on fixed board states
 */
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use collecto_engine::engine::{Board, Color, Game, GenerationSpec, generate_board};
use collecto_engine::policy::{HeuristicPolicy, Policy, RandomPolicy};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn build_midgame(seed: u64) -> Game {
    let mut g = Game::new(seed).expect("seeded board");
    for i in 0usize..6 {
        if g.game_over {
            break;
        }
        let moves = g.board.legal_moves();
        let _ = g.step(moves[(i * 11) % moves.len()]);
    }
    g
}

fn double_only_board() -> Board {
    let mut b = Board::empty();
    b.set(0, 1, Some(Color::Blue));
    b.set(2, 6, Some(Color::Blue));
    b.set(4, 2, Some(Color::Red));
    b.set(6, 5, Some(Color::Red));
    b
}

fn bench_generate_board(c: &mut Criterion) {
    c.bench_function("engine.generate_board", |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(20260228),
            |mut rng| black_box(generate_board(&mut rng, &GenerationSpec::default())),
            BatchSize::SmallInput,
        );
    });
}

fn bench_legal_moves(c: &mut Criterion) {
    let g = build_midgame(777);
    c.bench_function("engine.legal_moves.singles", |b| {
        b.iter(|| black_box(g.board.legal_moves()));
    });

    let d = double_only_board();
    c.bench_function("engine.legal_moves.doubles", |b| {
        b.iter(|| black_box(d.legal_moves()));
    });
}

fn bench_simulate(c: &mut Criterion) {
    c.bench_function("engine.simulate", |b| {
        b.iter_batched(
            || build_midgame(777),
            |g| {
                let moves = g.board.legal_moves();
                if let Some(&mv) = moves.get(moves.len() / 2) {
                    black_box(g.board.simulate(mv));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_policy_choose_move(c: &mut Criterion) {
    c.bench_function("policy.heuristic.choose_move", |b| {
        b.iter_batched(
            || (build_midgame(1234), HeuristicPolicy::new()),
            |(g, mut p)| {
                let mover = g.current_player().tally;
                black_box(p.choose_move(&g.board, &mover));
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("policy.random.choose_move", |b| {
        b.iter_batched(
            || (build_midgame(1234), RandomPolicy::new(7)),
            |(g, mut p)| {
                let mover = g.current_player().tally;
                black_box(p.choose_move(&g.board, &mover));
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_generate_board,
    bench_legal_moves,
    bench_simulate,
    bench_policy_choose_move
);
criterion_main!(benches);
