// engine/tests/policy_contracts.rs
#![forbid(unsafe_code)]

/**
 * Cross-policy contract tests.
 *
 * Purpose:
 * - Enforce shared behavior contracts for move providers:
 *   legal move selection, determinism (where applicable), and input-state purity.
 *
 * Covered policy families:
 * - `RandomPolicy` (seeded deterministic RNG path)
 * - `HeuristicPolicy` (deterministic lookahead path)
 */
use collecto_engine::engine::{Board, Color, Game, Move, Tally};
use collecto_engine::policy::{HeuristicConfig, HeuristicPolicy, Policy, RandomPolicy};

fn fixture_board() -> Board {
    Game::new(987654).expect("seeded board").board
}

/// No singles, one double: blues at (0, 1) and (2, 6).
fn double_only_board() -> Board {
    let mut b = Board::empty();
    b.set(0, 1, Some(Color::Blue));
    b.set(2, 6, Some(Color::Blue));
    b
}

/// One token of every color, none of them can ever meet its own color.
fn terminal_board() -> Board {
    let mut b = Board::empty();
    for (k, &c) in Color::all().iter().enumerate() {
        b.set(k, k, Some(c));
    }
    b
}

fn assert_legal_move_or_none(policy: &mut dyn Policy, b: &Board) {
    let legal = b.legal_moves();
    match policy.choose_move(b, &Tally::new()) {
        Some(mv) => {
            assert!(legal.contains(&mv), "{mv} not among legal moves");
            assert!(b.is_legal_move(mv));
        }
        None => assert!(legal.is_empty()),
    }
}

#[test]
fn random_policy_returns_legal_moves() {
    let b = fixture_board();
    let mut p = RandomPolicy::new(123);
    for _ in 0..1000 {
        assert_legal_move_or_none(&mut p, &b);
    }
}

#[test]
fn random_policy_falls_back_to_doubles() {
    let b = double_only_board();
    let mut p = RandomPolicy::new(5);
    for _ in 0..50 {
        match p.choose_move(&b, &Tally::new()) {
            Some(Move::Double(first, second)) => assert!(b.is_valid_double_move(first, second)),
            other => panic!("expected a double, got {other:?}"),
        }
    }
}

#[test]
fn random_policy_is_seed_deterministic_for_fixed_state() {
    let b = fixture_board();
    let mut p1 = RandomPolicy::new(42);
    let mut p2 = RandomPolicy::new(42);
    for _ in 0..12 {
        assert_eq!(p1.choose_move(&b, &Tally::new()), p2.choose_move(&b, &Tally::new()));
    }
}

#[test]
fn random_policy_does_not_mutate_board() {
    let b = fixture_board();
    let before = b.to_codes();
    let mut p = RandomPolicy::new(99);
    let _ = p.choose_move(&b, &Tally::new());
    assert_eq!(before, b.to_codes());
}

#[test]
fn random_policy_returns_none_on_terminal_board() {
    let mut p = RandomPolicy::new(1);
    assert_eq!(p.choose_move(&terminal_board(), &Tally::new()), None);
    assert_eq!(p.choose_move(&Board::empty(), &Tally::new()), None);
}

fn heuristic_policy() -> HeuristicPolicy {
    HeuristicPolicy::try_new(HeuristicConfig::default())
        .expect("heuristic policy fixture should build")
}

#[test]
fn heuristic_policy_returns_legal_moves() {
    let mut p = heuristic_policy();
    for b in [fixture_board(), double_only_board()] {
        assert_legal_move_or_none(&mut p, &b);
    }
}

#[test]
fn heuristic_policy_is_deterministic_for_fixed_state() {
    let b = fixture_board();
    let mut p = heuristic_policy();
    let m1 = p.choose_move(&b, &Tally::new());
    let m2 = p.choose_move(&b, &Tally::new());
    assert_eq!(m1, m2);
}

#[test]
fn heuristic_policy_does_not_mutate_board() {
    let b = fixture_board();
    let before = b.to_codes();
    let mut p = heuristic_policy();
    let _ = p.choose_move(&b, &Tally::new());
    assert_eq!(before, b.to_codes());
}

#[test]
fn heuristic_policy_returns_none_on_terminal_board() {
    let mut p = heuristic_policy();
    assert_eq!(p.choose_move(&terminal_board(), &Tally::new()), None);
}

#[test]
fn heuristic_policy_takes_the_triple_that_outpaces_the_reply() {
    let mut b = Board::empty();
    b.set(0, 0, Some(Color::Blue));
    b.set(0, 6, Some(Color::Blue));
    b.set(6, 0, Some(Color::Red));
    b.set(6, 3, Some(Color::Red));
    b.set(6, 6, Some(Color::Red));

    let mut p = heuristic_policy();
    assert_eq!(p.choose_move(&b, &Tally::new()), Some(Move::Single(6)));
}

#[test]
fn heuristic_policy_prefers_the_color_the_opponent_is_short_of() {
    // Row 0: R . R Y . Y .   both shifts collect red and yellow, four balls.
    // Row 6: B . B G . G .   both shifts collect blue and green, four balls.
    let mut b = Board::empty();
    for (row, pair, other) in [(0, Color::Red, Color::Yellow), (6, Color::Blue, Color::Green)] {
        b.set(row, 0, Some(pair));
        b.set(row, 2, Some(pair));
        b.set(row, 3, Some(other));
        b.set(row, 5, Some(other));
    }
    assert_eq!(
        b.legal_moves(),
        vec![Move::Single(0), Move::Single(6), Move::Single(7), Move::Single(13)]
    );

    // Counts in Blue, Yellow, Red, Orange, Purple, Green order.
    // Blue: mover 4, opponent 2, two left on the board.
    let mover = Tally::from_counts(&[4, 3, 5, 4, 4, 3]).expect("six counts");
    let opponent = Tally::opponent_of(&b, &mover);
    assert_eq!(opponent.counts(), [2, 3, 1, 4, 4, 3]);

    let mut p = heuristic_policy();
    let evals = p.evaluate(&b, &mover, &opponent);
    for e in &evals {
        // Every move gains four balls and one point, and every reply does the same.
        assert_eq!((e.gain_balls, e.gain_score), (4, 1), "{e:?}");
        assert_eq!((e.opp_best_gain, e.opp_gain_score), (4, 1), "{e:?}");
    }

    assert_eq!(p.choose_move(&b, &mover), Some(Move::Single(6)));
}

#[test]
fn heuristic_policy_plays_whole_games_legally() {
    for seed in [1u64, 2, 3] {
        let mut g = Game::new(seed).expect("seeded board");
        let mut p = heuristic_policy();
        let mut guard = 0;
        while !g.game_over {
            let r = g.play_turn(&mut p);
            assert!(!r.illegal_move, "seed {seed}: heuristic produced an illegal move");
            guard += 1;
            assert!(guard < 500);
        }
    }
}
