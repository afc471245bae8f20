// engine/src/engine/game.rs
#![forbid(unsafe_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::color::Color;
use crate::engine::error::GenerationError;
use crate::engine::generate::{GenerationSpec, generate_board};
use crate::engine::grid::Board;
use crate::engine::moves::Move;
use crate::engine::tally::Tally;
use crate::policy::Policy;

pub const NUM_PLAYERS: usize = 2;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Player {
    pub name: String,
    pub tally: Tally,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tally: Tally::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.tally.score()
    }

    pub fn balls(&self) -> u32 {
        self.tally.total()
    }
}

#[derive(Clone, Debug, Default)]
pub struct StepResult {
    /// True iff the game is over after this call (or already was).
    pub terminated: bool,
    /// Colors removed from the board and credited to the mover.
    pub collected: Vec<Color>,
    /// True iff the move was rejected; in that case the call is a no-op.
    pub illegal_move: bool,
}

/// Owns the live board and both players' tallies; applies one move per turn.
#[derive(Clone, Debug)]
pub struct Game {
    pub board: Board,
    pub players: [Player; NUM_PLAYERS],

    /// Index of the player to move.
    pub current: usize,
    pub turns: u64,
    pub game_over: bool,
}

impl Game {
    pub fn new(seed: u64) -> Result<Self, GenerationError> {
        Self::new_with_spec(seed, GenerationSpec::default())
    }

    pub fn new_with_spec(seed: u64, spec: GenerationSpec) -> Result<Self, GenerationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = generate_board(&mut rng, &spec)?;
        Ok(Self::with_board(board))
    }

    /// Starts from an arbitrary snapshot (e.g. one received from a server).
    pub fn with_board(board: Board) -> Self {
        let game_over = board.is_end_game();
        Self {
            board,
            players: [Player::new("player 1"), Player::new("player 2")],
            current: 0,
            turns: 0,
            game_over,
        }
    }

    pub fn with_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.players[0].name = first.into();
        self.players[1].name = second.into();
        self
    }

    /// Fresh board, empty tallies, player 0 to move. Names are kept.
    pub fn reset(&mut self, seed: u64, spec: GenerationSpec) -> Result<(), GenerationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.board = generate_board(&mut rng, &spec)?;
        for p in &mut self.players {
            p.tally = Tally::new();
        }
        self.current = 0;
        self.turns = 0;
        self.game_over = self.board.is_end_game();
        Ok(())
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    // -------------------------------------------------------------------------
    // Mutating step
    // -------------------------------------------------------------------------

    /// Applies a move for the player to act.
    ///
    /// Engine semantics:
    /// - Illegal moves (invalid, or a double while a single exists) are a no-op and return
    ///   `illegal_move=true` without passing the turn.
    /// - The game ends once the board offers neither a single nor a double move.
    pub fn step(&mut self, mv: Move) -> StepResult {
        if self.game_over {
            return StepResult {
                terminated: true,
                ..StepResult::default()
            };
        }

        if !self.board.is_legal_move(mv) {
            return StepResult {
                illegal_move: true,
                ..StepResult::default()
            };
        }

        let sim = self.board.simulate(mv);
        self.board = sim.board_after_collect;
        self.players[self.current].tally.add_all(&sim.collected);
        self.turns += 1;
        self.current = 1 - self.current;
        self.game_over = self.board.is_end_game();

        StepResult {
            terminated: self.game_over,
            collected: sim.collected,
            illegal_move: false,
        }
    }

    /// Asks `policy` for the mover's choice on a copy of the board and applies it.
    /// No move on a live board counts as illegal.
    pub fn play_turn(&mut self, policy: &mut dyn Policy) -> StepResult {
        if self.game_over {
            return StepResult {
                terminated: true,
                ..StepResult::default()
            };
        }
        let snapshot = self.board;
        let mover = self.players[self.current].tally;
        match policy.choose_move(&snapshot, &mover) {
            Some(mv) => self.step(mv),
            None => StepResult {
                illegal_move: true,
                ..StepResult::default()
            },
        }
    }

    /// Higher score wins; equal scores fall back to collected balls; otherwise a draw.
    pub fn winner(&self) -> Option<usize> {
        let key = |p: &Player| (p.score(), p.balls());
        let (a, b) = (key(&self.players[0]), key(&self.players[1]));
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => Some(0),
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn render_ascii(&self) -> String {
        let mut s = self.board.render_ascii();
        for (i, p) in self.players.iter().enumerate() {
            let marker = if i == self.current && !self.game_over {
                '*'
            } else {
                ' '
            };
            s.push_str(&format!(
                "{marker} {}: score={} balls={} [",
                p.name,
                p.score(),
                p.balls()
            ));
            for (k, &c) in Color::all().iter().enumerate() {
                if k > 0 {
                    s.push(' ');
                }
                s.push_str(&format!("{}={}", c.glyph(), p.tally.get(c)));
            }
            s.push_str("]\n");
        }
        s.push_str(&format!("turns={} over={}\n", self.turns, self.game_over));
        s
    }
}
