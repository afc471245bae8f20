// engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod color;
mod constants;
mod error;
mod game;
mod generate;
mod grid;
mod moves;
mod tally;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use color::{Color, cell_code};
pub use constants::{
    BALLS_PER_COLOR, BALLS_PER_POINT, CELLS, CENTER, DIM, DOUBLE_MOVES, NUM_COLORS,
    SINGLE_MOVES, Shift, decode_double_move, decode_single_move, encode_double_move,
};
pub use error::{CodecError, GenerationError, MoveError};
pub use game::{Game, NUM_PLAYERS, Player, StepResult};
pub use generate::{GenerationSpec, generate_board};
pub use grid::Board;
pub use moves::{Move, SimMove};
pub use tally::{Tally, score_of};
