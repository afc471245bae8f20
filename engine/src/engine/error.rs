// engine/src/engine/error.rs
#![forbid(unsafe_code)]

/// Malformed snapshot at the interchange boundary (board codes or tally counts).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("expected {expected} values, got {got}")]
    Length { expected: usize, got: usize },
    #[error("invalid color code {code} at cell {cell}")]
    ColorCode { cell: usize, code: u8 },
}

/// Move indices rejected before they reach the board.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("move index {0} out of range 0..=27")]
    OutOfRange(i64),
    #[error("a move has one or two indices, got {0}")]
    Arity(usize),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no playable board after {0} attempts")]
    Exhausted(u32),
}
