//! Error kinds raised by the engine. Every failing call leaves the board as it was.

use crate::coord::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoordError {
    #[error("coordinate {row}{col} is outside a {dim}x{dim} board")]
    OutOfRange { row: u8, col: char, dim: usize },

    #[error("checkers notation index {0} is outside 1..=32")]
    NotationOutOfRange(u8),
}

/// Malformed serialized board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized cell character {ch:?} at row {row}, column {col}")]
    UnknownChar { row: usize, col: usize, ch: char },

    #[error("board dimension {0} is not supported here")]
    UnsupportedDimension(usize),

    #[error(transparent)]
    Coord(#[from] CoordError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no piece at {0}")]
    NoPieceAtSource(Coord),

    #[error("target square {0} is not a free playable square")]
    TargetOccupied(Coord),

    #[error("{start} -> {end} is not a legal move")]
    IllegalMove { start: Coord, end: Coord },

    #[error("a capture of {required} pieces is available, this move captures {found}")]
    PrecedenceViolation { required: usize, found: usize },

    #[error(transparent)]
    Coord(#[from] CoordError),
}
