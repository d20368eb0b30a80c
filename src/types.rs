use serde::Serialize;

use crate::coord::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Line direction a Man of this color steps in: White moves up the
    /// board (towards lower matrix `x`), Black moves down.
    pub fn forward(self) -> i32 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// External row on which a Man of this color is promoted.
    pub fn promotion_row(self, dim: usize) -> u8 {
        match self {
            Self::White => dim as u8,
            Self::Black => 1,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "White" | "white" => Some(Self::White),
            "Black" | "black" => Some(Self::Black),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    Man,
    FlyingKing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self {
            color,
            rank: Rank::Man,
        }
    }

    pub const fn king(color: Color) -> Self {
        Self {
            color,
            rank: Rank::FlyingKing,
        }
    }

    pub fn to_char(self) -> char {
        match (self.color, self.rank) {
            (Color::White, Rank::Man) => 'x',
            (Color::Black, Rank::Man) => 'o',
            (Color::White, Rank::FlyingKing) => 'X',
            (Color::Black, Rank::FlyingKing) => 'O',
        }
    }
}

/// One square of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    NonPlayable,
    Empty,
    Occupied(Piece),
}

impl Cell {
    pub fn from_char(ch: char) -> Option<Self> {
        let cell = match ch {
            '-' => Self::NonPlayable,
            ' ' => Self::Empty,
            'x' => Self::Occupied(Piece::man(Color::White)),
            'o' => Self::Occupied(Piece::man(Color::Black)),
            'X' => Self::Occupied(Piece::king(Color::White)),
            'O' => Self::Occupied(Piece::king(Color::Black)),
            _ => return None,
        };
        Some(cell)
    }

    pub fn to_char(self) -> char {
        match self {
            Self::NonPlayable => '-',
            Self::Empty => ' ',
            Self::Occupied(piece) => piece.to_char(),
        }
    }

    pub fn piece(self) -> Option<Piece> {
        match self {
            Self::Occupied(piece) => Some(piece),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

/// A move of one piece. Identity is `(start, end)` only: two moves over
/// different capture paths between the same squares compare equal.
#[derive(Debug, Clone, Eq)]
pub struct Move {
    pub start: Coord,
    pub end: Coord,
    /// Captured squares in jump order. Filled in by move generation.
    pub captured: Vec<Coord>,
}

impl Move {
    pub fn new(start: impl Into<Coord>, end: impl Into<Coord>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            captured: Vec::new(),
        }
    }

    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

/// Public board snapshot returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardState {
    pub dim: usize,
    /// Serialized rows, top line first.
    pub rows: Vec<String>,
    pub white_count: usize,
    pub black_count: usize,
}

/// Serializable legal move for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveInfo {
    pub start: Coord,
    pub end: Coord,
    pub captured: Vec<Coord>,
}

impl From<&Move> for MoveInfo {
    fn from(mv: &Move) -> Self {
        Self {
            start: mv.start,
            end: mv.end,
            captured: mv.captured.clone(),
        }
    }
}
